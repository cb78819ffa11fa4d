use crate::state::{Creature, CreatureLog};

use super::{Effect, EffectContext, EffectError, condition, damage};

/// Applies `effect` to a copy of `creature`.
///
/// Returns the changed creature together with the log entries that produce it.
/// `Multi(a, b)` applies `a` and then `b` to the already-changed creature, so
/// the entries come out in application order.
pub fn apply_effect(
    creature: &Creature,
    effect: &Effect,
    ctx: &mut EffectContext<'_>,
) -> Result<(Creature, Vec<CreatureLog>), EffectError> {
    let mut change = CreatureChange::new(creature.clone());
    change.effect(effect, ctx)?;
    Ok(change.done())
}

/// A creature being changed one log entry at a time.
///
/// Every entry is applied as it is pushed, so later steps see the effect of
/// earlier ones and the recorded entries always replay to the final creature.
pub(crate) struct CreatureChange {
    creature: Creature,
    logs: Vec<CreatureLog>,
}

impl CreatureChange {
    pub(crate) fn new(creature: Creature) -> Self {
        Self {
            creature,
            logs: Vec::new(),
        }
    }

    pub(crate) fn creature(&self) -> &Creature {
        &self.creature
    }

    pub(crate) fn push(&mut self, log: CreatureLog) -> Result<(), EffectError> {
        self.creature.apply_log(&log)?;
        self.logs.push(log);
        Ok(())
    }

    pub(crate) fn done(self) -> (Creature, Vec<CreatureLog>) {
        (self.creature, self.logs)
    }

    pub(crate) fn effect(
        &mut self,
        effect: &Effect,
        ctx: &mut EffectContext<'_>,
    ) -> Result<(), EffectError> {
        match effect {
            Effect::Damage(dice) => {
                let roll = ctx.roll(dice, self.creature.id)?;
                damage::damage(self, roll, ctx)
            }
            Effect::Heal(dice) => {
                let roll = ctx.roll(dice, self.creature.id)?;
                damage::heal(self, roll)
            }
            Effect::ApplyCondition(def) => condition::attach(self, def, ctx),
            Effect::GenerateEnergy(amount) => damage::generate_energy(self, *amount),
            Effect::Interrupt => {
                let casting: Vec<_> = self.creature.casting().cloned().collect();
                for ability in casting {
                    self.push(CreatureLog::CancelCast { ability })?;
                }
                Ok(())
            }
            Effect::Resurrect => self.resurrect(ctx),
            Effect::Multi(first, second) => {
                self.effect(first, ctx)?;
                self.effect(second, ctx)
            }
        }
    }

    fn resurrect(&mut self, ctx: &mut EffectContext<'_>) -> Result<(), EffectError> {
        if !self.creature.is_dead() {
            return Err(EffectError::NotDead(self.creature.id));
        }
        let policy = ctx.resurrection()?;

        let dead: Vec<_> = self.creature.dead_conditions().collect();
        for id in dead {
            self.push(CreatureLog::RemoveCondition { id })?;
        }

        let target = policy.restored_health(self.creature.health.maximum);
        let amount = target.saturating_sub(self.creature.health.current);
        self.push(CreatureLog::Heal {
            amount,
            dice: Vec::new(),
        })
    }
}
