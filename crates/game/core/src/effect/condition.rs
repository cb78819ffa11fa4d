//! Condition definitions and the turn-end condition tick.
//!
//! Conditions are plain data attached to a creature by id. Their only behaviour
//! lives here: how they decay at the end of the owner's turn and which
//! recurring effects they fire before decaying.

use crate::state::{ConditionId, Creature, CreatureLog};

use super::{Effect, EffectContext, EffectError, apply::CreatureChange};

/// How long a condition lasts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Duration {
    /// Lasts through this many of the owner's turn-end ticks, then is removed on the next one.
    Timed(u32),
    /// Never decays; removed only by an explicit command (or resurrection, for `Dead`).
    Interminate,
}

impl Duration {
    pub fn is_expiring(self) -> bool {
        matches!(self, Duration::Timed(0))
    }
}

/// What a condition does while it is attached.
#[derive(Clone, Debug, PartialEq, Eq, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ConditionKind {
    /// Adds to every incoming damage amount.
    DamageIncrease(u32),
    /// Subtracts from every incoming damage amount.
    DamageDecrease(u32),
    /// Subtracts from every incoming damage amount (armor-like sources).
    IncomingDamageReduction(u32),
    /// Fires the effect on the owner at each of its turn-end ticks.
    RecurringEffect(Box<Effect>),
    Incapacitated,
    Dead,
}

impl ConditionKind {
    /// True for conditions that stop a creature from acting and moving.
    pub fn disables(&self) -> bool {
        matches!(self, ConditionKind::Incapacitated | ConditionKind::Dead)
    }
}

/// A named condition definition.
///
/// Re-applying a condition with the same name replaces the existing one
/// instead of stacking.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionDef {
    pub name: String,
    pub duration: Duration,
    pub kind: ConditionKind,
}

impl ConditionDef {
    pub const DEAD: &'static str = "dead";

    pub fn new(name: impl Into<String>, duration: Duration, kind: ConditionKind) -> Self {
        Self {
            name: name.into(),
            duration,
            kind,
        }
    }

    /// The condition applied implicitly when health reaches zero.
    pub fn dead() -> Self {
        Self::new(Self::DEAD, Duration::Interminate, ConditionKind::Dead)
    }
}

/// A condition bound to a creature.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedCondition {
    pub id: ConditionId,
    pub condition: ConditionDef,
    /// Turn-end ticks left before removal. Only meaningful for `Timed`.
    pub remaining: Duration,
}

impl AppliedCondition {
    pub fn new(id: ConditionId, condition: ConditionDef) -> Self {
        let remaining = condition.duration;
        Self {
            id,
            condition,
            remaining,
        }
    }

    pub fn kind(&self) -> &ConditionKind {
        &self.condition.kind
    }
}

// ============================================================================
// Applying & Ticking
// ============================================================================

/// Attaches `condition`, reusing the id of an existing condition with the same name.
pub(super) fn attach(
    change: &mut CreatureChange,
    condition: &ConditionDef,
    ctx: &mut EffectContext<'_>,
) -> Result<(), EffectError> {
    let id = match change.creature().condition_named(&condition.name) {
        Some(existing) => existing.id,
        None => ctx.allocate_condition_id(),
    };
    change.push(CreatureLog::ApplyCondition {
        id,
        condition: condition.clone(),
    })
}

/// Runs the end-of-turn tick for one creature.
///
/// In order:
/// 1. every recurring effect whose condition is not about to expire fires once
/// 2. timed conditions decrement, or are removed once they have no turns left
/// 3. ability cooldowns decrement
/// 4. in-progress casts move one turn closer to completion
pub fn tick(
    creature: &Creature,
    ctx: &mut EffectContext<'_>,
) -> Result<(Creature, Vec<CreatureLog>), EffectError> {
    let mut change = CreatureChange::new(creature.clone());

    let recurring: Vec<Effect> = creature
        .conditions
        .values()
        .filter(|applied| !applied.remaining.is_expiring())
        .filter_map(|applied| match applied.kind() {
            ConditionKind::RecurringEffect(effect) => Some((**effect).clone()),
            _ => None,
        })
        .collect();
    for effect in &recurring {
        change.effect(effect, ctx)?;
    }

    // Conditions added by the recurring effects above decay with the rest.
    let decays: Vec<CreatureLog> = change
        .creature()
        .conditions
        .values()
        .filter_map(|applied| match applied.remaining {
            Duration::Interminate => None,
            Duration::Timed(0) => Some(CreatureLog::RemoveCondition { id: applied.id }),
            Duration::Timed(_) => Some(CreatureLog::DecrementConditionRemaining { id: applied.id }),
        })
        .collect();
    for log in decays {
        change.push(log)?;
    }

    let budgets: Vec<CreatureLog> = change
        .creature()
        .abilities
        .iter()
        .flat_map(|(ability, status)| {
            let cooldown = (status.cooldown > 0).then(|| CreatureLog::DecrementCooldown {
                ability: ability.clone(),
            });
            let cast = matches!(status.cast, Some(turns) if turns > 0).then(|| {
                CreatureLog::DecrementCastRemaining {
                    ability: ability.clone(),
                }
            });
            cooldown.into_iter().chain(cast)
        })
        .collect();
    for log in budgets {
        change.push(log)?;
    }

    Ok(change.done())
}
