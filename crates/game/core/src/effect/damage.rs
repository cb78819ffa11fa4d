//! Damage & health pipeline.
//!
//! Raw amounts are transformed by the target's active conditions, clamped to
//! the creature's pools, and only then logged. The logged amount is what was
//! actually applied, so replaying a `Damage` entry never re-runs this math.

use crate::state::{Creature, CreatureLog};

use super::{ConditionDef, ConditionKind, EffectContext, EffectError, Roll, apply::CreatureChange};

/// Incoming damage after the target's condition modifiers, never negative.
pub fn modified_damage(creature: &Creature, raw: u32) -> u32 {
    let (increase, decrease) =
        creature
            .conditions
            .values()
            .fold((0u64, 0u64), |(up, down), applied| match applied.kind() {
                ConditionKind::DamageIncrease(n) => (up + *n as u64, down),
                ConditionKind::DamageDecrease(n) | ConditionKind::IncomingDamageReduction(n) => {
                    (up, down + *n as u64)
                }
                _ => (up, down),
            });
    (raw as u64 + increase)
        .saturating_sub(decrease)
        .min(u32::MAX as u64) as u32
}

/// Logs damage from `roll`, and the implicit death it may cause.
pub(super) fn damage(
    change: &mut CreatureChange,
    roll: Roll,
    ctx: &mut EffectContext<'_>,
) -> Result<(), EffectError> {
    let before = change.creature().health.current;
    let amount = modified_damage(change.creature(), roll.total).min(before);
    change.push(CreatureLog::Damage {
        amount,
        dice: roll.dice,
    })?;

    if before > 0 && change.creature().health.current == 0 {
        super::condition::attach(change, &ConditionDef::dead(), ctx)?;
    }
    Ok(())
}

/// Logs healing from `roll`, capped at the missing health.
pub(super) fn heal(change: &mut CreatureChange, roll: Roll) -> Result<(), EffectError> {
    let amount = roll.total.min(change.creature().health.missing());
    change.push(CreatureLog::Heal {
        amount,
        dice: roll.dice,
    })
}

/// Logs energy generation, capped at the missing energy.
pub(super) fn generate_energy(change: &mut CreatureChange, amount: u32) -> Result<(), EffectError> {
    let amount = amount.min(change.creature().energy.missing());
    change.push(CreatureLog::GenerateEnergy(amount))
}
