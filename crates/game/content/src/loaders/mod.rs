//! Content loaders for reading game data from files.
//!
//! Catalogs are RON, the game configuration is TOML. Every loader has a
//! `parse` entry point for in-memory text and a `load` entry point for paths.

pub mod abilities;
pub mod conditions;
pub mod config;
pub mod factory;

pub use abilities::AbilityLoader;
pub use conditions::ConditionLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;

use std::path::Path;

use game_core::{ConditionDef, ConditionKind, Dice, Effect};

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Rejects effects the engine could never resolve.
pub(crate) fn check_effect(effect: &Effect) -> LoadResult<()> {
    match effect {
        Effect::Damage(dice) | Effect::Heal(dice) => check_dice(dice),
        Effect::ApplyCondition(def) => check_condition(def),
        Effect::Multi(first, second) => {
            check_effect(first)?;
            check_effect(second)
        }
        Effect::GenerateEnergy(_) | Effect::Interrupt | Effect::Resurrect => Ok(()),
    }
}

/// Rejects conditions that would break their owner's turn end.
pub(crate) fn check_condition(def: &ConditionDef) -> LoadResult<()> {
    if let ConditionKind::RecurringEffect(effect) = &def.kind {
        // Resurrecting the living fails, so the tick would never succeed.
        if effect.revives() {
            anyhow::bail!("condition '{}' resurrects its owner every turn", def.name);
        }
        check_effect(effect)
            .map_err(|e| e.context(format!("in condition '{}'", def.name)))?;
    }
    Ok(())
}

fn check_dice(dice: &Dice) -> LoadResult<()> {
    if dice.count > 0 && dice.sides == 0 {
        anyhow::bail!("{}d0 has dice without faces", dice.count);
    }
    if dice.count > Dice::MAX_COUNT {
        anyhow::bail!(
            "{}d{} rolls more than {} dice",
            dice.count,
            dice.sides,
            Dice::MAX_COUNT
        );
    }
    Ok(())
}
