//! Ability use.

use crate::action::ability::use_ability;
use crate::engine::{CommandTransition, StateReducer};
use crate::env::GameEnv;
use crate::state::{AbilityId, CreatureId, GameState};

use super::{CommandError, ValidationError};

/// The active combatant uses one of its abilities.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActCommand {
    pub ability: AbilityId,
    /// Required by abilities with a creature-targeted effect.
    pub target: Option<CreatureId>,
}

impl CommandTransition for ActCommand {
    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), CommandError> {
        state
            .current_combatant()
            .ok_or(ValidationError::NotInCombat)?;
        Ok(())
    }

    fn apply(&self, reducer: &mut StateReducer<'_>, env: &GameEnv<'_>) -> Result<(), CommandError> {
        let caster = reducer
            .state()
            .current_combatant()
            .ok_or(ValidationError::NotInCombat)?;
        use_ability(reducer, caster, &self.ability, self.target, env)?;
        Ok(())
    }
}

/// A creature outside combat uses one of its abilities.
///
/// Combatants act on their turn through [`ActCommand`] instead.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActOutOfCombatCommand {
    pub creature: CreatureId,
    pub ability: AbilityId,
    pub target: Option<CreatureId>,
}

impl CommandTransition for ActOutOfCombatCommand {
    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), CommandError> {
        if state.creature(self.creature).is_none() {
            return Err(ValidationError::CreatureNotFound(self.creature).into());
        }
        if state.in_combat(self.creature) {
            return Err(ValidationError::CreatureInCombat(self.creature).into());
        }
        Ok(())
    }

    fn apply(&self, reducer: &mut StateReducer<'_>, env: &GameEnv<'_>) -> Result<(), CommandError> {
        use_ability(reducer, self.creature, &self.ability, self.target, env)?;
        Ok(())
    }
}
