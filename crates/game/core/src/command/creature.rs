//! Creature lifecycle and game-master edits.

use crate::effect::{Effect, EffectContext, apply_effect};
use crate::engine::{CommandTransition, StateReducer};
use crate::env::GameEnv;
use crate::state::{
    AbilityStatus, ConditionId, ConditionKey, Creature, CreatureCreation, CreatureId, CreatureLog,
    GameState, LogEntry, Point3,
};

use super::{CommandError, ValidationError};

fn existing(state: &GameState, id: CreatureId) -> Result<&Creature, ValidationError> {
    state
        .creature(id)
        .ok_or(ValidationError::CreatureNotFound(id))
}

/// Adds a creature to the arena.
///
/// Missing pools and speed fall back to the configured defaults. Every listed
/// ability must be in the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateCreatureCommand {
    pub creation: CreatureCreation,
}

impl CommandTransition for CreateCreatureCommand {
    fn pre_validate(&self, _state: &GameState, env: &GameEnv<'_>) -> Result<(), CommandError> {
        for ability in &self.creation.abilities {
            env.ability(ability)?;
        }
        Ok(())
    }

    fn apply(&self, reducer: &mut StateReducer<'_>, env: &GameEnv<'_>) -> Result<(), CommandError> {
        let config = env.config()?;
        let creation = &self.creation;

        let mut creature = Creature::new(
            reducer.state().peek_creature_id(),
            creation.name.clone(),
            creation.max_health.unwrap_or(config.default_max_health()),
            creation.max_energy.unwrap_or(config.default_max_energy()),
        );
        creature.note = creation.note.clone();
        creature.position = creation.position;
        creature.speed = creation.speed.unwrap_or(config.default_speed());
        creature.abilities = creation
            .abilities
            .iter()
            .map(|ability| (ability.clone(), AbilityStatus::default()))
            .collect();

        reducer.record(LogEntry::CreateCreature(creature))?;
        Ok(())
    }
}

/// Removes a creature from the arena. Combatants must leave combat first.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemoveCreatureCommand {
    pub creature: CreatureId,
}

impl CommandTransition for RemoveCreatureCommand {
    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), CommandError> {
        existing(state, self.creature)?;
        if state.in_combat(self.creature) {
            return Err(ValidationError::CreatureInCombat(self.creature).into());
        }
        Ok(())
    }

    fn apply(
        &self,
        reducer: &mut StateReducer<'_>,
        _env: &GameEnv<'_>,
    ) -> Result<(), CommandError> {
        reducer.record(LogEntry::RemoveCreature(self.creature))?;
        Ok(())
    }
}

/// Places a creature anywhere, outside any movement budget.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetCreaturePositionCommand {
    pub creature: CreatureId,
    pub position: Point3,
}

impl CommandTransition for SetCreaturePositionCommand {
    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), CommandError> {
        existing(state, self.creature)?;
        Ok(())
    }

    fn apply(
        &self,
        reducer: &mut StateReducer<'_>,
        _env: &GameEnv<'_>,
    ) -> Result<(), CommandError> {
        reducer.record(LogEntry::creature(
            self.creature,
            CreatureLog::SetPosition(self.position),
        ))?;
        Ok(())
    }
}

/// Attaches a catalog condition to a creature.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ApplyConditionCommand {
    pub creature: CreatureId,
    pub condition: ConditionKey,
}

impl CommandTransition for ApplyConditionCommand {
    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), CommandError> {
        existing(state, self.creature)?;
        env.condition(&self.condition)?;
        Ok(())
    }

    fn apply(&self, reducer: &mut StateReducer<'_>, env: &GameEnv<'_>) -> Result<(), CommandError> {
        let effect = Effect::ApplyCondition(env.condition(&self.condition)?);
        let state = reducer.state();
        let creature = existing(state, self.creature)?;
        let mut ctx = EffectContext::new(state, *env);
        let (_, logs) = apply_effect(creature, &effect, &mut ctx)?;
        reducer.record_creature(self.creature, logs)?;
        Ok(())
    }
}

/// Detaches one applied condition by id.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemoveConditionCommand {
    pub creature: CreatureId,
    pub condition: ConditionId,
}

impl CommandTransition for RemoveConditionCommand {
    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), CommandError> {
        let creature = existing(state, self.creature)?;
        if !creature.conditions.contains_key(&self.condition) {
            return Err(ValidationError::AppliedConditionNotFound {
                creature: self.creature,
                condition: self.condition,
            }
            .into());
        }
        Ok(())
    }

    fn apply(
        &self,
        reducer: &mut StateReducer<'_>,
        _env: &GameEnv<'_>,
    ) -> Result<(), CommandError> {
        reducer.record(LogEntry::creature(
            self.creature,
            CreatureLog::RemoveCondition { id: self.condition },
        ))?;
        Ok(())
    }
}
