//! Replay errors.
//!
//! Raised when a log entry does not fit the state it is applied to. Entries
//! produced by the engine always fit the state they were recorded against, so
//! any of these means the log and the state have diverged.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{AbilityId, ConditionId, CreatureId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReplayError {
    #[error("creature {0} does not exist")]
    CreatureNotFound(CreatureId),

    #[error("creature {0} already exists")]
    CreatureExists(CreatureId),

    #[error("creature {creature} has no condition {condition}")]
    ConditionNotFound {
        creature: CreatureId,
        condition: ConditionId,
    },

    #[error("condition {condition} on creature {creature} has no turns left to decrement")]
    ConditionNotDecrementable {
        creature: CreatureId,
        condition: ConditionId,
    },

    #[error("creature {creature} does not hold ability {ability}")]
    AbilityNotHeld {
        creature: CreatureId,
        ability: AbilityId,
    },

    #[error("creature {creature} needs {required} energy but has {available}")]
    NotEnoughEnergy {
        creature: CreatureId,
        required: u32,
        available: u32,
    },

    #[error("no combat is active")]
    NotInCombat,

    #[error("a combat is already active")]
    AlreadyInCombat,

    #[error("creature {0} is not in combat")]
    NotACombatant(CreatureId),

    #[error("creature {0} is already in combat")]
    AlreadyACombatant(CreatureId),

    #[error("turn of {expected} cannot be ended while it is {actual}'s turn")]
    NotCurrentTurn {
        expected: CreatureId,
        actual: CreatureId,
    },

    #[error("initiative index {index} is out of bounds for {len} combatants")]
    InitiativeOutOfBounds { index: usize, len: usize },

    #[error("combat cannot start without creatures")]
    EmptyCombat,

    #[error("creature {0} cannot be removed while in combat")]
    CreatureInCombat(CreatureId),

    #[error("rollback entries are resolved by the history, not by game state")]
    RollbackNotReplayable,
}

impl GameError for ReplayError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        use ReplayError::*;
        match self {
            CreatureNotFound(_) => "REPLAY_CREATURE_NOT_FOUND",
            CreatureExists(_) => "REPLAY_CREATURE_EXISTS",
            ConditionNotFound { .. } => "REPLAY_CONDITION_NOT_FOUND",
            ConditionNotDecrementable { .. } => "REPLAY_CONDITION_NOT_DECREMENTABLE",
            AbilityNotHeld { .. } => "REPLAY_ABILITY_NOT_HELD",
            NotEnoughEnergy { .. } => "REPLAY_NOT_ENOUGH_ENERGY",
            NotInCombat => "REPLAY_NOT_IN_COMBAT",
            AlreadyInCombat => "REPLAY_ALREADY_IN_COMBAT",
            NotACombatant(_) => "REPLAY_NOT_A_COMBATANT",
            AlreadyACombatant(_) => "REPLAY_ALREADY_A_COMBATANT",
            NotCurrentTurn { .. } => "REPLAY_NOT_CURRENT_TURN",
            InitiativeOutOfBounds { .. } => "REPLAY_INITIATIVE_OUT_OF_BOUNDS",
            EmptyCombat => "REPLAY_EMPTY_COMBAT",
            CreatureInCombat(_) => "REPLAY_CREATURE_IN_COMBAT",
            RollbackNotReplayable => "REPLAY_ROLLBACK_NOT_REPLAYABLE",
        }
    }
}
