use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{CreatureId, ReplayError};

use super::Dice;

/// Errors raised while turning an effect into log entries.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectError {
    #[error("creature {0} is not dead and cannot be resurrected")]
    NotDead(CreatureId),

    #[error("dice expression {0} cannot be rolled")]
    UnrollableDice(Dice),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Replay(#[from] ReplayError),
}

impl GameError for EffectError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotDead(_) | Self::UnrollableDice(_) => ErrorSeverity::Validation,
            Self::Oracle(error) => error.severity(),
            Self::Replay(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotDead(_) => "EFFECT_TARGET_NOT_DEAD",
            Self::UnrollableDice(_) => "EFFECT_UNROLLABLE_DICE",
            Self::Oracle(error) => error.error_code(),
            Self::Replay(error) => error.error_code(),
        }
    }
}
