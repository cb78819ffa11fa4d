//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{AbilityId, ConditionKey};

/// Errors that occur when accessing oracle data.
///
/// A missing oracle is fatal: the engine cannot resolve commands without it.
/// A missing catalog entry means the command referenced something unknown.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("AbilityOracle not available")]
    AbilitiesNotAvailable,

    #[error("ConditionOracle not available")]
    ConditionsNotAvailable,

    #[error("MapOracle not available")]
    MapNotAvailable,

    #[error("ConfigOracle not available")]
    ConfigNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,

    #[error("ability '{0}' is not in the catalog")]
    AbilityNotFound(AbilityId),

    #[error("condition '{0}' is not in the catalog")]
    ConditionNotFound(ConditionKey),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            AbilitiesNotAvailable | ConditionsNotAvailable | MapNotAvailable
            | ConfigNotAvailable | RngNotAvailable => ErrorSeverity::Fatal,

            AbilityNotFound(_) | ConditionNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            AbilitiesNotAvailable => "ORACLE_ABILITIES_NOT_AVAILABLE",
            ConditionsNotAvailable => "ORACLE_CONDITIONS_NOT_AVAILABLE",
            MapNotAvailable => "ORACLE_MAP_NOT_AVAILABLE",
            ConfigNotAvailable => "ORACLE_CONFIG_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
            AbilityNotFound(_) => "ORACLE_ABILITY_NOT_FOUND",
            ConditionNotFound(_) => "ORACLE_CONDITION_NOT_FOUND",
        }
    }
}
