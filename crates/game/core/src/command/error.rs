//! Command rejection errors.
//!
//! A rejected command never changes state. The error says why, and its
//! [`GameError`] severity says whether retrying later can help.

use crate::action::{InvalidTargetReason, TargetError};
use crate::effect::{Dice, EffectError};
use crate::env::OracleError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{AbilityId, ConditionId, CreatureId, Distance, Point3, ReplayError};

// ============================================================================
// Validation Errors
// ============================================================================

/// The command is not legal against the current state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("creature {0} not found")]
    CreatureNotFound(CreatureId),

    #[error("creature {creature} does not have ability '{ability}'")]
    CreatureLacksAbility {
        creature: CreatureId,
        ability: AbilityId,
    },

    #[error("creature {creature} has no condition {condition}")]
    AppliedConditionNotFound {
        creature: CreatureId,
        condition: ConditionId,
    },

    /// Dead or incapacitated.
    #[error("creature {0} cannot act")]
    CannotAct(CreatureId),

    #[error("creature {0} cannot move")]
    CannotMove(CreatureId),

    #[error("not in combat")]
    NotInCombat,

    #[error("already in combat")]
    AlreadyInCombat,

    #[error("combat must have at least one creature")]
    CombatMustHaveCreatures,

    #[error("creature {0} is listed more than once")]
    DuplicateCombatant(CreatureId),

    #[error("combat needs at least one living creature")]
    NoLivingCombatants,

    #[error("creature {0} is in combat")]
    CreatureInCombat(CreatureId),

    #[error("creature {0} is not in combat")]
    CreatureNotInCombat(CreatureId),

    #[error("initiative index {index} out of bounds for {len} combatants")]
    InitiativeOutOfBounds { index: usize, len: usize },

    /// Multi-turn casts only advance on combat turns.
    #[error("ability '{0}' has a cast time and can only be used in combat")]
    CastRequiresCombat(AbilityId),

    #[error("position {0} is blocked by terrain")]
    Blocked(Point3),

    #[error("position {position} is occupied by {occupant}")]
    Occupied {
        position: Point3,
        occupant: CreatureId,
    },

    #[error("rollback needs a history")]
    RollbackRequiresHistory,

    #[error("dice expression {0} cannot be rolled")]
    UnrollableDice(Dice),
}

impl GameError for ValidationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use ValidationError::*;
        match self {
            CreatureNotFound(_) => "VALIDATION_CREATURE_NOT_FOUND",
            CreatureLacksAbility { .. } => "VALIDATION_CREATURE_LACKS_ABILITY",
            AppliedConditionNotFound { .. } => "VALIDATION_CONDITION_NOT_FOUND",
            CannotAct(_) => "VALIDATION_CANNOT_ACT",
            CannotMove(_) => "VALIDATION_CANNOT_MOVE",
            NotInCombat => "VALIDATION_NOT_IN_COMBAT",
            AlreadyInCombat => "VALIDATION_ALREADY_IN_COMBAT",
            CombatMustHaveCreatures => "VALIDATION_COMBAT_MUST_HAVE_CREATURES",
            DuplicateCombatant(_) => "VALIDATION_DUPLICATE_COMBATANT",
            NoLivingCombatants => "VALIDATION_NO_LIVING_COMBATANTS",
            CreatureInCombat(_) => "VALIDATION_CREATURE_IN_COMBAT",
            CreatureNotInCombat(_) => "VALIDATION_CREATURE_NOT_IN_COMBAT",
            InitiativeOutOfBounds { .. } => "VALIDATION_INITIATIVE_OUT_OF_BOUNDS",
            CastRequiresCombat(_) => "VALIDATION_CAST_REQUIRES_COMBAT",
            Blocked(_) => "VALIDATION_BLOCKED",
            Occupied { .. } => "VALIDATION_OCCUPIED",
            RollbackRequiresHistory => "VALIDATION_ROLLBACK_REQUIRES_HISTORY",
            UnrollableDice(_) => "VALIDATION_UNROLLABLE_DICE",
        }
    }
}

// ============================================================================
// Budget Errors
// ============================================================================

/// A per-turn or per-creature budget is exhausted.
///
/// Unlike validation errors these can succeed later: energy comes back,
/// cooldowns and casts tick down, movement resets on the next turn.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BudgetError {
    #[error("not enough energy: {required} required, {available} available")]
    NotEnoughEnergy { required: u32, available: u32 },

    #[error("ability '{ability}' is on cooldown for {remaining} more turns")]
    OnCooldown { ability: AbilityId, remaining: u32 },

    #[error("ability '{ability}' needs {remaining} more turns of casting")]
    CastNotReady { ability: AbilityId, remaining: u32 },

    #[error("moving {required} exceeds the {remaining} of movement left")]
    InsufficientMovement {
        required: Distance,
        remaining: Distance,
    },
}

impl GameError for BudgetError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotEnoughEnergy { .. } => "BUDGET_NOT_ENOUGH_ENERGY",
            Self::OnCooldown { .. } => "BUDGET_ON_COOLDOWN",
            Self::CastNotReady { .. } => "BUDGET_CAST_NOT_READY",
            Self::InsufficientMovement { .. } => "BUDGET_INSUFFICIENT_MOVEMENT",
        }
    }
}

// ============================================================================
// Command Errors
// ============================================================================

/// Any reason a command can be rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Target(#[from] TargetError),

    #[error(transparent)]
    Budget(#[from] BudgetError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Replay(#[from] ReplayError),

    /// The produced state broke a structural invariant.
    #[error("state invariant violated: {0}")]
    Invariant(&'static str),
}

impl From<EffectError> for CommandError {
    fn from(error: EffectError) -> Self {
        match error {
            EffectError::NotDead(id) => Self::Target(TargetError::InvalidTarget {
                target: Some(id),
                reason: InvalidTargetReason::NotDead,
            }),
            EffectError::UnrollableDice(dice) => {
                Self::Validation(ValidationError::UnrollableDice(dice))
            }
            EffectError::Oracle(error) => Self::Oracle(error),
            EffectError::Replay(error) => Self::Replay(error),
        }
    }
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Validation(error) => error.severity(),
            Self::Target(error) => error.severity(),
            Self::Budget(error) => error.severity(),
            Self::Oracle(error) => error.severity(),
            Self::Replay(error) => error.severity(),
            Self::Invariant(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(error) => error.error_code(),
            Self::Target(error) => error.error_code(),
            Self::Budget(error) => error.error_code(),
            Self::Oracle(error) => error.error_code(),
            Self::Replay(error) => error.error_code(),
            Self::Invariant(_) => "STATE_INVARIANT_VIOLATED",
        }
    }
}
