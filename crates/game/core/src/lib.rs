//! Deterministic tabletop combat rules shared across clients.
//!
//! `game-core` defines the canonical rules (effects, abilities, combat turn
//! order, command engine, history) and exposes pure APIs that can be reused
//! by both the runtime and offline tools. All state changes flow through
//! [`engine::GameEngine`] as replayable [`LogEntry`] records, and supporting
//! crates depend on the types re-exported here.
pub mod action;
pub mod combat;
pub mod command;
pub mod config;
pub mod effect;
pub mod engine;
pub mod env;
pub mod error;
pub mod history;
pub mod state;

#[cfg(test)]
mod test_utils;

pub use action::{
    AbilityOutcome, InvalidTargetReason, TargetError, resolve_ability, resolve_targets,
};
pub use combat::{Combat, Combatant, initiative_order};
pub use command::{BudgetError, Command, CommandError, ValidationError};
pub use config::{GameConfig, ResurrectionPolicy};
pub use effect::{
    AppliedCondition, ConditionDef, ConditionKind, Dice, Duration, Effect, EffectError,
    apply_effect, tick,
};
pub use engine::{
    Applied, CommandTransition, ExecuteError, GameEngine, StateReducer, TransitionPhase,
    TransitionPhaseError,
};
pub use env::{
    AbilityOracle, ConditionOracle, ConfigOracle, Env, GameEnv, MapOracle, OpenTerrain,
    OracleError, PcgRng, RngOracle,
};
pub use error::{ErrorSeverity, GameError};
pub use history::{History, HistoryError, Snapshot};
pub use state::{
    Ability, AbilityId, AbilityStatus, ConditionId, ConditionKey, Creature, CreatureCreation,
    CreatureId, CreatureLog, Distance, ExternalEdit, GameState, LogEntry, Point3, ReplayError,
    ResourceMeter, SceneId, TargetedEffect, TargetingSystem,
};

#[cfg(feature = "serde")]
pub use state::compute_log_root;
