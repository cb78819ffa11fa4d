//! Error types for the command execution pipeline.

use crate::command::CommandError;
use crate::error::{ErrorSeverity, GameError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// A command rejected by the engine.
///
/// Carries the command's name and the phase that refused it. The state the
/// command was applied to is untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{command} command failed: {failure}")]
pub struct ExecuteError {
    pub command: &'static str,
    pub failure: TransitionPhaseError<CommandError>,
}

impl ExecuteError {
    pub fn new(command: &'static str, phase: TransitionPhase, error: CommandError) -> Self {
        Self {
            command,
            failure: TransitionPhaseError::new(phase, error),
        }
    }

    pub fn phase(&self) -> TransitionPhase {
        self.failure.phase
    }

    pub fn error(&self) -> &CommandError {
        &self.failure.error
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        self.failure.error.severity()
    }

    fn error_code(&self) -> &'static str {
        self.failure.error.error_code()
    }
}
