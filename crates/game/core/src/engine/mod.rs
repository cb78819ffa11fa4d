//! Command application pipeline.
//!
//! [`GameEngine::apply`] is the authoritative reducer for [`GameState`]. It
//! runs a command through its transition phases against a working copy and
//! returns the new state together with the log entries that produce it, or
//! rich error information for the caller. The input state is never touched.

mod errors;
mod reducer;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};
pub use reducer::StateReducer;
pub use transition::CommandTransition;

use crate::command::Command;
use crate::env::GameEnv;
use crate::state::{GameState, LogEntry};

/// Outcome of a successfully applied command.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Applied {
    pub state: GameState,
    /// Entries that turn the input state into `state`, in order.
    pub logs: Vec<LogEntry>,
}

/// Game engine that applies commands to game state.
///
/// All changes flow through the three-phase command pipeline:
/// pre_validate → apply → post_validate
///
/// Every change is recorded as a [`LogEntry`] on the way, so replaying the
/// returned logs onto the input state always yields the returned state.
#[derive(Clone, Copy)]
pub struct GameEngine<'a> {
    env: GameEnv<'a>,
}

impl<'a> GameEngine<'a> {
    pub fn new(env: GameEnv<'a>) -> Self {
        Self { env }
    }

    /// Applies `command` to a copy of `state`.
    ///
    /// # Errors
    ///
    /// Returns the failing phase and reason. Nothing is partially applied.
    pub fn apply(&self, state: &GameState, command: &Command) -> Result<Applied, ExecuteError> {
        let mut next = state.clone();
        let mut reducer = StateReducer::new(&mut next);
        transition::execute_transition(command, &mut reducer, &self.env)?;
        let logs = reducer.into_logs();
        Ok(Applied { state: next, logs })
    }
}
