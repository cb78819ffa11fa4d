//! Command transition trait and the three-phase driver.

use crate::command::{Command, CommandError, ValidationError};
use crate::env::GameEnv;
use crate::state::GameState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};
use super::reducer::StateReducer;

/// Defines how a concrete command changes game state.
///
/// Implementors can override the validation hooks to surface pre- and
/// post-conditions that must hold around the change. All hooks receive
/// read-only access to deterministic environment facts via `Env` and must stay
/// side-effect free.
pub trait CommandTransition {
    /// Validates pre-conditions using the state **before** the change.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), CommandError> {
        Ok(())
    }

    /// Records the command's log entries. Implementations should assume that
    /// `pre_validate` has already run successfully.
    fn apply(&self, reducer: &mut StateReducer<'_>, env: &GameEnv<'_>) -> Result<(), CommandError>;

    /// Validates post-conditions using the state **after** the change.
    fn post_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), CommandError> {
        state.check_invariants().map_err(CommandError::Invariant)
    }
}

/// Runs a transition through the three-phase pipeline.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before any change
/// 2. `apply` - Record log entries against the working state
/// 3. `post_validate` - Verify postconditions after the change
#[inline]
fn drive_transition<T>(
    transition: &T,
    reducer: &mut StateReducer<'_>,
    env: &GameEnv<'_>,
) -> Result<(), TransitionPhaseError<CommandError>>
where
    T: CommandTransition + ?Sized,
{
    transition
        .pre_validate(reducer.state(), env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    transition
        .apply(reducer, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(reducer.state(), env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(())
}

/// Routes a command to its transition.
pub(super) fn execute_transition(
    command: &Command,
    reducer: &mut StateReducer<'_>,
    env: &GameEnv<'_>,
) -> Result<(), ExecuteError> {
    let transition: &dyn CommandTransition = match command {
        Command::CreateCreature(transition) => transition,
        Command::RemoveCreature(transition) => transition,
        Command::SetCreaturePosition(transition) => transition,
        Command::ApplyCondition(transition) => transition,
        Command::RemoveCondition(transition) => transition,
        Command::StartCombat(transition) => transition,
        Command::StopCombat(transition) => transition,
        Command::AddCreatureToCombat(transition) => transition,
        Command::RemoveCreatureFromCombat(transition) => transition,
        Command::ChangeCreatureInitiative(transition) => transition,
        Command::CombatMove(transition) => transition,
        Command::Act(transition) => transition,
        Command::ActOutOfCombat(transition) => transition,
        Command::EndTurn(transition) => transition,
        Command::Passthrough(transition) => transition,
        Command::Rollback { .. } => {
            return Err(ExecuteError::new(
                command.name(),
                TransitionPhase::PreValidate,
                ValidationError::RollbackRequiresHistory.into(),
            ));
        }
    };

    drive_transition(transition, reducer, env).map_err(|failure| ExecuteError {
        command: command.name(),
        failure,
    })
}
