use crate::engine::{CommandTransition, StateReducer};
use crate::env::GameEnv;
use crate::state::{ExternalEdit, LogEntry};

use super::CommandError;

/// Records an edit to notes, folders or scenes.
///
/// The rules engine does not own that data; the entry only keeps the history
/// complete. Game state is left as it was.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassthroughCommand {
    pub edit: ExternalEdit,
}

impl CommandTransition for PassthroughCommand {
    fn apply(
        &self,
        reducer: &mut StateReducer<'_>,
        _env: &GameEnv<'_>,
    ) -> Result<(), CommandError> {
        reducer.record(LogEntry::Passthrough(self.edit.clone()))?;
        Ok(())
    }
}
