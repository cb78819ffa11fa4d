//! Events the session broadcasts to viewers.
//!
//! Events are best-effort notifications. The history remains the source of
//! truth; a viewer that lags or joins late reads it through the handle.

use serde::{Deserialize, Serialize};

use game_core::{Command, GameError, HistoryError, LogEntry};

/// Something that happened to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A command was applied and its entries recorded.
    CommandApplied {
        command: Command,
        logs: Vec<LogEntry>,
        /// History position after the entries were recorded.
        position: (usize, usize),
    },

    /// A command or rollback was rejected; nothing changed.
    CommandRejected {
        command: String,
        code: String,
        phase: Option<String>,
        message: String,
    },

    /// An earlier state was made current again.
    RolledBack {
        snapshot_index: usize,
        log_index: usize,
        position: (usize, usize),
    },

    /// A new snapshot was started.
    SnapshotTaken { index: usize },
}

impl SessionEvent {
    pub(crate) fn rejected(command: &str, error: &HistoryError) -> Self {
        let phase = match error {
            HistoryError::Command(error) => Some(error.phase().as_str().to_owned()),
            _ => None,
        };
        Self::CommandRejected {
            command: command.to_owned(),
            code: error.error_code().to_owned(),
            phase,
            message: error.to_string(),
        }
    }
}
