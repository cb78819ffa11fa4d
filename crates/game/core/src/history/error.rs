use crate::engine::ExecuteError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::ReplayError;

/// Errors raised by [`History`](super::History).
///
/// Apart from wrapped command rejections, these mean the requested point in
/// history does not exist or the recorded logs no longer reproduce a state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    #[error("no history at snapshot {snapshot_index}, log {log_index}")]
    HistoryNotFound {
        snapshot_index: usize,
        log_index: usize,
    },

    #[error("log {log_index} of snapshot {snapshot_index} does not replay: {source}")]
    Replay {
        snapshot_index: usize,
        log_index: usize,
        #[source]
        source: ReplayError,
    },

    #[error(transparent)]
    Command(#[from] ExecuteError),
}

impl GameError for HistoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::HistoryNotFound { .. } | Self::Replay { .. } => ErrorSeverity::Internal,
            Self::Command(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::HistoryNotFound { .. } => "HISTORY_NOT_FOUND",
            Self::Replay { .. } => "HISTORY_REPLAY_FAILED",
            Self::Command(error) => error.error_code(),
        }
    }
}
