//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and from the session history so
//! clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::{ErrorSeverity, GameError, HistoryError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires oracles to be configured before building")]
    MissingOracles,

    #[error(transparent)]
    History(#[from] HistoryError),
}

impl RuntimeError {
    /// The history error behind a rejected command or rollback, if any.
    pub fn as_history(&self) -> Option<&HistoryError> {
        match self {
            Self::History(error) => Some(error),
            _ => None,
        }
    }

    /// Whether the session itself is unusable, as opposed to one request
    /// having been rejected.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::History(error) => error.severity() == ErrorSeverity::Fatal,
            _ => true,
        }
    }
}
