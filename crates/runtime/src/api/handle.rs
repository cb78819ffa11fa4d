//! Cloneable façade for issuing requests to the session worker.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! performing commands, rolling back, and reading history. Every read returns
//! an owned copy; nothing is shared with the worker.
use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{Command, GameState, LogEntry, Snapshot};

use super::errors::{Result, RuntimeError};
use crate::events::SessionEvent;
use crate::workers::Request;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    request_tx: mpsc::Sender<Request>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        request_tx: mpsc::Sender<Request>,
        event_tx: broadcast::Sender<SessionEvent>,
    ) -> Self {
        Self {
            request_tx,
            event_tx,
        }
    }

    /// Applies a command and returns the log entries it recorded.
    ///
    /// `Command::Rollback` is accepted here as well and behaves like
    /// [`RuntimeHandle::rollback`].
    pub async fn perform(&self, command: Command) -> Result<Vec<LogEntry>> {
        self.request(|reply| Request::Perform { command, reply }).await?
    }

    /// Makes the state at `(snapshot_index, log_index)` current again.
    pub async fn rollback(
        &self,
        snapshot_index: usize,
        log_index: usize,
    ) -> Result<Vec<LogEntry>> {
        self.request(|reply| Request::Rollback {
            snapshot_index,
            log_index,
            reply,
        })
        .await?
    }

    /// Query the current game state (read-only copy)
    pub async fn current_state(&self) -> Result<GameState> {
        self.request(|reply| Request::QueryState { reply }).await
    }

    /// The address of "now": latest snapshot index and its log length.
    pub async fn position(&self) -> Result<(usize, usize)> {
        self.request(|reply| Request::QueryPosition { reply }).await
    }

    pub async fn snapshot(&self, index: usize) -> Result<Option<Snapshot>> {
        self.request(|reply| Request::QuerySnapshot { index, reply })
            .await
    }

    /// Log entries recorded after snapshot `index`.
    pub async fn logs(&self, index: usize) -> Result<Option<Vec<LogEntry>>> {
        self.request(|reply| Request::QueryLogs { index, reply })
            .await
    }

    /// Starts a new snapshot at the current state and returns its index.
    pub async fn snapshot_now(&self) -> Result<usize> {
        self.request(|reply| Request::SnapshotNow { reply }).await
    }

    /// Subscribe to session events.
    ///
    /// Receivers only see events published after they subscribe. A receiver
    /// that falls behind the event buffer skips ahead with `Lagged`.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Request) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.request_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }
}
