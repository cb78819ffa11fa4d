//! Session worker that owns the authoritative [`game_core::History`].
//!
//! Receives requests from [`crate::RuntimeHandle`], applies commands through
//! the history, and publishes [`SessionEvent`]s.

use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, info, warn};

use game_core::{Command, GameError, GameState, History, HistoryError, LogEntry, Snapshot};

use crate::api::Result;
use crate::events::SessionEvent;
use crate::oracle::OracleManager;

/// Requests that can be sent to the session worker
pub(crate) enum Request {
    Perform {
        command: Command,
        reply: oneshot::Sender<Result<Vec<LogEntry>>>,
    },
    Rollback {
        snapshot_index: usize,
        log_index: usize,
        reply: oneshot::Sender<Result<Vec<LogEntry>>>,
    },
    QueryState {
        reply: oneshot::Sender<GameState>,
    },
    QueryPosition {
        reply: oneshot::Sender<(usize, usize)>,
    },
    QuerySnapshot {
        index: usize,
        reply: oneshot::Sender<Option<Snapshot>>,
    },
    QueryLogs {
        index: usize,
        reply: oneshot::Sender<Option<Vec<LogEntry>>>,
    },
    SnapshotNow {
        reply: oneshot::Sender<usize>,
    },
    /// Stop reading requests. Requests queued ahead of this one are still
    /// handled; anything sent after it is dropped unanswered.
    Shutdown,
}

/// Background task that processes session requests one at a time.
pub(crate) struct SessionWorker {
    history: History,
    oracles: OracleManager,
    request_rx: mpsc::Receiver<Request>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl SessionWorker {
    pub(crate) fn new(
        history: History,
        oracles: OracleManager,
        request_rx: mpsc::Receiver<Request>,
        event_tx: broadcast::Sender<SessionEvent>,
    ) -> Self {
        info!(
            target: "runtime::session",
            creatures = history.current().creatures.len(),
            threshold = history.threshold(),
            "session worker initialized"
        );

        Self {
            history,
            oracles,
            request_rx,
            event_tx,
        }
    }

    /// Main worker loop.
    pub(crate) async fn run(mut self) {
        while let Some(request) = self.request_rx.recv().await {
            if matches!(request, Request::Shutdown) {
                break;
            }
            self.handle_request(request);
        }
        self.request_rx.close();
        debug!(target: "runtime::session", "session worker stopped");
    }

    fn handle_request(&mut self, request: Request) {
        match request {
            Request::Perform { command, reply } => {
                let result = self.perform(command);
                if reply.send(result).is_err() {
                    debug!(
                        target: "runtime::session",
                        "Perform reply channel closed (caller dropped)"
                    );
                }
            }
            Request::Rollback {
                snapshot_index,
                log_index,
                reply,
            } => {
                let result = self.rollback(snapshot_index, log_index);
                if reply.send(result).is_err() {
                    debug!(
                        target: "runtime::session",
                        "Rollback reply channel closed (caller dropped)"
                    );
                }
            }
            Request::QueryState { reply } => {
                let _ = reply.send(self.history.current().clone());
            }
            Request::QueryPosition { reply } => {
                let _ = reply.send(self.history.position());
            }
            Request::QuerySnapshot { index, reply } => {
                let _ = reply.send(self.history.snapshot(index).cloned());
            }
            Request::QueryLogs { index, reply } => {
                let _ = reply.send(self.history.logs(index).map(<[LogEntry]>::to_vec));
            }
            Request::SnapshotNow { reply } => {
                let index = self.snapshot_now();
                let _ = reply.send(index);
            }
            Request::Shutdown => {}
        }
    }

    fn perform(&mut self, command: Command) -> Result<Vec<LogEntry>> {
        if let Command::Rollback {
            snapshot_index,
            log_index,
        } = command
        {
            return self.rollback(snapshot_index, log_index);
        }

        let name = command.name();
        debug!(target: "runtime::session", command = name, "performing command");

        let snapshots = self.history.snapshots().len();
        let logs = match self.history.perform(&command, self.oracles.as_game_env()) {
            Ok(logs) => logs,
            Err(error) => return Err(self.reject(name, error)),
        };
        self.note_new_snapshot(snapshots);

        debug!(
            target: "runtime::session",
            command = name,
            entries = logs.len(),
            "command applied"
        );
        self.publish(SessionEvent::CommandApplied {
            command,
            logs: logs.clone(),
            position: self.history.position(),
        });
        Ok(logs)
    }

    fn rollback(&mut self, snapshot_index: usize, log_index: usize) -> Result<Vec<LogEntry>> {
        let snapshots = self.history.snapshots().len();
        let logs = match self.history.rollback(snapshot_index, log_index) {
            Ok(logs) => logs,
            Err(error) => return Err(self.reject("rollback", error)),
        };
        self.note_new_snapshot(snapshots);

        let position = self.history.position();
        info!(
            target: "runtime::history",
            snapshot_index,
            log_index,
            now = ?position,
            "rolled back"
        );
        self.publish(SessionEvent::RolledBack {
            snapshot_index,
            log_index,
            position,
        });
        Ok(logs)
    }

    fn snapshot_now(&mut self) -> usize {
        let snapshots = self.history.snapshots().len();
        let index = self.history.snapshot_now();
        self.note_new_snapshot(snapshots);
        index
    }

    fn reject(&self, command: &str, error: HistoryError) -> crate::RuntimeError {
        let phase = match &error {
            HistoryError::Command(error) => Some(error.phase().as_str()),
            _ => None,
        };
        warn!(
            target: "runtime::session",
            command,
            code = error.error_code(),
            phase = phase.unwrap_or("-"),
            %error,
            "command rejected"
        );
        self.publish(SessionEvent::rejected(command, &error));
        error.into()
    }

    fn note_new_snapshot(&self, before: usize) {
        let count = self.history.snapshots().len();
        if count > before {
            let index = count - 1;
            info!(target: "runtime::history", index, "snapshot taken");
            self.publish(SessionEvent::SnapshotTaken { index });
        }
    }

    fn publish(&self, event: SessionEvent) {
        // No subscribers is not an error.
        let _ = self.event_tx.send(event);
    }
}
