//! Snapshot & rollback manager.
//!
//! History is a list of snapshots, each a full state checkpoint followed by
//! the log entries recorded after it. Any point is addressed by a
//! `(snapshot_index, log_index)` pair and rebuilt by replaying the first
//! `log_index` entries onto the snapshot's state. Rolling back never rewrites
//! history: it is itself recorded as a [`LogEntry::Rollback`], so the timeline
//! stays append-only and every recorded point remains reachable.

mod error;

pub use error::HistoryError;

use crate::command::Command;
use crate::engine::GameEngine;
use crate::env::GameEnv;
use crate::state::{GameState, LogEntry};

/// A full state checkpoint and the entries recorded after it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub state: GameState,
    pub logs: Vec<LogEntry>,
}

impl Snapshot {
    fn new(state: GameState) -> Self {
        Self {
            state,
            logs: Vec::new(),
        }
    }
}

/// Command history with bounded replay cost.
///
/// Once the latest snapshot's log would grow past `threshold` entries, a new
/// snapshot of the current state is taken before appending.
#[derive(Clone, Debug)]
pub struct History {
    snapshots: Vec<Snapshot>,
    current: GameState,
    threshold: usize,
}

impl History {
    pub fn new(initial: GameState, threshold: usize) -> Self {
        Self {
            snapshots: vec![Snapshot::new(initial.clone())],
            current: initial,
            threshold,
        }
    }

    pub fn current(&self) -> &GameState {
        &self.current
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// `(latest snapshot index, entries in its log)`: the address of "now".
    pub fn position(&self) -> (usize, usize) {
        (self.snapshots.len() - 1, self.latest().logs.len())
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn snapshot(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn logs(&self, index: usize) -> Option<&[LogEntry]> {
        self.snapshots.get(index).map(|snapshot| snapshot.logs.as_slice())
    }

    fn latest(&self) -> &Snapshot {
        // `new` always creates the first snapshot and none are ever removed.
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// Applies `command` and records its entries.
    ///
    /// `Rollback` commands are routed to [`History::rollback`]. Returns the
    /// entries appended to the history. A rejected command changes nothing.
    pub fn perform(
        &mut self,
        command: &Command,
        env: GameEnv<'_>,
    ) -> Result<Vec<LogEntry>, HistoryError> {
        if let Command::Rollback {
            snapshot_index,
            log_index,
        } = command
        {
            return self.rollback(*snapshot_index, *log_index);
        }

        let applied = GameEngine::new(env).apply(&self.current, command)?;
        self.append(applied.state, applied.logs.clone());
        Ok(applied.logs)
    }

    /// Makes the state at `(snapshot_index, log_index)` current again.
    ///
    /// The rollback is recorded as a new entry; nothing already recorded is
    /// touched, so rolling back to a point before an earlier rollback and
    /// forward again both work.
    pub fn rollback(
        &mut self,
        snapshot_index: usize,
        log_index: usize,
    ) -> Result<Vec<LogEntry>, HistoryError> {
        let state = self.replay(snapshot_index, log_index)?;
        let entry = LogEntry::Rollback {
            snapshot_index,
            log_index,
        };
        self.append(state, vec![entry.clone()]);
        Ok(vec![entry])
    }

    /// Rebuilds the state at `(snapshot_index, log_index)` without changing
    /// anything.
    pub fn replay(
        &self,
        snapshot_index: usize,
        log_index: usize,
    ) -> Result<GameState, HistoryError> {
        let not_found = HistoryError::HistoryNotFound {
            snapshot_index,
            log_index,
        };
        let snapshot = self.snapshots.get(snapshot_index).ok_or(not_found.clone())?;
        let logs = snapshot.logs.get(..log_index).ok_or(not_found)?;

        let mut state = snapshot.state.clone();
        for (index, entry) in logs.iter().enumerate() {
            match entry {
                LogEntry::Rollback {
                    snapshot_index: target_snapshot,
                    log_index: target_log,
                } => {
                    // A recorded rollback never points past itself.
                    if (*target_snapshot, *target_log) > (snapshot_index, index) {
                        return Err(HistoryError::HistoryNotFound {
                            snapshot_index: *target_snapshot,
                            log_index: *target_log,
                        });
                    }
                    state = self.replay(*target_snapshot, *target_log)?;
                }
                entry => state.apply_log(entry).map_err(|source| HistoryError::Replay {
                    snapshot_index,
                    log_index: index,
                    source,
                })?,
            }
        }
        Ok(state)
    }

    /// Starts a new snapshot at the current state.
    ///
    /// Returns the new snapshot's index. Does nothing if the latest snapshot
    /// has no entries yet.
    pub fn snapshot_now(&mut self) -> usize {
        if !self.latest().logs.is_empty() {
            self.snapshots.push(Snapshot::new(self.current.clone()));
        }
        self.snapshots.len() - 1
    }

    fn append(&mut self, state: GameState, logs: Vec<LogEntry>) {
        let pending = self.latest().logs.len();
        if pending > 0 && pending + logs.len() > self.threshold {
            self.snapshots.push(Snapshot::new(self.current.clone()));
        }
        let last = self.snapshots.len() - 1;
        self.snapshots[last].logs.extend(logs);
        self.current = state;
    }
}
