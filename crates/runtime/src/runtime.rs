//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up request/event channels, and
//! exposes a builder-based API for clients to drive a session.

use std::env;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use game_core::{GameConfig, GameState, History};

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::SessionEvent;
use crate::oracle::OracleManager;
use crate::workers::{Request, SessionWorker};

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Seed of the initial state when the builder is not given one.
    pub game_seed: u64,
    pub snapshot_threshold: usize,
    pub command_buffer_size: usize,
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_seed: 0,
            snapshot_threshold: GameConfig::DEFAULT_SNAPSHOT_THRESHOLD,
            command_buffer_size: 32,
            event_buffer_size: 100,
        }
    }
}

impl RuntimeConfig {
    /// Construct runtime configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TABLETOP_GAME_SEED` - Seed of a fresh session (default: 0)
    /// - `TABLETOP_SNAPSHOT_THRESHOLD` - Log entries per snapshot (default: 100)
    /// - `TABLETOP_COMMAND_BUFFER` - Request mailbox capacity (default: 32)
    /// - `TABLETOP_EVENT_BUFFER` - Event broadcast capacity (default: 100)
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Takes the snapshot threshold from a loaded game configuration.
    pub fn with_game_config(mut self, game_config: &GameConfig) -> Self {
        self.snapshot_threshold = game_config.snapshot_threshold;
        self
    }

    /// Overrides fields whose environment variable is set and parses.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(seed) = read_env::<u64>("TABLETOP_GAME_SEED") {
            self.game_seed = seed;
        }
        if let Some(threshold) = read_env::<usize>("TABLETOP_SNAPSHOT_THRESHOLD") {
            self.snapshot_threshold = threshold.max(1);
        }
        if let Some(size) = read_env::<usize>("TABLETOP_COMMAND_BUFFER") {
            self.command_buffer_size = size.max(1);
        }
        if let Some(size) = read_env::<usize>("TABLETOP_EVENT_BUFFER") {
            self.event_buffer_size = size.max(1);
        }
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Main runtime that orchestrates a session
///
/// Runtime owns the worker; [`RuntimeHandle`] provides a cloneable façade for
/// clients.
pub struct Runtime {
    handle: RuntimeHandle,
    request_tx: mpsc::Sender<Request>,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to session events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.handle.subscribe()
    }

    /// Shutdown the runtime gracefully
    ///
    /// Requests sent before this call are handled first. Handles still held by
    /// clients fail with [`RuntimeError::CommandChannelClosed`] afterwards.
    pub async fn shutdown(self) -> Result<()> {
        // A send error means the worker already stopped; joining reports why.
        let _ = self.request_tx.send(Request::Shutdown).await;
        drop(self.handle);

        self.worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        tracing::info!(target: "runtime::session", "runtime shut down");
        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    state: Option<GameState>,
    oracles: Option<OracleManager>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            state: None,
            oracles: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide initial game state
    ///
    /// Defaults to an empty arena seeded with [`RuntimeConfig::game_seed`].
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Build the runtime and spawn its worker
    pub async fn build(self) -> Result<Runtime> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;
        let initial_state = self
            .state
            .unwrap_or_else(|| GameState::with_seed(self.config.game_seed));

        let (request_tx, request_rx) =
            mpsc::channel::<Request>(self.config.command_buffer_size.max(1));
        let (event_tx, _event_rx) =
            broadcast::channel::<SessionEvent>(self.config.event_buffer_size.max(1));

        let handle = RuntimeHandle::new(request_tx.clone(), event_tx.clone());

        let history = History::new(initial_state, self.config.snapshot_threshold);
        let worker = SessionWorker::new(history, oracles, request_rx, event_tx);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            request_tx,
            worker_handle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_replace_only_parsable_values() {
        // SAFETY: no other test in this crate reads or writes these variables.
        unsafe {
            env::set_var("TABLETOP_GAME_SEED", "7");
            env::set_var("TABLETOP_SNAPSHOT_THRESHOLD", "0");
            env::set_var("TABLETOP_COMMAND_BUFFER", "many");
        }

        let config = RuntimeConfig::from_env();

        unsafe {
            env::remove_var("TABLETOP_GAME_SEED");
            env::remove_var("TABLETOP_SNAPSHOT_THRESHOLD");
            env::remove_var("TABLETOP_COMMAND_BUFFER");
        }

        assert_eq!(config.game_seed, 7);
        assert_eq!(config.snapshot_threshold, 1);
        assert_eq!(config.command_buffer_size, 32);
        assert_eq!(config.event_buffer_size, 100);
    }

    #[test]
    fn game_config_supplies_the_threshold() {
        let game_config = GameConfig::new().with_snapshot_threshold(12);
        let config = RuntimeConfig::default().with_game_config(&game_config);
        assert_eq!(config.snapshot_threshold, 12);
    }
}
