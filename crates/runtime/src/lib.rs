//! Runtime orchestration for a tabletop combat session.
//!
//! This crate wraps a [`game_core::History`] in a single worker task so that
//! any number of clients can drive one session concurrently. Consumers embed
//! [`Runtime`] and talk to it through cloneable [`RuntimeHandle`]s; viewers
//! follow along by subscribing to [`SessionEvent`]s.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator, builder, and configuration
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] defines what the session broadcasts
//! - [`oracle`] bundles static content into a [`game_core::GameEnv`]
//! - `workers` keeps the session task internal to the crate
pub mod api;
pub mod events;
pub mod oracle;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use events::SessionEvent;
pub use oracle::OracleManager;
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
