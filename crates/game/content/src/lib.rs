//! Data-driven content definitions and loaders.
//!
//! This crate houses the game-design data the rules engine looks up by id:
//! - Ability catalog (data-driven via RON)
//! - Condition catalog (data-driven via RON)
//! - Game configuration (data-driven via TOML)
//!
//! Content is consumed through the `game-core` oracle traits and never appears
//! in game state. A default catalog is embedded in the crate; a data directory
//! can replace it at startup.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{AbilityCatalog, ConditionCatalog};

#[cfg(feature = "loaders")]
pub use loaders::{AbilityLoader, ConditionLoader, ConfigLoader, ContentFactory, LoadResult};
