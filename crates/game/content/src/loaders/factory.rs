//! Content factory for building oracles from data files.

use std::path::{Path, PathBuf};

use game_core::GameConfig;

use crate::catalog::{AbilityCatalog, ConditionCatalog};
use crate::loaders::{AbilityLoader, ConditionLoader, ConfigLoader, LoadResult};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── abilities.ron
/// └── conditions.ron
/// ```
///
/// A missing file falls back to the embedded content.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::info!(target: "content::loader", "no config.toml, using defaults");
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the ability catalog from `abilities.ron`.
    pub fn load_abilities(&self) -> LoadResult<AbilityCatalog> {
        let path = self.data_dir.join("abilities.ron");
        if !path.exists() {
            tracing::info!(target: "content::loader", "no abilities.ron, using embedded catalog");
            return AbilityCatalog::embedded();
        }
        AbilityLoader::load(&path).map(AbilityCatalog::new)
    }

    /// Load the condition catalog from `conditions.ron`.
    pub fn load_conditions(&self) -> LoadResult<ConditionCatalog> {
        let path = self.data_dir.join("conditions.ron");
        if !path.exists() {
            tracing::info!(target: "content::loader", "no conditions.ron, using embedded catalog");
            return ConditionCatalog::embedded();
        }
        ConditionLoader::load(&path).map(ConditionCatalog::new)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
