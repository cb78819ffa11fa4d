//! Runtime wrappers around static game content oracles.
//!
//! Content is bundled into an [`OracleManager`] so the session worker can
//! build [`game_core::Env`] views on demand. The data is immutable at runtime;
//! dynamic state lives in the session history.

use std::sync::Arc;

use game_content::{AbilityCatalog, ConditionCatalog};
use game_core::{GameConfig, GameEnv, MapOracle, OpenTerrain, PcgRng};

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) abilities: Arc<AbilityCatalog>,
    pub(crate) conditions: Arc<ConditionCatalog>,
    pub(crate) map: Arc<dyn MapOracle>,
    pub(crate) config: Arc<GameConfig>,
    pub(crate) rng: PcgRng,
}

impl OracleManager {
    /// Creates a new oracle manager over open terrain.
    pub fn new(
        abilities: AbilityCatalog,
        conditions: ConditionCatalog,
        config: GameConfig,
    ) -> Self {
        Self {
            abilities: Arc::new(abilities),
            conditions: Arc::new(conditions),
            map: Arc::new(OpenTerrain),
            config: Arc::new(config),
            rng: PcgRng, // PcgRng is stateless
        }
    }

    /// Replaces the map oracle.
    pub fn with_map(mut self, map: impl MapOracle + 'static) -> Self {
        self.map = Arc::new(map);
        self
    }

    /// Converts oracle manager into GameEnv for game-core
    pub fn as_game_env(&self) -> GameEnv<'_> {
        GameEnv::with_all(
            &*self.abilities,
            &*self.conditions,
            &*self.map,
            &*self.config,
            &self.rng,
        )
    }

    pub fn abilities(&self) -> &AbilityCatalog {
        &self.abilities
    }

    pub fn conditions(&self) -> &ConditionCatalog {
        &self.conditions
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
