//! Configuration oracle for exposing game configuration to the engine.

use crate::config::{GameConfig, ResurrectionPolicy};
use crate::state::Distance;

/// Provides game-design parameters the rules consult.
pub trait ConfigOracle: Send + Sync {
    fn resurrection(&self) -> ResurrectionPolicy;
    fn default_speed(&self) -> Distance;
    fn default_max_health(&self) -> u32;
    fn default_max_energy(&self) -> u32;
}

impl ConfigOracle for GameConfig {
    fn resurrection(&self) -> ResurrectionPolicy {
        self.resurrection
    }

    fn default_speed(&self) -> Distance {
        self.default_speed
    }

    fn default_max_health(&self) -> u32 {
        self.default_max_health
    }

    fn default_max_energy(&self) -> u32 {
        self.default_max_energy
    }
}
