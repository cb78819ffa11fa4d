use crate::state::Distance;

/// Fraction of maximum health a resurrected creature comes back with.
///
/// Stored as a ratio so the rules stay integer-only. The result is never
/// below 1 HP, otherwise resurrection would leave the creature at zero health.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResurrectionPolicy {
    pub numerator: u32,
    pub denominator: u32,
}

impl ResurrectionPolicy {
    pub const FULL: Self = Self {
        numerator: 1,
        denominator: 1,
    };

    pub const HALF: Self = Self {
        numerator: 1,
        denominator: 2,
    };

    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Health restored for a creature with the given maximum.
    pub fn restored_health(&self, maximum: u32) -> u32 {
        if maximum == 0 {
            return 0;
        }
        let denominator = self.denominator.max(1) as u64;
        let restored = (maximum as u64 * self.numerator as u64) / denominator;
        u32::try_from(restored).unwrap_or(maximum).clamp(1, maximum)
    }
}

impl Default for ResurrectionPolicy {
    fn default() -> Self {
        Self::HALF
    }
}

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Health restored by `Resurrect`.
    pub resurrection: ResurrectionPolicy,

    /// Number of log entries a snapshot may carry before the history manager
    /// starts a new one.
    pub snapshot_threshold: usize,

    /// Speed given to creatures whose creation request omits one.
    pub default_speed: Distance,

    pub default_max_health: u32,
    pub default_max_energy: u32,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// A standard creature walks 10 metres and change per turn.
    pub const STANDARD_CREATURE_SPEED: Distance = Distance(1086);

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SNAPSHOT_THRESHOLD: usize = 100;
    pub const DEFAULT_MAX_HEALTH: u32 = 10;
    pub const DEFAULT_MAX_ENERGY: u32 = 10;

    pub fn new() -> Self {
        Self {
            resurrection: ResurrectionPolicy::default(),
            snapshot_threshold: Self::DEFAULT_SNAPSHOT_THRESHOLD,
            default_speed: Self::STANDARD_CREATURE_SPEED,
            default_max_health: Self::DEFAULT_MAX_HEALTH,
            default_max_energy: Self::DEFAULT_MAX_ENERGY,
        }
    }

    pub fn with_resurrection(mut self, resurrection: ResurrectionPolicy) -> Self {
        self.resurrection = resurrection;
        self
    }

    pub fn with_snapshot_threshold(mut self, snapshot_threshold: usize) -> Self {
        self.snapshot_threshold = snapshot_threshold;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
