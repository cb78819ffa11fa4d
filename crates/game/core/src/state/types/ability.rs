use crate::effect::Effect;

use super::Distance;

/// How a targeted effect picks the creature it lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetingSystem {
    /// Always the caster.
    Caster,
    /// The chosen creature, within `range` of the caster.
    Creature { range: Distance },
}

/// An effect paired with the way its target is chosen.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetedEffect {
    pub system: TargetingSystem,
    pub effect: Effect,
}

impl TargetedEffect {
    pub fn new(system: TargetingSystem, effect: Effect) -> Self {
        Self { system, effect }
    }

    pub fn on_caster(effect: Effect) -> Self {
        Self::new(TargetingSystem::Caster, effect)
    }

    pub fn on_creature(range: Distance, effect: Effect) -> Self {
        Self::new(TargetingSystem::Creature { range }, effect)
    }
}

/// Immutable ability definition, owned by the ability catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ability {
    pub name: String,
    /// Energy deducted when the ability resolves.
    pub cost: u32,
    /// Turns between beginning and committing a cast. Zero resolves immediately.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cast_time: u32,
    /// Turns the ability stays unusable after it resolves.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown: u32,
    pub effects: Vec<TargetedEffect>,
    /// Lets `Creature` targeting pick the caster.
    #[cfg_attr(feature = "serde", serde(default))]
    pub allow_self_target: bool,
}

impl Ability {
    pub fn new(name: impl Into<String>, cost: u32, effects: Vec<TargetedEffect>) -> Self {
        Self {
            name: name.into(),
            cost,
            cast_time: 0,
            cooldown: 0,
            effects,
            allow_self_target: false,
        }
    }

    pub fn with_cast_time(mut self, cast_time: u32) -> Self {
        self.cast_time = cast_time;
        self
    }

    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn allowing_self_target(mut self) -> Self {
        self.allow_self_target = true;
        self
    }
}

/// Per-creature usage state of a held ability.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityStatus {
    /// Turns until the ability can be used again.
    pub cooldown: u32,
    /// Turns left on an in-progress cast; `Some(0)` means ready to commit.
    pub cast: Option<u32>,
}
