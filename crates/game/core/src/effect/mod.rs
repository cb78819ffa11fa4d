//! Effect algebra and condition engine.
//!
//! Effects are a closed sum type: the vocabulary is fixed by game design, so
//! every consumer matches exhaustively instead of dispatching dynamically.
//! [`apply_effect`] turns an effect into creature log entries; applying those
//! entries is the only way a creature changes.
mod apply;
mod condition;
mod context;
pub mod damage;
mod error;

pub use apply::apply_effect;
pub use condition::{AppliedCondition, ConditionDef, ConditionKind, Duration, tick};
pub use context::{EffectContext, Roll};
pub use error::EffectError;

/// A dice expression: `count` dice with `sides` faces, plus a flat modifier.
///
/// The realized amount is the sum of the rolls plus the modifier, never below zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Dice {
    pub count: u32,
    pub sides: u32,
    pub modifier: i32,
}

impl Dice {
    /// Largest number of dice a single expression may roll.
    pub const MAX_COUNT: u32 = 100;

    pub const fn new(count: u32, sides: u32, modifier: i32) -> Self {
        Self {
            count,
            sides,
            modifier,
        }
    }

    /// A fixed amount; rolls nothing. Amounts past `i32::MAX` saturate.
    pub fn flat(amount: u32) -> Self {
        Self::new(0, 0, i32::try_from(amount).unwrap_or(i32::MAX))
    }

    /// False for expressions that ask for dice without faces or for more than
    /// [`Dice::MAX_COUNT`] dice.
    pub const fn is_rollable(&self) -> bool {
        self.count <= Self::MAX_COUNT && !(self.count > 0 && self.sides == 0)
    }

    /// Number of dice that will actually be rolled.
    pub const fn dice_count(&self) -> u32 {
        if self.sides == 0 { 0 } else { self.count }
    }
}

impl core::fmt::Display for Dice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match (self.dice_count(), self.modifier) {
            (0, modifier) => write!(f, "{modifier}"),
            (count, 0) => write!(f, "{count}d{}", self.sides),
            (count, modifier) if modifier > 0 => write!(f, "{count}d{}+{modifier}", self.sides),
            (count, modifier) => write!(f, "{count}d{}{modifier}", self.sides),
        }
    }
}

/// An atomic or composite state transformation applied to one creature.
#[derive(Clone, Debug, PartialEq, Eq, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Effect {
    Damage(Dice),
    Heal(Dice),
    ApplyCondition(ConditionDef),
    GenerateEnergy(u32),
    /// Cancels every cast the target has in progress.
    Interrupt,
    /// Brings a dead creature back; illegal against the living.
    Resurrect,
    /// `first`, then `second`, against the already-changed creature.
    Multi(Box<Effect>, Box<Effect>),
}

impl Effect {
    pub fn multi(first: Effect, second: Effect) -> Self {
        Effect::Multi(Box::new(first), Box::new(second))
    }

    /// True if any part of this effect resurrects its target.
    ///
    /// Such effects are the only ones that may target a dead creature, and they
    /// may target nothing else.
    pub fn revives(&self) -> bool {
        match self {
            Effect::Resurrect => true,
            Effect::Multi(first, second) => first.revives() || second.revives(),
            _ => false,
        }
    }
}
