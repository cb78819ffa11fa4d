//! Ability domain.
//!
//! # Module Structure
//!
//! - `targeting`: Resolves which creature each effect of an ability lands on
//! - `ability`: Budget checks, two-phase casts, cost payment and effect dispatch
//!
//! Abilities themselves are catalog data (see [`Ability`](crate::state::Ability));
//! this module only interprets them.

pub mod ability;
pub mod targeting;

pub use ability::{AbilityOutcome, resolve_ability};
pub use targeting::{InvalidTargetReason, TargetError, resolve_targets};
