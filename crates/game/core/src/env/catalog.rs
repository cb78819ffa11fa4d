//! Catalog oracles.
//!
//! Ability and condition definitions are game-design data owned outside the
//! engine. The engine only looks them up by id.

use crate::effect::ConditionDef;
use crate::state::{Ability, AbilityId, ConditionKey};

pub trait AbilityOracle: Send + Sync {
    fn ability(&self, id: &AbilityId) -> Option<Ability>;
}

pub trait ConditionOracle: Send + Sync {
    fn condition(&self, key: &ConditionKey) -> Option<ConditionDef>;
}
