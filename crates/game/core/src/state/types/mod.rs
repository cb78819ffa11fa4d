pub mod ability;
pub mod common;
pub mod creature;

pub use ability::{Ability, AbilityStatus, TargetedEffect, TargetingSystem};
pub use common::{
    AbilityId, ConditionId, ConditionKey, CreatureId, Distance, Point3, ResourceMeter, SceneId,
};
pub use creature::{Capabilities, Creature, CreatureCreation};
