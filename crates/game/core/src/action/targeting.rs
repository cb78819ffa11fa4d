//! Targeting resolver.
//!
//! Given a targeting system and the candidate picked by the player, decides
//! which creature an effect lands on. Only the numeric range contract is
//! enforced here; distances come from the map oracle.

use crate::env::MapOracle;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{
    Ability, Creature, CreatureId, Distance, GameState, TargetedEffect, TargetingSystem,
};

// ============================================================================
// Errors
// ============================================================================

/// Why a candidate cannot receive an effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum InvalidTargetReason {
    /// The ability needs a creature target and none was given.
    Missing,
    NotFound,
    /// The caster picked itself through a path that does not allow it.
    Caster,
    /// Dead creatures only accept resurrection.
    Dead,
    /// Resurrection only lands on the dead.
    NotDead,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetError {
    #[error("target {target} is {distance} away, beyond range {range}")]
    OutOfRange {
        target: CreatureId,
        distance: Distance,
        range: Distance,
    },

    #[error("invalid target {target:?}: {reason}")]
    InvalidTarget {
        target: Option<CreatureId>,
        reason: InvalidTargetReason,
    },
}

impl TargetError {
    fn invalid(target: impl Into<Option<CreatureId>>, reason: InvalidTargetReason) -> Self {
        Self::InvalidTarget {
            target: target.into(),
            reason,
        }
    }
}

impl GameError for TargetError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "TARGET_OUT_OF_RANGE",
            Self::InvalidTarget { .. } => "TARGET_INVALID",
        }
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolves the creature one of `ability`'s effects lands on.
///
/// * `Caster` always resolves to the caster.
/// * `Creature { range }` resolves to `candidate`, which must exist, must not
///   be the caster unless the ability allows self-targeting, and must be
///   within `range` of the caster according to `map`.
///
/// Either way the target must suit the effect: only reviving effects may land
/// on the dead, and they may land on nothing else.
pub fn resolve_targets(
    effect: &TargetedEffect,
    ability: &Ability,
    caster: &Creature,
    candidate: Option<CreatureId>,
    state: &GameState,
    map: &dyn MapOracle,
) -> Result<CreatureId, TargetError> {
    let target = match effect.system {
        TargetingSystem::Caster => caster,
        TargetingSystem::Creature { range } => {
            let id = candidate.ok_or(TargetError::invalid(None, InvalidTargetReason::Missing))?;
            if id == caster.id && !ability.allow_self_target {
                return Err(TargetError::invalid(id, InvalidTargetReason::Caster));
            }
            let target = state
                .creature(id)
                .ok_or(TargetError::invalid(id, InvalidTargetReason::NotFound))?;

            let distance = map.distance(caster.position, target.position);
            if distance > range {
                return Err(TargetError::OutOfRange {
                    target: id,
                    distance,
                    range,
                });
            }
            target
        }
    };

    match (effect.effect.revives(), target.is_dead()) {
        (false, true) => Err(TargetError::invalid(target.id, InvalidTargetReason::Dead)),
        (true, false) => Err(TargetError::invalid(target.id, InvalidTargetReason::NotDead)),
        _ => Ok(target.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{ConditionDef, Dice, Effect};
    use crate::env::OpenTerrain;
    use crate::state::{CreatureLog, LogEntry, Point3};
    use crate::test_utils::creature;

    fn state() -> GameState {
        let mut state = GameState::default();
        for (id, x) in [(1, 0), (2, 300), (3, 5000)] {
            let mut creature = creature(id, 10);
            creature.position = Point3::new(x, 0, 0);
            state.apply_log(&LogEntry::CreateCreature(creature)).unwrap();
        }
        state
    }

    fn punch() -> Effect {
        Effect::Damage(Dice::flat(2))
    }

    fn melee() -> TargetingSystem {
        TargetingSystem::Creature {
            range: Distance(500),
        }
    }

    fn resolve(
        state: &GameState,
        system: TargetingSystem,
        effect: &Effect,
        allow_self: bool,
        candidate: Option<u32>,
    ) -> Result<CreatureId, TargetError> {
        let caster = state.creature(CreatureId(1)).unwrap();
        let targeted = TargetedEffect::new(system, effect.clone());
        let mut ability = Ability::new("test", 0, vec![targeted.clone()]);
        ability.allow_self_target = allow_self;
        resolve_targets(
            &targeted,
            &ability,
            caster,
            candidate.map(CreatureId),
            state,
            &OpenTerrain,
        )
    }

    #[test]
    fn caster_system_ignores_the_candidate() {
        let state = state();
        let target = resolve(&state, TargetingSystem::Caster, &punch(), false, Some(2));
        assert_eq!(target, Ok(CreatureId(1)));
    }

    #[test]
    fn creature_within_range_resolves() {
        let state = state();
        assert_eq!(resolve(&state, melee(), &punch(), false, Some(2)), Ok(CreatureId(2)));
    }

    #[test]
    fn creature_beyond_range_is_rejected() {
        let state = state();
        let result = resolve(&state, melee(), &punch(), false, Some(3));
        assert!(matches!(
            result,
            Err(TargetError::OutOfRange {
                distance: Distance(5000),
                ..
            })
        ));
    }

    #[test]
    fn missing_and_unknown_candidates_are_invalid() {
        let state = state();
        assert!(matches!(
            resolve(&state, melee(), &punch(), false, None),
            Err(TargetError::InvalidTarget {
                reason: InvalidTargetReason::Missing,
                ..
            })
        ));
        assert!(matches!(
            resolve(&state, melee(), &punch(), false, Some(9)),
            Err(TargetError::InvalidTarget {
                reason: InvalidTargetReason::NotFound,
                ..
            })
        ));
    }

    #[test]
    fn self_target_needs_explicit_permission() {
        let state = state();
        assert!(matches!(
            resolve(&state, melee(), &punch(), false, Some(1)),
            Err(TargetError::InvalidTarget {
                reason: InvalidTargetReason::Caster,
                ..
            })
        ));
        assert_eq!(resolve(&state, melee(), &punch(), true, Some(1)), Ok(CreatureId(1)));
    }

    #[test]
    fn the_dead_only_accept_resurrection() {
        let mut state = state();
        state
            .apply_log(&LogEntry::creature(
                CreatureId(2),
                CreatureLog::ApplyCondition {
                    id: crate::state::ConditionId(0),
                    condition: ConditionDef::dead(),
                },
            ))
            .unwrap();

        assert!(matches!(
            resolve(&state, melee(), &punch(), false, Some(2)),
            Err(TargetError::InvalidTarget {
                reason: InvalidTargetReason::Dead,
                ..
            })
        ));
        assert_eq!(
            resolve(&state, melee(), &Effect::Resurrect, false, Some(2)),
            Ok(CreatureId(2))
        );
        assert!(matches!(
            resolve(&state, melee(), &Effect::Resurrect, false, Some(1)),
            Err(TargetError::InvalidTarget {
                reason: InvalidTargetReason::Caster,
                ..
            })
        ));
    }

    #[test]
    fn resurrecting_the_living_is_invalid() {
        let state = state();
        assert!(matches!(
            resolve(&state, melee(), &Effect::Resurrect, false, Some(2)),
            Err(TargetError::InvalidTarget {
                reason: InvalidTargetReason::NotDead,
                ..
            })
        ));
    }
}
