//! Ability resolution pipeline.
//!
//! Validates a caster's use of an ability against its budgets, resolves every
//! effect's target, pays the cost and runs the effects. Abilities with a cast
//! time take two uses: the first begins the cast, and once `EndTurn` has ticked
//! it down to zero the second commits it.

use crate::command::{BudgetError, CommandError, ValidationError};
use crate::effect::{EffectContext, apply_effect};
use crate::engine::StateReducer;
use crate::env::GameEnv;
use crate::state::{
    Ability, AbilityId, AbilityStatus, Creature, CreatureId, CreatureLog, GameState, LogEntry,
};

use super::targeting::resolve_targets;

/// What a successful use of an ability did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AbilityOutcome {
    /// A cast began; cost and effects wait for the commit.
    CastBegun { turns: u32 },
    /// Cost was paid and the effects ran.
    Resolved,
}

/// Resolves `caster` using `ability` on a copy of `state`.
///
/// Returns the resulting state and the entries that produce it.
pub fn resolve_ability(
    state: &GameState,
    caster: CreatureId,
    ability: &AbilityId,
    target: Option<CreatureId>,
    env: &GameEnv<'_>,
) -> Result<(GameState, Vec<LogEntry>), CommandError> {
    let mut next = state.clone();
    let mut reducer = StateReducer::new(&mut next);
    use_ability(&mut reducer, caster, ability, target, env)?;
    let logs = reducer.into_logs();
    Ok((next, logs))
}

/// Runs the ability pipeline against the reducer's working state.
pub(crate) fn use_ability(
    reducer: &mut StateReducer<'_>,
    caster_id: CreatureId,
    ability_id: &AbilityId,
    target: Option<CreatureId>,
    env: &GameEnv<'_>,
) -> Result<AbilityOutcome, CommandError> {
    let state = reducer.state();
    let caster = state
        .creature(caster_id)
        .ok_or(ValidationError::CreatureNotFound(caster_id))?;
    if !caster.can_act() {
        return Err(ValidationError::CannotAct(caster_id).into());
    }

    let ability = env.ability(ability_id)?;
    let status = caster
        .abilities
        .get(ability_id)
        .ok_or_else(|| ValidationError::CreatureLacksAbility {
            creature: caster_id,
            ability: ability_id.clone(),
        })?;

    check_budget(caster, ability_id, &ability, status)?;

    let committing = match status.cast {
        None if ability.cast_time > 0 => {
            if !state.in_combat(caster_id) {
                return Err(ValidationError::CastRequiresCombat(ability_id.clone()).into());
            }
            reducer.record(LogEntry::creature(
                caster_id,
                CreatureLog::BeginCast {
                    ability: ability_id.clone(),
                    turns: ability.cast_time,
                },
            ))?;
            return Ok(AbilityOutcome::CastBegun {
                turns: ability.cast_time,
            });
        }
        None => false,
        Some(0) => true,
        Some(remaining) => {
            return Err(BudgetError::CastNotReady {
                ability: ability_id.clone(),
                remaining,
            }
            .into());
        }
    };

    // Every target is resolved against the state before anything is paid.
    let map = env.map()?;
    let targets = ability
        .effects
        .iter()
        .map(|effect| resolve_targets(effect, &ability, caster, target, state, map))
        .collect::<Result<Vec<_>, _>>()?;

    let mut payment = vec![CreatureLog::ReduceEnergy(ability.cost)];
    if ability.cooldown > 0 {
        payment.push(CreatureLog::SetCooldown {
            ability: ability_id.clone(),
            turns: ability.cooldown,
        });
    }
    if committing {
        payment.push(CreatureLog::CompleteCast {
            ability: ability_id.clone(),
        });
    }
    reducer.record_creature(caster_id, payment)?;

    for (targeted, target_id) in ability.effects.iter().zip(targets) {
        let state = reducer.state();
        let target = state
            .creature(target_id)
            .ok_or(ValidationError::CreatureNotFound(target_id))?;
        let mut ctx = EffectContext::new(state, *env);
        let (_, logs) = apply_effect(target, &targeted.effect, &mut ctx)?;
        reducer.record_creature(target_id, logs)?;
    }

    Ok(AbilityOutcome::Resolved)
}

fn check_budget(
    caster: &Creature,
    ability_id: &AbilityId,
    ability: &Ability,
    status: &AbilityStatus,
) -> Result<(), BudgetError> {
    if status.cooldown > 0 {
        return Err(BudgetError::OnCooldown {
            ability: ability_id.clone(),
            remaining: status.cooldown,
        });
    }
    if caster.energy.current < ability.cost {
        return Err(BudgetError::NotEnoughEnergy {
            required: ability.cost,
            available: caster.energy.current,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{InvalidTargetReason, TargetError};
    use crate::combat::Combatant;
    use crate::effect::{ConditionDef, ConditionKind, Duration};
    use crate::state::{Point3, SceneId};
    use crate::test_utils::{TestOracles, creature};

    fn arena(oracles: &TestOracles) -> GameState {
        let mut state = GameState::with_seed(42);
        let mut hero = creature(1, 20);
        for ability in oracles.ability_ids() {
            hero.abilities.insert(ability, AbilityStatus::default());
        }
        let mut goblin = creature(2, 10);
        goblin.position = Point3::new(200, 0, 0);
        for entry in [LogEntry::CreateCreature(hero), LogEntry::CreateCreature(goblin)] {
            state.apply_log(&entry).unwrap();
        }
        state
    }

    fn in_combat(mut state: GameState) -> GameState {
        let order = crate::combat::initiative_order(&[
            Combatant::new(CreatureId(1), 10),
            Combatant::new(CreatureId(2), 5),
        ]);
        state
            .apply_log(&LogEntry::StartCombat {
                scene: SceneId::from("arena"),
                creatures: order,
            })
            .unwrap();
        state
    }

    fn cast(
        state: &GameState,
        oracles: &TestOracles,
        ability: &str,
        target: Option<u32>,
    ) -> Result<(GameState, Vec<LogEntry>), CommandError> {
        resolve_ability(
            state,
            CreatureId(1),
            &AbilityId::from(ability),
            target.map(CreatureId),
            &oracles.env(),
        )
    }

    #[test]
    fn strike_pays_energy_then_damages_the_target() {
        let oracles = TestOracles::new();
        let state = arena(&oracles);

        let (next, logs) = cast(&state, &oracles, "strike", Some(2)).unwrap();

        assert_eq!(next.creatures[&CreatureId(1)].energy.current, 9);
        assert_eq!(next.creatures[&CreatureId(2)].health.current, 7);
        assert!(matches!(
            &logs[0],
            LogEntry::Creature {
                log: CreatureLog::ReduceEnergy(1),
                ..
            }
        ));
        let mut replayed = state.clone();
        replayed.apply_logs(&logs).unwrap();
        assert_eq!(replayed, next);
    }

    #[test]
    fn energy_runs_out_on_the_second_use() {
        let oracles = TestOracles::new();
        let mut state = arena(&oracles);
        state
            .apply_log(&LogEntry::creature(CreatureId(1), CreatureLog::ReduceEnergy(9)))
            .unwrap();

        let (state, _) = cast(&state, &oracles, "strike", Some(2)).unwrap();
        let result = cast(&state, &oracles, "strike", Some(2));

        assert_eq!(
            result.unwrap_err(),
            CommandError::Budget(BudgetError::NotEnoughEnergy {
                required: 1,
                available: 0,
            })
        );
    }

    #[test]
    fn cooldown_blocks_reuse() {
        let oracles = TestOracles::new();
        let state = arena(&oracles);

        let (state, _) = cast(&state, &oracles, "mend", None).unwrap();
        let result = cast(&state, &oracles, "mend", None);

        assert!(matches!(
            result,
            Err(CommandError::Budget(BudgetError::OnCooldown { remaining: 2, .. }))
        ));
    }

    #[test]
    fn unheld_ability_is_rejected() {
        let oracles = TestOracles::new();
        let state = arena(&oracles);

        let result = resolve_ability(
            &state,
            CreatureId(2),
            &AbilityId::from("strike"),
            Some(CreatureId(1)),
            &oracles.env(),
        );
        assert!(matches!(
            result,
            Err(CommandError::Validation(ValidationError::CreatureLacksAbility { .. }))
        ));
    }

    #[test]
    fn stunned_caster_cannot_act() {
        let oracles = TestOracles::new();
        let mut state = arena(&oracles);
        state
            .apply_log(&LogEntry::creature(
                CreatureId(1),
                CreatureLog::ApplyCondition {
                    id: crate::state::ConditionId(0),
                    condition: ConditionDef::new(
                        "stunned",
                        Duration::Timed(1),
                        ConditionKind::Incapacitated,
                    ),
                },
            ))
            .unwrap();

        let result = cast(&state, &oracles, "strike", Some(2));
        assert_eq!(
            result.unwrap_err(),
            CommandError::Validation(ValidationError::CannotAct(CreatureId(1)))
        );
    }

    #[test]
    fn target_errors_leave_budgets_untouched() {
        let oracles = TestOracles::new();
        let state = arena(&oracles);

        let result = cast(&state, &oracles, "strike", None);
        assert!(matches!(
            result,
            Err(CommandError::Target(TargetError::InvalidTarget {
                reason: InvalidTargetReason::Missing,
                ..
            }))
        ));
    }

    #[test]
    fn cast_time_needs_combat() {
        let oracles = TestOracles::new();
        let state = arena(&oracles);

        let result = cast(&state, &oracles, "meteor", Some(2));
        assert!(matches!(
            result,
            Err(CommandError::Validation(ValidationError::CastRequiresCombat(_)))
        ));
    }

    #[test]
    fn two_phase_cast_begins_then_waits_then_commits() {
        let oracles = TestOracles::new();
        let state = in_combat(arena(&oracles));

        let (state, logs) = cast(&state, &oracles, "meteor", Some(2)).unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(state.creatures[&CreatureId(1)].energy.current, 10);

        let result = cast(&state, &oracles, "meteor", Some(2));
        assert!(matches!(
            result,
            Err(CommandError::Budget(BudgetError::CastNotReady { remaining: 1, .. }))
        ));

        let mut ready = state.clone();
        ready
            .apply_log(&LogEntry::creature(
                CreatureId(1),
                CreatureLog::DecrementCastRemaining {
                    ability: AbilityId::from("meteor"),
                },
            ))
            .unwrap();

        let (done, logs) = cast(&ready, &oracles, "meteor", Some(2)).unwrap();
        let caster = &done.creatures[&CreatureId(1)];
        assert_eq!(caster.abilities[&AbilityId::from("meteor")].cast, None);
        assert_eq!(caster.energy.current, 7);
        assert_eq!(done.creatures[&CreatureId(2)].health.current, 4);
        assert!(logs.iter().any(|entry| matches!(
            entry,
            LogEntry::Creature {
                log: CreatureLog::CompleteCast { .. },
                ..
            }
        )));
    }
}
