//! Combat lifecycle, turn order and movement.

use std::collections::BTreeSet;

use crate::combat::{Combat, Combatant, initiative_order};
use crate::effect::{EffectContext, tick};
use crate::engine::{CommandTransition, StateReducer};
use crate::env::GameEnv;
use crate::state::{CreatureId, CreatureLog, Distance, GameState, LogEntry, Point3, SceneId};

use super::{BudgetError, CommandError, ValidationError};

fn active_combat(state: &GameState) -> Result<&Combat, ValidationError> {
    state.combat.as_ref().ok_or(ValidationError::NotInCombat)
}

/// Cancels every cast `creatures` have in progress.
///
/// Casts only tick down on combat turns, so a creature leaving combat
/// mid-cast would otherwise never finish it.
fn cancel_casts(
    reducer: &mut StateReducer<'_>,
    creatures: &[CreatureId],
) -> Result<(), CommandError> {
    for &id in creatures {
        let Some(creature) = reducer.state().creature(id) else {
            continue;
        };
        let cancels: Vec<_> = creature
            .casting()
            .cloned()
            .map(|ability| CreatureLog::CancelCast { ability })
            .collect();
        reducer.record_creature(id, cancels)?;
    }
    Ok(())
}

/// Starts combat among `combatants`, ordered by descending initiative.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartCombatCommand {
    pub scene: SceneId,
    pub combatants: Vec<Combatant>,
}

impl CommandTransition for StartCombatCommand {
    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), CommandError> {
        if state.combat.is_some() {
            return Err(ValidationError::AlreadyInCombat.into());
        }
        if self.combatants.is_empty() {
            return Err(ValidationError::CombatMustHaveCreatures.into());
        }

        let mut seen = BTreeSet::new();
        for combatant in &self.combatants {
            let id = combatant.creature;
            if state.creature(id).is_none() {
                return Err(ValidationError::CreatureNotFound(id).into());
            }
            if !seen.insert(id) {
                return Err(ValidationError::DuplicateCombatant(id).into());
            }
        }

        if seen.iter().all(|id| state.is_dead(*id)) {
            return Err(ValidationError::NoLivingCombatants.into());
        }
        Ok(())
    }

    fn apply(
        &self,
        reducer: &mut StateReducer<'_>,
        _env: &GameEnv<'_>,
    ) -> Result<(), CommandError> {
        reducer.record(LogEntry::StartCombat {
            scene: self.scene.clone(),
            creatures: initiative_order(&self.combatants),
        })?;
        Ok(())
    }
}

/// Ends combat. Creatures keep their health, conditions and cooldowns; casts
/// in progress are cancelled.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StopCombatCommand;

impl CommandTransition for StopCombatCommand {
    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), CommandError> {
        active_combat(state)?;
        Ok(())
    }

    fn apply(
        &self,
        reducer: &mut StateReducer<'_>,
        _env: &GameEnv<'_>,
    ) -> Result<(), CommandError> {
        let combatants = active_combat(reducer.state())?.creatures.clone();
        cancel_casts(reducer, &combatants)?;
        reducer.record(LogEntry::StopCombat)?;
        Ok(())
    }
}

/// Appends a creature to the end of the turn order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddCreatureToCombatCommand {
    pub creature: CreatureId,
}

impl CommandTransition for AddCreatureToCombatCommand {
    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), CommandError> {
        let combat = active_combat(state)?;
        if state.creature(self.creature).is_none() {
            return Err(ValidationError::CreatureNotFound(self.creature).into());
        }
        if combat.contains(self.creature) {
            return Err(ValidationError::CreatureInCombat(self.creature).into());
        }
        Ok(())
    }

    fn apply(
        &self,
        reducer: &mut StateReducer<'_>,
        _env: &GameEnv<'_>,
    ) -> Result<(), CommandError> {
        reducer.record(LogEntry::AddCreatureToCombat(self.creature))?;
        Ok(())
    }
}

/// Takes a creature out of the turn order, cancelling its casts; the last one
/// out ends combat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RemoveCreatureFromCombatCommand {
    pub creature: CreatureId,
}

impl CommandTransition for RemoveCreatureFromCombatCommand {
    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), CommandError> {
        if !active_combat(state)?.contains(self.creature) {
            return Err(ValidationError::CreatureNotInCombat(self.creature).into());
        }
        Ok(())
    }

    fn apply(
        &self,
        reducer: &mut StateReducer<'_>,
        _env: &GameEnv<'_>,
    ) -> Result<(), CommandError> {
        cancel_casts(reducer, &[self.creature])?;
        reducer.record(LogEntry::RemoveCreatureFromCombat(self.creature))?;
        Ok(())
    }
}

/// Moves a combatant to `new_index` in the turn order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChangeCreatureInitiativeCommand {
    pub creature: CreatureId,
    pub new_index: usize,
}

impl CommandTransition for ChangeCreatureInitiativeCommand {
    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), CommandError> {
        let combat = active_combat(state)?;
        if !combat.contains(self.creature) {
            return Err(ValidationError::CreatureNotInCombat(self.creature).into());
        }
        let len = combat.creatures.len();
        if self.new_index >= len {
            return Err(ValidationError::InitiativeOutOfBounds {
                index: self.new_index,
                len,
            }
            .into());
        }
        Ok(())
    }

    fn apply(
        &self,
        reducer: &mut StateReducer<'_>,
        _env: &GameEnv<'_>,
    ) -> Result<(), CommandError> {
        reducer.record(LogEntry::ChangeInitiative {
            id: self.creature,
            new_index: self.new_index,
        })?;
        Ok(())
    }
}

/// Moves the active combatant, paying for the distance out of its speed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatMoveCommand {
    pub destination: Point3,
}

impl CombatMoveCommand {
    fn cost(
        &self,
        state: &GameState,
        env: &GameEnv<'_>,
    ) -> Result<(CreatureId, Distance), CommandError> {
        let combat = active_combat(state)?;
        let id = combat.current();
        let mover = state
            .creature(id)
            .ok_or(ValidationError::CreatureNotFound(id))?;
        if !mover.can_move() {
            return Err(ValidationError::CannotMove(id).into());
        }

        let map = env.map()?;
        if !map.is_passable(self.destination) {
            return Err(ValidationError::Blocked(self.destination).into());
        }
        if let Some(occupant) = state.creatures.values().find(|other| {
            other.id != id && other.position == self.destination && !other.is_dead()
        }) {
            return Err(ValidationError::Occupied {
                position: self.destination,
                occupant: occupant.id,
            }
            .into());
        }

        let cost = map.distance(mover.position, self.destination);
        let remaining = mover.speed.saturating_sub(combat.movement_used);
        if cost > remaining {
            return Err(BudgetError::InsufficientMovement {
                required: cost,
                remaining,
            }
            .into());
        }
        Ok((id, cost))
    }
}

impl CommandTransition for CombatMoveCommand {
    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), CommandError> {
        self.cost(state, env).map(|_| ())
    }

    fn apply(&self, reducer: &mut StateReducer<'_>, env: &GameEnv<'_>) -> Result<(), CommandError> {
        let (id, cost) = self.cost(reducer.state(), env)?;
        reducer.record(LogEntry::ConsumeMovement(cost))?;
        reducer.record(LogEntry::creature(id, CreatureLog::SetPosition(self.destination)))?;
        Ok(())
    }
}

/// Ends the active combatant's turn.
///
/// The active creature's conditions and budgets tick first, then the turn
/// passes to the next living combatant. Allowed even when the active creature
/// cannot act, so an incapacitated creature's turn can always be skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndTurnCommand;

impl CommandTransition for EndTurnCommand {
    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), CommandError> {
        active_combat(state)?;
        Ok(())
    }

    fn apply(&self, reducer: &mut StateReducer<'_>, env: &GameEnv<'_>) -> Result<(), CommandError> {
        let state = reducer.state();
        let id = active_combat(state)?.current();
        let creature = state
            .creature(id)
            .ok_or(ValidationError::CreatureNotFound(id))?;

        let mut ctx = EffectContext::new(state, *env);
        let (_, logs) = tick(creature, &mut ctx)?;
        reducer.record_creature(id, logs)?;
        reducer.record(LogEntry::EndTurn { id })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::effect::ConditionKind;
    use crate::engine::{Applied, ExecuteError, GameEngine};
    use crate::state::{AbilityId, CreatureCreation};
    use crate::test_utils::TestOracles;

    const A: CreatureId = CreatureId(0);
    const B: CreatureId = CreatureId(1);
    const C: CreatureId = CreatureId(2);

    struct Table {
        oracles: TestOracles,
        state: GameState,
    }

    impl Table {
        fn new(creatures: usize) -> Self {
            let mut table = Self {
                oracles: TestOracles::new(),
                state: GameState::with_seed(7),
            };
            for index in 0..creatures {
                let creation = CreatureCreation::new(format!("creature {index}"))
                    .with_ability("strike")
                    .with_ability("venom")
                    .at(Point3::new(index as i32 * 150, 0, 0));
                table.run(Command::create_creature(creation));
            }
            table
        }

        fn try_run(&self, command: Command) -> Result<Applied, ExecuteError> {
            GameEngine::new(self.oracles.env()).apply(&self.state, &command)
        }

        fn run(&mut self, command: Command) -> Vec<LogEntry> {
            let applied = self.try_run(command).unwrap();
            self.state = applied.state;
            applied.logs
        }

        fn start(&mut self) {
            self.run(Command::start_combat(
                "crypt",
                vec![Combatant::new(A, 3), Combatant::new(B, 2), Combatant::new(C, 1)],
            ));
        }

        fn current(&self) -> CreatureId {
            self.state.current_combatant().unwrap()
        }

        fn reject(&self, command: Command) -> CommandError {
            self.try_run(command).unwrap_err().error().clone()
        }
    }

    #[test]
    fn start_combat_validates_participants() {
        let table = Table::new(2);
        assert_eq!(
            table.reject(Command::start_combat("crypt", vec![])),
            CommandError::from(ValidationError::CombatMustHaveCreatures)
        );
        assert_eq!(
            table.reject(Command::start_combat("crypt", vec![Combatant::new(CreatureId(9), 1)])),
            CommandError::from(ValidationError::CreatureNotFound(CreatureId(9)))
        );
        assert_eq!(
            table.reject(Command::start_combat(
                "crypt",
                vec![Combatant::new(A, 1), Combatant::new(A, 2)]
            )),
            CommandError::from(ValidationError::DuplicateCombatant(A))
        );
    }

    #[test]
    fn start_combat_twice_is_rejected() {
        let mut table = Table::new(3);
        table.start();
        assert_eq!(
            table.reject(Command::start_combat("crypt", vec![Combatant::new(A, 1)])),
            CommandError::from(ValidationError::AlreadyInCombat)
        );
    }

    #[test]
    fn four_end_turns_cycle_back_to_the_first() {
        let mut table = Table::new(3);
        table.start();

        let mut visited = Vec::new();
        for _ in 0..4 {
            visited.push(table.current());
            table.run(Command::end_turn());
        }
        assert_eq!(visited, vec![A, B, C, A]);
    }

    #[test]
    fn end_turn_ticks_the_active_creature() {
        let mut table = Table::new(3);
        table.start();
        table.run(Command::act("venom", Some(B)));

        // A ends, then B's own turn end makes the poison bite.
        table.run(Command::end_turn());
        let logs = table.run(Command::end_turn());

        assert!(logs.iter().any(|entry| matches!(
            entry,
            LogEntry::Creature {
                id,
                log: CreatureLog::Damage { amount: 1, .. },
            } if *id == B
        )));
        assert!(matches!(logs.last(), Some(LogEntry::EndTurn { id }) if *id == B));
        assert_eq!(table.state.creatures[&B].health.current, 9);
    }

    #[test]
    fn incapacitated_creatures_can_still_end_their_turn() {
        let mut table = Table::new(3);
        table.start();
        table.run(Command::apply_condition(A, "stunned"));

        assert!(matches!(
            table.reject(Command::act("strike", Some(B))),
            CommandError::Validation(ValidationError::CannotAct(_))
        ));
        table.run(Command::end_turn());
        assert_eq!(table.current(), B);
    }

    #[test]
    fn dead_combatants_are_skipped() {
        let mut table = Table::new(3);
        table.start();
        for _ in 0..3 {
            table.run(Command::act("strike", Some(C)));
            for _ in 0..3 {
                table.run(Command::end_turn());
            }
        }
        table.run(Command::act("strike", Some(C)));
        assert!(table.state.is_dead(C));

        table.run(Command::end_turn());
        table.run(Command::end_turn());
        assert_eq!(table.current(), A);
    }

    #[test]
    fn removing_combatants_keeps_the_turn_consistent() {
        let mut table = Table::new(3);
        table.start();
        table.run(Command::end_turn());
        assert_eq!(table.current(), B);

        table.run(Command::remove_creature_from_combat(A));
        assert_eq!(table.current(), B);

        table.run(Command::remove_creature_from_combat(B));
        assert_eq!(table.current(), C);

        table.run(Command::remove_creature_from_combat(C));
        assert!(table.state.combat.is_none());
    }

    #[test]
    fn initiative_changes_keep_the_active_creature() {
        let mut table = Table::new(3);
        table.start();
        table.run(Command::end_turn());

        table.run(Command::change_creature_initiative(C, 0));
        assert_eq!(table.state.combat.as_ref().unwrap().creatures, vec![C, A, B]);
        assert_eq!(table.current(), B);

        assert_eq!(
            table.reject(Command::change_creature_initiative(C, 3)),
            CommandError::from(ValidationError::InitiativeOutOfBounds { index: 3, len: 3 })
        );
    }

    #[test]
    fn movement_is_budgeted_per_turn() {
        let mut table = Table::new(3);
        table.start();
        let speed = table.state.creatures[&A].speed;

        let logs = table.run(Command::combat_move(Point3::new(0, 1000, 0)));
        assert_eq!(logs[0], LogEntry::ConsumeMovement(Distance(1000)));
        assert_eq!(table.state.creatures[&A].position, Point3::new(0, 1000, 0));

        assert_eq!(
            table.reject(Command::combat_move(Point3::new(0, 1200, 0))),
            CommandError::from(BudgetError::InsufficientMovement {
                required: Distance(200),
                remaining: speed.saturating_sub(Distance(1000)),
            })
        );

        // The budget comes back on the creature's next turn.
        for _ in 0..3 {
            table.run(Command::end_turn());
        }
        table.run(Command::combat_move(Point3::new(0, 1200, 0)));
    }

    #[test]
    fn cannot_move_onto_a_living_creature() {
        let mut table = Table::new(3);
        table.start();
        assert_eq!(
            table.reject(Command::combat_move(Point3::new(150, 0, 0))),
            CommandError::from(ValidationError::Occupied {
                position: Point3::new(150, 0, 0),
                occupant: B,
            })
        );
    }

    #[test]
    fn stop_combat_keeps_creature_state() {
        let mut table = Table::new(3);
        table.start();
        table.run(Command::act("venom", Some(B)));
        table.run(Command::stop_combat());

        assert!(table.state.combat.is_none());
        let poison = table.state.creatures[&B].condition_named("poisoned").unwrap();
        assert!(matches!(poison.kind(), ConditionKind::RecurringEffect(_)));
        assert_eq!(
            table.reject(Command::end_turn()),
            CommandError::from(ValidationError::NotInCombat)
        );
    }

    #[test]
    fn stopping_combat_cancels_casts_in_progress() {
        let mut table = Table::new(0);
        table.run(Command::create_creature(
            CreatureCreation::new("mage").with_ability("meteor"),
        ));
        table.run(Command::create_creature(
            CreatureCreation::new("golem").at(Point3::new(500, 0, 0)),
        ));
        let duel = || {
            Command::start_combat("crypt", vec![Combatant::new(A, 2), Combatant::new(B, 1)])
        };

        table.run(duel());
        table.run(Command::act("meteor", Some(B)));
        assert_eq!(table.state.creatures[&A].casting().count(), 1);

        let logs = table.run(Command::stop_combat());
        assert!(logs.iter().any(|entry| matches!(
            entry,
            LogEntry::Creature {
                log: CreatureLog::CancelCast { .. },
                ..
            }
        )));
        assert_eq!(table.state.creatures[&A].casting().count(), 0);
        assert_eq!(
            table.reject(Command::act_out_of_combat(A, "meteor", Some(B))),
            CommandError::from(ValidationError::CastRequiresCombat(AbilityId::from("meteor")))
        );

        table.run(duel());
        let logs = table.run(Command::act("meteor", Some(B)));
        assert!(matches!(
            logs.as_slice(),
            [LogEntry::Creature {
                log: CreatureLog::BeginCast { turns: 1, .. },
                ..
            }]
        ));
    }

    #[test]
    fn leaving_combat_cancels_the_leavers_casts() {
        let mut table = Table::new(0);
        table.run(Command::create_creature(
            CreatureCreation::new("mage").with_ability("meteor"),
        ));
        table.run(Command::create_creature(
            CreatureCreation::new("golem").at(Point3::new(500, 0, 0)),
        ));
        table.run(Command::start_combat(
            "crypt",
            vec![Combatant::new(A, 2), Combatant::new(B, 1)],
        ));
        table.run(Command::act("meteor", Some(B)));

        table.run(Command::remove_creature_from_combat(A));
        assert_eq!(table.state.creatures[&A].casting().count(), 0);
        assert_eq!(table.current(), B);
    }

    #[test]
    fn combatants_cannot_be_removed_from_the_arena() {
        let mut table = Table::new(3);
        table.start();
        assert_eq!(
            table.reject(Command::remove_creature(A)),
            CommandError::from(ValidationError::CreatureInCombat(A))
        );
    }
}
