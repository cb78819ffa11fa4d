//! Commands: every way a caller can ask the engine to change the game.
//!
//! Each command is a small struct implementing
//! [`CommandTransition`](crate::engine::CommandTransition). [`Command`] is the
//! tagged union the engine, the history and the runtime pass around.
//!
//! # Module Structure
//!
//! - `creature`: Creature lifecycle, placement and GM condition edits
//! - `combat`: Combat lifecycle, turn order and movement
//! - `act`: Ability use, in and out of combat
//! - `passthrough`: Edits to data owned outside the rules engine
//! - `error`: Rejection reasons (ValidationError, BudgetError, CommandError)

mod act;
mod combat;
mod creature;
mod error;
mod passthrough;

pub use act::{ActCommand, ActOutOfCombatCommand};
pub use combat::{
    AddCreatureToCombatCommand, ChangeCreatureInitiativeCommand, CombatMoveCommand,
    EndTurnCommand, RemoveCreatureFromCombatCommand, StartCombatCommand, StopCombatCommand,
};
pub use creature::{
    ApplyConditionCommand, CreateCreatureCommand, RemoveConditionCommand, RemoveCreatureCommand,
    SetCreaturePositionCommand,
};
pub use error::{BudgetError, CommandError, ValidationError};
pub use passthrough::PassthroughCommand;

use crate::combat::Combatant;
use crate::state::{
    AbilityId, ConditionId, ConditionKey, CreatureCreation, CreatureId, ExternalEdit, Point3,
    SceneId,
};

/// A request to change the game.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Command {
    CreateCreature(CreateCreatureCommand),
    RemoveCreature(RemoveCreatureCommand),
    SetCreaturePosition(SetCreaturePositionCommand),
    ApplyCondition(ApplyConditionCommand),
    RemoveCondition(RemoveConditionCommand),
    StartCombat(StartCombatCommand),
    StopCombat(StopCombatCommand),
    AddCreatureToCombat(AddCreatureToCombatCommand),
    RemoveCreatureFromCombat(RemoveCreatureFromCombatCommand),
    ChangeCreatureInitiative(ChangeCreatureInitiativeCommand),
    CombatMove(CombatMoveCommand),
    Act(ActCommand),
    ActOutOfCombat(ActOutOfCombatCommand),
    EndTurn(EndTurnCommand),
    Passthrough(PassthroughCommand),
    /// Only meaningful against a [`History`](crate::history::History).
    Rollback {
        snapshot_index: usize,
        log_index: usize,
    },
}

impl Command {
    /// Short, stable name for tracing and error reports.
    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn create_creature(creation: CreatureCreation) -> Self {
        Command::CreateCreature(CreateCreatureCommand { creation })
    }

    pub fn remove_creature(creature: CreatureId) -> Self {
        Command::RemoveCreature(RemoveCreatureCommand { creature })
    }

    pub fn set_creature_position(creature: CreatureId, position: Point3) -> Self {
        Command::SetCreaturePosition(SetCreaturePositionCommand { creature, position })
    }

    pub fn apply_condition(creature: CreatureId, condition: impl Into<ConditionKey>) -> Self {
        Command::ApplyCondition(ApplyConditionCommand {
            creature,
            condition: condition.into(),
        })
    }

    pub fn remove_condition(creature: CreatureId, condition: ConditionId) -> Self {
        Command::RemoveCondition(RemoveConditionCommand {
            creature,
            condition,
        })
    }

    pub fn start_combat(scene: impl Into<SceneId>, combatants: Vec<Combatant>) -> Self {
        Command::StartCombat(StartCombatCommand {
            scene: scene.into(),
            combatants,
        })
    }

    pub fn stop_combat() -> Self {
        Command::StopCombat(StopCombatCommand)
    }

    pub fn add_creature_to_combat(creature: CreatureId) -> Self {
        Command::AddCreatureToCombat(AddCreatureToCombatCommand { creature })
    }

    pub fn remove_creature_from_combat(creature: CreatureId) -> Self {
        Command::RemoveCreatureFromCombat(RemoveCreatureFromCombatCommand { creature })
    }

    pub fn change_creature_initiative(creature: CreatureId, new_index: usize) -> Self {
        Command::ChangeCreatureInitiative(ChangeCreatureInitiativeCommand {
            creature,
            new_index,
        })
    }

    pub fn combat_move(destination: Point3) -> Self {
        Command::CombatMove(CombatMoveCommand { destination })
    }

    pub fn act(ability: impl Into<AbilityId>, target: Option<CreatureId>) -> Self {
        Command::Act(ActCommand {
            ability: ability.into(),
            target,
        })
    }

    pub fn act_out_of_combat(
        creature: CreatureId,
        ability: impl Into<AbilityId>,
        target: Option<CreatureId>,
    ) -> Self {
        Command::ActOutOfCombat(ActOutOfCombatCommand {
            creature,
            ability: ability.into(),
            target,
        })
    }

    pub fn end_turn() -> Self {
        Command::EndTurn(EndTurnCommand)
    }

    pub fn passthrough(edit: ExternalEdit) -> Self {
        Command::Passthrough(PassthroughCommand { edit })
    }

    pub fn rollback(snapshot_index: usize, log_index: usize) -> Self {
        Command::Rollback {
            snapshot_index,
            log_index,
        }
    }
}
