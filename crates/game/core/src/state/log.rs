//! Log entries: one atomic, replayable record per state change.
//!
//! Every entry carries everything needed to re-apply it, including realized
//! dice, freshly allocated ids and resolved turn order. Nothing here is
//! re-derived on replay.

use crate::effect::ConditionDef;

use super::{AbilityId, ConditionId, Creature, CreatureId, Distance, Point3, SceneId};

/// A fact about a single creature.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CreatureLog {
    /// Damage actually applied, after modifiers and clamping, with the faces rolled.
    Damage { amount: u32, dice: Vec<u32> },
    /// Health actually restored, with the faces rolled.
    Heal { amount: u32, dice: Vec<u32> },
    GenerateEnergy(u32),
    ReduceEnergy(u32),
    ApplyCondition { id: ConditionId, condition: ConditionDef },
    RemoveCondition { id: ConditionId },
    DecrementConditionRemaining { id: ConditionId },
    SetPosition(Point3),
    SetCooldown { ability: AbilityId, turns: u32 },
    DecrementCooldown { ability: AbilityId },
    BeginCast { ability: AbilityId, turns: u32 },
    DecrementCastRemaining { ability: AbilityId },
    CancelCast { ability: AbilityId },
    CompleteCast { ability: AbilityId },
}

impl CreatureLog {
    /// Number of dice this entry realized.
    pub fn dice_count(&self) -> u64 {
        match self {
            CreatureLog::Damage { dice, .. } | CreatureLog::Heal { dice, .. } => dice.len() as u64,
            _ => 0,
        }
    }
}

/// An edit to data owned outside the rules engine.
///
/// The engine does not interpret these; they are logged so the history stays
/// a complete record of what happened in the session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExternalEdit {
    Note { path: String, content: String },
    Folder { path: String },
    Scene { scene: SceneId, description: String },
}

/// A game-level fact.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum LogEntry {
    Creature { id: CreatureId, log: CreatureLog },
    CreateCreature(Creature),
    RemoveCreature(CreatureId),
    /// Combat began with `creatures` already sorted into initiative order.
    StartCombat { scene: SceneId, creatures: Vec<CreatureId> },
    StopCombat,
    AddCreatureToCombat(CreatureId),
    RemoveCreatureFromCombat(CreatureId),
    ChangeInitiative { id: CreatureId, new_index: usize },
    /// Movement spent by the active combatant this turn.
    ConsumeMovement(Distance),
    EndTurn { id: CreatureId },
    Passthrough(ExternalEdit),
    Rollback { snapshot_index: usize, log_index: usize },
}

impl LogEntry {
    pub fn creature(id: CreatureId, log: CreatureLog) -> Self {
        LogEntry::Creature { id, log }
    }

    /// Short, stable name for tracing and display.
    pub fn name(&self) -> &'static str {
        match self {
            LogEntry::Creature { log, .. } => log.into(),
            other => other.into(),
        }
    }
}
