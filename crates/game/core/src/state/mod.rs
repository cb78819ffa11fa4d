//! Authoritative game state representation.
//!
//! This module owns the creature arena, combat bookkeeping and the id/dice
//! allocators. Runtime layers clone or query this state but change it
//! exclusively through the engine, which records every change as a
//! [`LogEntry`] and applies it with [`GameState::apply_log`].
mod error;
mod log;
pub mod types;

use std::collections::BTreeMap;

use crate::combat::Combat;

pub use error::ReplayError;
pub use log::{CreatureLog, ExternalEdit, LogEntry};
pub use types::{
    Ability, AbilityId, AbilityStatus, Capabilities, ConditionId, ConditionKey, Creature,
    CreatureCreation, CreatureId, Distance, Point3, ResourceMeter, SceneId, TargetedEffect,
    TargetingSystem,
};

/// Canonical snapshot of the deterministic game state.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// RNG seed for deterministic dice.
    ///
    /// Set once at game initialization and never modified.
    pub game_seed: u64,

    /// Number of dice realized so far. Combined with `game_seed` to seed the
    /// next roll; advanced only by applying log entries that carry dice.
    pub dice_rolled: u64,

    /// Sequential creature id allocator. Never reused.
    pub next_creature_id: u32,

    /// Sequential condition id allocator. Never reused.
    pub next_condition_id: u32,

    pub creatures: BTreeMap<CreatureId, Creature>,

    /// `None` while out of combat.
    pub combat: Option<Combat>,
}

impl GameState {
    /// Creates an empty state with a specific game seed.
    pub fn with_seed(game_seed: u64) -> Self {
        Self {
            game_seed,
            ..Self::default()
        }
    }

    pub fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.get(&id)
    }

    pub fn is_dead(&self, id: CreatureId) -> bool {
        self.creatures.get(&id).is_some_and(Creature::is_dead)
    }

    /// The creature whose combat turn it is.
    pub fn current_combatant(&self) -> Option<CreatureId> {
        self.combat.as_ref().map(Combat::current)
    }

    /// True if `id` takes part in the active combat.
    pub fn in_combat(&self, id: CreatureId) -> bool {
        self.combat.as_ref().is_some_and(|combat| combat.contains(id))
    }

    /// The id the next created creature will receive.
    pub fn peek_creature_id(&self) -> CreatureId {
        CreatureId(self.next_creature_id)
    }

    /// Checks the structural invariants every committed state must satisfy.
    pub fn check_invariants(&self) -> Result<(), &'static str> {
        for creature in self.creatures.values() {
            if creature.health.current > creature.health.maximum {
                return Err("health exceeds maximum");
            }
            if creature.energy.current > creature.energy.maximum {
                return Err("energy exceeds maximum");
            }
        }
        if let Some(combat) = &self.combat {
            if combat.creatures.is_empty() {
                return Err("active combat has no creatures");
            }
            if combat.cursor >= combat.creatures.len() {
                return Err("combat cursor out of bounds");
            }
            if combat
                .creatures
                .iter()
                .any(|id| !self.creatures.contains_key(id))
            {
                return Err("combat references a missing creature");
            }
        }
        Ok(())
    }

    fn creature_mut(&mut self, id: CreatureId) -> Result<&mut Creature, ReplayError> {
        self.creatures
            .get_mut(&id)
            .ok_or(ReplayError::CreatureNotFound(id))
    }

    fn combat_mut(&mut self) -> Result<&mut Combat, ReplayError> {
        self.combat.as_mut().ok_or(ReplayError::NotInCombat)
    }

    /// Applies one log entry.
    ///
    /// This is the replay path shared by the engine and the history manager.
    /// It re-materializes the recorded fact without rolling dice or
    /// re-validating rules. `Rollback` entries cannot be applied here; they
    /// only make sense against a history.
    pub fn apply_log(&mut self, entry: &LogEntry) -> Result<(), ReplayError> {
        match entry {
            LogEntry::Creature { id, log } => {
                self.creature_mut(*id)?.apply_log(log)?;
                self.dice_rolled += log.dice_count();
                if let CreatureLog::ApplyCondition { id: condition, .. } = log {
                    self.next_condition_id = self.next_condition_id.max(condition.0 + 1);
                }
            }
            LogEntry::CreateCreature(creature) => {
                if self.creatures.contains_key(&creature.id) {
                    return Err(ReplayError::CreatureExists(creature.id));
                }
                self.next_creature_id = self.next_creature_id.max(creature.id.0 + 1);
                self.creatures.insert(creature.id, creature.clone());
            }
            LogEntry::RemoveCreature(id) => {
                if self.in_combat(*id) {
                    return Err(ReplayError::CreatureInCombat(*id));
                }
                self.creatures
                    .remove(id)
                    .ok_or(ReplayError::CreatureNotFound(*id))?;
            }
            LogEntry::StartCombat { scene, creatures } => {
                if self.combat.is_some() {
                    return Err(ReplayError::AlreadyInCombat);
                }
                if creatures.is_empty() {
                    return Err(ReplayError::EmptyCombat);
                }
                if let Some(missing) = creatures.iter().find(|id| !self.creatures.contains_key(id)) {
                    return Err(ReplayError::CreatureNotFound(*missing));
                }
                let combat = Combat::start(scene.clone(), creatures.clone(), |id| self.is_dead(id));
                self.combat = Some(combat);
            }
            LogEntry::StopCombat => {
                self.combat.take().ok_or(ReplayError::NotInCombat)?;
            }
            LogEntry::AddCreatureToCombat(id) => {
                if !self.creatures.contains_key(id) {
                    return Err(ReplayError::CreatureNotFound(*id));
                }
                let combat = self.combat_mut()?;
                if combat.contains(*id) {
                    return Err(ReplayError::AlreadyACombatant(*id));
                }
                combat.add(*id);
            }
            LogEntry::RemoveCreatureFromCombat(id) => {
                let creatures = &self.creatures;
                let combat = self.combat.as_mut().ok_or(ReplayError::NotInCombat)?;
                if !combat.contains(*id) {
                    return Err(ReplayError::NotACombatant(*id));
                }
                let continues =
                    combat.remove(*id, |id| creatures.get(&id).is_some_and(Creature::is_dead));
                if !continues {
                    self.combat = None;
                }
            }
            LogEntry::ChangeInitiative { id, new_index } => {
                let combat = self.combat_mut()?;
                if !combat.contains(*id) {
                    return Err(ReplayError::NotACombatant(*id));
                }
                if *new_index >= combat.creatures.len() {
                    return Err(ReplayError::InitiativeOutOfBounds {
                        index: *new_index,
                        len: combat.creatures.len(),
                    });
                }
                combat.reposition(*id, *new_index);
            }
            LogEntry::ConsumeMovement(distance) => {
                let combat = self.combat_mut()?;
                combat.movement_used = combat.movement_used.saturating_add(*distance);
            }
            LogEntry::EndTurn { id } => {
                let creatures = &self.creatures;
                let combat = self.combat.as_mut().ok_or(ReplayError::NotInCombat)?;
                if combat.current() != *id {
                    return Err(ReplayError::NotCurrentTurn {
                        expected: *id,
                        actual: combat.current(),
                    });
                }
                combat.advance(|id| creatures.get(&id).is_some_and(Creature::is_dead));
            }
            LogEntry::Passthrough(_) => {}
            LogEntry::Rollback { .. } => return Err(ReplayError::RollbackNotReplayable),
        }
        Ok(())
    }

    /// Applies a sequence of entries in order.
    pub fn apply_logs<'a>(
        &mut self,
        entries: impl IntoIterator<Item = &'a LogEntry>,
    ) -> Result<(), ReplayError> {
        entries
            .into_iter()
            .try_for_each(|entry| self.apply_log(entry))
    }

    /// SHA-256 digest of the bincode encoding of this state.
    ///
    /// Every map in the state is ordered, so equal states always produce the
    /// same root. Used to compare a rebuilt state against a recorded one.
    #[cfg(feature = "serde")]
    pub fn state_root(&self) -> [u8; 32] {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        if let Ok(bytes) = bincode::serialize(self) {
            hasher.update(&bytes);
        }
        hasher.finalize().into()
    }
}

/// SHA-256 commitment to a sequence of log entries, in order.
#[cfg(feature = "serde")]
pub fn compute_log_root(entries: &[LogEntry]) -> [u8; 32] {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    for entry in entries {
        if let Ok(bytes) = bincode::serialize(entry) {
            hasher.update(&bytes);
        }
    }
    hasher.finalize().into()
}
