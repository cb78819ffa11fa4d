use std::collections::BTreeMap;

use crate::effect::{AppliedCondition, ConditionKind, Duration};
use crate::state::{CreatureLog, ReplayError};

use super::{AbilityId, AbilityStatus, ConditionId, CreatureId, Distance, Point3, ResourceMeter};

bitflags::bitflags! {
    /// What a creature is currently able to do, derived from its conditions.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Capabilities: u8 {
        const ACT = 1 << 0;
        const MOVE = 1 << 1;
    }
}

/// A creature in the game arena.
///
/// Conditions and abilities are id-keyed maps; combat membership lives in
/// [`Combat`](crate::combat::Combat), never on the creature.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Creature {
    pub id: CreatureId,
    pub name: String,
    pub note: String,
    pub health: ResourceMeter,
    pub energy: ResourceMeter,
    pub position: Point3,
    pub speed: Distance,
    pub abilities: BTreeMap<AbilityId, AbilityStatus>,
    pub conditions: BTreeMap<ConditionId, AppliedCondition>,
}

impl Creature {
    pub fn new(id: CreatureId, name: impl Into<String>, max_health: u32, max_energy: u32) -> Self {
        Self {
            id,
            name: name.into(),
            note: String::new(),
            health: ResourceMeter::full(max_health),
            energy: ResourceMeter::full(max_energy),
            position: Point3::ORIGIN,
            speed: Distance::ZERO,
            abilities: BTreeMap::new(),
            conditions: BTreeMap::new(),
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        if self.conditions.values().any(|applied| applied.kind().disables()) {
            Capabilities::empty()
        } else {
            Capabilities::ACT | Capabilities::MOVE
        }
    }

    pub fn can_act(&self) -> bool {
        self.capabilities().contains(Capabilities::ACT)
    }

    pub fn can_move(&self) -> bool {
        self.capabilities().contains(Capabilities::MOVE)
    }

    pub fn is_dead(&self) -> bool {
        self.dead_conditions().next().is_some()
    }

    pub fn dead_conditions(&self) -> impl Iterator<Item = ConditionId> + '_ {
        self.conditions
            .values()
            .filter(|applied| applied.condition.kind == ConditionKind::Dead)
            .map(|applied| applied.id)
    }

    pub fn condition_named(&self, name: &str) -> Option<&AppliedCondition> {
        self.conditions
            .values()
            .find(|applied| applied.condition.name == name)
    }

    /// Abilities with a cast in progress.
    pub fn casting(&self) -> impl Iterator<Item = &AbilityId> + '_ {
        self.abilities
            .iter()
            .filter(|(_, status)| status.cast.is_some())
            .map(|(ability, _)| ability)
    }

    fn ability_mut(&mut self, ability: &AbilityId) -> Result<&mut AbilityStatus, ReplayError> {
        let id = self.id;
        self.abilities
            .get_mut(ability)
            .ok_or_else(|| ReplayError::AbilityNotHeld {
                creature: id,
                ability: ability.clone(),
            })
    }

    /// Applies one creature-scoped log entry.
    ///
    /// This is the replay path: it never rolls dice or consults modifiers, it
    /// re-materializes exactly what the entry records.
    pub fn apply_log(&mut self, log: &CreatureLog) -> Result<(), ReplayError> {
        match log {
            CreatureLog::Damage { amount, .. } => {
                self.health.drain(*amount);
            }
            CreatureLog::Heal { amount, .. } => {
                self.health.restore(*amount);
            }
            CreatureLog::GenerateEnergy(amount) => {
                self.energy.restore(*amount);
            }
            CreatureLog::ReduceEnergy(amount) => {
                if *amount > self.energy.current {
                    return Err(ReplayError::NotEnoughEnergy {
                        creature: self.id,
                        required: *amount,
                        available: self.energy.current,
                    });
                }
                self.energy.drain(*amount);
            }
            CreatureLog::ApplyCondition { id, condition } => {
                self.conditions
                    .insert(*id, AppliedCondition::new(*id, condition.clone()));
            }
            CreatureLog::RemoveCondition { id } => {
                self.conditions
                    .remove(id)
                    .ok_or(ReplayError::ConditionNotFound {
                        creature: self.id,
                        condition: *id,
                    })?;
            }
            CreatureLog::DecrementConditionRemaining { id } => {
                let creature = self.id;
                let applied = self
                    .conditions
                    .get_mut(id)
                    .ok_or(ReplayError::ConditionNotFound {
                        creature,
                        condition: *id,
                    })?;
                match applied.remaining {
                    Duration::Timed(turns) if turns > 0 => {
                        applied.remaining = Duration::Timed(turns - 1);
                    }
                    _ => {
                        return Err(ReplayError::ConditionNotDecrementable {
                            creature,
                            condition: *id,
                        });
                    }
                }
            }
            CreatureLog::SetPosition(position) => {
                self.position = *position;
            }
            CreatureLog::SetCooldown { ability, turns } => {
                self.ability_mut(ability)?.cooldown = *turns;
            }
            CreatureLog::DecrementCooldown { ability } => {
                let status = self.ability_mut(ability)?;
                status.cooldown = status.cooldown.saturating_sub(1);
            }
            CreatureLog::BeginCast { ability, turns } => {
                self.ability_mut(ability)?.cast = Some(*turns);
            }
            CreatureLog::DecrementCastRemaining { ability } => {
                let status = self.ability_mut(ability)?;
                status.cast = status.cast.map(|turns| turns.saturating_sub(1));
            }
            CreatureLog::CancelCast { ability } | CreatureLog::CompleteCast { ability } => {
                self.ability_mut(ability)?.cast = None;
            }
        }
        Ok(())
    }
}

/// Request to add a creature to the arena.
///
/// Omitted pools and speed fall back to the game config defaults.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CreatureCreation {
    pub name: String,
    pub note: String,
    pub max_health: Option<u32>,
    pub max_energy: Option<u32>,
    pub speed: Option<Distance>,
    pub position: Point3,
    pub abilities: Vec<AbilityId>,
}

impl CreatureCreation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_health(mut self, max_health: u32) -> Self {
        self.max_health = Some(max_health);
        self
    }

    pub fn with_energy(mut self, max_energy: u32) -> Self {
        self.max_energy = Some(max_energy);
        self
    }

    pub fn with_speed(mut self, speed: Distance) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn at(mut self, position: Point3) -> Self {
        self.position = position;
        self
    }

    pub fn with_ability(mut self, ability: impl Into<AbilityId>) -> Self {
        self.abilities.push(ability.into());
        self
    }
}
