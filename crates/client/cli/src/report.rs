//! Human-readable rendering of log entries.

use game_core::{CreatureId, CreatureLog, GameState, LogEntry};

fn name(state: &GameState, id: CreatureId) -> String {
    state
        .creature(id)
        .map(|creature| creature.name.clone())
        .unwrap_or_else(|| id.to_string())
}

/// One line describing `entry`. Names are looked up in `state`.
pub fn describe(entry: &LogEntry, state: &GameState) -> String {
    match entry {
        LogEntry::Creature { id, log } => {
            let who = name(state, *id);
            match log {
                CreatureLog::Damage { amount, dice } if dice.is_empty() => {
                    format!("{who} takes {amount} damage")
                }
                CreatureLog::Damage { amount, dice } => {
                    format!("{who} takes {amount} damage (rolled {dice:?})")
                }
                CreatureLog::Heal { amount, dice } if dice.is_empty() => {
                    format!("{who} heals {amount}")
                }
                CreatureLog::Heal { amount, dice } => {
                    format!("{who} heals {amount} (rolled {dice:?})")
                }
                CreatureLog::GenerateEnergy(amount) => format!("{who} gains {amount} energy"),
                CreatureLog::ReduceEnergy(amount) => format!("{who} spends {amount} energy"),
                CreatureLog::ApplyCondition { condition, .. } => {
                    format!("{who} is now {}", condition.name)
                }
                CreatureLog::RemoveCondition { id: condition } => {
                    format!("{who} loses {condition}")
                }
                CreatureLog::SetPosition(point) => format!("{who} moves to {point}"),
                CreatureLog::SetCooldown { ability, turns } => {
                    format!("{who}'s {ability} recharges in {turns} turns")
                }
                CreatureLog::BeginCast { ability, turns } => {
                    format!("{who} begins casting {ability} ({turns} turns)")
                }
                CreatureLog::CancelCast { ability } => format!("{who}'s {ability} is interrupted"),
                CreatureLog::CompleteCast { ability } => format!("{who} releases {ability}"),
                other => format!("{who}: {}", entry_name(other)),
            }
        }
        LogEntry::CreateCreature(creature) => format!(
            "{} ({}) enters at {} with {} hp",
            creature.name, creature.id, creature.position, creature.health.maximum
        ),
        LogEntry::RemoveCreature(id) => format!("{} leaves", name(state, *id)),
        LogEntry::StartCombat { scene, creatures } => {
            let order: Vec<_> = creatures.iter().map(|id| name(state, *id)).collect();
            format!("combat begins in {scene}: {}", order.join(", "))
        }
        LogEntry::StopCombat => "combat ends".to_owned(),
        LogEntry::AddCreatureToCombat(id) => format!("{} joins combat", name(state, *id)),
        LogEntry::RemoveCreatureFromCombat(id) => format!("{} leaves combat", name(state, *id)),
        LogEntry::ChangeInitiative { id, new_index } => {
            format!("{} moves to initiative slot {new_index}", name(state, *id))
        }
        LogEntry::ConsumeMovement(distance) => format!("{distance} of movement used"),
        LogEntry::EndTurn { id } => format!("{} ends their turn", name(state, *id)),
        LogEntry::Passthrough(edit) => format!("note: {edit:?}"),
        LogEntry::Rollback {
            snapshot_index,
            log_index,
        } => format!("rolled back to ({snapshot_index}, {log_index})"),
    }
}

fn entry_name(log: &CreatureLog) -> &'static str {
    log.into()
}

/// Final standing of every creature.
pub fn roster(state: &GameState) -> Vec<String> {
    state
        .creatures
        .values()
        .map(|creature| {
            let status = if creature.is_dead() {
                " (dead)"
            } else if !creature.can_act() {
                " (incapacitated)"
            } else {
                ""
            };
            format!(
                "{:<16} hp {:>3}/{:<3} energy {:>2}/{:<2}{status}",
                creature.name,
                creature.health.current,
                creature.health.maximum,
                creature.energy.current,
                creature.energy.maximum,
            )
        })
        .collect()
}
