//! Shared fixtures for unit tests.

use std::collections::BTreeMap;

use crate::config::GameConfig;
use crate::effect::{ConditionDef, ConditionKind, Dice, Duration, Effect};
use crate::env::{AbilityOracle, ConditionOracle, Env, GameEnv, OpenTerrain, PcgRng};
use crate::state::{
    Ability, AbilityId, ConditionKey, Creature, CreatureId, Distance, TargetedEffect,
};

/// A creature with full pools: `max_health` health, 10 energy, standard speed.
pub fn creature(id: u32, max_health: u32) -> Creature {
    let mut creature = Creature::new(CreatureId(id), format!("creature {id}"), max_health, 10);
    creature.speed = GameConfig::STANDARD_CREATURE_SPEED;
    creature
}

/// In-memory oracle bundle with a small fixed catalog.
///
/// Abilities:
/// - `strike`: 1 energy, 3 damage at up to 3m
/// - `mend`: 2 energy, 2 turn cooldown, heals the caster for 4
/// - `meteor`: 3 energy, 1 turn cast, 6 damage at up to 20m
/// - `smite`: 1 energy, 1d6 damage at up to 3m
/// - `disrupt`: 1 energy, interrupts a target at up to 3m
/// - `revive`: 2 energy, resurrects a target at up to 3m
/// - `venom`: 1 energy, poisons a target at up to 3m
///
/// Conditions: `stunned`, `shielded`, `poisoned`.
pub struct TestOracles {
    abilities: BTreeMap<AbilityId, Ability>,
    conditions: BTreeMap<ConditionKey, ConditionDef>,
    map: OpenTerrain,
    config: GameConfig,
    rng: PcgRng,
}

impl TestOracles {
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        let melee = Distance::from_meters(3);
        let abilities = [
            (
                "strike",
                Ability::new(
                    "Strike",
                    1,
                    vec![TargetedEffect::on_creature(melee, Effect::Damage(Dice::flat(3)))],
                ),
            ),
            (
                "mend",
                Ability::new(
                    "Mend",
                    2,
                    vec![TargetedEffect::on_caster(Effect::Heal(Dice::flat(4)))],
                )
                .with_cooldown(2),
            ),
            (
                "meteor",
                Ability::new(
                    "Meteor",
                    3,
                    vec![TargetedEffect::on_creature(
                        Distance::from_meters(20),
                        Effect::Damage(Dice::flat(6)),
                    )],
                )
                .with_cast_time(1),
            ),
            (
                "smite",
                Ability::new(
                    "Smite",
                    1,
                    vec![TargetedEffect::on_creature(melee, Effect::Damage(Dice::new(1, 6, 0)))],
                ),
            ),
            (
                "disrupt",
                Ability::new(
                    "Disrupt",
                    1,
                    vec![TargetedEffect::on_creature(melee, Effect::Interrupt)],
                ),
            ),
            (
                "revive",
                Ability::new(
                    "Revive",
                    2,
                    vec![TargetedEffect::on_creature(melee, Effect::Resurrect)],
                ),
            ),
            (
                "venom",
                Ability::new(
                    "Venom",
                    1,
                    vec![TargetedEffect::on_creature(
                        melee,
                        Effect::ApplyCondition(poisoned()),
                    )],
                ),
            ),
        ]
        .into_iter()
        .map(|(id, ability)| (AbilityId::from(id), ability))
        .collect();

        let conditions = [
            ConditionDef::new("stunned", Duration::Timed(1), ConditionKind::Incapacitated),
            ConditionDef::new(
                "shielded",
                Duration::Interminate,
                ConditionKind::DamageDecrease(2),
            ),
            poisoned(),
        ]
        .into_iter()
        .map(|def| (ConditionKey::new(def.name.clone()), def))
        .collect();

        Self {
            abilities,
            conditions,
            map: OpenTerrain,
            config,
            rng: PcgRng,
        }
    }

    pub fn ability_ids(&self) -> impl Iterator<Item = AbilityId> + '_ {
        self.abilities.keys().cloned()
    }

    pub fn env(&self) -> GameEnv<'_> {
        Env::with_all(self, self, &self.map, &self.config, &self.rng).into_game_env()
    }
}

impl AbilityOracle for TestOracles {
    fn ability(&self, id: &AbilityId) -> Option<Ability> {
        self.abilities.get(id).cloned()
    }
}

impl ConditionOracle for TestOracles {
    fn condition(&self, key: &ConditionKey) -> Option<ConditionDef> {
        self.conditions.get(key).cloned()
    }
}

/// One damage per turn for two turns.
fn poisoned() -> ConditionDef {
    ConditionDef::new(
        "poisoned",
        Duration::Timed(2),
        ConditionKind::RecurringEffect(Box::new(Effect::Damage(Dice::flat(1)))),
    )
}
