//! Ability catalog loader.

use std::collections::BTreeMap;
use std::path::Path;

use game_core::{Ability, AbilityId, TargetingSystem};

use crate::loaders::{LoadResult, check_effect, read_file};

/// Loader for ability catalogs from RON files.
///
/// The file is a map from ability id to definition.
pub struct AbilityLoader;

impl AbilityLoader {
    /// Load an ability catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<BTreeMap<AbilityId, Ability>> {
        let content = read_file(path)?;
        let abilities = Self::parse(&content)
            .map_err(|e| e.context(format!("in ability catalog {}", path.display())))?;

        tracing::debug!(
            target: "content::loader",
            path = %path.display(),
            count = abilities.len(),
            "loaded ability catalog"
        );
        Ok(abilities)
    }

    /// Parse and check an ability catalog.
    pub fn parse(content: &str) -> LoadResult<BTreeMap<AbilityId, Ability>> {
        let abilities: BTreeMap<AbilityId, Ability> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse abilities RON: {}", e))?;

        for (id, ability) in &abilities {
            check(id, ability)?;
        }
        Ok(abilities)
    }
}

/// Rejects definitions the engine could never resolve.
fn check(id: &AbilityId, ability: &Ability) -> LoadResult<()> {
    if ability.effects.is_empty() {
        anyhow::bail!("ability '{id}' has no effects");
    }
    for targeted in &ability.effects {
        if targeted.effect.revives() && matches!(targeted.system, TargetingSystem::Caster) {
            anyhow::bail!("ability '{id}' resurrects its own caster");
        }
        check_effect(&targeted.effect).map_err(|e| e.context(format!("in ability '{id}'")))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const CATALOG: &str = r#"{
        "jab": (
            name: "Jab",
            cost: 1,
            effects: [(system: Creature(range: (150)), effect: Damage((modifier: 2)))],
        ),
    }"#;

    #[test]
    fn parses_with_defaults() {
        let abilities = AbilityLoader::parse(CATALOG).unwrap();
        let jab = &abilities[&AbilityId::from("jab")];
        assert_eq!(jab.name, "Jab");
        assert_eq!(jab.cooldown, 0);
        assert_eq!(jab.cast_time, 0);
        assert!(!jab.allow_self_target);
    }

    #[test]
    fn loads_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOG.as_bytes()).unwrap();

        let abilities = AbilityLoader::load(file.path()).unwrap();
        assert_eq!(abilities.len(), 1);
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abilities.ron");

        let error = AbilityLoader::load(&path).unwrap_err();
        assert!(error.to_string().contains("abilities.ron"));
    }

    #[test]
    fn empty_abilities_are_rejected() {
        let catalog = r#"{ "nothing": (name: "Nothing", cost: 0, effects: []) }"#;
        let error = AbilityLoader::parse(catalog).unwrap_err();
        assert!(error.to_string().contains("no effects"));
    }

    #[test]
    fn self_resurrection_is_rejected() {
        let catalog = r#"{
            "undying": (name: "Undying", cost: 0, effects: [(system: Caster, effect: Resurrect)]),
        }"#;
        assert!(AbilityLoader::parse(catalog).is_err());
    }

    #[test]
    fn nested_self_resurrection_is_rejected() {
        let catalog = r#"{
            "second_life": (
                name: "Second Life",
                cost: 0,
                effects: [(system: Caster, effect: Multi(Heal((modifier: 1)), Resurrect))],
            ),
        }"#;
        let error = AbilityLoader::parse(catalog).unwrap_err();
        assert!(error.to_string().contains("resurrects its own caster"));
    }

    #[test]
    fn oversized_dice_are_rejected() {
        let catalog = r#"{
            "avalanche": (
                name: "Avalanche",
                cost: 1,
                effects: [(
                    system: Creature(range: (300)),
                    effect: Damage((count: 4000000000, sides: 6)),
                )],
            ),
        }"#;
        let error = AbilityLoader::parse(catalog).unwrap_err();
        let message = format!("{error:#}");
        assert!(message.contains("avalanche"));
        assert!(message.contains("more than 100 dice"));
    }

    #[test]
    fn faceless_dice_are_rejected() {
        let catalog = r#"{
            "fizzle": (
                name: "Fizzle",
                cost: 1,
                effects: [(
                    system: Creature(range: (300)),
                    effect: Multi(GenerateEnergy(1), Heal((count: 2))),
                )],
            ),
        }"#;
        let error = AbilityLoader::parse(catalog).unwrap_err();
        assert!(format!("{error:#}").contains("without faces"));
    }

    #[test]
    fn dice_inside_inline_conditions_are_checked() {
        let catalog = r#"{
            "plague": (
                name: "Plague",
                cost: 1,
                effects: [(
                    system: Creature(range: (300)),
                    effect: ApplyCondition((
                        name: "plagued",
                        duration: Timed(2),
                        kind: RecurringEffect(Damage((count: 500, sides: 4))),
                    )),
                )],
            ),
        }"#;
        assert!(AbilityLoader::parse(catalog).is_err());
    }
}
