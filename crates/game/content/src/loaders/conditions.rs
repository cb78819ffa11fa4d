//! Condition catalog loader.

use std::path::Path;

use game_core::ConditionDef;

use crate::loaders::{LoadResult, check_condition, read_file};

/// Loader for condition catalogs from RON files.
///
/// The file is a list of definitions; each is keyed by its name.
pub struct ConditionLoader;

impl ConditionLoader {
    /// Load condition definitions from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<ConditionDef>> {
        let content = read_file(path)?;
        let conditions = Self::parse(&content)
            .map_err(|e| e.context(format!("in condition catalog {}", path.display())))?;

        tracing::debug!(
            target: "content::loader",
            path = %path.display(),
            count = conditions.len(),
            "loaded condition catalog"
        );
        Ok(conditions)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ConditionDef>> {
        let conditions: Vec<ConditionDef> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse conditions RON: {}", e))?;

        for (index, def) in conditions.iter().enumerate() {
            if def.name.is_empty() {
                anyhow::bail!("condition #{index} has no name");
            }
            if conditions[..index].iter().any(|other| other.name == def.name) {
                anyhow::bail!("condition '{}' is defined more than once", def.name);
            }
            check_condition(def)?;
        }
        Ok(conditions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{ConditionKind, Duration};

    #[test]
    fn parses_timed_and_permanent_conditions() {
        let conditions = ConditionLoader::parse(
            r#"[
                (name: "dazed", duration: Timed(1), kind: Incapacitated),
                (name: "cursed", duration: Interminate, kind: DamageDecrease(1)),
            ]"#,
        )
        .unwrap();

        assert_eq!(conditions.len(), 2);
        assert_eq!(conditions[1].duration, Duration::Interminate);
        assert_eq!(conditions[1].kind, ConditionKind::DamageDecrease(1));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let error = ConditionLoader::parse(
            r#"[
                (name: "dazed", duration: Timed(1), kind: Incapacitated),
                (name: "dazed", duration: Timed(2), kind: Incapacitated),
            ]"#,
        )
        .unwrap_err();
        assert!(error.to_string().contains("more than once"));
    }

    #[test]
    fn recurring_resurrection_is_rejected() {
        let error = ConditionLoader::parse(
            r#"[(name: "undying", duration: Interminate, kind: RecurringEffect(Resurrect))]"#,
        )
        .unwrap_err();
        assert!(error.to_string().contains("resurrects its owner"));

        let nested = ConditionLoader::parse(
            r#"[(
                name: "phoenix",
                duration: Timed(2),
                kind: RecurringEffect(Multi(Heal((modifier: 1)), Resurrect)),
            )]"#,
        );
        assert!(nested.is_err());
    }

    #[test]
    fn recurring_dice_are_bounded() {
        let error = ConditionLoader::parse(
            r#"[(
                name: "rot",
                duration: Timed(2),
                kind: RecurringEffect(Damage((count: 101, sides: 4))),
            )]"#,
        )
        .unwrap_err();
        assert!(format!("{error:#}").contains("rot"));
    }

    #[test]
    fn malformed_ron_is_an_error() {
        assert!(ConditionLoader::parse("[(name: \"dazed\", duration: Forever)]").is_err());
    }
}
