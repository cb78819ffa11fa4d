//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
///
/// Missing keys keep their [`GameConfig::default`] values.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        let config = Self::parse(&content)?;

        tracing::debug!(
            target: "content::loader",
            path = %path.display(),
            snapshot_threshold = config.snapshot_threshold,
            "loaded game config"
        );
        Ok(config)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.resurrection.denominator == 0 {
            anyhow::bail!("resurrection denominator must be positive");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Distance, ResurrectionPolicy};

    #[test]
    fn bundled_config_matches_defaults() {
        let config = ConfigLoader::parse(include_str!("../../data/config.toml")).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            default_speed = 900

            [resurrection]
            numerator = 1
            denominator = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.default_speed, Distance(900));
        assert_eq!(config.resurrection, ResurrectionPolicy::new(1, 4));
        assert_eq!(config.snapshot_threshold, GameConfig::DEFAULT_SNAPSHOT_THRESHOLD);
    }

    #[test]
    fn zero_denominator_is_rejected() {
        let result = ConfigLoader::parse("[resurrection]\nnumerator = 1\ndenominator = 0\n");
        assert!(result.is_err());
    }
}
