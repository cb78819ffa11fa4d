//! CLI configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Headless client configuration.
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    /// Directory with `abilities.ron`, `conditions.ron` and `config.toml`.
    /// Embedded content is used when unset.
    pub data_dir: Option<PathBuf>,
    /// Directory for the log file. Logs go to stderr when unset.
    pub log_dir: Option<PathBuf>,
    /// Stop at the first rejected command instead of reporting and moving on.
    pub strict: bool,
}

impl CliConfig {
    /// Construct CLI configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TABLETOP_DATA_DIR` - Content directory (default: embedded content)
    /// - `TABLETOP_LOG_DIR` - Log file directory (default: log to stderr)
    /// - `TABLETOP_STRICT` - `true` to stop on the first rejection (default: false)
    pub fn from_env() -> Self {
        Self {
            data_dir: read_env::<PathBuf>("TABLETOP_DATA_DIR"),
            log_dir: read_env::<PathBuf>("TABLETOP_LOG_DIR"),
            strict: read_env::<bool>("TABLETOP_STRICT").unwrap_or(false),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
