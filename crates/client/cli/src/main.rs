//! Headless tabletop client.
//!
//! Loads game content, runs an encounter script through the runtime and
//! prints what happened. The script path is the first argument; without one
//! the bundled encounter is played.
mod config;
mod report;
mod script;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use game_content::{AbilityCatalog, ConditionCatalog, ContentFactory};
use game_core::{GameConfig, GameError};
use runtime::{OracleManager, Runtime, RuntimeConfig};
use tracing_appender::non_blocking::WorkerGuard;

use config::CliConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = setup_logging(config.log_dir.as_deref())?;

    let (oracles, game_config) = load_content(config.data_dir.as_deref())?;
    let commands = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => script::load(&path)?,
        None => script::parse(script::BUNDLED)?,
    };

    let runtime_config = RuntimeConfig::default()
        .with_game_config(&game_config)
        .with_env_overrides();
    let runtime = Runtime::builder()
        .config(runtime_config)
        .oracles(oracles)
        .build()
        .await?;
    let handle = runtime.handle();

    for (step, command) in commands.into_iter().enumerate() {
        let name = command.name();
        match handle.perform(command).await {
            Ok(logs) => {
                println!("[{step:>3}] {name}");
                let state = handle.current_state().await?;
                for entry in &logs {
                    println!("        {}", report::describe(entry, &state));
                }
            }
            Err(error) if !error.is_fatal() && !config.strict => {
                let code = error.as_history().map(GameError::error_code).unwrap_or("-");
                println!("[{step:>3}] {name} rejected [{code}]: {error}");
            }
            Err(error) => {
                runtime.shutdown().await?;
                return Err(error).with_context(|| format!("step {step} ({name}) failed"));
            }
        }
    }

    let state = handle.current_state().await?;
    let (snapshot, log) = handle.position().await?;
    println!();
    println!("history position: snapshot {snapshot}, entry {log}");
    for line in report::roster(&state) {
        println!("  {line}");
    }

    runtime.shutdown().await?;
    Ok(())
}

/// Loads catalogs and config from `data_dir`, or the embedded content.
fn load_content(data_dir: Option<&Path>) -> Result<(OracleManager, GameConfig)> {
    let (abilities, conditions, game_config) = match data_dir {
        Some(dir) => {
            let factory = ContentFactory::new(dir);
            (
                factory.load_abilities()?,
                factory.load_conditions()?,
                factory.load_config()?,
            )
        }
        None => (
            AbilityCatalog::embedded()?,
            ConditionCatalog::embedded()?,
            GameConfig::default(),
        ),
    };

    tracing::info!(
        abilities = abilities.len(),
        conditions = conditions.len(),
        "content loaded"
    );
    let oracles = OracleManager::new(abilities, conditions, game_config.clone());
    Ok((oracles, game_config))
}

/// Setup logging to stderr, or to a file when a log directory is configured.
///
/// The returned guard flushes the file writer on drop.
fn setup_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let Some(log_dir) = log_dir else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    let file_appender = tracing_appender::rolling::never(log_dir, "tabletop.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .init();

    tracing::info!("Log file: {}/tabletop.log", log_dir.display());
    Ok(Some(guard))
}
