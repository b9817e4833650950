//! CLI configuration: thin wrapper around `netlab_config` shared types.
//!
//! Re-exports the shared types and resolves the effective run settings,
//! letting `GlobalOpts` flags override config file values.

use std::path::PathBuf;

use clap::ValueEnum;
use tracing::warn;

use netlab_core::ScenarioId;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use netlab_config::{Config, Defaults, config_path, load_config, save_config};

/// Everything a command needs from flags and config, resolved once.
#[derive(Debug, Clone)]
pub struct Settings {
    pub scenario: Option<ScenarioId>,
    pub catalog: Option<PathBuf>,
    pub output: OutputFormat,
    pub color: ColorMode,
    pub prompt: String,
    pub quiet: bool,
    pub yes: bool,
}

/// Load the config file, falling back to defaults when it is unreadable.
pub fn load_or_default() -> Config {
    load_config().unwrap_or_else(|err| {
        warn!(error = %err, path = %config_path().display(), "ignoring unreadable config");
        Config::default()
    })
}

/// Merge global flags over config values. Flags win.
pub fn resolve(global: &GlobalOpts, cfg: &Config) -> Result<Settings, CliError> {
    let output = match global.output {
        Some(output) => output,
        None => parse_choice::<OutputFormat>("defaults.output", &cfg.defaults.output)?,
    };
    let color = match global.color {
        Some(color) => color,
        None => parse_choice::<ColorMode>("defaults.color", &cfg.defaults.color)?,
    };

    Ok(Settings {
        scenario: global.scenario.or(cfg.default_scenario).map(ScenarioId),
        catalog: global.catalog.clone().or_else(|| cfg.catalog.clone()),
        output,
        color,
        prompt: cfg.defaults.prompt.clone(),
        quiet: global.quiet,
        yes: global.yes,
    })
}

fn parse_choice<T: ValueEnum>(field: &str, value: &str) -> Result<T, CliError> {
    T::from_str(value, true).map_err(|reason| CliError::Validation {
        field: field.into(),
        reason,
    })
}
