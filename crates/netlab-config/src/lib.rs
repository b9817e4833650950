//! Shared configuration for the netlab CLI.
//!
//! A single TOML file holds the default scenario, an optional external
//! catalog, and output preferences. Values are layered with figment:
//! built-in defaults, then the file, then `NETLAB_*` environment variables.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Output formats the CLI knows how to render.
pub const OUTPUT_FORMATS: [&str; 5] = ["table", "json", "json-compact", "yaml", "plain"];

/// Accepted `color` settings.
pub const COLOR_MODES: [&str; 3] = ["auto", "always", "never"];

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Scenario opened when `--scenario` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_scenario: Option<u32>,

    /// External scenario catalog (TOML or JSON) replacing the built-in set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Prompt printed by the interactive shell.
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            prompt: default_prompt(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_prompt() -> String {
    r"C:\>".into()
}

impl Config {
    /// Reject values the CLI cannot act on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_choice("defaults.output", &self.defaults.output, &OUTPUT_FORMATS)?;
        check_choice("defaults.color", &self.defaults.color, &COLOR_MODES)?;
        if self.default_scenario == Some(0) {
            return Err(ConfigError::Validation {
                field: "default_scenario".into(),
                reason: "scenario ids start at 1".into(),
            });
        }
        Ok(())
    }
}

fn check_choice(field: &str, value: &str, allowed: &[&str]) -> Result<(), ConfigError> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(ConfigError::Validation {
        field: field.into(),
        reason: format!("expected one of {}, got '{value}'", allowed.join(", ")),
    })
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "netlab", "netlab").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("netlab");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file. A missing file yields defaults plus env.
///
/// Nested keys use a double underscore: `NETLAB_DEFAULTS__OUTPUT=json`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("NETLAB_").split("__"));

    let config: Config = figment.extract()?;
    config.validate()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

/// Serialize config to TOML at `path`, creating parent directories.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    cfg.validate()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
