//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text. A failed ping is a transcript, not an error:
//! only catalog, configuration, and argument problems end up here.

use miette::Diagnostic;
use thiserror::Error;

use netlab_config::ConfigError;
use netlab_core::{CoreError, ScenarioId};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
}

#[derive(Debug, Error, Diagnostic)]
#[allow(unused_assignments)]
pub enum CliError {
    // ── Catalog ──────────────────────────────────────────────────────

    #[error("Scenario {id} not found")]
    #[diagnostic(
        code(netlab::scenario_not_found),
        help(
            "Available scenarios: {available}\n\
             Run: netlab scenarios list"
        )
    )]
    ScenarioNotFound { id: String, available: String },

    #[error("Could not load scenario catalog: {message}")]
    #[diagnostic(
        code(netlab::catalog),
        help(
            "Catalogs are TOML ([[scenario]] tables) or JSON ({{\"scenario\": [...]}}).\n\
             Omit --catalog to use the built-in exercises."
        )
    )]
    Catalog { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(netlab::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(netlab::config),
        help(
            "Inspect the resolved values with: netlab config show\n\
             File: {path}"
        )
    )]
    Config { message: String, path: String },

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Operation '{action}' requires confirmation")]
    #[diagnostic(
        code(netlab::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(netlab::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(netlab::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ScenarioNotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    pub(crate) fn scenario_not_found(id: ScenarioId, available: &[ScenarioId]) -> Self {
        let available = if available.is_empty() {
            "(none)".into()
        } else {
            available
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        Self::ScenarioNotFound {
            id: id.to_string(),
            available,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ScenarioNotFound { id } => Self::ScenarioNotFound {
                id: id.to_string(),
                available: "see list below".into(),
            },
            CoreError::Io(e) => Self::Io(e),
            other @ (CoreError::InvalidCatalog { .. }
            | CoreError::CatalogParse { .. }
            | CoreError::UnsupportedCatalogFormat { .. }) => Self::Catalog {
                message: other.to_string(),
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Io(e) => Self::Io(e),
            other @ (ConfigError::Serialization(_) | ConfigError::Figment(_)) => Self::Config {
                message: other.to_string(),
                path: netlab_config::config_path().display().to_string(),
            },
        }
    }
}
