// ── Core error types ──
//
// The simulation engine itself never fails: every broken network
// condition is a diagnostic transcript, not an error. These variants
// cover catalog loading and scenario lookup only.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::ScenarioId;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Lookup errors ────────────────────────────────────────────────
    #[error("Scenario not found: {id}")]
    ScenarioNotFound { id: ScenarioId },

    // ── Catalog errors ───────────────────────────────────────────────
    #[error("Invalid catalog: {reason}")]
    InvalidCatalog { reason: String },

    #[error("Failed to parse catalog {format}: {message}")]
    CatalogParse { format: String, message: String },

    #[error("Unsupported catalog file {path}: expected .toml or .json")]
    UnsupportedCatalogFormat { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for CoreError {
    fn from(err: toml::de::Error) -> Self {
        Self::CatalogParse {
            format: "TOML".into(),
            message: err.message().to_owned(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::CatalogParse {
            format: "JSON".into(),
            message: err.to_string(),
        }
    }
}
