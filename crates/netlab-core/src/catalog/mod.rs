// ── Scenario catalog ──
//
// Ordered, read-only list of exercises keyed by id. Either the built-in
// set or a TOML/JSON file with the same schema.

mod builtin;

use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoreError;
use crate::model::ScenarioDefinition;
use crate::model::ScenarioId;
use crate::model::address::is_ipv4;

/// On-disk layout: `[[scenario]]` tables in TOML, `{"scenario": [...]}` in JSON.
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "scenario")]
    scenarios: Vec<ScenarioDefinition>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    scenarios: IndexMap<ScenarioId, Arc<ScenarioDefinition>>,
}

impl Catalog {
    /// Build a catalog, rejecting empty lists, duplicate ids, and
    /// malformed addresses in domain tables or conflict flags.
    pub fn new(scenarios: Vec<ScenarioDefinition>) -> Result<Self, CoreError> {
        if scenarios.is_empty() {
            return Err(CoreError::InvalidCatalog {
                reason: "catalog contains no scenarios".into(),
            });
        }

        let mut by_id = IndexMap::with_capacity(scenarios.len());
        for scenario in scenarios {
            validate(&scenario)?;
            let id = scenario.id;
            if by_id.insert(id, Arc::new(scenario)).is_some() {
                return Err(CoreError::InvalidCatalog {
                    reason: format!("duplicate scenario id {id}"),
                });
            }
        }

        Ok(Self { scenarios: by_id })
    }

    /// The exercises shipped with netlab.
    pub fn builtin() -> Self {
        let scenarios = builtin::scenarios()
            .into_iter()
            .map(|s| (s.id, Arc::new(s)))
            .collect();
        Self { scenarios }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, CoreError> {
        let file: CatalogFile = toml::from_str(text)?;
        Self::new(file.scenarios)
    }

    pub fn from_json_str(text: &str) -> Result<Self, CoreError> {
        let file: CatalogFile = serde_json::from_str(text)?;
        Self::new(file.scenarios)
    }

    /// Load a catalog file, choosing the parser by extension.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self, CoreError> = match ext.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("json") => Self::from_json_str,
            _ => {
                return Err(CoreError::UnsupportedCatalogFormat {
                    path: path.to_path_buf(),
                });
            }
        };

        let text = std::fs::read_to_string(path)?;
        let catalog = parse(&text)?;
        debug!(path = %path.display(), scenarios = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Serialize as a TOML catalog file.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        let file = CatalogFile {
            scenarios: self.iter().map(|s| (**s).clone()).collect(),
        };
        toml::to_string_pretty(&file)
    }

    pub fn get(&self, id: ScenarioId) -> Result<Arc<ScenarioDefinition>, CoreError> {
        self.scenarios
            .get(&id)
            .cloned()
            .ok_or(CoreError::ScenarioNotFound { id })
    }

    pub fn first(&self) -> Option<Arc<ScenarioDefinition>> {
        self.scenarios.first().map(|(_, s)| Arc::clone(s))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ScenarioDefinition>> {
        self.scenarios.values()
    }

    pub fn ids(&self) -> Vec<ScenarioId> {
        self.scenarios.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate(scenario: &ScenarioDefinition) -> Result<(), CoreError> {
    let invalid = |reason: String| CoreError::InvalidCatalog {
        reason: format!("scenario {}: {reason}", scenario.id),
    };

    if let Some((host, ip)) = scenario.domain_map.iter().find(|(_, ip)| !is_ipv4(ip)) {
        return Err(invalid(format!("domain_map entry {host} = '{ip}' is not an IPv4 address")));
    }
    if let Some(ip) = scenario.conflicting_ip.as_deref().filter(|ip| !is_ipv4(ip)) {
        return Err(invalid(format!("conflicting_ip '{ip}' is not an IPv4 address")));
    }
    Ok(())
}
