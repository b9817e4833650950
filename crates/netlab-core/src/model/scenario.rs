// ── Scenario schema ──
//
// One schema for every exercise. Fields added as the exercises grew
// richer (domain tables, DHCP faults, conflict injection) are optional
// with documented defaults, so older catalog files still load.

use std::collections::BTreeMap;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::settings::{AddressMode, NetworkSettings, RouterSettings};

// ── ScenarioId ──────────────────────────────────────────────────────

/// Numeric exercise identifier. Also seeds the APIPA fallback address.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ScenarioId(pub u32);

impl ScenarioId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ScenarioId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<u32> for ScenarioId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

// ── Fault flags ─────────────────────────────────────────────────────

/// Scripted state of the router's DHCP service.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DhcpStatus {
    #[default]
    Normal,
    /// Service broken regardless of the router toggle.
    Unavailable,
    /// Pool full until the learner edits the range.
    PoolExhausted,
}

/// Desktop icons a scenario exposes to the learner.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DesktopTool {
    Router,
    Network,
    Terminal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialModes {
    pub ip: AddressMode,
    pub dns: AddressMode,
}

// ── Learner-facing prose ────────────────────────────────────────────

/// Suggested probe shown alongside the exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingTarget {
    pub name: String,
    pub ip: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialSetup {
    #[serde(default)]
    pub router: Vec<String>,
    #[serde(default)]
    pub computer: Vec<String>,
}

/// Exercise text. The engine never reads any of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Briefing {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub narrative: String,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub initial_setup: InitialSetup,
    #[serde(default)]
    pub allowed_actions: Vec<String>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub resolution: Vec<String>,
    #[serde(default)]
    pub takeaways: Vec<String>,
}

// ── ScenarioDefinition ──────────────────────────────────────────────

/// A single troubleshooting exercise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    pub id: ScenarioId,
    pub title: String,

    #[serde(flatten)]
    pub briefing: Briefing,

    pub initial_network: NetworkSettings,
    pub initial_router: RouterSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_modes: Option<InitialModes>,

    /// Host name → IPv4 for the simulated internet.
    #[serde(default)]
    pub domain_map: BTreeMap<String, String>,
    #[serde(default)]
    pub desktop_tools: IndexSet<DesktopTool>,
    #[serde(default)]
    pub ping_targets: Vec<PingTarget>,

    #[serde(default)]
    pub dhcp_status: DhcpStatus,
    #[serde(default)]
    pub requires_subnet_match_for_gateway: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicting_ip: Option<String>,
}

impl ScenarioDefinition {
    /// Look a host name up in the scenario's domain table.
    pub fn resolve_host(&self, name: &str) -> Option<&str> {
        self.domain_map.get(name).map(String::as_str)
    }

    pub fn has_tool(&self, tool: DesktopTool) -> bool {
        self.desktop_tools.contains(&tool)
    }
}
