// ── Adapter and router configuration ──
//
// Plain value types. Each dialog in the lab replaces one of these
// wholesale on "apply"; nothing mutates them in place.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::scenario::ScenarioDefinition;

/// The four values an IPv4 host needs. Empty strings mean "unconfigured".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkSettings {
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub subnet_mask: String,
    #[serde(default)]
    pub gateway: String,
    #[serde(default)]
    pub dns: String,
}

impl NetworkSettings {
    pub fn new(
        ip_address: impl Into<String>,
        subnet_mask: impl Into<String>,
        gateway: impl Into<String>,
        dns: impl Into<String>,
    ) -> Self {
        Self {
            ip_address: ip_address.into(),
            subnet_mask: subnet_mask.into(),
            gateway: gateway.into(),
            dns: dns.into(),
        }
    }
}

/// How the adapter obtains a value: from DHCP or from the learner.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AddressMode {
    #[default]
    Auto,
    Manual,
}

/// Learner-facing adapter dialog state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterConfig {
    #[serde(flatten)]
    pub settings: NetworkSettings,
    pub ip_mode: AddressMode,
    pub dns_mode: AddressMode,
}

impl AdapterConfig {
    /// Adapter state a scenario starts from.
    ///
    /// Declared modes win; otherwise a pre-filled address (or DNS server)
    /// implies the learner's predecessor typed it in by hand.
    pub fn initial_for(scenario: &ScenarioDefinition) -> Self {
        let network = &scenario.initial_network;
        let modes = scenario.initial_modes.as_ref();

        let ip_mode = modes.map_or_else(|| inferred_mode(&network.ip_address), |m| m.ip);
        let dns_mode = modes.map_or_else(|| inferred_mode(&network.dns), |m| m.dns);

        Self {
            settings: network.clone(),
            ip_mode,
            dns_mode,
        }
    }
}

fn inferred_mode(value: &str) -> AddressMode {
    if value.is_empty() {
        AddressMode::Auto
    } else {
        AddressMode::Manual
    }
}

/// Router admin page state: LAN side, DHCP service, and WAN uplink.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterSettings {
    pub dhcp_enabled: bool,
    pub lan_gateway: String,
    pub lan_subnet_mask: String,
    pub dhcp_range_start: String,
    pub dhcp_range_end: String,
    pub dhcp_dns: String,
    pub wan_connected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wan_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wan_gateway: Option<String>,
}
