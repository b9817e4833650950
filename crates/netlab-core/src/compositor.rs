// ── Effective network compositor ──
//
// Folds the adapter dialog, the router page, the current lease, and the
// scenario into the single NetworkSettings every diagnostic command
// treats as ground truth. Pure: identical inputs give identical output.

use serde::Serialize;
use strum::Display;

use crate::dhcp::resolve_lease;
use crate::model::address::is_apipa;
use crate::model::{AdapterConfig, AddressMode, NetworkSettings, RouterSettings, ScenarioDefinition};

/// Mask used for every self-assigned address.
pub const APIPA_MASK: &str = "255.255.0.0";

/// Which branch produced the effective settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EffectiveSource {
    /// Learner-typed address.
    Static,
    /// Address from the router's DHCP offer.
    Leased,
    /// Self-assigned 169.254.x.x fallback.
    Apipa,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Composition {
    pub source: EffectiveSource,
    pub settings: NetworkSettings,
}

/// Effective settings for the current configuration.
pub fn compute_effective(
    adapter: &AdapterConfig,
    router: &RouterSettings,
    lease: Option<&NetworkSettings>,
    scenario: &ScenarioDefinition,
) -> NetworkSettings {
    compose(adapter, router, lease, scenario).settings
}

/// Like [`compute_effective`], also reporting which branch applied.
///
/// A missing `lease` is recomputed from `router` when the adapter is in
/// auto mode, so callers that have not cached one still get the offer.
pub fn compose(
    adapter: &AdapterConfig,
    router: &RouterSettings,
    lease: Option<&NetworkSettings>,
    scenario: &ScenarioDefinition,
) -> Composition {
    let manual_dns = (adapter.dns_mode == AddressMode::Manual).then(|| adapter.settings.dns.clone());

    if adapter.ip_mode == AddressMode::Manual {
        let dns = manual_dns.unwrap_or_else(|| {
            if router.dhcp_enabled {
                router.dhcp_dns.clone()
            } else {
                String::new()
            }
        });
        return Composition {
            source: EffectiveSource::Static,
            settings: NetworkSettings {
                dns,
                ..adapter.settings.clone()
            },
        };
    }

    if router.dhcp_enabled {
        let leased = lease.cloned().or_else(|| resolve_lease(router, scenario));
        if let Some(lease) = leased {
            let dns = manual_dns.unwrap_or(lease.dns);
            return Composition {
                source: EffectiveSource::Leased,
                settings: NetworkSettings { dns, ..lease },
            };
        }
    }

    let fallback = apipa_fallback(scenario);
    Composition {
        source: EffectiveSource::Apipa,
        settings: NetworkSettings {
            dns: manual_dns.unwrap_or_default(),
            ..fallback
        },
    }
}

/// Self-assigned address for a host that got no lease.
///
/// Reuses the scenario's declared 169.254.x.x address when it has one,
/// otherwise derives a stable address from the scenario id.
pub fn apipa_fallback(scenario: &ScenarioDefinition) -> NetworkSettings {
    let initial = &scenario.initial_network;

    if is_apipa(&initial.ip_address) {
        let subnet_mask = if initial.subnet_mask.is_empty() {
            APIPA_MASK.to_owned()
        } else {
            initial.subnet_mask.clone()
        };
        return NetworkSettings {
            ip_address: initial.ip_address.clone(),
            subnet_mask,
            gateway: String::new(),
            dns: String::new(),
        };
    }

    let id = u64::from(scenario.id.get());
    let third = 100 + id % 100;
    let fourth = 10 + (id * 17) % 200;

    NetworkSettings {
        ip_address: format!("169.254.{third}.{fourth}"),
        subnet_mask: APIPA_MASK.to_owned(),
        gateway: String::new(),
        dns: String::new(),
    }
}
