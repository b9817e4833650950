// ── DHCP lease resolver ──
//
// The simulated router offers at most one lease: the lowest address in
// its configured range. Scenario fault flags can suppress the offer.
// Rules are checked top-down and the first match decides.

use serde::Serialize;
use strum::Display;
use tracing::debug;

use crate::model::address::{ipv4_to_u32, parse_ipv4, u32_to_ipv4};
use crate::model::{DhcpStatus, NetworkSettings, RouterSettings, ScenarioDefinition};

/// Named lease rules, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum LeaseRule {
    /// Router toggle is off.
    DhcpDisabled,
    /// Scenario scripts a dead DHCP service.
    ServiceUnavailable,
    /// Scenario scripts a full pool and the range is still the original one.
    PoolExhausted,
    /// A range bound is not a dotted quad.
    MalformedRange,
    /// A lease is offered.
    Offered,
}

/// Outcome of [`evaluate_lease`]: which rule fired and what it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaseDecision {
    pub rule: LeaseRule,
    pub lease: Option<NetworkSettings>,
}

impl LeaseDecision {
    fn denied(rule: LeaseRule) -> Self {
        Self { rule, lease: None }
    }
}

/// Decide whether the router hands out a lease, and which rule decided.
pub fn evaluate_lease(router: &RouterSettings, scenario: &ScenarioDefinition) -> LeaseDecision {
    let decision = decide(router, scenario);
    debug!(
        scenario = %scenario.id,
        rule = %decision.rule,
        lease = decision.lease.as_ref().map(|l| l.ip_address.as_str()),
        "lease evaluated"
    );
    decision
}

/// The lease the router would offer right now, if any.
pub fn resolve_lease(
    router: &RouterSettings,
    scenario: &ScenarioDefinition,
) -> Option<NetworkSettings> {
    evaluate_lease(router, scenario).lease
}

fn decide(router: &RouterSettings, scenario: &ScenarioDefinition) -> LeaseDecision {
    if !router.dhcp_enabled {
        return LeaseDecision::denied(LeaseRule::DhcpDisabled);
    }

    match scenario.dhcp_status {
        DhcpStatus::Unavailable => return LeaseDecision::denied(LeaseRule::ServiceUnavailable),
        DhcpStatus::PoolExhausted if range_untouched(router, scenario) => {
            return LeaseDecision::denied(LeaseRule::PoolExhausted);
        }
        DhcpStatus::PoolExhausted | DhcpStatus::Normal => {}
    }

    let (Some(start), Some(end)) = (
        parse_ipv4(&router.dhcp_range_start),
        parse_ipv4(&router.dhcp_range_end),
    ) else {
        return LeaseDecision::denied(LeaseRule::MalformedRange);
    };

    let lowest = ipv4_to_u32(start).min(ipv4_to_u32(end));

    LeaseDecision {
        rule: LeaseRule::Offered,
        lease: Some(NetworkSettings {
            ip_address: u32_to_ipv4(lowest).to_string(),
            subnet_mask: router.lan_subnet_mask.clone(),
            gateway: router.lan_gateway.clone(),
            dns: router.dhcp_dns.clone(),
        }),
    }
}

/// Exact text equality with the scenario's declared range. Any edit to
/// either bound counts as a fix.
fn range_untouched(router: &RouterSettings, scenario: &ScenarioDefinition) -> bool {
    let initial = &scenario.initial_router;
    router.dhcp_range_start == initial.dhcp_range_start
        && router.dhcp_range_end == initial.dhcp_range_end
}
