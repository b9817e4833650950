// ── ping reachability cascade ──
//
// An ordered list of named rules. Each rule either claims the probe or
// passes; the first claim wins. Host-name rules pass on address targets
// and vice versa, so one list covers both paths.

use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::debug;

use crate::model::address::{is_ipv4, is_public_resolver, same_subnet};
use crate::model::{NetworkSettings, RouterSettings, ScenarioDefinition};

/// What the learner asked to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeTarget<'a> {
    Address(&'a str),
    Host(&'a str),
}

impl<'a> ProbeTarget<'a> {
    /// Anything that is not a strict dotted quad is treated as a name.
    pub fn classify(target: &'a str) -> Self {
        if is_ipv4(target) {
            Self::Address(target)
        } else {
            Self::Host(target)
        }
    }
}

/// Result of a ping before it is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PingOutcome {
    /// Four replies from `display`.
    Reply { display: String },
    TimedOut,
    HostNotFound,
    AddressConflict,
}

/// Reachability rules, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum PingRule {
    /// Local address collides with another host. Dominates every target.
    AddressConflict,
    /// Name missing from the domain table.
    UnknownHost,
    /// Resolver not trusted, or no usable gateway to reach it.
    UntrustedResolution,
    /// Name resolves but the uplink is down.
    WanDownForName,
    /// Name resolves and the path is up.
    NameResolved,
    /// Target shares the local subnet.
    SameSubnet,
    /// Router gateway probed with a mask that disagrees with the router's.
    GatewayMaskMismatch,
    /// No valid default gateway.
    NoGateway,
    /// Off-gateway-subnet target without a trusted upstream resolver.
    NoTrustedUpstream,
    /// Uplink down and target outside the router's LAN.
    WanDownForAddress,
    /// Routed through the gateway.
    Routed,
}

struct Probe<'a> {
    target: ProbeTarget<'a>,
    effective: &'a NetworkSettings,
    scenario: &'a ScenarioDefinition,
    router: &'a RouterSettings,
}

impl PingRule {
    fn check(self, probe: &Probe<'_>) -> Option<PingOutcome> {
        let Probe {
            target,
            effective,
            scenario,
            router,
        } = *probe;

        match (self, target) {
            (Self::AddressConflict, _) => scenario
                .conflicting_ip
                .as_deref()
                .filter(|ip| *ip == effective.ip_address)
                .map(|_| PingOutcome::AddressConflict),

            (Self::UnknownHost, ProbeTarget::Host(name)) => scenario
                .resolve_host(name)
                .is_none()
                .then_some(PingOutcome::HostNotFound),

            (Self::UntrustedResolution, ProbeTarget::Host(_)) => {
                (!is_public_resolver(&effective.dns) || !is_ipv4(&effective.gateway))
                    .then_some(PingOutcome::HostNotFound)
            }

            (Self::WanDownForName, ProbeTarget::Host(_)) => {
                (!router.wan_connected).then_some(PingOutcome::TimedOut)
            }

            (Self::NameResolved, ProbeTarget::Host(name)) => {
                scenario.resolve_host(name).map(|ip| PingOutcome::Reply {
                    display: ip.to_owned(),
                })
            }

            (Self::SameSubnet, ProbeTarget::Address(addr)) => {
                same_subnet(&effective.ip_address, addr, &effective.subnet_mask)
                    .then(|| reply(addr))
            }

            (Self::GatewayMaskMismatch, ProbeTarget::Address(addr)) => {
                (scenario.requires_subnet_match_for_gateway
                    && addr == router.lan_gateway
                    && effective.subnet_mask != router.lan_subnet_mask)
                    .then_some(PingOutcome::TimedOut)
            }

            (Self::NoGateway, ProbeTarget::Address(_)) => {
                (!is_ipv4(&effective.gateway)).then_some(PingOutcome::TimedOut)
            }

            (Self::NoTrustedUpstream, ProbeTarget::Address(addr)) => {
                (!is_public_resolver(&effective.dns)
                    && !same_subnet(&effective.gateway, addr, &effective.subnet_mask))
                .then_some(PingOutcome::TimedOut)
            }

            (Self::WanDownForAddress, ProbeTarget::Address(addr)) => {
                (!router.wan_connected
                    && !same_subnet(&router.lan_gateway, addr, &router.lan_subnet_mask))
                .then_some(PingOutcome::TimedOut)
            }

            (Self::Routed, ProbeTarget::Address(addr)) => Some(reply(addr)),

            _ => None,
        }
    }
}

fn reply(addr: &str) -> PingOutcome {
    PingOutcome::Reply {
        display: addr.to_owned(),
    }
}

/// The rule that decided a ping and what it decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PingVerdict {
    pub rule: PingRule,
    pub outcome: PingOutcome,
}

/// Run the reachability cascade for `target`.
///
/// `target` is used as given; the interpreter lowercases it first.
pub fn evaluate_ping(
    target: &str,
    effective: &NetworkSettings,
    scenario: &ScenarioDefinition,
    router: &RouterSettings,
) -> PingVerdict {
    let probe = Probe {
        target: ProbeTarget::classify(target),
        effective,
        scenario,
        router,
    };

    let verdict = PingRule::iter()
        .find_map(|rule| rule.check(&probe).map(|outcome| PingVerdict { rule, outcome }))
        // Host targets always stop at NameResolved or earlier, address
        // targets at Routed, so the fallback is never taken.
        .unwrap_or(PingVerdict {
            rule: PingRule::Routed,
            outcome: reply(target),
        });

    debug!(target, rule = %verdict.rule, "ping evaluated");
    verdict
}
