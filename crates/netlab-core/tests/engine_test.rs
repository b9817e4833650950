//! End-to-end checks of the simulation engine against the built-in
//! exercises: lease resolution, composition, and command transcripts.
#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use netlab_core::format;
use netlab_core::{
    AdapterConfig, AddressMode, Catalog, DhcpStatus, EffectiveSource, NetworkSettings, PingRule,
    RouterSettings, ScenarioDefinition, ScenarioId, Session, compose, compute_effective,
    evaluate_ping, execute, resolve_lease,
};
use pretty_assertions::assert_eq;

// ── Helpers ─────────────────────────────────────────────────────────

fn builtin(id: u32) -> Arc<ScenarioDefinition> {
    Catalog::builtin().get(ScenarioId(id)).unwrap()
}

fn session(id: u32) -> Session {
    Session::new(Arc::new(Catalog::builtin()), ScenarioId(id)).unwrap()
}

fn manual(ip: &str, mask: &str, gateway: &str, dns: &str) -> AdapterConfig {
    AdapterConfig {
        settings: NetworkSettings::new(ip, mask, gateway, dns),
        ip_mode: AddressMode::Manual,
        dns_mode: AddressMode::Manual,
    }
}

fn succeeded(out: &str) -> bool {
    out.ends_with("Sent = 4, Received = 4, Lost = 0 (0% loss)")
}

fn timed_out(out: &str) -> bool {
    out.ends_with("Sent = 4, Received = 0, Lost = 4 (100% loss)")
}

// ── Lease resolution ────────────────────────────────────────────────

#[test]
fn reversed_range_leases_smaller_address() {
    let scenario = builtin(7);
    let router = RouterSettings {
        dhcp_range_start: "192.168.1.200".into(),
        dhcp_range_end: "192.168.1.100".into(),
        ..scenario.initial_router.clone()
    };
    assert_eq!(resolve_lease(&router, &scenario).unwrap().ip_address, "192.168.1.100");
}

#[test]
fn unavailable_dhcp_never_leases() {
    let scenario = ScenarioDefinition {
        dhcp_status: DhcpStatus::Unavailable,
        ..(*builtin(2)).clone()
    };
    for dhcp_enabled in [true, false] {
        let router = RouterSettings {
            dhcp_enabled,
            ..scenario.initial_router.clone()
        };
        assert!(resolve_lease(&router, &scenario).is_none());
    }
}

// ── Composition ─────────────────────────────────────────────────────

#[test]
fn apipa_scenario_end_to_end() {
    let scenario = builtin(1);
    let adapter = AdapterConfig::initial_for(&scenario);
    assert_eq!(adapter.ip_mode, AddressMode::Auto);

    let effective = compute_effective(&adapter, &scenario.initial_router, None, &scenario);
    assert_eq!(effective, NetworkSettings::new("169.254.45.12", "255.255.0.0", "", ""));

    let out = execute("ping 8.8.8.8", &effective, &scenario, &scenario.initial_router);
    assert!(timed_out(&out), "{out}");
}

#[test]
fn compute_effective_is_idempotent() {
    let catalog = Catalog::builtin();
    for scenario in catalog.iter() {
        let adapter = AdapterConfig::initial_for(scenario);
        let router = &scenario.initial_router;
        let first = compose(&adapter, router, None, scenario);
        let second = compose(&adapter, router, None, scenario);
        assert_eq!(first, second, "scenario {}", scenario.id);
    }
}

#[test]
fn exhausted_pool_scenario_self_assigns_from_id() {
    let s = session(5);
    let state = s.snapshot();
    assert_eq!(state.effective.source, EffectiveSource::Apipa);
    assert_eq!(state.settings().ip_address, "169.254.105.95");
}

// ── Ping cascade ────────────────────────────────────────────────────

#[test]
fn same_subnet_ping_succeeds_regardless_of_gateway_and_dns() {
    let scenario = builtin(3);
    let router = &scenario.initial_router;
    for (gateway, dns) in [("", ""), ("192.168.1.254", "1.1.1.300"), ("junk", "114.114.114.114")] {
        let effective = NetworkSettings::new("192.168.1.10", "255.255.255.0", gateway, dns);
        let out = execute("ping 192.168.1.1", &effective, &scenario, router);
        assert!(succeeded(&out), "gateway={gateway} dns={dns}\n{out}");
    }
}

#[test]
fn conflict_transcript_beats_local_reachability() {
    let scenario = builtin(6);
    let effective = NetworkSettings::new("192.168.1.50", "255.255.255.0", "192.168.1.1", "114.114.114.114");
    let out = execute("ping 192.168.1.1", &effective, &scenario, &scenario.initial_router);
    assert_eq!(out, format::ping_conflict("192.168.1.1"));
}

#[test]
fn conflict_clears_after_readdressing() {
    let s = session(6);
    assert_eq!(s.run("ping 192.168.1.1"), format::ping_conflict("192.168.1.1"));

    s.apply_adapter(manual("192.168.1.60", "255.255.255.0", "192.168.1.1", "114.114.114.114"));
    assert!(succeeded(&s.run("ping 192.168.1.1")));
    assert!(succeeded(&s.run("ping baidu.com")));
}

#[test]
fn bad_manual_dns_breaks_names_and_remote_addresses() {
    let s = session(2);
    assert!(succeeded(&s.run("ping 192.168.1.1")));
    assert_eq!(s.run("ping baidu.com"), format::host_not_found("baidu.com"));
    // Off-subnet addresses also need a trusted upstream resolver.
    assert!(timed_out(&s.run("ping 114.114.114.114")));

    let mut adapter = s.snapshot().adapter.clone();
    adapter.dns_mode = AddressMode::Auto;
    s.apply_adapter(adapter);
    let out = s.run("ping baidu.com");
    assert!(out.starts_with("Pinging baidu.com [39.156.66.14]"), "{out}");
}

#[test]
fn wrong_gateway_reaches_lan_but_not_internet() {
    let scenario = builtin(3);
    let adapter = AdapterConfig::initial_for(&scenario);
    let effective = compute_effective(&adapter, &scenario.initial_router, None, &scenario);

    // Gateway text is a valid address, so the router still forwards.
    let verdict = evaluate_ping("8.8.8.8", &effective, &scenario, &scenario.initial_router);
    assert_eq!(verdict.rule, PingRule::Routed);
    assert_eq!(
        evaluate_ping("192.168.1.1", &effective, &scenario, &scenario.initial_router).rule,
        PingRule::SameSubnet
    );
}

#[test]
fn wan_down_times_out_names_and_remote_addresses() {
    let s = session(8);
    assert!(succeeded(&s.run("ping 192.168.1.1")));
    assert!(timed_out(&s.run("ping 8.8.8.8")));
    assert!(timed_out(&s.run("ping baidu.com")));

    let mut router = s.snapshot().router.clone();
    router.wan_connected = true;
    s.apply_router(router);
    assert!(succeeded(&s.run("ping 8.8.8.8")));
    assert!(succeeded(&s.run("ping baidu.com")));
}

#[test]
fn stale_static_subnet_still_routes_through_valid_gateway() {
    let s = session(10);
    let state = s.snapshot();
    let verdict = evaluate_ping("10.0.0.1", state.settings(), &state.scenario, &state.router);
    assert_eq!(verdict.rule, PingRule::Routed);

    s.apply_adapter(manual("10.0.0.88", "255.255.255.0", "10.0.0.1", "114.114.114.114"));
    let state = s.snapshot();
    let verdict = evaluate_ping("10.0.0.1", state.settings(), &state.scenario, &state.router);
    assert_eq!(verdict.rule, PingRule::SameSubnet);
}

// ── Other commands ──────────────────────────────────────────────────

#[test]
fn ipconfig_always_lists_four_fields() {
    let scenario = builtin(5);
    for effective in [NetworkSettings::default(), NetworkSettings::new("10.0.0.2", "", "", "")] {
        let out = execute("ipconfig", &effective, &scenario, &scenario.initial_router);
        let fields: Vec<&str> = out.lines().filter(|l| l.contains(" : ")).collect();
        assert_eq!(fields.len(), 4);
        assert!(fields.iter().all(|l| !l.ends_with(": ")));
    }
}

#[test]
fn ipconfig_reports_lease_for_scenario_seven() {
    let s = session(7);
    insta::assert_snapshot!(s.run("ipconfig"), @r"
    Windows IP Configuration

    Ethernet adapter Local Area Connection:
       IPv4 Address. . . . . . . . . . . : 192.168.1.100
       Subnet Mask . . . . . . . . . . . : 255.255.255.0
       Default Gateway . . . . . . . . . : 192.168.1.1
       DNS Servers . . . . . . . . . . . : 203.0.113.123
    ");
}

#[test]
fn unknown_command_embeds_token() {
    let scenario = builtin(1);
    let out = execute("foo bar", &NetworkSettings::default(), &scenario, &scenario.initial_router);
    assert_eq!(out, format::unknown_command("foo"));
    assert!(out.contains("'foo'"));
}

#[test]
fn nslookup_follows_resolver_not_gateway() {
    let scenario = builtin(7);
    let no_gateway = NetworkSettings::new("192.168.1.100", "255.255.255.0", "", "8.8.8.8");
    let out = execute("nslookup taobao.com", &no_gateway, &scenario, &scenario.initial_router);
    assert!(out.ends_with("Address:  140.205.94.189"), "{out}");

    let s = session(7);
    let out = s.run("nslookup taobao.com");
    assert!(out.contains("Non-existent domain"), "{out}");
}
