// ── Built-in exercises ──
//
// Ten classic small-office faults, ordered from the simplest (no DHCP at
// all) to renumbered LANs. Prose is brief; the fields the engine reads
// are exact.

use std::collections::BTreeMap;

use indexmap::IndexSet;

use crate::model::{
    AddressMode, Briefing, DesktopTool, DhcpStatus, InitialModes, InitialSetup, NetworkSettings,
    PingTarget, RouterSettings, ScenarioDefinition, ScenarioId,
};

const DOMAIN_IPS: [(&str, &str); 7] = [
    ("baidu.com", "39.156.66.14"),
    ("bing.com", "204.79.197.200"),
    ("qq.com", "125.39.52.26"),
    ("bilibili.com", "23.66.147.113"),
    ("taobao.com", "140.205.94.189"),
    ("jd.com", "111.13.100.91"),
    ("youku.com", "203.107.50.59"),
];

const ALL_TOOLS: [DesktopTool; 3] = [DesktopTool::Router, DesktopTool::Network, DesktopTool::Terminal];
const ADAPTER_TOOLS: [DesktopTool; 2] = [DesktopTool::Network, DesktopTool::Terminal];

fn domains(names: &[&str]) -> BTreeMap<String, String> {
    DOMAIN_IPS
        .iter()
        .filter(|(name, _)| names.contains(name))
        .map(|(name, ip)| ((*name).to_owned(), (*ip).to_owned()))
        .collect()
}

fn tools(list: &[DesktopTool]) -> IndexSet<DesktopTool> {
    list.iter().copied().collect()
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

fn modes(ip: AddressMode, dns: AddressMode) -> Option<InitialModes> {
    Some(InitialModes { ip, dns })
}

/// Standard home router on 192.168.1.0/24; callers adjust what differs.
fn home_router(dhcp_enabled: bool, wan_suffix: u8) -> RouterSettings {
    RouterSettings {
        dhcp_enabled,
        lan_gateway: "192.168.1.1".into(),
        lan_subnet_mask: "255.255.255.0".into(),
        dhcp_range_start: "192.168.1.100".into(),
        dhcp_range_end: "192.168.1.200".into(),
        dhcp_dns: "114.114.114.114".into(),
        wan_connected: true,
        wan_ip: Some(format!("100.64.1.{wan_suffix}")),
        wan_gateway: Some("100.64.1.1".into()),
    }
}

fn standard_targets(gateway: &str, site: &str) -> Vec<PingTarget> {
    let site_ip = DOMAIN_IPS
        .iter()
        .find(|(name, _)| *name == site)
        .map_or("", |(_, ip)| *ip);
    vec![
        PingTarget {
            name: "Router gateway".into(),
            ip: gateway.into(),
            description: "Local default gateway".into(),
        },
        PingTarget {
            name: "114.114.114.114".into(),
            ip: "114.114.114.114".into(),
            description: "Public DNS service".into(),
        },
        PingTarget {
            name: site.into(),
            ip: site_ip.into(),
            description: "Simulated internet site".into(),
        },
    ]
}

#[allow(clippy::too_many_lines)]
pub(super) fn scenarios() -> Vec<ScenarioDefinition> {
    vec![
        ScenarioDefinition {
            id: ScenarioId(1),
            title: "Exercise 1 | DHCP off, host falls back to APIPA".into(),
            briefing: Briefing {
                summary: "DHCP is unavailable and hosts self-assign 169.254.x.x addresses.".into(),
                narrative: "Several classroom PCs cannot open any web page and all show \
                            169.254.x.x addresses."
                    .into(),
                objectives: lines(&[
                    "Recognise an APIPA address.",
                    "Restore a working address manually or by enabling DHCP.",
                    "Verify LAN and internet reachability with ping.",
                ]),
                hints: lines(&[
                    "169.254.x.x only reaches other self-assigned hosts, never the gateway.",
                    "Either switch to a static address or turn DHCP back on in the router.",
                    "Use 114.114.114.114 or 223.5.5.5 for DNS.",
                ]),
                initial_setup: InitialSetup {
                    router: lines(&["LAN 192.168.1.1/24", "DHCP off, pool 192.168.1.100-200"]),
                    computer: lines(&["Obtain address automatically", "Holding 169.254.45.12"]),
                },
                symptoms: lines(&[
                    "ipconfig shows 169.254.x.x",
                    "ping 192.168.1.1 times out",
                    "ping baidu.com cannot find the host",
                ]),
                resolution: lines(&[
                    "Enable DHCP, or set 192.168.1.10 / 255.255.255.0 / 192.168.1.1.",
                    "Set DNS to 114.114.114.114 and ping the gateway then the internet.",
                ]),
                takeaways: lines(&["A 169.254 address means DHCP never answered."]),
                ..Briefing::default()
            },
            initial_network: NetworkSettings::new("169.254.45.12", "255.255.0.0", "", ""),
            initial_router: home_router(false, 2),
            initial_modes: modes(AddressMode::Auto, AddressMode::Auto),
            domain_map: domains(&["baidu.com", "bing.com"]),
            desktop_tools: tools(&ALL_TOOLS),
            ping_targets: standard_targets("192.168.1.1", "baidu.com"),
            ..ScenarioDefinition::default()
        },
        ScenarioDefinition {
            id: ScenarioId(2),
            title: "Exercise 2 | Invalid manual DNS server".into(),
            briefing: Briefing {
                summary: "Addresses work but names do not: DNS was typed in as 1.1.1.300.".into(),
                hints: lines(&[
                    "A DNS server must be a valid IPv4 address.",
                    "Compare ping by address with ping by name.",
                ]),
                symptoms: lines(&["ping 192.168.1.1 replies", "ping baidu.com cannot find the host"]),
                resolution: lines(&["Set DNS back to automatic or to a public resolver."]),
                ..Briefing::default()
            },
            initial_network: NetworkSettings::new("", "", "", "1.1.1.300"),
            initial_router: home_router(true, 3),
            initial_modes: modes(AddressMode::Auto, AddressMode::Manual),
            domain_map: domains(&["baidu.com", "bing.com", "qq.com"]),
            desktop_tools: tools(&ADAPTER_TOOLS),
            ping_targets: standard_targets("192.168.1.1", "baidu.com"),
            ..ScenarioDefinition::default()
        },
        ScenarioDefinition {
            id: ScenarioId(3),
            title: "Exercise 3 | Wrong default gateway".into(),
            briefing: Briefing {
                summary: "The PC points at 192.168.1.254, which does not exist.".into(),
                hints: lines(&["The gateway must be the router's LAN address."]),
                resolution: lines(&["Change the gateway to 192.168.1.1."]),
                ..Briefing::default()
            },
            initial_network: NetworkSettings::new(
                "192.168.1.10",
                "255.255.255.0",
                "192.168.1.254",
                "114.114.114.114",
            ),
            initial_router: home_router(false, 4),
            domain_map: domains(&["baidu.com", "bing.com", "taobao.com"]),
            desktop_tools: tools(&ADAPTER_TOOLS),
            ping_targets: standard_targets("192.168.1.1", "baidu.com"),
            ..ScenarioDefinition::default()
        },
        ScenarioDefinition {
            id: ScenarioId(4),
            title: "Exercise 4 | Wrong subnet mask".into(),
            briefing: Briefing {
                summary: "The host uses 255.255.0.0 while the router uses 255.255.255.0.".into(),
                hints: lines(&["Mask must match the router's LAN mask."]),
                resolution: lines(&["Set the mask to 255.255.255.0."]),
                ..Briefing::default()
            },
            initial_network: NetworkSettings::new(
                "192.168.1.150",
                "255.255.0.0",
                "192.168.1.1",
                "114.114.114.114",
            ),
            initial_router: home_router(true, 5),
            domain_map: domains(&["baidu.com", "bing.com", "jd.com"]),
            desktop_tools: tools(&ADAPTER_TOOLS),
            ping_targets: standard_targets("192.168.1.1", "baidu.com"),
            requires_subnet_match_for_gateway: true,
            ..ScenarioDefinition::default()
        },
        ScenarioDefinition {
            id: ScenarioId(5),
            title: "Exercise 5 | DHCP pool exhausted".into(),
            briefing: Briefing {
                summary: "The pool 192.168.1.2-5 is full; new devices get no lease.".into(),
                hints: lines(&["Widen the DHCP range or configure a static address."]),
                resolution: lines(&["Edit the range, e.g. 192.168.1.100-200, then retry."]),
                ..Briefing::default()
            },
            initial_network: NetworkSettings::default(),
            initial_router: RouterSettings {
                dhcp_range_start: "192.168.1.2".into(),
                dhcp_range_end: "192.168.1.5".into(),
                ..home_router(true, 6)
            },
            initial_modes: modes(AddressMode::Auto, AddressMode::Auto),
            domain_map: domains(&["baidu.com", "bing.com", "youku.com"]),
            desktop_tools: tools(&ALL_TOOLS),
            ping_targets: standard_targets("192.168.1.1", "baidu.com"),
            dhcp_status: DhcpStatus::PoolExhausted,
            ..ScenarioDefinition::default()
        },
        ScenarioDefinition {
            id: ScenarioId(6),
            title: "Exercise 6 | Static IP conflict".into(),
            briefing: Briefing {
                summary: "Two PCs were both given 192.168.1.50.".into(),
                hints: lines(&["Pick an unused address outside the DHCP pool."]),
                resolution: lines(&["Change the address to e.g. 192.168.1.60."]),
                ..Briefing::default()
            },
            initial_network: NetworkSettings::new(
                "192.168.1.50",
                "255.255.255.0",
                "192.168.1.1",
                "114.114.114.114",
            ),
            initial_router: home_router(true, 7),
            domain_map: domains(&["baidu.com", "bilibili.com", "qq.com"]),
            desktop_tools: tools(&ADAPTER_TOOLS),
            ping_targets: standard_targets("192.168.1.1", "bilibili.com"),
            conflicting_ip: Some("192.168.1.50".into()),
            ..ScenarioDefinition::default()
        },
        ScenarioDefinition {
            id: ScenarioId(7),
            title: "Exercise 7 | Router hands out a bad DNS server".into(),
            briefing: Briefing {
                summary: "The router's DHCP DNS is 203.0.113.123, breaking names for everyone."
                    .into(),
                hints: lines(&["Fix the router's DNS or override DNS on the PC."]),
                resolution: lines(&["Set DHCP DNS to 114.114.114.114."]),
                ..Briefing::default()
            },
            initial_network: NetworkSettings::default(),
            initial_router: RouterSettings {
                dhcp_dns: "203.0.113.123".into(),
                ..home_router(true, 8)
            },
            initial_modes: modes(AddressMode::Auto, AddressMode::Auto),
            domain_map: domains(&["baidu.com", "bing.com", "taobao.com"]),
            desktop_tools: tools(&ALL_TOOLS),
            ping_targets: standard_targets("192.168.1.1", "baidu.com"),
            ..ScenarioDefinition::default()
        },
        ScenarioDefinition {
            id: ScenarioId(8),
            title: "Exercise 8 | WAN link down".into(),
            briefing: Briefing {
                summary: "The router's uplink is offline: LAN works, internet does not.".into(),
                hints: lines(&["Check the WAN status on the router page."]),
                resolution: lines(&["Reconnect the WAN link."]),
                ..Briefing::default()
            },
            initial_network: NetworkSettings::default(),
            initial_router: RouterSettings {
                wan_connected: false,
                wan_ip: None,
                wan_gateway: None,
                ..home_router(true, 9)
            },
            initial_modes: modes(AddressMode::Auto, AddressMode::Auto),
            domain_map: domains(&["baidu.com", "bing.com"]),
            desktop_tools: tools(&[DesktopTool::Router, DesktopTool::Terminal]),
            ping_targets: standard_targets("192.168.1.1", "baidu.com"),
            ..ScenarioDefinition::default()
        },
        ScenarioDefinition {
            id: ScenarioId(9),
            title: "Exercise 9 | LAN renumbered, DHCP not updated".into(),
            briefing: Briefing {
                summary: "The LAN moved to 192.168.10.1 but DHCP still hands out 192.168.1.x."
                    .into(),
                hints: lines(&["The DHCP range must sit inside the LAN subnet."]),
                resolution: lines(&["Change the range to 192.168.10.100-200."]),
                ..Briefing::default()
            },
            initial_network: NetworkSettings::new(
                "192.168.1.101",
                "255.255.255.0",
                "192.168.1.1",
                "192.168.1.1",
            ),
            initial_router: RouterSettings {
                lan_gateway: "192.168.10.1".into(),
                dhcp_dns: "192.168.1.1".into(),
                ..home_router(true, 9)
            },
            domain_map: domains(&["baidu.com", "bing.com", "jd.com"]),
            desktop_tools: tools(&ALL_TOOLS),
            ping_targets: standard_targets("192.168.10.1", "baidu.com"),
            ..ScenarioDefinition::default()
        },
        ScenarioDefinition {
            id: ScenarioId(10),
            title: "Exercise 10 | Static address in the old subnet".into(),
            briefing: Briefing {
                summary: "The router moved to 10.0.0.1/24 but the PC still uses 192.168.1.88."
                    .into(),
                hints: lines(&["Address and gateway must share the router's subnet."]),
                resolution: lines(&["Set 10.0.0.88 / 255.255.255.0 / 10.0.0.1."]),
                ..Briefing::default()
            },
            initial_network: NetworkSettings::new(
                "192.168.1.88",
                "255.255.255.0",
                "192.168.1.1",
                "114.114.114.114",
            ),
            initial_router: RouterSettings {
                lan_gateway: "10.0.0.1".into(),
                dhcp_range_start: "10.0.0.100".into(),
                dhcp_range_end: "10.0.0.200".into(),
                ..home_router(false, 10)
            },
            domain_map: domains(&["baidu.com", "bing.com", "youku.com"]),
            desktop_tools: tools(&ADAPTER_TOOLS),
            ping_targets: standard_targets("10.0.0.1", "baidu.com"),
            ..ScenarioDefinition::default()
        },
    ]
}
