// ── nslookup ──
//
// Name lookups succeed only through a recognised public resolver.
// Gateway validity is not consulted here, unlike ping.

use crate::format;
use crate::model::address::resolver_name;
use crate::model::{NetworkSettings, ScenarioDefinition};

/// Server label Windows prints for a resolver it cannot identify.
const UNKNOWN_SERVER: &str = "UnKnown";

pub fn lookup(domain: &str, effective: &NetworkSettings, scenario: &ScenarioDefinition) -> String {
    let server_addr = effective.dns.as_str();

    let Some(server_name) = resolver_name(server_addr) else {
        return format::nslookup_not_found(UNKNOWN_SERVER, server_addr, domain);
    };

    match scenario.resolve_host(domain) {
        Some(address) => format::nslookup_answer(server_name, server_addr, domain, address),
        None => format::nslookup_not_found(server_name, server_addr, domain),
    }
}
