// ── IPv4 address primitives ──
//
// Every address in the simulator is carried as learner-typed text.
// These helpers decide when that text counts as a real dotted quad
// and do the masked arithmetic the interpreter needs.

use std::net::Ipv4Addr;

/// Resolvers the simulated internet trusts, paired with the host name
/// `nslookup` reports for each.
pub const PUBLIC_RESOLVERS: [(&str, &str); 4] = [
    ("8.8.8.8", "dns.google"),
    ("1.1.1.1", "one.one.one.one"),
    ("114.114.114.114", "public1.114dns.com"),
    ("223.5.5.5", "public1.alidns.com"),
];

/// Parse a strict dotted-quad IPv4 address.
///
/// Accepts exactly four `.`-separated decimal fields in `0..=255`.
/// Multi-digit fields may not start with `0`, and nothing else (signs,
/// whitespace, trailing dots) is tolerated.
pub fn parse_ipv4(text: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut fields = text.split('.');

    for slot in &mut octets {
        *slot = parse_octet(fields.next()?)?;
    }

    if fields.next().is_some() {
        return None;
    }

    Some(Ipv4Addr::from(octets))
}

fn parse_octet(field: &str) -> Option<u8> {
    let bytes = field.as_bytes();
    if bytes.is_empty() || bytes.len() > 3 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return None;
    }
    field.parse().ok()
}

/// Whether `text` is a syntactically valid IPv4 address.
pub fn is_ipv4(text: &str) -> bool {
    parse_ipv4(text).is_some()
}

/// Big-endian integer value of an address.
pub fn ipv4_to_u32(addr: Ipv4Addr) -> u32 {
    u32::from(addr)
}

pub fn u32_to_ipv4(value: u32) -> Ipv4Addr {
    Ipv4Addr::from(value)
}

/// `true` when `a` and `b` share a network under `mask`.
///
/// Any of the three failing to parse makes the pair non-local.
pub fn same_subnet(a: &str, b: &str, mask: &str) -> bool {
    let (Some(a), Some(b), Some(mask)) = (parse_ipv4(a), parse_ipv4(b), parse_ipv4(mask)) else {
        return false;
    };
    let mask = ipv4_to_u32(mask);
    ipv4_to_u32(a) & mask == ipv4_to_u32(b) & mask
}

/// Whether `text` is an address in the APIPA block `169.254.0.0/16`.
pub fn is_apipa(text: &str) -> bool {
    parse_ipv4(text).is_some_and(|addr| addr.is_link_local())
}

/// Whether `text` names one of the [`PUBLIC_RESOLVERS`].
pub fn is_public_resolver(text: &str) -> bool {
    resolver_name(text).is_some()
}

/// Host name of a recognised public resolver.
pub fn resolver_name(text: &str) -> Option<&'static str> {
    PUBLIC_RESOLVERS
        .iter()
        .find(|(addr, _)| *addr == text)
        .map(|(_, name)| *name)
}
