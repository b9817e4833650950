// ── Diagnostic output formatter ──
//
// Fixed Windows-console transcripts. No decisions are made here; the
// interpreter picks a template and this module fills it in.

use std::fmt::Write;

use crate::model::NetworkSettings;

/// Echo prefix for commands recorded in the session history.
pub const PROMPT: &str = r"C:\>";

/// Every ping sends exactly this many probes.
pub const PING_PROBES: u32 = 4;
const PING_BYTES: u32 = 32;
const PING_TTL: u32 = 128;

const UNASSIGNED: &str = "unassigned";
const NOT_CONFIGURED: &str = "not configured";

pub const ADAPTER_APPLIED: &str = "System: network configuration updated.";
pub const ROUTER_APPLIED: &str = "System: router configuration updated.";

// ── ipconfig ─────────────────────────────────────────────────────────

pub fn ipconfig(settings: &NetworkSettings) -> String {
    [
        "Windows IP Configuration".to_owned(),
        String::new(),
        "Ethernet adapter Local Area Connection:".to_owned(),
        format!(
            "   IPv4 Address. . . . . . . . . . . : {}",
            or_placeholder(&settings.ip_address, UNASSIGNED)
        ),
        format!(
            "   Subnet Mask . . . . . . . . . . . : {}",
            or_placeholder(&settings.subnet_mask, NOT_CONFIGURED)
        ),
        format!(
            "   Default Gateway . . . . . . . . . : {}",
            or_placeholder(&settings.gateway, NOT_CONFIGURED)
        ),
        format!(
            "   DNS Servers . . . . . . . . . . . : {}",
            or_placeholder(&settings.dns, NOT_CONFIGURED)
        ),
    ]
    .join("\n")
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() { placeholder } else { value }
}

// ── ping ─────────────────────────────────────────────────────────────

pub fn ping_usage() -> String {
    "Usage: ping <target>".to_owned()
}

/// Four replies from `display`. `target` is what the learner typed.
pub fn ping_reply(target: &str, display: &str) -> String {
    let mut out = ping_header(target, display);
    for _ in 0..PING_PROBES {
        let _ = writeln!(out, "Reply from {display}: bytes={PING_BYTES} time<1ms TTL={PING_TTL}");
    }
    out.push_str(&ping_statistics(PING_PROBES));
    out
}

/// Four lost probes.
pub fn ping_timeout(target: &str) -> String {
    let mut out = ping_header(target, target);
    for _ in 0..PING_PROBES {
        out.push_str("Request timed out.\n");
    }
    out.push_str(&ping_statistics(0));
    out
}

/// Timeout transcript plus the duplicate-address advisory.
pub fn ping_conflict(target: &str) -> String {
    let mut out = ping_timeout(target);
    out.push_str(
        "\n\nHint: this host's IP address may conflict with another device on the network. \
         Assign a unique address.",
    );
    out
}

pub fn host_not_found(target: &str) -> String {
    format!("Ping request could not find host {target}. Please check the name and try again.")
}

fn ping_header(target: &str, display: &str) -> String {
    if target == display {
        format!("Pinging {target} with {PING_BYTES} bytes of data:\n")
    } else {
        format!("Pinging {target} [{display}] with {PING_BYTES} bytes of data:\n")
    }
}

fn ping_statistics(received: u32) -> String {
    let lost = PING_PROBES - received;
    let loss_pct = lost * 100 / PING_PROBES;
    format!(
        "\nPing statistics:\n    Packets: Sent = {PING_PROBES}, Received = {received}, \
         Lost = {lost} ({loss_pct}% loss)"
    )
}

// ── nslookup ─────────────────────────────────────────────────────────

pub fn nslookup_usage() -> String {
    "Usage: nslookup <domain>".to_owned()
}

pub fn nslookup_answer(server_name: &str, server_addr: &str, domain: &str, address: &str) -> String {
    format!(
        "{}\n\nNon-authoritative answer:\nName:    {domain}\nAddress:  {address}",
        nslookup_server(server_name, server_addr)
    )
}

pub fn nslookup_not_found(server_name: &str, server_addr: &str, domain: &str) -> String {
    format!(
        "{}\n\n*** {server_name} can't find {domain}: Non-existent domain",
        nslookup_server(server_name, server_addr)
    )
}

fn nslookup_server(name: &str, addr: &str) -> String {
    format!("Server:  {name}\nAddress:  {}", or_placeholder(addr, NOT_CONFIGURED))
}

// ── Shell and session lines ──────────────────────────────────────────

pub fn unknown_command(raw: &str) -> String {
    format!(
        "'{raw}' is not recognized as an internal or external command,\n\
         operable program or batch file."
    )
}

pub fn prompt_echo(command: &str) -> String {
    format!("{PROMPT} {command}")
}

pub fn dhcp_assigned(ip: &str) -> String {
    format!("System: DHCP assigned IP address {ip}.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipconfig_renders_placeholders_for_empty_fields() {
        let out = ipconfig(&NetworkSettings::default());
        insta::assert_snapshot!(out, @r"
        Windows IP Configuration

        Ethernet adapter Local Area Connection:
           IPv4 Address. . . . . . . . . . . : unassigned
           Subnet Mask . . . . . . . . . . . : not configured
           Default Gateway . . . . . . . . . : not configured
           DNS Servers . . . . . . . . . . . : not configured
        ");
    }

    #[test]
    fn reply_names_resolved_address_when_it_differs() {
        let out = ping_reply("baidu.com", "39.156.66.14");
        insta::assert_snapshot!(out, @r"
        Pinging baidu.com [39.156.66.14] with 32 bytes of data:
        Reply from 39.156.66.14: bytes=32 time<1ms TTL=128
        Reply from 39.156.66.14: bytes=32 time<1ms TTL=128
        Reply from 39.156.66.14: bytes=32 time<1ms TTL=128
        Reply from 39.156.66.14: bytes=32 time<1ms TTL=128

        Ping statistics:
            Packets: Sent = 4, Received = 4, Lost = 0 (0% loss)
        ");
    }

    #[test]
    fn timeout_loses_every_probe() {
        let out = ping_timeout("8.8.8.8");
        insta::assert_snapshot!(out, @r"
        Pinging 8.8.8.8 with 32 bytes of data:
        Request timed out.
        Request timed out.
        Request timed out.
        Request timed out.

        Ping statistics:
            Packets: Sent = 4, Received = 0, Lost = 4 (100% loss)
        ");
    }

    #[test]
    fn conflict_extends_timeout_with_advisory() {
        let out = ping_conflict("192.168.1.1");
        assert!(out.starts_with(&ping_timeout("192.168.1.1")));
        assert!(out.ends_with("may conflict with another device on the network. Assign a unique address."));
    }

    #[test]
    fn unknown_command_embeds_raw_token() {
        assert!(unknown_command("Foo").starts_with("'Foo' is not recognized"));
    }
}
