//! `KEY=VALUE` edits for the adapter dialog and the router page.
//!
//! Each edit list builds a complete replacement from the current object,
//! which the session then applies wholesale. Address values are taken
//! verbatim: typing an invalid address is part of the exercise.

use std::str::FromStr;

use netlab_core::{AdapterConfig, AddressMode, RouterSettings};

use crate::error::CliError;

pub const ADAPTER_KEYS: [&str; 6] = ["ip-mode", "dns-mode", "ip", "mask", "gateway", "dns"];
pub const ROUTER_KEYS: [&str; 9] = [
    "dhcp",
    "gateway",
    "mask",
    "start",
    "end",
    "dns",
    "wan",
    "wan-ip",
    "wan-gateway",
];

/// Apply adapter edits on top of `current`.
pub fn adapter<S: AsRef<str>>(current: &AdapterConfig, pairs: &[S]) -> Result<AdapterConfig, CliError> {
    let mut next = current.clone();
    for pair in pairs {
        let (key, value) = split_pair(pair.as_ref())?;
        match key {
            "ip-mode" => next.ip_mode = parse_mode(key, value)?,
            "dns-mode" => next.dns_mode = parse_mode(key, value)?,
            "ip" => value.clone_into(&mut next.settings.ip_address),
            "mask" => value.clone_into(&mut next.settings.subnet_mask),
            "gateway" => value.clone_into(&mut next.settings.gateway),
            "dns" => value.clone_into(&mut next.settings.dns),
            other => return Err(unknown_key("adapter", other, &ADAPTER_KEYS)),
        }
    }
    Ok(next)
}

/// Apply router edits on top of `current`.
pub fn router<S: AsRef<str>>(current: &RouterSettings, pairs: &[S]) -> Result<RouterSettings, CliError> {
    let mut next = current.clone();
    for pair in pairs {
        let (key, value) = split_pair(pair.as_ref())?;
        match key {
            "dhcp" => next.dhcp_enabled = parse_bool(key, value)?,
            "wan" => next.wan_connected = parse_bool(key, value)?,
            "gateway" => value.clone_into(&mut next.lan_gateway),
            "mask" => value.clone_into(&mut next.lan_subnet_mask),
            "start" => value.clone_into(&mut next.dhcp_range_start),
            "end" => value.clone_into(&mut next.dhcp_range_end),
            "dns" => value.clone_into(&mut next.dhcp_dns),
            "wan-ip" => next.wan_ip = optional(value),
            "wan-gateway" => next.wan_gateway = optional(value),
            other => return Err(unknown_key("router", other, &ROUTER_KEYS)),
        }
    }
    Ok(next)
}

fn split_pair(pair: &str) -> Result<(&str, &str), CliError> {
    let (key, value) = pair.split_once('=').ok_or_else(|| CliError::Validation {
        field: pair.into(),
        reason: "expected KEY=VALUE".into(),
    })?;
    Ok((key.trim(), value.trim()))
}

fn parse_mode(key: &str, value: &str) -> Result<AddressMode, CliError> {
    AddressMode::from_str(value).map_err(|_| CliError::Validation {
        field: key.into(),
        reason: format!("expected 'auto' or 'manual', got '{value}'"),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, CliError> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(CliError::Validation {
            field: key.into(),
            reason: format!("expected on/off, got '{value}'"),
        }),
    }
}

fn optional(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

fn unknown_key(target: &str, key: &str, known: &[&str]) -> CliError {
    CliError::Validation {
        field: format!("{target} key '{key}'"),
        reason: format!("expected one of {}", known.join(", ")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use netlab_core::NetworkSettings;
    use pretty_assertions::assert_eq;

    #[test]
    fn adapter_edits_keep_untouched_fields() {
        let current = AdapterConfig {
            settings: NetworkSettings::new("192.168.1.50", "255.255.255.0", "192.168.1.1", "114.114.114.114"),
            ip_mode: AddressMode::Manual,
            dns_mode: AddressMode::Manual,
        };
        let next = adapter(&current, &["ip=192.168.1.60", "dns-mode=AUTO"]).unwrap();
        assert_eq!(next.settings.ip_address, "192.168.1.60");
        assert_eq!(next.settings.gateway, "192.168.1.1");
        assert_eq!(next.dns_mode, AddressMode::Auto);
        assert_eq!(next.ip_mode, AddressMode::Manual);
    }

    #[test]
    fn invalid_addresses_are_accepted_verbatim() {
        let next = adapter(&AdapterConfig::default(), &["dns=1.1.1.300"]).unwrap();
        assert_eq!(next.settings.dns, "1.1.1.300");
    }

    #[test]
    fn router_booleans_accept_common_spellings() {
        let current = RouterSettings::default();
        assert!(router(&current, &["dhcp=on"]).unwrap().dhcp_enabled);
        assert!(router(&current, &["wan=Yes"]).unwrap().wan_connected);
        assert!(!router(&current, &["dhcp=0"]).unwrap().dhcp_enabled);
        assert!(router(&current, &["dhcp=maybe"]).is_err());
    }

    #[test]
    fn empty_wan_ip_clears_it() {
        let current = RouterSettings {
            wan_ip: Some("100.64.1.2".into()),
            ..RouterSettings::default()
        };
        assert_eq!(router(&current, &["wan-ip="]).unwrap().wan_ip, None);
    }

    #[test]
    fn malformed_pairs_are_usage_errors() {
        assert!(matches!(
            adapter(&AdapterConfig::default(), &["ip"]),
            Err(CliError::Validation { .. })
        ));
        let err = router(&RouterSettings::default(), &["lan=1"]).unwrap_err();
        assert!(err.to_string().contains("router key 'lan'"));
    }
}
