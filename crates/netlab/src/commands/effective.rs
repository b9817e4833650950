//! Effective-settings command handler.

use serde::Serialize;

use netlab_core::{AddressMode, EffectiveSource, NetworkSettings, ScenarioId, SessionState};

use crate::cli::EditArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

use super::util;

/// What the adapter ended up with, and why.
#[derive(Debug, Serialize)]
pub(crate) struct EffectiveReport {
    scenario: ScenarioId,
    source: EffectiveSource,
    ip_mode: AddressMode,
    dns_mode: AddressMode,
    dhcp_enabled: bool,
    wan_connected: bool,
    lease: Option<NetworkSettings>,
    effective: NetworkSettings,
}

impl From<&SessionState> for EffectiveReport {
    fn from(state: &SessionState) -> Self {
        Self {
            scenario: state.scenario.id,
            source: state.effective.source,
            ip_mode: state.adapter.ip_mode,
            dns_mode: state.adapter.dns_mode,
            dhcp_enabled: state.router.dhcp_enabled,
            wan_connected: state.router.wan_connected,
            lease: state.lease.clone(),
            effective: state.effective.settings.clone(),
        }
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

pub(crate) fn detail(r: &EffectiveReport) -> String {
    [
        format!("Scenario:  {}", r.scenario),
        format!("Source:    {}", r.source),
        format!("IP mode:   {}", r.ip_mode),
        format!("DNS mode:  {}", r.dns_mode),
        format!("DHCP:      {}", on_off(r.dhcp_enabled)),
        format!("WAN:       {}", on_off(r.wan_connected)),
        format!(
            "Lease:     {}",
            r.lease.as_ref().map_or("-", |l| l.ip_address.as_str())
        ),
        format!("IP:        {}", or_dash(&r.effective.ip_address)),
        format!("Mask:      {}", or_dash(&r.effective.subnet_mask)),
        format!("Gateway:   {}", or_dash(&r.effective.gateway)),
        format!("DNS:       {}", or_dash(&r.effective.dns)),
    ]
    .join("\n")
}

pub fn handle(args: &EditArgs, settings: &Settings) -> Result<(), CliError> {
    let session = util::open_session(settings)?;
    util::apply_edits(&session, args)?;

    let report = EffectiveReport::from(session.snapshot().as_ref());
    let out = output::render_single(settings.output, &report, detail, |r| {
        r.effective.ip_address.clone()
    })?;
    output::print_output(&out, settings.quiet);
    Ok(())
}
