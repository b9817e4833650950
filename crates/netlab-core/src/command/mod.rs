// ── Command interpreter ──
//
// One line of learner input in, one transcript out. Tokenizes on
// whitespace, case-folds the command name, and dispatches. Every failure
// mode is a transcript; nothing here returns an error.

pub mod nslookup;
pub mod ping;

use tracing::debug;

use crate::format;
use crate::model::{NetworkSettings, RouterSettings, ScenarioDefinition};

pub use ping::{PingOutcome, PingRule, PingVerdict, ProbeTarget, evaluate_ping};

/// A tokenized command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand<'a> {
    Ipconfig,
    Ping { target: Option<&'a str> },
    Nslookup { domain: Option<&'a str> },
    Unknown { name: &'a str },
}

impl<'a> ShellCommand<'a> {
    /// Tokenize `text`. Blank input yields `None`.
    ///
    /// `nslookup` exists only in scenarios that model name resolution
    /// (a non-empty domain table); elsewhere it is an unknown command.
    pub fn parse(text: &'a str, scenario: &ScenarioDefinition) -> Option<Self> {
        let mut tokens = text.split_whitespace();
        let name = tokens.next()?;
        let first_arg = tokens.next();

        let command = match name.to_lowercase().as_str() {
            "ipconfig" => Self::Ipconfig,
            "ping" => Self::Ping { target: first_arg },
            "nslookup" if !scenario.domain_map.is_empty() => Self::Nslookup { domain: first_arg },
            _ => Self::Unknown { name },
        };
        Some(command)
    }
}

/// Interpret one command line against the effective network state.
///
/// Returns an empty string for blank input.
pub fn execute(
    command_text: &str,
    effective: &NetworkSettings,
    scenario: &ScenarioDefinition,
    router: &RouterSettings,
) -> String {
    let Some(command) = ShellCommand::parse(command_text, scenario) else {
        return String::new();
    };
    debug!(?command, scenario = %scenario.id, "executing command");

    match command {
        ShellCommand::Ipconfig => format::ipconfig(effective),
        ShellCommand::Ping { target: None } => format::ping_usage(),
        ShellCommand::Ping {
            target: Some(target),
        } => {
            let target = target.to_lowercase();
            let verdict = evaluate_ping(&target, effective, scenario, router);
            render_ping(&target, &verdict.outcome)
        }
        ShellCommand::Nslookup { domain: None } => format::nslookup_usage(),
        ShellCommand::Nslookup {
            domain: Some(domain),
        } => nslookup::lookup(&domain.to_lowercase(), effective, scenario),
        ShellCommand::Unknown { name } => format::unknown_command(name),
    }
}

fn render_ping(target: &str, outcome: &PingOutcome) -> String {
    match outcome {
        PingOutcome::Reply { display } => format::ping_reply(target, display),
        PingOutcome::TimedOut => format::ping_timeout(target),
        PingOutcome::HostNotFound => format::host_not_found(target),
        PingOutcome::AddressConflict => format::ping_conflict(target),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn scenario() -> ScenarioDefinition {
        let mut s = ScenarioDefinition::default();
        s.domain_map.insert("baidu.com".into(), "39.156.66.14".into());
        s
    }

    fn healthy() -> NetworkSettings {
        NetworkSettings::new("192.168.1.10", "255.255.255.0", "192.168.1.1", "114.114.114.114")
    }

    fn router() -> RouterSettings {
        RouterSettings {
            lan_gateway: "192.168.1.1".into(),
            lan_subnet_mask: "255.255.255.0".into(),
            wan_connected: true,
            ..RouterSettings::default()
        }
    }

    #[test]
    fn blank_input_produces_nothing() {
        assert_eq!(execute("", &healthy(), &scenario(), &router()), "");
        assert_eq!(execute("   \t ", &healthy(), &scenario(), &router()), "");
    }

    #[test]
    fn command_names_are_case_insensitive() {
        let out = execute("IPCONFIG", &healthy(), &scenario(), &router());
        assert_eq!(out, format::ipconfig(&healthy()));
    }

    #[test]
    fn ipconfig_ignores_arguments() {
        let out = execute("ipconfig /all", &healthy(), &scenario(), &router());
        assert_eq!(out, format::ipconfig(&healthy()));
    }

    #[test]
    fn ping_without_target_prints_usage() {
        assert_eq!(execute("ping", &healthy(), &scenario(), &router()), format::ping_usage());
    }

    #[test]
    fn ping_target_is_lowercased() {
        let out = execute("ping BAIDU.com", &healthy(), &scenario(), &router());
        assert!(out.starts_with("Pinging baidu.com [39.156.66.14]"));
    }

    #[test]
    fn unknown_command_keeps_original_case() {
        let out = execute("Foo bar", &healthy(), &scenario(), &router());
        assert_eq!(out, format::unknown_command("Foo"));
    }

    #[test]
    fn nslookup_requires_domain_table() {
        let out = execute("nslookup baidu.com", &healthy(), &ScenarioDefinition::default(), &router());
        assert_eq!(out, format::unknown_command("nslookup"));

        let out = execute("nslookup", &healthy(), &scenario(), &router());
        assert_eq!(out, format::nslookup_usage());
    }

    #[test]
    fn parse_splits_on_any_whitespace() {
        let s = scenario();
        assert_eq!(
            ShellCommand::parse("  ping\t 8.8.8.8  extra", &s).unwrap(),
            ShellCommand::Ping {
                target: Some("8.8.8.8")
            }
        );
        assert!(ShellCommand::parse("", &s).is_none());
    }
}
