//! Scenario catalog command handlers.

use std::fmt::Write;
use std::sync::Arc;

use tabled::Tabled;

use netlab_core::{ScenarioDefinition, ScenarioId};

use crate::cli::{ScenariosArgs, ScenariosCommand};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ScenarioRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "DHCP")]
    dhcp: String,
    #[tabled(rename = "Tools")]
    tools: String,
}

impl From<&Arc<ScenarioDefinition>> for ScenarioRow {
    fn from(s: &Arc<ScenarioDefinition>) -> Self {
        Self {
            id: s.id.get(),
            title: s.title.clone(),
            dhcp: s.dhcp_status.to_string(),
            tools: s
                .desktop_tools
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

// ── Detail view ─────────────────────────────────────────────────────

fn section(out: &mut String, title: &str, items: &[String], color: bool) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{}", output::heading(title, color));
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}

pub(crate) fn detail(s: &ScenarioDefinition, color: bool) -> String {
    let b = &s.briefing;
    let mut out = String::new();

    let _ = writeln!(out, "{}", output::heading(&format!("[{}] {}", s.id, s.title), color));
    if !b.summary.is_empty() {
        let _ = writeln!(out, "{}", b.summary);
    }
    if !b.narrative.is_empty() {
        let _ = writeln!(out, "\n{}", output::muted(&b.narrative, color));
    }

    section(&mut out, "Objectives", &b.objectives, color);
    section(&mut out, "Router", &b.initial_setup.router, color);
    section(&mut out, "Computer", &b.initial_setup.computer, color);
    section(&mut out, "Symptoms", &b.symptoms, color);
    section(&mut out, "Hints", &b.hints, color);
    section(&mut out, "Allowed actions", &b.allowed_actions, color);

    let targets: Vec<String> = s
        .ping_targets
        .iter()
        .map(|t| {
            if t.description.is_empty() {
                format!("{} ({})", t.name, t.ip)
            } else {
                format!("{} ({}): {}", t.name, t.ip, t.description)
            }
        })
        .collect();
    section(&mut out, "Ping targets", &targets, color);

    out.trim_end().to_owned()
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ScenariosArgs, settings: &Settings) -> Result<(), CliError> {
    let catalog = util::load_catalog(settings)?;

    match args.command {
        ScenariosCommand::List => {
            let scenarios: Vec<Arc<ScenarioDefinition>> = catalog.iter().cloned().collect();
            let out = output::render_list(
                settings.output,
                &scenarios,
                |s| ScenarioRow::from(s),
                |s| s.id.to_string(),
            )?;
            output::print_output(&out, settings.quiet);
            Ok(())
        }

        ScenariosCommand::Show { id } => {
            let scenario = util::scenario(&catalog, ScenarioId(id))?;
            let color = output::should_color(settings.color);
            let out = output::render_single(
                settings.output,
                &scenario,
                |s| detail(s, color),
                |s| s.title.clone(),
            )?;
            output::print_output(&out, settings.quiet);
            Ok(())
        }
    }
}
