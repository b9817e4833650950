//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::sync::Arc;

use tracing::debug;

use netlab_core::{Catalog, CoreError, DesktopTool, ScenarioDefinition, ScenarioId, Session};

use crate::cli::EditArgs;
use crate::config::Settings;
use crate::error::CliError;

use super::edit;

/// Load the configured catalog, or the built-in exercises.
pub fn load_catalog(settings: &Settings) -> Result<Arc<Catalog>, CliError> {
    let catalog = match settings.catalog {
        Some(ref path) => {
            debug!(path = %path.display(), "loading catalog");
            Catalog::load(path)?
        }
        None => Catalog::builtin(),
    };
    Ok(Arc::new(catalog))
}

/// Open a session on the selected scenario, or the catalog's first.
pub fn open_session(settings: &Settings) -> Result<Session, CliError> {
    let catalog = load_catalog(settings)?;
    let session = match settings.scenario {
        Some(id) => Session::new(Arc::clone(&catalog), id),
        None => Session::first(Arc::clone(&catalog)),
    };
    session.map_err(|err| not_found_with_ids(err, &catalog))
}

/// Attach the catalog's ids to a scenario lookup failure.
pub fn not_found_with_ids(err: CoreError, catalog: &Catalog) -> CliError {
    match err {
        CoreError::ScenarioNotFound { id } => CliError::scenario_not_found(id, &catalog.ids()),
        other => other.into(),
    }
}

/// Look up one scenario by id with the same error shape as `open_session`.
pub fn scenario(catalog: &Catalog, id: ScenarioId) -> Result<Arc<ScenarioDefinition>, CliError> {
    catalog.get(id).map_err(|err| not_found_with_ids(err, catalog))
}

/// Fail unless the current scenario offers `tool` to the learner.
pub fn require_tool(session: &Session, tool: DesktopTool) -> Result<(), CliError> {
    let scenario = session.scenario();
    if scenario.has_tool(tool) {
        return Ok(());
    }
    Err(CliError::Validation {
        field: tool.to_string(),
        reason: format!("scenario {} does not allow {tool} changes", scenario.id),
    })
}

/// Apply `--adapter` / `--router` edits, adapter first.
pub fn apply_edits(session: &Session, edits: &EditArgs) -> Result<(), CliError> {
    if !edits.adapter.is_empty() {
        require_tool(session, DesktopTool::Network)?;
        let next = edit::adapter(&session.snapshot().adapter, &edits.adapter)?;
        session.apply_adapter(next);
    }
    if !edits.router.is_empty() {
        require_tool(session, DesktopTool::Router)?;
        let next = edit::router(&session.snapshot().router, &edits.router)?;
        session.apply_router(next);
    }
    Ok(())
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn session(id: u32) -> Session {
        Session::new(Arc::new(Catalog::builtin()), ScenarioId(id)).unwrap()
    }

    fn edits(adapter: &[&str], router: &[&str]) -> EditArgs {
        EditArgs {
            adapter: adapter.iter().map(ToString::to_string).collect(),
            router: router.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn router_edit_needs_router_tool() {
        let s = session(3);
        let err = apply_edits(&s, &edits(&[], &["dhcp=on"])).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "router"));
        assert!(!s.snapshot().router.dhcp_enabled);
        assert!(s.history().is_empty());
    }

    #[test]
    fn adapter_edit_needs_network_tool() {
        let s = session(8);
        let before = s.snapshot().adapter.clone();
        let err = apply_edits(&s, &edits(&["ip-mode=manual"], &[])).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "network"));
        assert_eq!(s.snapshot().adapter, before);
    }

    #[test]
    fn edits_apply_when_tools_present() {
        let s = session(1);
        apply_edits(&s, &edits(&[], &["dhcp=on"])).unwrap();
        assert!(s.snapshot().router.dhcp_enabled);
    }
}
