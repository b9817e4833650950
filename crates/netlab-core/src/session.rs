// ── Lab session ──
//
// Holds the active scenario's mutable state as one immutable snapshot
// behind an `ArcSwap`. Every operation builds a complete replacement and
// publishes it with a single swap. Readers see the old state or the new
// one, never a mix.

use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::command;
use crate::compositor::{Composition, compose};
use crate::dhcp::resolve_lease;
use crate::error::CoreError;
use crate::format;
use crate::model::{
    AdapterConfig, AddressMode, NetworkSettings, RouterSettings, ScenarioDefinition, ScenarioId,
};

/// Everything a command needs, captured at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    pub scenario: Arc<ScenarioDefinition>,
    pub adapter: AdapterConfig,
    pub router: RouterSettings,
    pub lease: Option<NetworkSettings>,
    pub effective: Composition,
    pub history: Vec<String>,
}

impl SessionState {
    /// Fresh state for `scenario`. A lease is taken silently when the
    /// initial adapter is automatic and the router serves DHCP.
    pub fn initial(scenario: Arc<ScenarioDefinition>) -> Self {
        let adapter = AdapterConfig::initial_for(&scenario);
        let router = scenario.initial_router.clone();
        let lease = if adapter.ip_mode == AddressMode::Auto && router.dhcp_enabled {
            resolve_lease(&router, &scenario)
        } else {
            None
        };
        let effective = compose(&adapter, &router, lease.as_ref(), &scenario);

        Self {
            scenario,
            adapter,
            router,
            lease,
            effective,
            history: Vec::new(),
        }
    }

    /// Recompute lease and effective settings after an edit, logging a
    /// changed lease to history.
    fn refresh(&mut self) {
        let next = if self.adapter.ip_mode == AddressMode::Auto && self.router.dhcp_enabled {
            resolve_lease(&self.router, &self.scenario)
        } else {
            None
        };

        if let Some(lease) = next.as_ref().filter(|l| self.lease.as_ref() != Some(*l)) {
            debug!(ip = %lease.ip_address, "lease changed");
            self.history.push(format::dhcp_assigned(&lease.ip_address));
        }
        self.lease = next;
        self.effective = compose(&self.adapter, &self.router, self.lease.as_ref(), &self.scenario);
    }

    pub fn settings(&self) -> &NetworkSettings {
        &self.effective.settings
    }
}

/// An interactive lab: a catalog plus the active scenario's state.
pub struct Session {
    catalog: Arc<Catalog>,
    state: ArcSwap<SessionState>,
}

impl Session {
    /// Start a session on scenario `id`.
    pub fn new(catalog: Arc<Catalog>, id: ScenarioId) -> Result<Self, CoreError> {
        let scenario = catalog.get(id)?;
        info!(scenario = %id, title = %scenario.title, "session started");
        let state = ArcSwap::from_pointee(SessionState::initial(scenario));
        Ok(Self { catalog, state })
    }

    /// Start on the catalog's first scenario.
    pub fn first(catalog: Arc<Catalog>) -> Result<Self, CoreError> {
        let id = catalog
            .first()
            .map(|s| s.id)
            .ok_or_else(|| CoreError::InvalidCatalog {
                reason: "catalog contains no scenarios".into(),
            })?;
        Self::new(catalog, id)
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Current state snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<SessionState> {
        self.state.load_full()
    }

    pub fn scenario(&self) -> Arc<ScenarioDefinition> {
        Arc::clone(&self.state.load().scenario)
    }

    pub fn effective(&self) -> NetworkSettings {
        self.state.load().effective.settings.clone()
    }

    pub fn history(&self) -> Vec<String> {
        self.state.load().history.clone()
    }

    /// Switch scenarios: adapter, router, lease, and history reset together.
    pub fn select_scenario(&self, id: ScenarioId) -> Result<(), CoreError> {
        let scenario = self.catalog.get(id)?;
        info!(scenario = %id, title = %scenario.title, "scenario selected");
        self.state.store(Arc::new(SessionState::initial(scenario)));
        Ok(())
    }

    /// Replace the adapter configuration wholesale.
    pub fn apply_adapter(&self, adapter: AdapterConfig) {
        debug!(ip_mode = %adapter.ip_mode, dns_mode = %adapter.dns_mode, "applying adapter");
        self.state.rcu(|current| {
            let mut next = SessionState::clone(current);
            next.adapter = adapter.clone();
            next.history.push(format::ADAPTER_APPLIED.to_owned());
            next.refresh();
            next
        });
    }

    /// Replace the router configuration wholesale.
    pub fn apply_router(&self, router: RouterSettings) {
        debug!(dhcp = router.dhcp_enabled, wan = router.wan_connected, "applying router");
        self.state.rcu(|current| {
            let mut next = SessionState::clone(current);
            next.router = router.clone();
            next.history.push(format::ROUTER_APPLIED.to_owned());
            next.refresh();
            next
        });
    }

    /// Run one command line, recording the echo and output in history.
    ///
    /// Blank input is ignored and returns an empty string.
    pub fn run(&self, command_text: &str) -> String {
        let command_text = command_text.trim();
        if command_text.is_empty() {
            return String::new();
        }

        let mut output = String::new();
        self.state.rcu(|current| {
            output = command::execute(
                command_text,
                &current.effective.settings,
                &current.scenario,
                &current.router,
            );
            let mut next = SessionState::clone(current);
            next.history.push(format::prompt_echo(command_text));
            if !output.is_empty() {
                next.history.push(output.clone());
            }
            next
        });
        output
    }
}
