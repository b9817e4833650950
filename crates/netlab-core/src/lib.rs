//! Network condition simulation engine for netlab troubleshooting labs.
//!
//! A learner edits a virtual adapter and a virtual router, then probes the
//! result with `ipconfig`, `ping`, and `nslookup`. This crate owns every
//! decision in that loop:
//!
//! - **[`resolve_lease`]**: Would the router's DHCP service offer a
//!   lease right now? Honors the scenario's scripted DHCP faults.
//!
//! - **[`compute_effective`]**: Folds adapter, router, lease, and scenario
//!   into the one [`NetworkSettings`] every command treats as the truth,
//!   including the APIPA fallback when nothing answers.
//!
//! - **[`execute`]**: Interprets one command line against that state and
//!   returns a fixed-format transcript. The `ping` reachability cascade is
//!   an ordered list of named rules ([`PingRule`]).
//!
//! - **[`Session`]**: Atomic holder for the active scenario's adapter,
//!   router, lease, and history. Edits and resets are published with a
//!   single `ArcSwap` store.
//!
//! - **[`Catalog`]**: Ordered, validated list of [`ScenarioDefinition`]s,
//!   built in or loaded from TOML/JSON.

pub mod catalog;
pub mod command;
pub mod compositor;
pub mod dhcp;
pub mod error;
pub mod format;
pub mod model;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use catalog::Catalog;
pub use command::{PingOutcome, PingRule, PingVerdict, ShellCommand, evaluate_ping, execute};
pub use compositor::{Composition, EffectiveSource, apipa_fallback, compose, compute_effective};
pub use dhcp::{LeaseDecision, LeaseRule, evaluate_lease, resolve_lease};
pub use error::CoreError;
pub use session::{Session, SessionState};

pub use model::{
    AdapterConfig, AddressMode, Briefing, DesktopTool, DhcpStatus, InitialModes, InitialSetup,
    NetworkSettings, PingTarget, RouterSettings, ScenarioDefinition, ScenarioId,
};
