// ── Domain model ──
//
// Settings objects the learner edits, the scenario schema that seeds
// them, and the address arithmetic shared by every engine stage.

pub mod address;
pub mod scenario;
pub mod settings;

pub use scenario::{
    Briefing, DesktopTool, DhcpStatus, InitialModes, InitialSetup, PingTarget,
    ScenarioDefinition, ScenarioId,
};
pub use settings::{AdapterConfig, AddressMode, NetworkSettings, RouterSettings};
