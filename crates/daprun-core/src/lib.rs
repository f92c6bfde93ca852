//! Core domain types, port definitions and launch planning for daprun.
//!
//! `daprun-core` decides *what* to launch: it resolves an app ID and ports,
//! checks them against running sidecars, and builds the sidecar and
//! application commands as plain data. It never spawns a process; adapters
//! in `daprun-runtime` supply the OS-facing collaborators and run the plan.

pub mod command;
pub mod conflicts;
pub mod domain;
pub mod error;
pub mod orchestrator;
pub mod paths;
pub mod ports;
pub mod settings;

// Re-export commonly used types for convenience
pub use command::{AppCommandBuilder, SidecarCommand, SidecarCommandBuilder};
pub use domain::{
    CommandSpec, LaunchPlan, PortKind, RunConfiguration, RunPhase, RunningInstance, SidecarOs,
    generate_app_id,
};
pub use error::{ComponentsError, PortError, RegistryError, RunError};
pub use orchestrator::Orchestrator;
pub use ports::{
    Collaborators, Component, ComponentsLoader, FixedPortAllocator, InstanceRegistry,
    MtlsDisabled, MtlsInspector, PortAllocator,
};
