//! Domain types for launch planning.
//!
//! Pure data with no infrastructure dependencies.

mod app_id;
mod instance;
mod os;
mod phase;
mod plan;
mod run_config;

pub use app_id::{generate_app_id, generate_app_id_with};
pub use instance::{PortKind, RunningInstance};
pub use os::SidecarOs;
pub use phase::RunPhase;
pub use plan::{CommandSpec, LaunchPlan};
pub use run_config::RunConfiguration;
