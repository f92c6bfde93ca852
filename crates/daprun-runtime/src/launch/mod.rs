//! Turning a [`LaunchPlan`](daprun_core::LaunchPlan) into running processes.
//!
//! The sidecar is spawned first, then the application. Both have their
//! output streamed into tracing. [`supervise`] waits until the user
//! interrupts or either process exits, then stops whatever is still running.

mod error;
mod shutdown;
mod spawn;
mod supervise;

pub use error::{LaunchError, ProcessRole};
pub use shutdown::{SHUTDOWN_GRACE, shutdown_child};
pub use spawn::{LaunchedPair, command_from_spec, launch_plan, verify_ports_free};
pub use supervise::{StopReason, supervise, supervise_until};
