//! Command construction for the sidecar and the application.
//!
//! Both builders are pure data transformations producing
//! [`CommandSpec`](crate::domain::CommandSpec) values. The only side effect
//! is asking the injected [`PortAllocator`](crate::ports::PortAllocator)
//! for ports the caller left unset.

mod app;
pub mod flags;
mod sidecar;

pub use app::AppCommandBuilder;
pub use sidecar::{
    SidecarCommand, SidecarCommandBuilder, normalize_max_concurrency, normalize_max_request_size,
    placement_address,
};
