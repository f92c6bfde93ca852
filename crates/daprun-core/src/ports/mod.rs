//! Port definitions (trait abstractions) for external collaborators.
//!
//! The planner depends only on these traits. Concrete adapters that touch
//! the OS (sockets, process table, filesystem) live in `daprun-runtime`.
//!
//! # Design Rules
//!
//! - Synchronous, intent-based methods; planning is one sequential pass
//! - No OS handles in any signature
//! - Each port reports its own narrow error type

mod components_loader;
mod instance_registry;
mod mtls_inspector;
mod port_allocator;

use std::sync::Arc;

pub use components_loader::{Component, ComponentsLoader};
pub use instance_registry::InstanceRegistry;
pub use mtls_inspector::{MtlsDisabled, MtlsInspector};
pub use port_allocator::{FixedPortAllocator, PortAllocator};

#[cfg(test)]
pub use components_loader::MockComponentsLoader;
#[cfg(test)]
pub use instance_registry::MockInstanceRegistry;
#[cfg(test)]
pub use mtls_inspector::MockMtlsInspector;
#[cfg(test)]
pub use port_allocator::MockPortAllocator;

/// Container for the collaborator trait objects used by the orchestrator.
///
/// Adapters build this once at their composition root.
#[derive(Clone)]
pub struct Collaborators {
    /// Free-port source for unset ports.
    pub ports: Arc<dyn PortAllocator>,
    /// Running sidecar snapshot source.
    pub registry: Arc<dyn InstanceRegistry>,
    /// Component directory validator.
    pub components: Arc<dyn ComponentsLoader>,
    /// Config file mTLS detection.
    pub mtls: Arc<dyn MtlsInspector>,
}

impl Collaborators {
    pub fn new(
        ports: Arc<dyn PortAllocator>,
        registry: Arc<dyn InstanceRegistry>,
        components: Arc<dyn ComponentsLoader>,
        mtls: Arc<dyn MtlsInspector>,
    ) -> Self {
        Self {
            ports,
            registry,
            components,
            mtls,
        }
    }
}
