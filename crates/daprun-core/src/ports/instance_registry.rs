//! Running sidecar enumeration.

use crate::domain::RunningInstance;
use crate::error::RegistryError;

/// Lists sidecars currently running on this host.
///
/// Every call re-reads the underlying source; results are a snapshot.
#[cfg_attr(test, mockall::automock)]
pub trait InstanceRegistry: Send + Sync {
    fn list(&self) -> Result<Vec<RunningInstance>, RegistryError>;
}
