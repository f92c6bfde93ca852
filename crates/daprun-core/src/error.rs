//! Domain-specific errors for launch planning.
//!
//! Collaborator ports report their own narrow errors; the orchestrator maps
//! them onto [`RunError`], the single error type surfaced to adapters.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::{PortKind, RunPhase};

/// Errors reported by a [`PortAllocator`](crate::ports::PortAllocator).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PortError {
    /// No free TCP port could be obtained.
    #[error("No free TCP port available: {0}")]
    Exhausted(String),
}

/// Errors reported by an [`InstanceRegistry`](crate::ports::InstanceRegistry).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The running-instance table could not be read.
    #[error("{0}")]
    Unavailable(String),
}

/// Errors reported by a [`ComponentsLoader`](crate::ports::ComponentsLoader).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ComponentsError {
    /// A directory or file could not be read.
    #[error("Failed to read {}: {reason}", .path.display())]
    Read { path: PathBuf, reason: String },

    /// A component file is not valid YAML.
    #[error("Failed to parse {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    /// A component document is missing required fields.
    #[error("Invalid component in {}: {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },
}

/// Canonical error type for one orchestration call.
///
/// Every variant is fatal. Adapters map it to their own presentation
/// (CLI exit codes, serialized errors).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RunError {
    /// A port allocation failed.
    #[error(transparent)]
    PortExhaustion(#[from] PortError),

    /// The components directory does not exist.
    #[error("Components path {} does not exist", .path.display())]
    ComponentsPathNotFound { path: PathBuf },

    /// Running instances could not be listed, so conflicts cannot be verified.
    #[error("Cannot list running instances: {0}")]
    RegistryUnavailable(String),

    /// Loading components from the components directory failed.
    #[error("Failed to load components from {}: {reason}", .path.display())]
    ComponentsLoad { path: PathBuf, reason: String },

    /// An instance with the same app ID is already running.
    #[error("dapr with ID {0} is already running")]
    DuplicateIdentifier(String),

    /// A resolved sidecar port is already used by a running instance.
    #[error("there's already a Dapr instance running with {kind} port {port} (app ID {app_id})")]
    PortConflict {
        kind: PortKind,
        port: u16,
        app_id: String,
    },
}

impl From<RegistryError> for RunError {
    fn from(err: RegistryError) -> Self {
        Self::RegistryUnavailable(err.to_string())
    }
}

impl RunError {
    /// The orchestration phase this error aborts.
    pub const fn phase(&self) -> RunPhase {
        match self {
            Self::ComponentsPathNotFound { .. }
            | Self::RegistryUnavailable(_)
            | Self::ComponentsLoad { .. } => RunPhase::Validating,
            Self::DuplicateIdentifier(_) => RunPhase::CheckingConflicts,
            Self::PortExhaustion(_) | Self::PortConflict { .. } => RunPhase::Planning,
        }
    }

    /// Whether the user can fix this by choosing a different app ID or port.
    pub const fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            Self::DuplicateIdentifier(_) | Self::PortConflict { .. }
        )
    }
}
