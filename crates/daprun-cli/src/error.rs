//! CLI-specific error types and mappings.
//!
//! Maps planning and launch failures onto exit codes and user-facing
//! messages.

use daprun_core::RunError;
use daprun_runtime::LaunchError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Planning refused to produce a launch plan.
    #[error(transparent)]
    Plan(#[from] RunError),

    /// Processes could not be started or supervised.
    #[error(transparent)]
    Launch(#[from] LaunchError),

    /// Configuration could not be resolved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error while writing output.
    #[error("IO error: {0}")]
    Io(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions (see sysexits.h):
    /// - 1: General error
    /// - 65: Invalid component data
    /// - 66: Missing input directory
    /// - 69: No port available
    /// - 71: OS-level failure
    /// - 74: IO error
    /// - 75: Conflicting instance; retry later
    /// - 78: Configuration error
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Plan(err) => match err {
                RunError::PortExhaustion(_) => 69,
                RunError::ComponentsPathNotFound { .. } => 66,
                RunError::ComponentsLoad { .. } => 65,
                RunError::RegistryUnavailable(_) => 71,
                RunError::DuplicateIdentifier(_) | RunError::PortConflict { .. } => 75,
            },
            Self::Launch(LaunchError::PortTaken { .. }) => 75,
            Self::Launch(_) => 71,
            Self::Io(_) => 74,
            Self::Config(_) => 78,
        }
    }

    /// Follow-up advice for errors the user can resolve by changing flags.
    pub const fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Plan(err) if err.is_user_correctable() => Some(
                "Stop the other instance, or pass a different --app-id, \
                 --dapr-http-port or --dapr-grpc-port",
            ),
            Self::Launch(LaunchError::PortTaken { .. }) => {
                Some("Run again to pick new ports, or pin free ones with --dapr-http-port")
            }
            _ => None,
        }
    }
}

/// Follow-up advice for an error surfacing at the top level.
pub fn hint_for(err: &anyhow::Error) -> Option<&'static str> {
    err.downcast_ref::<CliError>().and_then(CliError::hint)
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Exit code for an error surfacing at the top level.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<CliError>().map_or(1, CliError::exit_code)
}
