use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Which of the two launched processes an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessRole {
    Sidecar,
    App,
}

impl fmt::Display for ProcessRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sidecar => f.write_str("sidecar"),
            Self::App => f.write_str("app"),
        }
    }
}

/// Errors raised while starting or supervising planned processes.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// A planned port was taken between planning and spawning.
    #[error("Port {port} is no longer free; run again to pick new ports")]
    PortTaken { port: u16 },

    /// The OS refused to start a process.
    #[error("Failed to start {role} ({}): {source}", .program.display())]
    Spawn {
        role: ProcessRole,
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Waiting on a running process failed.
    #[error("Failed waiting on {role}: {source}")]
    Wait {
        role: ProcessRole,
        #[source]
        source: io::Error,
    },
}
