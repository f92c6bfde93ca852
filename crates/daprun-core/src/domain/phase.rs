//! Orchestration phases.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phases of one orchestration call, in the order they run.
///
/// A failure in any phase aborts the call; see [`RunError::phase`](crate::RunError::phase).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    /// Resolving the app ID, checking the components directory, fetching the
    /// running-instance snapshot and loading components.
    Validating,
    /// Checking the app ID against the snapshot.
    CheckingConflicts,
    /// Building commands and checking resolved ports against the snapshot.
    Planning,
    /// A launch plan was produced.
    Ready,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validating => "validating",
            Self::CheckingConflicts => "checking-conflicts",
            Self::Planning => "planning",
            Self::Ready => "ready",
        };
        f.write_str(name)
    }
}
