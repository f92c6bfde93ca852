//! Sidecar platform designation.

use serde::{Deserialize, Serialize};

use crate::settings::{DEFAULT_PLACEMENT_PORT, WINDOWS_PLACEMENT_PORT};

/// Operating system the sidecar runs on.
///
/// Placement defaults differ per platform, so the planner takes this as an
/// explicit input instead of reading the host OS directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidecarOs {
    Windows,
    Unix,
}

impl SidecarOs {
    /// The platform this binary was compiled for.
    pub const fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Unix
        }
    }

    /// Placement port appended when the placement address has none.
    pub const fn default_placement_port(self) -> u16 {
        match self {
            Self::Windows => WINDOWS_PLACEMENT_PORT,
            Self::Unix => DEFAULT_PLACEMENT_PORT,
        }
    }

    /// File name of a binary on this platform.
    pub fn binary_file_name(self, stem: &str) -> String {
        match self {
            Self::Windows => format!("{stem}.exe"),
            Self::Unix => stem.to_string(),
        }
    }
}

impl Default for SidecarOs {
    fn default() -> Self {
        Self::current()
    }
}
