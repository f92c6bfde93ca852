//! Component directory loading.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ComponentsError;

/// A component definition found in the components directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// `metadata.name` of the component.
    pub name: String,
    /// `spec.type`, e.g. `state.redis`.
    pub component_type: String,
    /// `spec.version`, if given.
    pub version: Option<String>,
    /// File the component was read from.
    pub source: PathBuf,
}

/// Loads and validates every component in a directory.
#[cfg_attr(test, mockall::automock)]
pub trait ComponentsLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<Vec<Component>, ComponentsError>;
}
