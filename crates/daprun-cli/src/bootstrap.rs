//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where host adapters are wired into the
//! core orchestrator for the CLI.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use daprun_core::paths::{default_components_dir, default_config_path, sidecar_binary_path};
use daprun_core::{InstanceRegistry, Orchestrator};
use daprun_runtime::local_collaborators;
use tracing::{debug, warn};

use crate::error::CliError;

/// Fully composed context for CLI commands.
pub struct CliContext {
    orchestrator: Orchestrator,
    registry: Arc<dyn InstanceRegistry>,
    default_components_path: PathBuf,
    default_config_file: Option<PathBuf>,
}

impl CliContext {
    pub const fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    pub fn registry(&self) -> &dyn InstanceRegistry {
        self.registry.as_ref()
    }

    /// Components directory used when `--components-path` is omitted.
    pub fn default_components_path(&self) -> &Path {
        &self.default_components_path
    }

    /// Sidecar configuration used when `--config` is omitted, if the file exists.
    pub fn default_config_file(&self) -> Option<&Path> {
        self.default_config_file.as_deref()
    }
}

/// Resolve paths and wire the host-backed collaborators.
pub fn bootstrap() -> Result<CliContext, CliError> {
    let config_error = |e: daprun_core::paths::PathError| CliError::Config(e.to_string());

    let sidecar_path = sidecar_binary_path().map_err(config_error)?;
    let default_components_path = default_components_dir().map_err(config_error)?;
    let default_config_file = existing(default_config_path().map_err(config_error)?);

    let collaborators = local_collaborators();
    let registry = Arc::clone(&collaborators.registry);
    let orchestrator = Orchestrator::new(sidecar_path, collaborators);

    if !orchestrator.sidecar_path().exists() {
        warn!(
            path = %orchestrator.sidecar_path().display(),
            "Sidecar binary not found; set DAPRUN_DAPRD_PATH or install Dapr"
        );
    }
    debug!(
        sidecar = %orchestrator.sidecar_path().display(),
        components = %default_components_path.display(),
        "Bootstrapped CLI context"
    );

    Ok(CliContext {
        orchestrator,
        registry,
        default_components_path,
        default_config_file,
    })
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    path.is_file().then_some(path)
}
