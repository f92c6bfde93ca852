//! Platform-specific path resolution.
//!
//! Public functions read the environment; the `resolve_*` helpers take their
//! inputs explicitly so the resolution order can be tested without touching
//! process-wide state.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::error::PathError;
use crate::domain::SidecarOs;
use crate::settings::{HOME_OVERRIDE_ENV, SIDECAR_BINARY, SIDECAR_PATH_OVERRIDE_ENV};

const DAPR_DIR: &str = ".dapr";

/// Get the dapr home directory.
///
/// Resolution order:
/// 1. `DAPRUN_HOME` environment variable
/// 2. `~/.dapr`
pub fn dapr_home() -> Result<PathBuf, PathError> {
    resolve_dapr_home(env::var_os(HOME_OVERRIDE_ENV), dirs::home_dir())
}

/// Default components directory, `<dapr home>/components`.
pub fn default_components_dir() -> Result<PathBuf, PathError> {
    Ok(dapr_home()?.join("components"))
}

/// Default sidecar configuration file, `<dapr home>/config.yaml`.
pub fn default_config_path() -> Result<PathBuf, PathError> {
    Ok(dapr_home()?.join("config.yaml"))
}

/// Get the path to the sidecar binary for the host platform.
///
/// Resolution order:
/// 1. `DAPRUN_DAPRD_PATH` environment variable
/// 2. `<dapr home>/bin/daprd` (`daprd.exe` on Windows)
pub fn sidecar_binary_path() -> Result<PathBuf, PathError> {
    if let Some(path) = non_empty(env::var_os(SIDECAR_PATH_OVERRIDE_ENV)) {
        return Ok(PathBuf::from(path));
    }
    Ok(resolve_sidecar_binary(&dapr_home()?, SidecarOs::current()))
}

fn resolve_dapr_home(
    override_dir: Option<OsString>,
    home: Option<PathBuf>,
) -> Result<PathBuf, PathError> {
    if let Some(dir) = non_empty(override_dir) {
        return Ok(PathBuf::from(dir));
    }
    home.map(|home| home.join(DAPR_DIR))
        .ok_or(PathError::NoHomeDir)
}

fn resolve_sidecar_binary(dapr_home: &Path, os: SidecarOs) -> PathBuf {
    dapr_home
        .join("bin")
        .join(os.binary_file_name(SIDECAR_BINARY))
}

fn non_empty(value: Option<OsString>) -> Option<OsString> {
    value.filter(|v| !v.is_empty())
}
