//! Path utilities for the dapr home directory and the sidecar binary.
//!
//! - `~/.dapr` home (overridable with `DAPRUN_HOME`)
//! - Sidecar binary under `~/.dapr/bin` (overridable with `DAPRUN_DAPRD_PATH`)
//! - Default components directory and config file
//!
//! OS-specific logic is kept private in `platform`.

mod error;
mod platform;

pub use error::PathError;
pub use platform::{
    dapr_home, default_components_dir, default_config_path, sidecar_binary_path,
};
