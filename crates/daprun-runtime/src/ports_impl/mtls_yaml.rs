//! mTLS detection in a sidecar configuration file.

use std::fs;
use std::path::Path;

use daprun_core::MtlsInspector;
use daprun_core::settings::DEFAULT_SENTRY_ADDRESS;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    spec: ConfigSpec,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigSpec {
    mtls: MtlsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MtlsSection {
    enabled: bool,
}

/// Reads `spec.mtls.enabled` from a sidecar `Configuration` document.
///
/// A missing or unreadable file, or one that does not parse, reads as
/// mTLS disabled.
#[derive(Debug, Clone)]
pub struct YamlMtlsInspector {
    sentry_address: String,
}

impl YamlMtlsInspector {
    pub fn new() -> Self {
        Self {
            sentry_address: DEFAULT_SENTRY_ADDRESS.to_string(),
        }
    }

    /// Sentry address reported when mTLS is enabled.
    #[must_use]
    pub fn with_sentry_address(mut self, address: impl Into<String>) -> Self {
        self.sentry_address = address.into();
        self
    }

    fn mtls_enabled(config_file: &Path) -> bool {
        let contents = match fs::read_to_string(config_file) {
            Ok(contents) => contents,
            Err(e) => {
                debug!(path = %config_file.display(), error = %e, "Config file not readable");
                return false;
            }
        };

        match serde_yaml::from_str::<ConfigFile>(&contents) {
            Ok(config) => config.spec.mtls.enabled,
            Err(e) => {
                debug!(path = %config_file.display(), error = %e, "Config file not parsable");
                false
            }
        }
    }
}

impl Default for YamlMtlsInspector {
    fn default() -> Self {
        Self::new()
    }
}

impl MtlsInspector for YamlMtlsInspector {
    fn sentry_address(&self, config_file: &Path) -> Option<String> {
        Self::mtls_enabled(config_file).then(|| self.sentry_address.clone())
    }
}
