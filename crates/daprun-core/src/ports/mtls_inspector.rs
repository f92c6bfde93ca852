//! mTLS detection for sidecar configuration files.

use std::path::Path;

/// Answers whether a config file enables mTLS.
///
/// Returns the trust-authority (sentry) address when mTLS is enabled and
/// `None` otherwise. Unreadable or malformed files count as disabled.
#[cfg_attr(test, mockall::automock)]
pub trait MtlsInspector: Send + Sync {
    fn sentry_address(&self, config_file: &Path) -> Option<String>;
}

/// Inspector that never reports mTLS.
#[derive(Debug, Clone, Copy, Default)]
pub struct MtlsDisabled;

impl MtlsInspector for MtlsDisabled {
    fn sentry_address(&self, _config_file: &Path) -> Option<String> {
        None
    }
}
