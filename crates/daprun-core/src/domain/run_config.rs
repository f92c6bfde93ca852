//! Input configuration for one orchestration call.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::settings::{
    DEFAULT_APP_PROTOCOL, DEFAULT_LOG_LEVEL, DEFAULT_PLACEMENT_HOST, UNLIMITED,
};

/// Everything needed to plan a sidecar and application launch.
///
/// Unset ports are `None` and get allocated during planning. The
/// concurrency and body-size limits keep their signed sentinels: values
/// below 1 (concurrency) or below 0 (body size) mean "unlimited".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfiguration {
    /// App ID; generated when absent or empty.
    pub app_id: Option<String>,
    /// Port the application listens on.
    pub app_port: Option<u16>,
    /// Sidecar HTTP port.
    pub http_port: Option<u16>,
    /// Sidecar gRPC port.
    pub grpc_port: Option<u16>,
    /// Sidecar configuration file.
    pub config_file: Option<PathBuf>,
    /// Application protocol (`http` or `grpc`).
    pub protocol: String,
    /// Application executable followed by its arguments.
    pub arguments: Vec<String>,
    /// Whether the sidecar exposes a profiling endpoint.
    pub enable_profiling: bool,
    /// Profiling port; allocated when profiling is enabled and this is unset.
    pub profile_port: Option<u16>,
    /// Sidecar log level.
    pub log_level: String,
    /// Maximum concurrent requests forwarded to the application.
    pub max_concurrency: i32,
    /// Placement service address, `host` or `host:port`.
    pub placement_host_address: String,
    /// Directory holding component definitions.
    pub components_path: PathBuf,
    /// Whether the application serves TLS.
    pub app_ssl: bool,
    /// Sidecar metrics port.
    pub metrics_port: Option<u16>,
    /// Maximum HTTP request body size in MB.
    pub max_request_body_size: i32,
}

impl Default for RunConfiguration {
    fn default() -> Self {
        Self {
            app_id: None,
            app_port: None,
            http_port: None,
            grpc_port: None,
            config_file: None,
            protocol: DEFAULT_APP_PROTOCOL.to_string(),
            arguments: Vec::new(),
            enable_profiling: false,
            profile_port: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            max_concurrency: UNLIMITED,
            placement_host_address: DEFAULT_PLACEMENT_HOST.to_string(),
            components_path: PathBuf::new(),
            app_ssl: false,
            metrics_port: None,
            max_request_body_size: UNLIMITED,
        }
    }
}

impl RunConfiguration {
    /// Create a configuration with defaults for everything but the components path.
    pub fn new(components_path: impl Into<PathBuf>) -> Self {
        Self {
            components_path: components_path.into(),
            ..Self::default()
        }
    }

    /// The caller-supplied app ID, ignoring empty strings.
    pub fn explicit_app_id(&self) -> Option<&str> {
        self.app_id.as_deref().filter(|id| !id.is_empty())
    }

    #[must_use]
    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    #[must_use]
    pub const fn with_app_port(mut self, port: u16) -> Self {
        self.app_port = Some(port);
        self
    }

    #[must_use]
    pub const fn with_http_port(mut self, port: u16) -> Self {
        self.http_port = Some(port);
        self
    }

    #[must_use]
    pub const fn with_grpc_port(mut self, port: u16) -> Self {
        self.grpc_port = Some(port);
        self
    }

    #[must_use]
    pub const fn with_metrics_port(mut self, port: u16) -> Self {
        self.metrics_port = Some(port);
        self
    }

    #[must_use]
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    #[must_use]
    pub fn with_arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments = arguments.into_iter().map(Into::into).collect();
        self
    }

    /// Enable profiling, optionally on a fixed port.
    #[must_use]
    pub const fn with_profiling(mut self, port: Option<u16>) -> Self {
        self.enable_profiling = true;
        self.profile_port = port;
        self
    }

    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    #[must_use]
    pub const fn with_max_concurrency(mut self, max: i32) -> Self {
        self.max_concurrency = max;
        self
    }

    #[must_use]
    pub fn with_placement_host_address(mut self, address: impl Into<String>) -> Self {
        self.placement_host_address = address.into();
        self
    }

    #[must_use]
    pub const fn with_app_ssl(mut self, enabled: bool) -> Self {
        self.app_ssl = enabled;
        self
    }

    #[must_use]
    pub const fn with_max_request_body_size(mut self, size: i32) -> Self {
        self.max_request_body_size = size;
        self
    }
}
