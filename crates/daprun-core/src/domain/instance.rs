//! Snapshot records of sidecars already running on this host.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which sidecar port a conflict refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortKind {
    Http,
    Grpc,
}

impl fmt::Display for PortKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => f.write_str("http"),
            Self::Grpc => f.write_str("gRPC"),
        }
    }
}

/// A sidecar found running at the moment the registry was queried.
///
/// This is a read-only snapshot; it is not kept in sync afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningInstance {
    /// App ID the sidecar was started with.
    pub app_id: String,
    /// Sidecar HTTP port, if visible on its command line.
    pub http_port: Option<u16>,
    /// Sidecar gRPC port, if visible on its command line.
    pub grpc_port: Option<u16>,
    /// Application port the sidecar forwards to.
    pub app_port: Option<u16>,
    /// Sidecar metrics port.
    pub metrics_port: Option<u16>,
    /// Process ID of the sidecar.
    pub pid: u32,
    /// Unix timestamp (seconds) when the sidecar was started.
    pub started_at: u64,
    /// Full command line of the sidecar.
    pub command: Vec<String>,
}

impl RunningInstance {
    /// Create a snapshot record with only the required fields.
    pub fn new(app_id: impl Into<String>, pid: u32) -> Self {
        Self {
            app_id: app_id.into(),
            http_port: None,
            grpc_port: None,
            app_port: None,
            metrics_port: None,
            pid,
            started_at: 0,
            command: Vec::new(),
        }
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
    pub const fn with_app_port(mut self, port: u16) -> Self {
        self.app_port = Some(port);
        self
    }

    #[must_use]
    pub const fn with_metrics_port(mut self, port: u16) -> Self {
        self.metrics_port = Some(port);
        self
    }

    #[must_use]
    pub const fn with_started_at(mut self, started_at: u64) -> Self {
        self.started_at = started_at;
        self
    }

    #[must_use]
    pub fn with_command(mut self, command: Vec<String>) -> Self {
        self.command = command;
        self
    }
}
