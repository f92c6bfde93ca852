//! Subcommands and their flags.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use daprun_core::settings::{
    DEFAULT_APP_PROTOCOL, DEFAULT_LOG_LEVEL, DEFAULT_PLACEMENT_HOST, UNLIMITED,
};

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a Dapr sidecar and, optionally, an application next to it
    Run(RunArgs),

    /// List Dapr sidecars running on this machine
    List,
}

/// Flags for `daprun run`.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Identifier for the application; generated when omitted
    #[arg(long = "app-id", short = 'a')]
    pub app_id: Option<String>,

    /// Port the application listens on
    #[arg(long = "app-port", short = 'p')]
    pub app_port: Option<u16>,

    /// HTTP port for the sidecar to listen on; allocated when omitted
    #[arg(long = "dapr-http-port", short = 'H')]
    pub http_port: Option<u16>,

    /// gRPC port for the sidecar to listen on; allocated when omitted
    #[arg(long = "dapr-grpc-port", short = 'G')]
    pub grpc_port: Option<u16>,

    /// Port the sidecar serves metrics on; allocated when omitted
    #[arg(long = "metrics-port", short = 'M')]
    pub metrics_port: Option<u16>,

    /// Sidecar configuration file; defaults to `~/.dapr/config.yaml` when that exists
    #[arg(long = "config", short = 'c')]
    pub config: Option<PathBuf>,

    /// Protocol the application speaks: http or grpc
    #[arg(long = "app-protocol", short = 'P', default_value = DEFAULT_APP_PROTOCOL)]
    pub app_protocol: String,

    /// Expose the sidecar profiling endpoint
    #[arg(long = "enable-profiling")]
    pub enable_profiling: bool,

    /// Profiling port; allocated when profiling is enabled and this is omitted
    #[arg(long = "profile-port", requires = "enable_profiling")]
    pub profile_port: Option<u16>,

    /// Sidecar log level: debug, info, warn, error, fatal or panic
    #[arg(long = "log-level", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Concurrency limit for the application; -1 for no limit
    #[arg(long = "app-max-concurrency", default_value_t = UNLIMITED, allow_negative_numbers = true)]
    pub max_concurrency: i32,

    /// Address of the placement service, `host` or `host:port`
    #[arg(long = "placement-host-address", default_value = DEFAULT_PLACEMENT_HOST)]
    pub placement_host_address: String,

    /// Directory holding component definitions; defaults to `~/.dapr/components`
    #[arg(long = "components-path", short = 'd', env = "DAPRUN_COMPONENTS_PATH")]
    pub components_path: Option<PathBuf>,

    /// The application serves TLS
    #[arg(long = "app-ssl")]
    pub app_ssl: bool,

    /// Maximum HTTP request body size in MB; -1 for the sidecar default
    #[arg(
        long = "dapr-http-max-request-size",
        default_value_t = UNLIMITED,
        allow_negative_numbers = true
    )]
    pub max_request_size: i32,

    /// Print the launch plan as JSON instead of starting anything; the app's
    /// inherited environment is left out
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Application executable and its arguments, after `--`
    #[arg(last = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}
