//! Defaults and well-known constants shared across daprun.
//!
//! These are pure values with no infrastructure dependencies. The CLI uses
//! them as flag defaults; the planner uses them when normalizing inputs.

/// Name of the sidecar binary (without platform extension).
pub const SIDECAR_BINARY: &str = "daprd";

/// Trust-authority endpoint used when mTLS is enabled locally.
pub const DEFAULT_SENTRY_ADDRESS: &str = "localhost:50001";

/// Placement port appended for a Windows sidecar.
pub const WINDOWS_PLACEMENT_PORT: u16 = 6050;

/// Placement port appended for every other sidecar platform.
pub const DEFAULT_PLACEMENT_PORT: u16 = 50005;

/// Placement host used when none is given.
pub const DEFAULT_PLACEMENT_HOST: &str = "localhost";

/// Default sidecar log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default application protocol.
pub const DEFAULT_APP_PROTOCOL: &str = "http";

/// Sentinel emitted for "no limit" on concurrency and request body size.
pub const UNLIMITED: i32 = -1;

/// Environment variable exposing the sidecar HTTP port to the application.
pub const HTTP_PORT_ENV: &str = "DAPR_HTTP_PORT";

/// Environment variable exposing the sidecar gRPC port to the application.
pub const GRPC_PORT_ENV: &str = "DAPR_GRPC_PORT";

/// Environment variable exposing the sidecar metrics port to the application.
pub const METRICS_PORT_ENV: &str = "DAPR_METRICS_PORT";

/// Overrides the `~/.dapr` home directory.
pub const HOME_OVERRIDE_ENV: &str = "DAPRUN_HOME";

/// Overrides the resolved sidecar binary path.
pub const SIDECAR_PATH_OVERRIDE_ENV: &str = "DAPRUN_DAPRD_PATH";
