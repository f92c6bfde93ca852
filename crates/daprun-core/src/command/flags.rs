//! Flag names understood by the sidecar binary.

pub const APP_ID: &str = "--app-id";
pub const HTTP_PORT: &str = "--dapr-http-port";
pub const GRPC_PORT: &str = "--dapr-grpc-port";
pub const LOG_LEVEL: &str = "--log-level";
pub const APP_MAX_CONCURRENCY: &str = "--app-max-concurrency";
pub const APP_PROTOCOL: &str = "--app-protocol";
pub const COMPONENTS_PATH: &str = "--components-path";
pub const METRICS_PORT: &str = "--metrics-port";
pub const MAX_REQUEST_SIZE: &str = "--dapr-http-max-request-size";
pub const APP_PORT: &str = "--app-port";
pub const PLACEMENT_HOST_ADDRESS: &str = "--placement-host-address";
pub const CONFIG: &str = "--config";
pub const ENABLE_MTLS: &str = "--enable-mtls";
pub const SENTRY_ADDRESS: &str = "--sentry-address";
pub const ENABLE_PROFILING: &str = "--enable-profiling";
pub const PROFILE_PORT: &str = "--profile-port";
pub const APP_SSL: &str = "--app-ssl";
