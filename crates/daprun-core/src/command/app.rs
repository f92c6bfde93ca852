//! Application command builder.

use tracing::warn;

use crate::domain::CommandSpec;
use crate::settings::{GRPC_PORT_ENV, HTTP_PORT_ENV, METRICS_PORT_ENV};

/// Builds the application command with the sidecar ports exposed as
/// `DAPR_HTTP_PORT`, `DAPR_GRPC_PORT` and `DAPR_METRICS_PORT`.
///
/// The environment is the base environment (the current process environment
/// unless overridden) plus the three port variables, which replace any
/// inherited values of the same name.
#[derive(Debug, Clone)]
pub struct AppCommandBuilder {
    http_port: u16,
    grpc_port: u16,
    metrics_port: u16,
    base_env: Option<Vec<(String, String)>>,
}

impl AppCommandBuilder {
    pub const fn new(http_port: u16, grpc_port: u16, metrics_port: u16) -> Self {
        Self {
            http_port,
            grpc_port,
            metrics_port,
            base_env: None,
        }
    }

    /// Use `env` instead of the current process environment as the base.
    #[must_use]
    pub fn base_env<I, K, V>(mut self, env: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.base_env = Some(
            env.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Build the command for `executable` with `args`.
    pub fn build(self, executable: &str, args: &[String]) -> CommandSpec {
        let ports = [
            (HTTP_PORT_ENV, self.http_port),
            (GRPC_PORT_ENV, self.grpc_port),
            (METRICS_PORT_ENV, self.metrics_port),
        ];

        let mut env: Vec<(String, String)> = self
            .base_env
            .unwrap_or_else(current_env)
            .into_iter()
            .filter(|(key, _)| !ports.iter().any(|(name, _)| key == name))
            .collect();
        env.extend(
            ports
                .iter()
                .map(|(name, port)| ((*name).to_string(), port.to_string())),
        );

        CommandSpec::new(executable, args.to_vec()).with_env(env)
    }
}

/// Current process environment, skipping entries that are not valid UTF-8.
fn current_env() -> Vec<(String, String)> {
    std::env::vars_os()
        .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => Some((key, value)),
            (Ok(key), Err(_)) => {
                warn!(%key, "Skipping non UTF-8 environment value");
                None
            }
            (Err(key), _) => {
                warn!(key = %key.to_string_lossy(), "Skipping non UTF-8 environment variable");
                None
            }
        })
        .collect()
}
