//! Launch plan output types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A ready-to-spawn command described as plain data.
///
/// Adapters turn this into an OS process; the planner never spawns anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Executable to run.
    pub program: PathBuf,
    /// Arguments, in order.
    pub args: Vec<String>,
    /// Complete environment for the process.
    ///
    /// `None` means the process inherits the parent environment unchanged.
    pub env: Option<Vec<(String, String)>>,
}

impl CommandSpec {
    /// Create a command that inherits the parent environment.
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            env: None,
        }
    }

    /// Replace the environment with an explicit set of variables.
    #[must_use]
    pub fn with_env(mut self, env: Vec<(String, String)>) -> Self {
        self.env = Some(env);
        self
    }

    /// Whether `flag` appears anywhere in the arguments.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.args.iter().any(|arg| arg == flag)
    }

    /// The argument following the first occurrence of `flag`.
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|arg| arg == flag)
            .and_then(|idx| self.args.get(idx + 1))
            .map(String::as_str)
    }

    /// Value of an explicitly set environment variable.
    pub fn env_var(&self, key: &str) -> Option<&str> {
        self.env
            .as_ref()?
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Render the command as a single shell-like line for display.
    pub fn display_line(&self) -> String {
        let program = self.program.to_string_lossy();
        if self.args.is_empty() {
            program.into_owned()
        } else {
            format!("{} {}", program, self.args.join(" "))
        }
    }
}

/// Fully resolved description of a sidecar and its application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchPlan {
    /// Resolved app ID (never empty).
    pub app_id: String,
    /// Resolved sidecar HTTP port.
    pub http_port: u16,
    /// Resolved sidecar gRPC port.
    pub grpc_port: u16,
    /// Resolved sidecar metrics port.
    pub metrics_port: u16,
    /// Resolved profiling port, when profiling is enabled.
    pub profile_port: Option<u16>,
    /// Sidecar command.
    pub sidecar: CommandSpec,
    /// Application command, if launch arguments were supplied.
    pub app: Option<CommandSpec>,
}
