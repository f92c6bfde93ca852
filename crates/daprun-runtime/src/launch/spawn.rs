//! Process spawning and log streaming.

use std::process::Stdio;

use daprun_core::{CommandSpec, LaunchPlan};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tracing::{info, warn};

use super::error::{LaunchError, ProcessRole};
use crate::ports_impl::is_port_available;

/// The processes started for one plan.
#[derive(Debug)]
pub struct LaunchedPair {
    pub app_id: String,
    pub sidecar: Child,
    pub app: Option<Child>,
}

impl LaunchedPair {
    pub fn sidecar_pid(&self) -> Option<u32> {
        self.sidecar.id()
    }

    pub fn app_pid(&self) -> Option<u32> {
        self.app.as_ref().and_then(Child::id)
    }
}

/// Build a tokio command from a planned command.
///
/// An explicit environment replaces the inherited one entirely. Output is
/// piped so it can be streamed; the child is killed if its handle is dropped.
pub fn command_from_spec(spec: &CommandSpec) -> Command {
    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args);

    if let Some(env) = &spec.env {
        cmd.env_clear();
        cmd.envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }

    cmd.stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    cmd
}

/// Fail if any port of the plan has been taken since planning.
pub fn verify_ports_free(plan: &LaunchPlan) -> Result<(), LaunchError> {
    let ports = [plan.http_port, plan.grpc_port, plan.metrics_port]
        .into_iter()
        .chain(plan.profile_port);

    for port in ports {
        if !is_port_available(port) {
            return Err(LaunchError::PortTaken { port });
        }
    }
    Ok(())
}

/// Start the sidecar, then the application.
///
/// Must be called from within a tokio runtime. If the application fails to
/// start, the sidecar is killed before the error is returned.
pub fn launch_plan(plan: &LaunchPlan) -> Result<LaunchedPair, LaunchError> {
    verify_ports_free(plan)?;

    let mut sidecar = spawn(ProcessRole::Sidecar, &plan.sidecar)?;

    let app = match &plan.app {
        Some(spec) => match spawn(ProcessRole::App, spec) {
            Ok(child) => Some(child),
            Err(e) => {
                if let Err(kill_err) = sidecar.start_kill() {
                    warn!(error = %kill_err, "Failed to stop sidecar after app start failure");
                }
                return Err(e);
            }
        },
        None => None,
    };

    Ok(LaunchedPair {
        app_id: plan.app_id.clone(),
        sidecar,
        app,
    })
}

fn spawn(role: ProcessRole, spec: &CommandSpec) -> Result<Child, LaunchError> {
    let mut child = command_from_spec(spec)
        .spawn()
        .map_err(|source| LaunchError::Spawn {
            role,
            program: spec.program.clone(),
            source,
        })?;

    info!(process = %role, pid = ?child.id(), "Started {}", spec.display_line());
    spawn_log_readers(&mut child, role);
    Ok(child)
}

/// Spawn background tasks to stream stdout/stderr lines into tracing.
///
/// The tasks exit when the streams close.
fn spawn_log_readers(child: &mut Child, role: ProcessRole) {
    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(text)) = lines.next_line().await {
                info!(process = %role, "{}", text);
            }
        });
    }

    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(text)) = lines.next_line().await {
                warn!(process = %role, "{}", text);
            }
        });
    }
}
