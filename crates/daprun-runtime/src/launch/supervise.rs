//! Waiting on a launched pair and stopping it.

use std::future::Future;
use std::process::ExitStatus;

use tokio::process::Child;
use tracing::{info, warn};

use super::error::{LaunchError, ProcessRole};
use super::shutdown::{SHUTDOWN_GRACE, shutdown_child};
use super::spawn::LaunchedPair;

/// Why supervision ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The shutdown signal fired.
    Interrupted,
    /// The sidecar exited on its own.
    SidecarExited(ExitStatus),
    /// The application exited on its own.
    AppExited(ExitStatus),
}

/// Supervise until Ctrl+C or until either process exits.
pub async fn supervise(pair: LaunchedPair) -> Result<StopReason, LaunchError> {
    supervise_until(pair, interrupt()).await
}

async fn interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

/// Supervise until `shutdown` resolves or either process exits.
///
/// Whatever is still running afterwards is stopped, application first.
pub async fn supervise_until<F>(pair: LaunchedPair, shutdown: F) -> Result<StopReason, LaunchError>
where
    F: Future<Output = ()>,
{
    let LaunchedPair {
        app_id,
        mut sidecar,
        mut app,
    } = pair;

    let outcome = {
        let app_exit = async {
            match app.as_mut() {
                Some(child) => child.wait().await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            () = shutdown => Ok(StopReason::Interrupted),
            status = sidecar.wait() => status
                .map(StopReason::SidecarExited)
                .map_err(|source| LaunchError::Wait { role: ProcessRole::Sidecar, source }),
            status = app_exit => status
                .map(StopReason::AppExited)
                .map_err(|source| LaunchError::Wait { role: ProcessRole::App, source }),
        }
    };

    match &outcome {
        Ok(StopReason::Interrupted) => info!(app_id = %app_id, "Interrupted, stopping"),
        Ok(StopReason::SidecarExited(status)) => {
            info!(app_id = %app_id, %status, "Sidecar exited");
        }
        Ok(StopReason::AppExited(status)) => info!(app_id = %app_id, %status, "App exited"),
        Err(e) => warn!(app_id = %app_id, error = %e, "Lost track of a process"),
    }

    if !matches!(outcome, Ok(StopReason::AppExited(_))) {
        if let Some(child) = app {
            stop(ProcessRole::App, child).await;
        }
    }
    if !matches!(outcome, Ok(StopReason::SidecarExited(_))) {
        stop(ProcessRole::Sidecar, sidecar).await;
    }

    outcome
}

async fn stop(role: ProcessRole, child: Child) {
    match shutdown_child(child, SHUTDOWN_GRACE).await {
        Ok(status) => info!(process = %role, %status, "Stopped"),
        Err(e) => warn!(process = %role, error = %e, "Failed to stop cleanly"),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::launch::launch_plan;
    use crate::ports_impl::TcpPortAllocator;
    use daprun_core::{CommandSpec, LaunchPlan, PortAllocator};

    fn shell(script: &str) -> CommandSpec {
        CommandSpec::new("/bin/sh", vec!["-c".to_string(), script.to_string()])
    }

    fn plan(sidecar: &str, app: Option<&str>) -> LaunchPlan {
        let ports = TcpPortAllocator::new();
        LaunchPlan {
            app_id: "test-app".to_string(),
            http_port: ports.allocate().unwrap(),
            grpc_port: ports.allocate().unwrap(),
            metrics_port: ports.allocate().unwrap(),
            profile_port: None,
            sidecar: shell(sidecar),
            app: app.map(shell),
        }
    }

    #[tokio::test]
    async fn sidecar_exit_stops_app() {
        let pair = launch_plan(&plan("exit 3", Some("sleep 30"))).unwrap();

        let reason = supervise_until(pair, std::future::pending()).await.unwrap();
        match reason {
            StopReason::SidecarExited(status) => assert_eq!(status.code(), Some(3)),
            other => panic!("unexpected stop reason: {other:?}"),
        }
    }

    #[tokio::test]
    async fn app_exit_stops_sidecar() {
        let pair = launch_plan(&plan("sleep 30", Some("exit 0"))).unwrap();

        let reason = supervise_until(pair, std::future::pending()).await.unwrap();
        assert!(matches!(reason, StopReason::AppExited(status) if status.success()));
    }

    #[tokio::test]
    async fn shutdown_signal_stops_both() {
        let pair = launch_plan(&plan("sleep 30", Some("sleep 30"))).unwrap();

        let reason = supervise_until(pair, async {}).await.unwrap();
        assert_eq!(reason, StopReason::Interrupted);
    }

    #[tokio::test]
    async fn sidecar_alone_is_supervised() {
        let pair = launch_plan(&plan("sleep 1", None)).unwrap();
        assert!(pair.sidecar_pid().is_some());
        assert!(pair.app_pid().is_none());

        let reason = supervise_until(pair, std::future::pending()).await.unwrap();
        assert!(matches!(reason, StopReason::SidecarExited(_)));
    }

    #[tokio::test]
    async fn failed_app_start_is_reported() {
        let mut launch = plan("sleep 30", None);
        launch.app = Some(CommandSpec::new("/nonexistent/daprun-test-app", vec![]));

        let err = launch_plan(&launch).unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { role: ProcessRole::App, .. }));
    }
}
