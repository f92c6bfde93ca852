//! Conflict checks against a running-instance snapshot.
//!
//! Both checks run against the same snapshot taken once per orchestration
//! call. Another instance starting in between is not detected; conflicts are
//! best-effort and checked once. Metrics ports are not checked.

use crate::domain::{PortKind, RunningInstance};
use crate::error::RunError;

/// Fail if a running instance already uses `app_id`.
pub fn check_app_id(app_id: &str, running: &[RunningInstance]) -> Result<(), RunError> {
    if running.iter().any(|instance| instance.app_id == app_id) {
        return Err(RunError::DuplicateIdentifier(app_id.to_string()));
    }
    Ok(())
}

/// Fail if a running instance uses the resolved HTTP or gRPC port.
///
/// Each instance is checked for an HTTP match before a gRPC match.
pub fn check_ports(
    http_port: u16,
    grpc_port: u16,
    running: &[RunningInstance],
) -> Result<(), RunError> {
    for instance in running {
        let conflict = if instance.http_port == Some(http_port) {
            Some((PortKind::Http, http_port))
        } else if instance.grpc_port == Some(grpc_port) {
            Some((PortKind::Grpc, grpc_port))
        } else {
            None
        };

        if let Some((kind, port)) = conflict {
            return Err(RunError::PortConflict {
                kind,
                port,
                app_id: instance.app_id.clone(),
            });
        }
    }
    Ok(())
}
