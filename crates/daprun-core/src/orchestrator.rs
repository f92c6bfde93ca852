//! Launch planning for a sidecar and its application.
//!
//! The orchestrator runs one sequential pass per call:
//!
//! `Validating → CheckingConflicts → Planning → Ready`
//!
//! Any failure aborts the pass and is returned as a [`RunError`] that knows
//! its phase. Nothing is spawned here; the caller owns the processes built
//! from the returned [`LaunchPlan`].

use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::command::{AppCommandBuilder, SidecarCommandBuilder};
use crate::conflicts::{check_app_id, check_ports};
use crate::domain::{LaunchPlan, RunConfiguration, RunPhase, SidecarOs, generate_app_id};
use crate::error::RunError;
use crate::ports::Collaborators;

/// Plans sidecar and application launches against injected collaborators.
///
/// Holds no state between calls; every [`plan`](Self::plan) re-reads the
/// running-instance snapshot.
pub struct Orchestrator {
    sidecar_path: PathBuf,
    os: SidecarOs,
    collaborators: Collaborators,
    app_id_source: fn() -> String,
    app_base_env: Option<Vec<(String, String)>>,
}

impl Orchestrator {
    /// Create an orchestrator launching the sidecar binary at `sidecar_path`.
    pub fn new(sidecar_path: impl Into<PathBuf>, collaborators: Collaborators) -> Self {
        Self {
            sidecar_path: sidecar_path.into(),
            os: SidecarOs::current(),
            collaborators,
            app_id_source: generate_app_id,
            app_base_env: None,
        }
    }

    /// Override the sidecar platform designation.
    #[must_use]
    pub const fn with_os(mut self, os: SidecarOs) -> Self {
        self.os = os;
        self
    }

    /// Override how app IDs are generated when the caller supplies none.
    #[must_use]
    pub fn with_app_id_source(mut self, source: fn() -> String) -> Self {
        self.app_id_source = source;
        self
    }

    /// Use `env` instead of the current process environment for the app.
    #[must_use]
    pub fn with_app_base_env(mut self, env: Vec<(String, String)>) -> Self {
        self.app_base_env = Some(env);
        self
    }

    /// Path of the sidecar binary used in planned commands.
    pub fn sidecar_path(&self) -> &std::path::Path {
        &self.sidecar_path
    }

    /// Produce a launch plan for `config`, or fail without side effects.
    pub fn plan(&self, config: &RunConfiguration) -> Result<LaunchPlan, RunError> {
        match self.run_phases(config) {
            Ok(plan) => {
                info!(
                    phase = %RunPhase::Ready,
                    app_id = %plan.app_id,
                    http_port = plan.http_port,
                    grpc_port = plan.grpc_port,
                    metrics_port = plan.metrics_port,
                    "Launch plan ready"
                );
                Ok(plan)
            }
            Err(err) => {
                warn!(phase = %err.phase(), error = %err, "Launch planning failed");
                Err(err)
            }
        }
    }

    fn run_phases(&self, config: &RunConfiguration) -> Result<LaunchPlan, RunError> {
        let app_id = config
            .explicit_app_id()
            .map_or_else(self.app_id_source, ToString::to_string);

        debug!(phase = %RunPhase::Validating, %app_id, "Validating run configuration");
        if std::fs::metadata(&config.components_path).is_err() {
            return Err(RunError::ComponentsPathNotFound {
                path: config.components_path.clone(),
            });
        }

        let running = self.collaborators.registry.list()?;

        let components = self
            .collaborators
            .components
            .load(&config.components_path)
            .map_err(|e| RunError::ComponentsLoad {
                path: config.components_path.clone(),
                reason: e.to_string(),
            })?;
        debug!(
            components = components.len(),
            path = %config.components_path.display(),
            "Components loaded"
        );

        debug!(
            phase = %RunPhase::CheckingConflicts,
            running = running.len(),
            "Checking for a running instance with the same app ID"
        );
        check_app_id(&app_id, &running)?;

        debug!(phase = %RunPhase::Planning, %app_id, "Building sidecar command");
        let sidecar = SidecarCommandBuilder::new(
            &self.sidecar_path,
            self.collaborators.ports.as_ref(),
            self.collaborators.mtls.as_ref(),
        )
        .os(self.os)
        .build(&app_id, config)?;

        check_ports(sidecar.http_port, sidecar.grpc_port, &running)?;

        let app = config.arguments.split_first().map(|(executable, args)| {
            let builder =
                AppCommandBuilder::new(sidecar.http_port, sidecar.grpc_port, sidecar.metrics_port);
            let builder = match &self.app_base_env {
                Some(env) => builder.base_env(env.iter().cloned()),
                None => builder,
            };
            builder.build(executable, args)
        });

        Ok(LaunchPlan {
            app_id,
            http_port: sidecar.http_port,
            grpc_port: sidecar.grpc_port,
            metrics_port: sidecar.metrics_port,
            profile_port: sidecar.profile_port,
            sidecar: sidecar.command,
            app,
        })
    }
}
