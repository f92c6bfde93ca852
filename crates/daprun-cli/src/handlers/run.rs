//! Run command handler.
//!
//! Plans the sidecar and application launch, then either prints the plan
//! or starts both processes and supervises them until one exits or the
//! user interrupts.

use std::path::Path;

use anyhow::Result;
use daprun_core::settings::{GRPC_PORT_ENV, HTTP_PORT_ENV, METRICS_PORT_ENV};
use daprun_core::{LaunchPlan, RunConfiguration};
use daprun_runtime::{StopReason, launch_plan, supervise};

use crate::bootstrap::CliContext;
use crate::commands::RunArgs;
use crate::error::CliError;

/// Execute the run command.
pub async fn execute(ctx: &CliContext, args: RunArgs) -> Result<()> {
    let dry_run = args.dry_run;
    let config = configuration(
        args,
        ctx.default_components_path(),
        ctx.default_config_file(),
    );

    let plan = ctx.orchestrator().plan(&config).map_err(CliError::from)?;

    if dry_run {
        let json = serde_json::to_string_pretty(&without_inherited_env(plan))
            .map_err(|e| CliError::Io(e.to_string()))?;
        println!("{json}");
        return Ok(());
    }

    print_banner(&plan);
    let pair = launch_plan(&plan).map_err(CliError::from)?;
    println!("{}", started_line(pair.sidecar_pid(), pair.app_pid()));
    println!("You're up and running! Both Dapr and your app logs will appear here.");

    match supervise(pair).await.map_err(CliError::from)? {
        StopReason::Interrupted => println!("Terminated signal received: shutting down"),
        StopReason::SidecarExited(status) => println!("The Dapr sidecar exited ({status})"),
        StopReason::AppExited(status) => println!("The app exited ({status})"),
    }
    println!("Exited Dapr successfully");
    Ok(())
}

/// Turn parsed flags into a planning input, filling path defaults.
fn configuration(
    args: RunArgs,
    default_components: &Path,
    default_config: Option<&Path>,
) -> RunConfiguration {
    RunConfiguration {
        app_id: args.app_id,
        app_port: args.app_port,
        http_port: args.http_port,
        grpc_port: args.grpc_port,
        config_file: args.config.or_else(|| default_config.map(Path::to_path_buf)),
        protocol: args.app_protocol,
        arguments: args.command,
        enable_profiling: args.enable_profiling,
        profile_port: args.profile_port,
        log_level: args.log_level,
        max_concurrency: args.max_concurrency,
        placement_host_address: args.placement_host_address,
        components_path: args
            .components_path
            .unwrap_or_else(|| default_components.to_path_buf()),
        app_ssl: args.app_ssl,
        metrics_port: args.metrics_port,
        max_request_body_size: args.max_request_size,
    }
}

/// Drop inherited variables from the app environment, keeping the port
/// variables daprun sets. The parent shell may hold secrets.
fn without_inherited_env(mut plan: LaunchPlan) -> LaunchPlan {
    if let Some(env) = plan.app.as_mut().and_then(|app| app.env.as_mut()) {
        let port_vars = [HTTP_PORT_ENV, GRPC_PORT_ENV, METRICS_PORT_ENV];
        env.retain(|(key, _)| port_vars.contains(&key.as_str()));
    }
    plan
}

fn print_banner(plan: &LaunchPlan) {
    println!(
        "Starting Dapr with id {}. HTTP Port: {}. gRPC Port: {}",
        plan.app_id, plan.http_port, plan.grpc_port
    );
    if let Some(app) = &plan.app {
        println!("Starting app: {}", app.display_line());
    }
}

fn started_line(sidecar_pid: Option<u32>, app_pid: Option<u32>) -> String {
    let pid = |pid: Option<u32>| pid.map_or_else(|| "exited".to_string(), |p| p.to_string());
    match app_pid {
        Some(_) => format!(
            "Sidecar PID: {}. App PID: {}",
            pid(sidecar_pid),
            pid(app_pid)
        ),
        None => format!("Sidecar PID: {}", pid(sidecar_pid)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Commands;
    use crate::parser::Cli;
    use clap::Parser;
    use daprun_core::CommandSpec;
    use std::path::PathBuf;

    fn parse(args: &[&str]) -> RunArgs {
        let argv = ["daprun", "run"].into_iter().chain(args.iter().copied());
        match Cli::parse_from(argv).command {
            Commands::Run(args) => args,
            Commands::List => panic!("expected run"),
        }
    }

    #[test]
    fn path_defaults_fill_in_when_flags_are_absent() {
        let config = configuration(
            parse(&[]),
            Path::new("/home/dev/.dapr/components"),
            Some(Path::new("/home/dev/.dapr/config.yaml")),
        );

        assert_eq!(config.components_path, PathBuf::from("/home/dev/.dapr/components"));
        assert_eq!(
            config.config_file,
            Some(PathBuf::from("/home/dev/.dapr/config.yaml"))
        );
        assert_eq!(config.app_id, None);
        assert!(config.arguments.is_empty());
    }

    #[test]
    fn explicit_flags_win_over_defaults() {
        let config = configuration(
            parse(&[
                "--components-path",
                "/srv/components",
                "--config",
                "/srv/config.yaml",
                "--app-id",
                "orders",
                "--app-ssl",
                "--",
                "node",
                "app.js",
            ]),
            Path::new("/home/dev/.dapr/components"),
            None,
        );

        assert_eq!(config.components_path, PathBuf::from("/srv/components"));
        assert_eq!(config.config_file, Some(PathBuf::from("/srv/config.yaml")));
        assert_eq!(config.explicit_app_id(), Some("orders"));
        assert!(config.app_ssl);
        assert_eq!(config.arguments, ["node", "app.js"]);
    }

    #[test]
    fn dry_run_plan_hides_inherited_env() {
        let app = CommandSpec::new("node", vec!["app.js".to_string()]).with_env(vec![
            ("AWS_SECRET_ACCESS_KEY".to_string(), "hunter2".to_string()),
            ("DAPR_HTTP_PORT".to_string(), "3500".to_string()),
            ("DAPR_GRPC_PORT".to_string(), "50001".to_string()),
            ("DAPR_METRICS_PORT".to_string(), "9090".to_string()),
        ]);
        let plan = LaunchPlan {
            app_id: "orders".to_string(),
            http_port: 3500,
            grpc_port: 50001,
            metrics_port: 9090,
            profile_port: None,
            sidecar: CommandSpec::new("daprd", vec![]),
            app: Some(app),
        };

        let shown = without_inherited_env(plan);
        let json = serde_json::to_string(&shown).unwrap();

        assert!(!json.contains("hunter2"));
        assert!(!json.contains("AWS_SECRET_ACCESS_KEY"));
        let app = shown.app.unwrap();
        assert_eq!(app.env_var("DAPR_HTTP_PORT"), Some("3500"));
        assert_eq!(app.env_var("DAPR_GRPC_PORT"), Some("50001"));
        assert_eq!(app.env_var("DAPR_METRICS_PORT"), Some("9090"));
        assert_eq!(app.env.map(|env| env.len()), Some(3));
    }

    #[test]
    fn started_line_reports_process_ids() {
        assert_eq!(
            started_line(Some(4242), Some(4243)),
            "Sidecar PID: 4242. App PID: 4243"
        );
        assert_eq!(started_line(Some(4242), None), "Sidecar PID: 4242");
        assert_eq!(started_line(None, None), "Sidecar PID: exited");
    }

    #[test]
    fn missing_default_config_leaves_it_unset() {
        let config = configuration(parse(&[]), Path::new("/c"), None);
        assert_eq!(config.config_file, None);
    }
}
