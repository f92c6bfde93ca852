//! List command handler.
//!
//! Displays sidecars running on this machine in a formatted table.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use daprun_core::RunningInstance;

use crate::bootstrap::CliContext;
use crate::presentation::{format_age, format_optional, print_separator, truncate_string};

/// Execute the list command.
pub fn execute(ctx: &CliContext) -> Result<()> {
    let mut instances = ctx
        .registry()
        .list()
        .context("Failed to list running sidecars")?;

    if instances.is_empty() {
        println!("No Dapr instances found.");
        return Ok(());
    }

    instances.sort_by(|a, b| a.app_id.cmp(&b.app_id));
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs());

    println!(
        "{:<24} {:<10} {:<10} {:<10} {:<10} {:<8} {:<6} Command",
        "App ID", "HTTP", "gRPC", "App", "Metrics", "PID", "Age"
    );
    print_separator(100);

    for instance in &instances {
        println!("{}", row(instance, now));
    }

    Ok(())
}

fn row(instance: &RunningInstance, now: u64) -> String {
    let age = if instance.started_at == 0 {
        "--".to_string()
    } else {
        format_age(now.saturating_sub(instance.started_at))
    };

    format!(
        "{:<24} {:<10} {:<10} {:<10} {:<10} {:<8} {:<6} {}",
        truncate_string(&instance.app_id, 23),
        format_optional(instance.http_port, "--"),
        format_optional(instance.grpc_port, "--"),
        format_optional(instance.app_port, "--"),
        format_optional(instance.metrics_port, "--"),
        instance.pid,
        age,
        truncate_string(&instance.command.join(" "), 40),
    )
}
