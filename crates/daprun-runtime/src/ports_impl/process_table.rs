//! Running-sidecar discovery from the host process table.

use std::ffi::OsStr;
use std::path::Path;

use daprun_core::command::flags;
use daprun_core::settings::SIDECAR_BINARY;
use daprun_core::{InstanceRegistry, RegistryError, RunningInstance};
use sysinfo::{Process, ProcessRefreshKind, RefreshKind, System, UpdateKind};
use tracing::debug;

/// Lists sidecars by scanning processes named after the sidecar binary.
///
/// Ports are read back from each sidecar's command line. A sidecar started
/// without `--app-id` is not an instance we can conflict with and is skipped.
/// On Linux the table also lists every thread; those entries are dropped so
/// each sidecar is reported once under its process ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessTableRegistry;

impl ProcessTableRegistry {
    pub const fn new() -> Self {
        Self
    }
}

impl InstanceRegistry for ProcessTableRegistry {
    fn list(&self) -> Result<Vec<RunningInstance>, RegistryError> {
        let system = System::new_with_specifics(RefreshKind::nothing().with_processes(
            ProcessRefreshKind::nothing().with_cmd(UpdateKind::OnlyIfNotSet),
        ));

        let processes: Vec<_> = system
            .processes()
            .iter()
            .filter(|(_, process)| !is_thread(process))
            .collect();

        if processes.is_empty() {
            return Err(RegistryError::Unavailable(
                "process table is empty or unreadable".to_string(),
            ));
        }

        let mut instances: Vec<RunningInstance> = processes
            .into_iter()
            .filter(|(_, process)| is_sidecar_name(process.name()))
            .filter_map(|(pid, process)| {
                let command: Vec<String> = process
                    .cmd()
                    .iter()
                    .map(|arg| arg.to_string_lossy().into_owned())
                    .collect();
                instance_from_command(pid.as_u32(), process.start_time(), command)
            })
            .collect();

        instances.sort_by_key(|instance| instance.pid);
        debug!(count = instances.len(), "Discovered running sidecars");
        Ok(instances)
    }
}

fn is_thread(process: &Process) -> bool {
    process.thread_kind().is_some()
}

fn is_sidecar_name(name: &OsStr) -> bool {
    Path::new(name)
        .file_stem()
        .is_some_and(|stem| stem == SIDECAR_BINARY)
}

/// Build an instance record from a sidecar command line.
///
/// Returns `None` when the command line carries no app ID.
pub fn instance_from_command(
    pid: u32,
    started_at: u64,
    command: Vec<String>,
) -> Option<RunningInstance> {
    let args = command.get(1..).unwrap_or_default();
    let app_id = flag_value(args, flags::APP_ID).filter(|id| !id.is_empty())?;

    let mut instance = RunningInstance::new(app_id, pid).with_started_at(started_at);
    if let Some(port) = port_flag(args, flags::HTTP_PORT) {
        instance = instance.with_http_port(port);
    }
    if let Some(port) = port_flag(args, flags::GRPC_PORT) {
        instance = instance.with_grpc_port(port);
    }
    if let Some(port) = port_flag(args, flags::APP_PORT) {
        instance = instance.with_app_port(port);
    }
    if let Some(port) = port_flag(args, flags::METRICS_PORT) {
        instance = instance.with_metrics_port(port);
    }

    Some(instance.with_command(command))
}

fn port_flag(args: &[String], flag: &str) -> Option<u16> {
    flag_value(args, flag).and_then(|value| value.parse().ok())
}

/// Value of `flag`, accepting both `--flag value` and `--flag=value`.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == flag {
            return iter.next().map(String::as_str);
        }
        if let Some(value) = arg
            .strip_prefix(flag)
            .and_then(|rest| rest.strip_prefix('='))
        {
            return Some(value);
        }
    }
    None
}
