//! Stopping one launched process.
//!
//! [`supervise`](super::supervise) stops the application before the sidecar,
//! so the app never runs without its sidecar. Each process gets the same
//! treatment: a polite request, a grace period, then a hard kill.

use std::io;
use std::process::ExitStatus;
use std::time::Duration;

use tokio::process::Child;
use tracing::debug;

#[cfg(unix)]
use nix::errno::Errno;
#[cfg(unix)]
use nix::sys::signal::{self, Signal};
#[cfg(unix)]
use nix::unistd::Pid;

/// How long a process gets to exit on its own before it is killed.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Stop `child` and reap it, allowing it `grace` to exit after SIGTERM.
///
/// A child that was already reaped reports its recorded status. On Windows
/// there is no polite request, so the child is killed straight away.
pub async fn shutdown_child(mut child: Child, grace: Duration) -> io::Result<ExitStatus> {
    let Some(pid) = child.id() else {
        return child.wait().await;
    };

    if request_exit(pid)? {
        if let Ok(status) = tokio::time::timeout(grace, child.wait()).await {
            return status;
        }
        debug!(pid, grace_ms = grace.as_millis(), "Still running after grace period, killing");
    }

    child.kill().await?;
    child.wait().await
}

/// Ask `pid` to exit. Returns `false` when no request could be delivered and
/// the caller should kill outright.
#[cfg(unix)]
fn request_exit(pid: u32) -> io::Result<bool> {
    let pid = Pid::from_raw(i32::try_from(pid).map_err(io::Error::other)?);
    match signal::kill(pid, Signal::SIGTERM) {
        // Exited between the id check and the signal; wait() still reaps it.
        Ok(()) | Err(Errno::ESRCH) => Ok(true),
        Err(e) => Err(io::Error::other(e)),
    }
}

#[cfg(not(unix))]
fn request_exit(_pid: u32) -> io::Result<bool> {
    Ok(false)
}
