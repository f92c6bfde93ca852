//! Port allocation backed by the operating system.

use std::net::TcpListener;
use std::time::Duration;

use daprun_core::{PortAllocator, PortError};
use tracing::debug;

const ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_millis(100);

/// Check if a port is available by attempting to bind to it.
/// This method binds and immediately drops the listener, which releases the port.
pub fn is_port_available(port: u16) -> bool {
    TcpListener::bind(("127.0.0.1", port)).is_ok_and(|listener| listener.local_addr().is_ok())
}

/// Hands out ephemeral ports chosen by the OS.
///
/// Each call binds `127.0.0.1:0`, reads back the assigned port and releases
/// the listener. Another process may grab the port before the sidecar binds
/// it; nothing here reserves it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpPortAllocator;

impl TcpPortAllocator {
    pub const fn new() -> Self {
        Self
    }
}

impl PortAllocator for TcpPortAllocator {
    fn allocate(&self) -> Result<u16, PortError> {
        let mut last_error = String::from("no attempt made");

        for attempt in 1..=ATTEMPTS {
            match TcpListener::bind(("127.0.0.1", 0)).and_then(|l| l.local_addr()) {
                Ok(addr) => {
                    debug!(port = %addr.port(), attempt = %attempt, "Allocated available port");
                    return Ok(addr.port());
                }
                Err(e) => {
                    debug!(attempt = %attempt, error = %e, "Port allocation failed, retrying");
                    last_error = e.to_string();
                }
            }

            if attempt < ATTEMPTS {
                std::thread::sleep(RETRY_DELAY);
            }
        }

        Err(PortError::Exhausted(format!(
            "{last_error} after {ATTEMPTS} attempts"
        )))
    }
}
