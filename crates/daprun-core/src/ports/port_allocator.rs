//! Free TCP port allocation.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use crate::error::PortError;

/// Source of currently-unused local TCP ports.
///
/// Each call is independent. Uniqueness between calls relies on the
/// underlying allocator only; the port may be taken by another process
/// before it is used.
#[cfg_attr(test, mockall::automock)]
pub trait PortAllocator: Send + Sync {
    /// Return a free port or fail with [`PortError::Exhausted`].
    fn allocate(&self) -> Result<u16, PortError>;
}

/// Deterministic allocator handing out ports from a fixed pool, in order.
#[derive(Debug, Default)]
pub struct FixedPortAllocator {
    pool: Mutex<VecDeque<u16>>,
}

impl FixedPortAllocator {
    pub fn new(ports: impl IntoIterator<Item = u16>) -> Self {
        Self {
            pool: Mutex::new(ports.into_iter().collect()),
        }
    }

    /// Number of ports not yet handed out.
    pub fn remaining(&self) -> usize {
        self.pool
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl PortAllocator for FixedPortAllocator {
    fn allocate(&self) -> Result<u16, PortError> {
        self.pool
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .ok_or_else(|| PortError::Exhausted("fixed port pool is empty".to_string()))
    }
}
