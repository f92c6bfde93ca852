//! Process runtime and OS-level adapters for daprun.
//!
//! This crate provides the concrete collaborators the core orchestrator
//! plans against, and the launcher that turns a plan into processes:
//!
//! - [`TcpPortAllocator`] - free ports from the OS
//! - [`ProcessTableRegistry`] - running sidecars from the process table
//! - [`FsComponentsLoader`] - component YAML files from a directory
//! - [`YamlMtlsInspector`] - mTLS detection in a sidecar config file
//! - [`launch`] - spawn, stream, supervise and stop the planned processes

#![deny(unsafe_code)]

pub mod launch;
pub mod ports_impl;

use std::sync::Arc;

use daprun_core::Collaborators;

pub use launch::{LaunchError, LaunchedPair, StopReason, launch_plan, supervise};
pub use ports_impl::{
    FsComponentsLoader, ProcessTableRegistry, TcpPortAllocator, YamlMtlsInspector,
    is_port_available,
};

/// Collaborators backed by the local host.
pub fn local_collaborators() -> Collaborators {
    Collaborators::new(
        Arc::new(TcpPortAllocator::new()),
        Arc::new(ProcessTableRegistry::new()),
        Arc::new(FsComponentsLoader::new()),
        Arc::new(YamlMtlsInspector::new()),
    )
}
