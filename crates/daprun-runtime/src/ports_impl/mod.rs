//! Implementations of the `daprun-core` port traits for the local host.

mod components_fs;
mod mtls_yaml;
mod process_table;
mod tcp_allocator;

pub use components_fs::FsComponentsLoader;
pub use mtls_yaml::YamlMtlsInspector;
pub use process_table::{ProcessTableRegistry, instance_from_command};
pub use tcp_allocator::{TcpPortAllocator, is_port_available};
