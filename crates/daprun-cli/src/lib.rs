//! Command-line adapter for daprun.
//!
//! Parses flags into a [`RunConfiguration`](daprun_core::RunConfiguration),
//! hands it to the core orchestrator and either prints the resulting plan
//! or launches and supervises it.

#![deny(unsafe_code)]

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

pub use bootstrap::{CliContext, bootstrap};
pub use commands::{Commands, RunArgs};
pub use error::CliError;
pub use parser::Cli;
