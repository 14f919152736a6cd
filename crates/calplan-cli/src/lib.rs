//! CLI, configuration, desktop notifications
//!
//! This crate provides the `calplan` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod notify;

pub use cli::Cli;
pub use config::CalplanConfig;
pub use error::{CliError, CliResult};
