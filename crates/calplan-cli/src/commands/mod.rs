//! Subcommand implementations.
//!
//! Commands return the text to print so they can be tested without a terminal.

pub mod calendar;
pub mod config;
pub mod events;
pub mod watch;
