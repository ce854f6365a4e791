//! Command handlers for the harvest CLI.
//!
//! Each submodule handles one CLI command or command group.
//! Dispatch lives in main.rs.

pub mod compile;
pub mod completions;
pub mod config;
pub mod decode;
pub mod status;
pub mod watch;
