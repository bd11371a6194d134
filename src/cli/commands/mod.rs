//! CLI command handlers for `pdash`.
//!
//! Each subcommand is implemented in its own submodule.

pub mod config;
pub mod fuel;
pub mod grade;
pub mod report;
pub mod summary;
