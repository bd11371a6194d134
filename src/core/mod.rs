//! Core module: the grade and attendance engine plus its supporting models

pub mod attendance;
pub mod config;
pub mod csv;
pub mod fuel;
pub mod gradebook;
pub mod grading;
pub mod models;
pub mod report;
pub mod sync;

/// Returns the current version of the `pdash` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
