//! Shared library for `pdash`
//! Contains the grade, attendance and fuel calculators used by the CLI

pub mod core;
pub mod logger;

pub use crate::core::*;
