//! CLI argument definitions for `pdash`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use pdash::config::ConfigOverrides;
use pdash::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&Level::from(*self), f)
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    Get {
        /// Optional configuration key to display (e.g., `level`, `reports_dir`, `precision`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Evaluate one subject from raw grade fields.
    ///
    /// Empty or non-numeric fields count as not taken.
    Grade {
        /// Grade A (first assessment, weight 1)
        #[arg(short = 'a', long, value_name = "SCORE", default_value = "")]
        first: String,

        /// Grade B (second assessment, weight 2)
        #[arg(short = 'b', long, value_name = "SCORE", default_value = "")]
        second: String,

        /// Grade C (optional third assessment that replaces A or B)
        #[arg(short = 'c', long, value_name = "SCORE", default_value = "")]
        third: String,

        /// Absences recorded so far
        #[arg(long, value_name = "COUNT", default_value_t = 0)]
        absences: u32,

        /// Absence ceiling (default 20)
        #[arg(long, value_name = "COUNT")]
        max_absences: Option<u32>,

        /// Record this many new absences
        #[arg(long, value_name = "COUNT", default_value_t = 0)]
        add_absences: u32,

        /// Remove this many absences (never below zero)
        #[arg(long, value_name = "COUNT", default_value_t = 0)]
        remove_absences: u32,
    },
    /// Summarize one or more gradebook CSV files.
    ///
    /// Prints course progress and the state of every subject, grouped by term.
    Summary {
        /// Gradebook CSV files (paths or names inside `gradebooks_dir`)
        #[arg(value_name = "FILES", num_args = 1..)]
        input_files: Vec<PathBuf>,
    },
    /// Generate a gradebook report.
    Report {
        /// Gradebook CSV file (path or name inside `gradebooks_dir`)
        #[arg(value_name = "FILE")]
        input_file: PathBuf,

        /// Output file path (optional; defaults to `reports_dir`/<input name>.<ext>)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Report format: markdown (md) or html
        #[arg(short, long, value_name = "FORMAT", default_value = "html")]
        format: String,
    },
    /// Compare cost per km of gasoline against natural gas (GNV).
    Fuel {
        /// Gasoline price per liter
        #[arg(long, value_name = "PRICE")]
        gas_price: f64,

        /// Gasoline efficiency in km per liter
        #[arg(long, value_name = "KM", default_value_t = 10.0)]
        gas_efficiency: f64,

        /// GNV price per cubic meter
        #[arg(long, value_name = "PRICE")]
        gnv_price: f64,

        /// GNV efficiency in km per cubic meter
        #[arg(long, value_name = "KM", default_value_t = 13.0)]
        gnv_efficiency: f64,

        /// Refuel log CSV (`Fuel,Quantity,Price,Total`) to print price statistics for
        #[arg(long, value_name = "FILE")]
        refuels: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "pdash",
    about = "Personal dashboard academic tools: grade averages, attendance and fuel costs",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level (stored in config file)
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config gradebooks directory
    #[arg(long = "gradebooks-dir", value_name = "DIR")]
    pub gradebooks_dir: Option<PathBuf>,

    /// Override config reports directory
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Override config average precision (decimal places)
    #[arg(long, value_name = "DIGITS")]
    pub precision: Option<usize>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `None` means no override for that field.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            gradebooks_dir: self
                .gradebooks_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            reports_dir: self
                .reports_dir
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            precision: self.precision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let cli = Cli::parse_from(["pdash", "config"]);
        let overrides = cli.to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.gradebooks_dir.is_none());
        assert!(overrides.reports_dir.is_none());
        assert!(overrides.precision.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = Cli::parse_from([
            "pdash",
            "--config-level",
            "debug",
            "--config-log-file",
            "/tmp/test.log",
            "--config-verbose",
            "yes",
            "--reports-dir",
            "/out",
            "--precision",
            "1",
            "config",
        ]);
        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.reports_dir, Some("/out".to_string()));
        assert_eq!(overrides.precision, Some(1));
    }

    #[test]
    fn test_grade_fields_default_to_empty() {
        let cli = Cli::parse_from(["pdash", "grade", "-a", "4", "-b", "5"]);
        match cli.command {
            Command::Grade {
                first,
                second,
                third,
                absences,
                max_absences,
                ..
            } => {
                assert_eq!(first, "4");
                assert_eq!(second, "5");
                assert!(third.is_empty());
                assert_eq!(absences, 0);
                assert!(max_absences.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_fuel_efficiency_defaults() {
        let cli = Cli::parse_from(["pdash", "fuel", "--gas-price", "6", "--gnv-price", "4.5"]);
        match cli.command {
            Command::Fuel {
                gas_efficiency,
                gnv_efficiency,
                ..
            } => {
                assert!((gas_efficiency - 10.0).abs() < f64::EPSILON);
                assert!((gnv_efficiency - 13.0).abs() < f64::EPSILON);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
