//! Command-line interface entry point for `pdash`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use pdash::config::Config;
use pdash::info;
use pdash::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use std::path::PathBuf;

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag wins over config logging.level; fall back to warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse::<Level>().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    let config_log_path = if config.logging.file.is_empty() {
        None
    } else {
        Some(PathBuf::from(&config.logging.file))
    };

    if let Some(log_path) = args.log_file.as_ref().or(config_log_path.as_ref()) {
        let display_path = log_path.to_string_lossy();
        if let Some(parent) = log_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).ok();
            }
        }
        if init_file_logging(log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
        }
        Command::Grade {
            first,
            second,
            third,
            absences,
            max_absences,
            add_absences,
            remove_absences,
        } => {
            let input = commands::grade::GradeInput {
                first: &first,
                second: &second,
                third: &third,
                absences,
                max_absences,
                add_absences,
                remove_absences,
            };
            commands::grade::run(&input, config.display.precision);
        }
        Command::Summary { input_files } => {
            commands::summary::run(&input_files, &config, verbose);
        }
        Command::Report {
            input_file,
            output,
            format,
        } => {
            commands::report::run(&input_file, output.as_deref(), &format, &config);
        }
        Command::Fuel {
            gas_price,
            gas_efficiency,
            gnv_price,
            gnv_efficiency,
            refuels,
        } => {
            let gasoline = pdash::fuel::FuelQuote::new(gas_price, gas_efficiency);
            let gnv = pdash::fuel::FuelQuote::new(gnv_price, gnv_efficiency);
            commands::fuel::run(gasoline, gnv, refuels.as_deref());
        }
    }
}
