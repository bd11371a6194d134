//! Config command handler

use crate::args::ConfigSubcommand;
use pdash::config::Config;
use pdash::{error, info};
use std::io::{self, BufRead, Write};
use std::process;

/// Keys accepted by `config get/set/unset`
const KNOWN_KEYS: &str = "level, file, verbose, gradebooks_dir, reports_dir, precision";

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    match subcommand {
        None | Some(ConfigSubcommand::Get { key: None }) => show_all(config),
        Some(ConfigSubcommand::Get { key: Some(key) }) => show_key(config, &key),
        Some(ConfigSubcommand::Set { key, value }) => {
            let result = config.set(&key, &value);
            persist(config, result, &format!("Set {key} = {value}"));
        }
        Some(ConfigSubcommand::Unset { key }) => {
            let result = config.unset(&key, defaults);
            persist(config, result, &format!("Restored default for {key}"));
        }
        Some(ConfigSubcommand::Reset) => reset(),
    }
}

fn show_all(config: &Config) {
    println!("\n=== pdash configuration ===");
    println!("File: {}\n", Config::get_config_file_path().display());
    print!("{config}");
}

fn show_key(config: &Config, key: &str) {
    if let Some(value) = config.get(key) {
        println!("{value}");
    } else {
        eprintln!("✗ Unknown config key '{key}' (known keys: {KNOWN_KEYS})");
    }
}

/// Save a mutated config, exiting non-zero on any failure
fn persist(config: &Config, mutation: Result<(), String>, done: &str) {
    if let Err(e) = mutation {
        eprintln!("✗ {e}");
        process::exit(1);
    }

    if let Err(e) = config.save() {
        error!("Saving config failed: {e}");
        eprintln!("✗ Could not save config: {e}");
        process::exit(1);
    }

    info!("Config saved to {}", Config::get_config_file_path().display());
    println!("✓ {done}");
}

fn confirmed(prompt: &str) -> bool {
    print!("{prompt} [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn reset() {
    let path = Config::get_config_file_path();
    if !path.exists() {
        println!("✓ Nothing to reset, no config file at {}", path.display());
        return;
    }

    if !confirmed("Delete the config file and return to defaults?") {
        println!("✗ Reset cancelled");
        return;
    }

    if let Err(e) = Config::reset() {
        error!("Removing {} failed: {e}", path.display());
        eprintln!("✗ Could not remove config file: {e}");
        process::exit(1);
    }
    println!("✓ Config reset to defaults");
}
