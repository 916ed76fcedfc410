//! SpendPath Inspect — combined timelock obligations of alternative spending paths
//!
//! Reads a set of spending paths (miniscript policies or explicit timelocks)
//! and reports which timelocks bind when m of them are used together.
//!
//! # Usage
//!
//! ```bash
//! spendpath-inspect --config /path/to/spendpath.toml
//! spendpath-inspect --json      # Print the report as JSON
//! spendpath-inspect --validate  # Validate config and exit
//! ```

mod config;
mod report;

use anyhow::{Context, Result};
use std::path::PathBuf;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let mut config_path = PathBuf::from("spendpath.toml");
    let mut force_json = false;
    let mut validate_only = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
                if i < args.len() {
                    config_path = PathBuf::from(&args[i]);
                } else {
                    anyhow::bail!("--config requires a path argument");
                }
            }
            "--json" => {
                force_json = true;
            }
            "--validate" => {
                validate_only = true;
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--version" | "-V" => {
                println!("spendpath-inspect {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            other => {
                anyhow::bail!("Unknown argument: {}", other);
            }
        }
        i += 1;
    }

    let mut inspect_config = config::InspectConfig::from_file(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    inspect_config.apply_env_overrides();
    if force_json {
        inspect_config.inspect.format = "json".to_string();
    }

    inspect_config
        .validate()
        .context("Configuration validation failed")?;

    std::env::set_var("RUST_LOG", &inspect_config.inspect.log_level);
    env_logger::init();

    if validate_only {
        println!("Configuration is valid.");
        println!("  Paths:      {}", inspect_config.paths.len());
        println!("  Threshold:  {}", inspect_config.combine.threshold);
        println!("  Format:     {}", inspect_config.inspect.format);
        return Ok(());
    }

    let report = report::Report::build(&inspect_config)?;
    if inspect_config.json_output() {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.to_text());
    }

    Ok(())
}

fn print_help() {
    println!(
        r#"SpendPath Inspect — combined timelocks of alternative spending paths

USAGE:
    spendpath-inspect [OPTIONS]

OPTIONS:
    -c, --config <PATH>   Config file path (default: spendpath.toml)
    --json                Print the report as JSON
    --validate            Validate config file and exit
    -h, --help            Show this help message
    -V, --version         Show version

ENVIRONMENT VARIABLES (override config file):
    SPENDPATH_LOG_LEVEL   Log level (error/warn/info/debug/trace)
    SPENDPATH_FORMAT      Report format (text/json)
    SPENDPATH_THRESHOLD   Number of paths used together (m of n)

EXAMPLES:
    # 2-of-3 combination from a config file
    SPENDPATH_THRESHOLD=2 spendpath-inspect --config paths.toml

    # Validate configuration
    spendpath-inspect --config paths.toml --validate
"#
    );
}
