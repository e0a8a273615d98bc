//! Kipygen CLI Binary
//!
//! Command-line interface for composing and validating generator exercises.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use kipygen::cli::{command_name, map_error, Cli, RunContext};
use kipygen::config::ConfigLoader;
use kipygen::logging::{init_logging, LoggingConfig};
use std::path::Path;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{:#}", e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<bool> {
    let working_dir = std::env::current_dir().context("Failed to read the working directory")?;

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(cli, &working_dir);
    init_logging(Some(&logging_config)).context("Failed to initialize logging")?;

    info!(command = command_name(&cli.command), "Kipygen CLI starting");

    let context = RunContext::new(&working_dir, cli.config.clone())
        .map_err(|e| anyhow!(map_error(&e)))
        .context("Failed to load configuration")?;

    match context.execute(&cli.command) {
        Ok(output) => {
            info!(success = output.success, "Command completed");
            println!("{}", output.text);
            Ok(output.success)
        }
        Err(e) => {
            error!("Command failed: {}", e);
            Err(anyhow!(map_error(&e)))
        }
    }
}

/// Build logging configuration from CLI args and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, working_dir: &Path) -> LoggingConfig {
    let mut config = match cli.config {
        Some(ref config_path) => ConfigLoader::load_from_file(config_path),
        None => ConfigLoader::load(working_dir),
    }
    .map(|c| c.logging)
    .unwrap_or_default();

    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    config
}
