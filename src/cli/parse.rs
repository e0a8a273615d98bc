//! CLI parse: clap types for kipygen. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Kipygen CLI - generator exercises: compose, describe, validate
#[derive(Parser)]
#[command(name = "kipygen")]
#[command(about = "Compose generator exercises and validate their reference solutions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides kipygen.toml lookup)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the registered tasks
    Tasks,
    /// Generate random exercises within a complexity range
    Generate {
        /// Minimum total complexity (default from config)
        #[arg(long)]
        min: Option<u32>,
        /// Maximum total complexity (default from config)
        #[arg(long)]
        max: Option<u32>,
        /// Number of exercises to print
        #[arg(long, default_value = "1")]
        count: usize,
        /// Save the first generated exercise to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Describe a saved exercise
    Describe {
        /// Saved exercise file
        file: PathBuf,
    },
    /// Validate reference generators against their own test vectors
    Check {
        /// Rounds per task (default from config)
        #[arg(long)]
        max_iterations: Option<usize>,
        /// Tasks to check (default: all)
        tasks: Vec<String>,
    },
    /// Print the effective configuration as TOML
    Config,
}
