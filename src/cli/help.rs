//! CLI help: stable command names for logging.

use crate::cli::parse::Commands;

/// Command name string used in log records (e.g. "generate").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Tasks => "tasks",
        Commands::Generate { .. } => "generate",
        Commands::Describe { .. } => "describe",
        Commands::Check { .. } => "check",
        Commands::Config => "config",
    }
}
