//! CLI domain: parse, route, help, output, and presentation only.
//! No exercise logic lives here; the route table dispatches to the library.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{format_check_report, format_generated, format_task_table, TaskCheck};
pub use route::{RunContext, RunOutput};
