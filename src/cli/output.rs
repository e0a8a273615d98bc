//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ExerciseError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &ExerciseError) -> String {
    match e {
        ExerciseError::UnknownTask(name) => {
            format!("Unknown task: {} (run `kipygen tasks` to list them)", name)
        }
        other => other.to_string(),
    }
}
