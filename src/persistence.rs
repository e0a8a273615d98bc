//! Saved exercise selections.
//!
//! An exercise is stored as JSON: one array of strings per member task, the
//! task name first.

use crate::error::ExerciseError;
use crate::exercise::Exercise;
use crate::registry::TaskRegistry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedExercise {
    pub tasks: Vec<Vec<String>>,
}

impl SavedExercise {
    pub fn from_exercise(exercise: &Exercise) -> Self {
        Self {
            tasks: exercise.save(),
        }
    }

    /// Resolve every saved task against `registry`.
    pub fn restore(&self, registry: &TaskRegistry) -> Result<Exercise, ExerciseError> {
        Exercise::load(&self.tasks, registry)
    }

    pub fn to_json(&self) -> Result<String, ExerciseError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ExerciseError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn write_to(&self, path: &Path) -> Result<(), ExerciseError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_json()?)?;
        debug!(path = %path.display(), tasks = self.tasks.len(), "Saved exercise");
        Ok(())
    }

    pub fn read_from(path: &Path) -> Result<Self, ExerciseError> {
        let saved = Self::from_json(&fs::read_to_string(path)?)?;
        debug!(path = %path.display(), tasks = saved.tasks.len(), "Loaded exercise");
        Ok(saved)
    }
}
