//! CLI route: single route table and run context. Dispatches to the library and presentation.

use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_check_report, format_generated, format_task_table, TaskCheck,
};
use crate::config::{ConfigLoader, KipygenConfig};
use crate::description::describe;
use crate::error::ExerciseError;
use crate::exercise::Exercise;
use crate::persistence::SavedExercise;
use crate::registry;
use crate::validator::Validator;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Text to print and whether the command succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    pub text: String,
    pub success: bool,
}

impl RunOutput {
    fn ok(text: String) -> Self {
        Self {
            text,
            success: true,
        }
    }
}

/// Runtime context for CLI execution: loaded configuration.
pub struct RunContext {
    config: KipygenConfig,
    color: bool,
}

impl RunContext {
    /// Load configuration from `config_path`, or from `kipygen.toml` in `working_dir`.
    pub fn new(working_dir: &Path, config_path: Option<PathBuf>) -> Result<Self, ExerciseError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(working_dir)?,
        };
        Ok(Self::with_config(config))
    }

    pub fn with_config(config: KipygenConfig) -> Self {
        let color = config.logging.color;
        Self { config, color }
    }

    pub fn config(&self) -> &KipygenConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<RunOutput, ExerciseError> {
        match command {
            Commands::Tasks => {
                let tasks = registry::global().read().list_all();
                Ok(RunOutput::ok(format_task_table(&tasks)))
            }
            Commands::Generate {
                min,
                max,
                count,
                save,
            } => self.handle_generate(*min, *max, *count, save.as_deref()),
            Commands::Describe { file } => {
                let saved = SavedExercise::read_from(file)?;
                let exercise = saved.restore(&registry::global().read())?;
                Ok(RunOutput::ok(describe(
                    &exercise,
                    self.config.exercise.description_samples,
                )))
            }
            Commands::Check {
                max_iterations,
                tasks,
            } => self.handle_check(
                max_iterations.unwrap_or(self.config.validator.max_iterations),
                tasks,
            ),
            Commands::Config => {
                let text = toml::to_string_pretty(&self.config).map_err(|e| {
                    ExerciseError::ConfigError(format!("Failed to render configuration: {}", e))
                })?;
                Ok(RunOutput::ok(text))
            }
        }
    }

    fn handle_generate(
        &self,
        min: Option<u32>,
        max: Option<u32>,
        count: usize,
        save: Option<&Path>,
    ) -> Result<RunOutput, ExerciseError> {
        let min = min.unwrap_or(self.config.exercise.min_complexity);
        let max = max.unwrap_or(self.config.exercise.max_complexity);
        let registry = registry::global().read();
        let mut rng = rand::thread_rng();
        let exercises: Vec<Exercise> =
            Exercise::filter_by_complexity(&registry, &mut rng, min, max)
                .take(count)
                .collect();
        drop(registry);

        if exercises.is_empty() {
            warn!(min, max, "No exercise matches the complexity range");
            return Ok(RunOutput {
                text: format!("No exercise has a complexity between {} and {}", min, max),
                success: false,
            });
        }

        if let Some(path) = save {
            SavedExercise::from_exercise(&exercises[0]).write_to(path)?;
            info!(path = %path.display(), "Saved exercise");
        }

        let samples = self.config.exercise.description_samples;
        let text = exercises
            .iter()
            .enumerate()
            .map(|(index, exercise)| {
                format_generated(index, exercise, &describe(exercise, samples))
            })
            .collect::<Vec<_>>()
            .join("\n\n");
        Ok(RunOutput::ok(text))
    }

    fn handle_check(
        &self,
        max_iterations: usize,
        names: &[String],
    ) -> Result<RunOutput, ExerciseError> {
        let tasks = {
            let registry = registry::global().read();
            if names.is_empty() {
                registry.list_all()
            } else {
                names
                    .iter()
                    .map(|name| registry.get_or_error(name))
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        let validator = Validator::from_config(&self.config.validator);
        let mut checks = Vec::with_capacity(tasks.len());
        for task in tasks {
            debug!(task = task.name(), max_iterations, "Checking reference generator");
            let exercise = Exercise::new(vec![Arc::clone(&task)])?;
            let verdict = validator.run(&exercise, || task.generator(), max_iterations)?;
            checks.push(TaskCheck {
                name: task.name().to_string(),
                verdict,
            });
        }

        let success = checks.iter().all(|check| check.verdict.is_pass());
        Ok(RunOutput {
            text: format_check_report(&checks, self.color),
            success,
        })
    }
}
