//! Configuration System
//!
//! Layered configuration built with the `config` crate. Later sources override
//! earlier ones: built-in defaults, the user file
//! (`$XDG_CONFIG_HOME/kipygen/config.toml`), the working directory file
//! (`kipygen.toml`), then `KIPYGEN__SECTION__KEY` environment variables.

use crate::error::ExerciseError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod merge;
mod sources;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KipygenConfig {
    #[serde(default)]
    pub validator: ValidatorConfig,

    #[serde(default)]
    pub exercise: ExerciseConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Validator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Bound on every exchange with a candidate, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Number of composite vectors a candidate is checked against
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

fn default_timeout_ms() -> u64 {
    3000
}

fn default_max_iterations() -> usize {
    500
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_iterations: default_max_iterations(),
        }
    }
}

/// Exercise generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseConfig {
    #[serde(default = "default_min_complexity")]
    pub min_complexity: u32,

    #[serde(default = "default_max_complexity")]
    pub max_complexity: u32,

    /// Example rounds shown in a description
    #[serde(default = "default_description_samples")]
    pub description_samples: usize,
}

fn default_min_complexity() -> u32 {
    1
}

fn default_max_complexity() -> u32 {
    15
}

fn default_description_samples() -> usize {
    2
}

impl Default for ExerciseConfig {
    fn default() -> Self {
        Self {
            min_complexity: default_min_complexity(),
            max_complexity: default_max_complexity(),
            description_samples: default_description_samples(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Validator(String),
    Exercise(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Validator(msg) => write!(f, "Validator: {}", msg),
            ValidationError::Exercise(msg) => write!(f, "Exercise: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl KipygenConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.validator.timeout_ms == 0 {
            errors.push(ValidationError::Validator(
                "timeout_ms must be positive".to_string(),
            ));
        }
        if self.validator.max_iterations <= 1 {
            errors.push(ValidationError::Validator(format!(
                "max_iterations must be greater than 1, got {}",
                self.validator.max_iterations
            )));
        }
        if self.exercise.min_complexity > self.exercise.max_complexity {
            errors.push(ValidationError::Exercise(format!(
                "min_complexity {} exceeds max_complexity {}",
                self.exercise.min_complexity, self.exercise.max_complexity
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Loads [`KipygenConfig`] from the layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a working directory.
    pub fn load(working_dir: &Path) -> Result<KipygenConfig, ExerciseError> {
        let builder = merge::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, working_dir)?;
        let builder = sources::environment::add_to_builder(builder);
        Self::finish(builder)
    }

    /// Load configuration from an explicit file (plus defaults and environment).
    pub fn load_from_file(path: &Path) -> Result<KipygenConfig, ExerciseError> {
        if !path.exists() {
            return Err(ExerciseError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = merge::builder_with_defaults()?
            .add_source(config::File::from(path).required(true));
        let builder = sources::environment::add_to_builder(builder);
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<KipygenConfig, ExerciseError> {
        let config: KipygenConfig = builder.build()?.try_deserialize()?;
        config.validate().map_err(|errors| {
            let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ExerciseError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                messages.join("\n")
            ))
        })?;
        Ok(config)
    }
}
