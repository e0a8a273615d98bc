//! Merge rules: defaults first, every later source overrides.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with the built-in defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("validator.timeout_ms", 3000i64)?
        .set_default("validator.max_iterations", 500i64)?
        .set_default("exercise.min_complexity", 1i64)?
        .set_default("exercise.max_complexity", 15i64)?
        .set_default("exercise.description_samples", 2i64)?
        .set_default("logging.level", "warn")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}
