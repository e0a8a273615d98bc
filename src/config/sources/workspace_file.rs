//! Working directory config file source: kipygen.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::Path;

pub const WORKSPACE_CONFIG_FILE: &str = "kipygen.toml";

/// Add `kipygen.toml` from `working_dir` to the builder if it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    working_dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = working_dir.join(WORKSPACE_CONFIG_FILE);
    if path.exists() {
        return Ok(builder.add_source(File::from(path).required(false)));
    }
    Ok(builder)
}
