//! Configuration loading and its effect on validation

use kipygen::config::{ConfigLoader, KipygenConfig};
use kipygen::validator::Validator;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_validator_from_loaded_config() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("custom.toml");
    std::fs::write(
        &path,
        "[validator]\ntimeout_ms = 750\nmax_iterations = 40\n",
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&path).unwrap();
    assert_eq!(config.validator.max_iterations, 40);
    let validator = Validator::from_config(&config.validator);
    assert_eq!(validator.timeout(), Duration::from_millis(750));
}

#[test]
fn test_missing_working_dir_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = ConfigLoader::load(temp_dir.path()).unwrap();
    let defaults = KipygenConfig::default();
    assert_eq!(config.validator.timeout_ms, defaults.validator.timeout_ms);
    assert_eq!(config.exercise.max_complexity, defaults.exercise.max_complexity);
}

#[test]
fn test_invalid_complexity_range_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("kipygen.toml"),
        "[exercise]\nmin_complexity = 9\nmax_complexity = 2\n",
    )
    .unwrap();
    let error = ConfigLoader::load(temp_dir.path()).unwrap_err();
    assert!(error.to_string().contains("min_complexity 9 exceeds max_complexity 2"));
}
