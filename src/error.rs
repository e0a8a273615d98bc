//! Error types for the kipygen exercise engine.
//!
//! Candidate misbehaviour is never an error here: the validator reports it as a
//! [`crate::validator::Failure`]. These enums cover malformed task definitions,
//! bad persistence data and programmer errors.

use thiserror::Error;

/// Task registration errors. Fatal at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Task name '{0}' must start with \"Task\" followed by an upper-case identifier")]
    InvalidName(String),

    #[error("Task '{0}' has no title")]
    MissingTitle(String),

    #[error("Task '{0}' has no short description")]
    MissingDescription(String),

    #[error("Task '{0}' yields no hand-authored test vectors")]
    NoVectors(String),

    #[error("Task '{name}' is already registered from {existing} (attempted from {attempted})")]
    Duplicate {
        name: String,
        existing: String,
        attempted: String,
    },
}

/// Exercise construction, persistence and validation errors
#[derive(Debug, Error)]
pub enum ExerciseError {
    #[error("An exercise needs at least one task")]
    Empty,

    #[error("Unknown task: {0}")]
    UnknownTask(String),

    #[error("Malformed saved task entry at position {0}: expected a non-empty tuple")]
    MalformedSave(usize),

    #[error("Test vector length mismatch: {send} send values, {awaited} awaited values")]
    LengthMismatch { send: usize, awaited: usize },

    #[error("max_iterations must be greater than 1, got {0}")]
    InvalidIterations(usize),

    #[error("Failed to start candidate worker: {0}")]
    Worker(String),

    #[error("Registration error: {0}")]
    Registration(#[from] RegistrationError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for ExerciseError {
    fn from(err: config::ConfigError) -> Self {
        ExerciseError::ConfigError(err.to_string())
    }
}
