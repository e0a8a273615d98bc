//! Integration tests for the kipygen exercise engine

mod composite_exercises;
mod config_integration;
mod failure_diagnostics;
mod hooks_and_checkers;
mod registry_integration;
mod saved_exercises;
mod task_scenarios;
mod test_utils;
