//! Task registry: append-only table of every known task type.
//!
//! The process-wide registry is initialised lazily with the builtin catalog
//! the first time it is touched, so lookups never observe a partially
//! populated table. Additional tasks are appended with [`register_global`].
//! Registration is idempotent for a task registered again from the same
//! module and fails fast for tasks breaking the contract.

use crate::error::{ExerciseError, RegistrationError};
use crate::task::Task;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

static GLOBAL: Lazy<RwLock<TaskRegistry>> = Lazy::new(|| {
    let registry = TaskRegistry::with_builtin_tasks()
        .unwrap_or_else(|e| panic!("builtin task catalog is invalid: {}", e));
    info!(tasks = registry.len(), "Task registry initialised");
    RwLock::new(registry)
});

/// The process-wide registry.
pub fn global() -> &'static RwLock<TaskRegistry> {
    &GLOBAL
}

/// Register a task in the process-wide registry.
///
/// Returns `Ok(false)` when the same task was already registered.
pub fn register_global(task: Arc<dyn Task>) -> Result<bool, RegistrationError> {
    GLOBAL.write().register(task)
}

/// Registry of task types, in registration order
#[derive(Default)]
pub struct TaskRegistry {
    tasks: Vec<Arc<dyn Task>>,
    index: HashMap<&'static str, usize>,
}

impl TaskRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the builtin task catalog
    pub fn with_builtin_tasks() -> Result<Self, RegistrationError> {
        let mut registry = Self::new();
        for task in crate::tasks::builtin() {
            registry.register(task)?;
        }
        Ok(registry)
    }

    /// Register a task after checking it against the task contract.
    pub fn register(&mut self, task: Arc<dyn Task>) -> Result<bool, RegistrationError> {
        validate_contract(task.as_ref())?;

        if let Some(&position) = self.index.get(task.name()) {
            let existing = &self.tasks[position];
            if existing.origin() == task.origin() {
                debug!(task = task.name(), "Task already registered");
                return Ok(false);
            }
            return Err(RegistrationError::Duplicate {
                name: task.name().to_string(),
                existing: existing.origin().to_string(),
                attempted: task.origin().to_string(),
            });
        }

        debug!(
            task = task.name(),
            complexity = task.complexity(),
            origin = task.origin(),
            "Registering task"
        );
        self.index.insert(task.name(), self.tasks.len());
        self.tasks.push(task);
        Ok(true)
    }

    /// Get a task by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Task>> {
        self.index.get(name).map(|&i| Arc::clone(&self.tasks[i]))
    }

    /// Get a task by name or return an error
    pub fn get_or_error(&self, name: &str) -> Result<Arc<dyn Task>, ExerciseError> {
        self.get(name)
            .ok_or_else(|| ExerciseError::UnknownTask(name.to_string()))
    }

    /// All registered tasks, in registration order
    pub fn list_all(&self) -> Vec<Arc<dyn Task>> {
        self.tasks.clone()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

fn is_valid_task_name(name: &str) -> bool {
    let Some(rest) = name.strip_prefix("Task") else {
        return false;
    };
    let mut chars = rest.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

fn validate_contract(task: &dyn Task) -> Result<(), RegistrationError> {
    let name = task.name();
    if !is_valid_task_name(name) {
        return Err(RegistrationError::InvalidName(name.to_string()));
    }
    if task.title().trim().is_empty() {
        return Err(RegistrationError::MissingTitle(name.to_string()));
    }
    let description = task.short_description();
    if description.is_empty() || description.iter().all(|line| line.trim().is_empty()) {
        return Err(RegistrationError::MissingDescription(name.to_string()));
    }
    if task.check_values().next().is_none() {
        return Err(RegistrationError::NoVectors(name.to_string()));
    }
    Ok(())
}
