//! Process-wide registry: custom tasks next to the builtin catalog

use super::test_utils::{Echo, ScriptedTask};
use kipygen::coroutine::Coroutine;
use kipygen::error::RegistrationError;
use kipygen::exercise::Exercise;
use kipygen::registry::{global, register_global};
use kipygen::vector::TestVector;
use std::sync::Arc;

fn echo() -> Box<dyn Coroutine> {
    Box::new(Echo)
}

#[test]
fn test_register_custom_task_globally() {
    let task = ScriptedTask {
        name: "TaskIntegrationEcho",
        vectors: vec![TestVector::new().step(1, 1)],
        factory: echo,
    };
    assert!(register_global(Arc::new(task)).unwrap());

    let again = ScriptedTask {
        name: "TaskIntegrationEcho",
        vectors: vec![TestVector::new().step(2, 2)],
        factory: echo,
    };
    assert!(!register_global(Arc::new(again)).unwrap());

    let registry = global().read();
    assert!(registry.get("TaskRange").is_some());
    let saved = vec![
        vec!["TaskRange".to_string()],
        vec!["TaskIntegrationEcho".to_string()],
    ];
    let exercise = Exercise::load(&saved, &registry).unwrap();
    assert_eq!(exercise.complexity(), 2);
}

#[test]
fn test_global_registration_rejects_bad_names() {
    let task = ScriptedTask {
        name: "EchoTask",
        vectors: vec![TestVector::new().step(1, 1)],
        factory: echo,
    };
    assert_eq!(
        register_global(Arc::new(task)),
        Err(RegistrationError::InvalidName("EchoTask".to_string()))
    );
    assert!(global().read().get("EchoTask").is_none());
}

#[test]
fn test_global_registration_requires_vectors() {
    let task = ScriptedTask {
        name: "TaskNoVectors",
        vectors: vec![],
        factory: echo,
    };
    assert_eq!(
        register_global(Arc::new(task)),
        Err(RegistrationError::NoVectors("TaskNoVectors".to_string()))
    );
}
