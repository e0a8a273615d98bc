//! Exercises composed of several tasks

use super::test_utils::builtin_exercise;
use kipygen::exercise::Exercise;
use kipygen::registry::TaskRegistry;
use kipygen::validator::{Validator, Verdict};
use std::time::Duration;

#[test]
fn test_composite_reference_generators_pass() {
    let validator = Validator::new(Duration::from_secs(5));
    for names in [
        &["TaskRange", "TaskPassword"][..],
        &["TaskConcat", "TaskCalculator", "TaskRange"][..],
        &["TaskBinarySum", "TaskConcat", "TaskChainQueue"][..],
        &["TaskPassword", "TaskPassword"][..],
    ] {
        let exercise = builtin_exercise(names);
        let verdict = validator
            .run(&exercise, || exercise.reference_generator(), 20)
            .unwrap();
        assert!(verdict.is_pass(), "{:?}: {:?}", names, verdict);
    }
}

#[test]
fn test_single_task_reference_fails_composite() {
    let exercise = builtin_exercise(&["TaskRange", "TaskConcat"]);
    let range = TaskRegistry::with_builtin_tasks()
        .unwrap()
        .get("TaskRange")
        .unwrap();
    let verdict = Validator::default()
        .run(&exercise, || range.generator(), 5)
        .unwrap();
    assert!(!verdict.is_pass());
}

#[test]
fn test_composite_vectors_have_equal_lengths() {
    let exercise = builtin_exercise(&["TaskCalculator", "TaskChainQueue", "TaskConcat"]);
    for vector in exercise.combined_vectors().take(50) {
        assert_eq!(vector.send().len(), vector.awaited().len());
    }
}

#[test]
fn test_finite_member_bounds_composite_rounds() {
    let exercise = builtin_exercise(&["TaskRange", "TaskPassword"]);
    let verdict = Validator::new(Duration::from_secs(5))
        .run(&exercise, || exercise.reference_generator(), 500)
        .unwrap();
    assert_eq!(verdict, Verdict::Pass { rounds: 13 });
}

#[test]
fn test_enumeration_matches_combinations_amount() {
    let registry = TaskRegistry::with_builtin_tasks().unwrap();
    let mut rng = rand::thread_rng();
    let drained = Exercise::enumerate_all_subsets(&registry, &mut rng).count() as u128;
    assert_eq!(drained, Exercise::combinations_amount(&registry));
    assert_eq!(drained, 63);
}

#[test]
fn test_description_of_composite() {
    let exercise = builtin_exercise(&["TaskRange", "TaskChainQueue"]);
    let text = kipygen::description::describe(&exercise, 2);
    assert!(text.contains("\n1. Receive start and end"));
    assert!(text.contains("\n2. Lists are sent to the generator"));
    assert!(text.contains("\nAny - any value of any type"));
}
