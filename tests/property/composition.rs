//! Property-based tests for exercise composition

use kipygen::exercise::{combinations_amount, Exercise};
use kipygen::registry::TaskRegistry;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

/// Complexity of a composed exercise is the sum of its members
#[test]
fn test_complexity_is_sum_property() {
    let registry = TaskRegistry::with_builtin_tasks().unwrap();
    let tasks = registry.list_all();
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &proptest::collection::vec(0..tasks.len(), 1..8),
            |picks| {
                let members: Vec<_> = picks.iter().map(|&i| Arc::clone(&tasks[i])).collect();
                let expected: u32 = members.iter().map(|t| t.complexity()).sum();
                let exercise = Exercise::new(members).unwrap();
                prop_assert_eq!(exercise.complexity(), expected);
                prop_assert_eq!(exercise.task_names().len(), picks.len());
                Ok(())
            },
        )
        .unwrap();
}

/// Filtered exercises stay inside the requested bounds and are distinct subsets
#[test]
fn test_filter_by_complexity_bounds_property() {
    let registry = TaskRegistry::with_builtin_tasks().unwrap();
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(0u32..40, 0u32..40, any::<u64>()), |(a, b, seed)| {
            let (min, max) = (a.min(b), a.max(b));
            let mut rng = StdRng::seed_from_u64(seed);
            let mut seen = std::collections::HashSet::new();
            for exercise in Exercise::filter_by_complexity(&registry, &mut rng, min, max) {
                prop_assert!(exercise.complexity() >= min);
                prop_assert!(exercise.complexity() <= max);
                let mut names = exercise.task_names();
                names.sort_unstable();
                prop_assert!(seen.insert(names));
            }
            Ok(())
        })
        .unwrap();
}

/// Enumeration yields exactly the number of non-empty subsets
#[test]
fn test_combinations_amount_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(0usize..40), |n| {
            prop_assert_eq!(combinations_amount(n), (1u128 << n) - 1);
            Ok(())
        })
        .unwrap();
}

/// Every composite round pairs one expectation with every input
#[test]
fn test_composite_vector_lengths_property() {
    let registry = TaskRegistry::with_builtin_tasks().unwrap();
    let tasks = registry.list_all();
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &proptest::collection::vec(0..tasks.len(), 1..5),
            |picks| {
                let exercise =
                    Exercise::new(picks.iter().map(|&i| Arc::clone(&tasks[i])).collect()).unwrap();
                for vector in exercise.combined_vectors().take(5) {
                    prop_assert_eq!(vector.send().len(), vector.awaited().len());
                    prop_assert!(!vector.is_empty());
                }
                Ok(())
            },
        )
        .unwrap();
}
