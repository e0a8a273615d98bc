//! Failure classification of misbehaving candidates

use super::test_utils::{builtin_exercise, scripted_exercise, Echo, Quitter, Raiser, SlowEcho};
use kipygen::coroutine::{Coroutine, Outcome};
use kipygen::validator::{FailureKind, Stage, Validator, Verdict};
use kipygen::value::Value;
use kipygen::vector::{Expected, TestVector};
use std::time::{Duration, Instant};

fn echo() -> Box<dyn Coroutine> {
    Box::new(Echo)
}

fn slow_echo() -> Box<dyn Coroutine> {
    Box::new(SlowEcho {
        delay: Duration::from_secs(2),
        slept: false,
    })
}

fn raiser() -> Box<dyn Coroutine> {
    Box::new(Raiser)
}

fn quitter() -> Box<dyn Coroutine> {
    Box::new(Quitter { done: false })
}

struct Panicker;

impl Coroutine for Panicker {
    fn send(&mut self, input: Value) -> Outcome {
        match input {
            Value::None => Outcome::Yielded(Value::None),
            _ => panic!("candidate bug"),
        }
    }
}

fn panicker() -> Box<dyn Coroutine> {
    Box::new(Panicker)
}

fn failure_of(verdict: Verdict) -> kipygen::validator::Failure {
    match verdict {
        Verdict::Fail(failure) => failure,
        Verdict::Pass { rounds } => panic!("expected a failure, passed {} rounds", rounds),
    }
}

#[test]
fn test_not_terminated() {
    let exercise = scripted_exercise(vec![TestVector::new().step(1, 1).step("a", "a")], echo);
    let failure = failure_of(Validator::default().run(&exercise, echo, 5).unwrap());
    assert_eq!(failure.kind, FailureKind::NotTerminated);
    assert_eq!(failure.stage, Stage::Termination);
    assert!(failure.reason.contains("did not stop after all tasks completed"));
    // No caret for the termination stage
    assert_eq!(failure.diagnostic.lines().count(), 3);
}

#[test]
fn test_timeout_is_reported_without_hanging() {
    let exercise = scripted_exercise(vec![TestVector::new().step(1, 1)], slow_echo);
    let validator = Validator::new(Duration::from_millis(200));
    let started = Instant::now();
    let failure = failure_of(validator.run(&exercise, slow_echo, 5).unwrap());
    assert!(started.elapsed() < Duration::from_millis(1500));
    assert_eq!(failure.kind, FailureKind::Timeout);
    assert_eq!(failure.stage, Stage::Step(0));
    assert!(failure
        .diagnostic
        .starts_with("Generator gave no answer within 0.2 seconds (round 1, step 1)"));
}

#[test]
fn test_abandoned_worker_does_not_affect_later_validation() {
    let slow = scripted_exercise(vec![TestVector::new().step(1, 1)], slow_echo);
    let validator = Validator::new(Duration::from_millis(200));
    let started = Instant::now();
    let failure = failure_of(validator.run(&slow, slow_echo, 5).unwrap());
    assert_eq!(failure.kind, FailureKind::Timeout);

    // The first worker is still asleep while the next validation runs
    let range = builtin_exercise(&["TaskRange"]);
    let verdict = validator
        .run(&range, || range.reference_generator(), 20)
        .unwrap();
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(verdict, Verdict::Pass { rounds: 20 });

    let echoed = scripted_exercise(
        vec![TestVector::new().step(1, 1), TestVector::new().step("a", "a")],
        echo,
    );
    let failure = failure_of(validator.run(&echoed, echo, 5).unwrap());
    assert_eq!(failure.kind, FailureKind::NotTerminated);
    assert_eq!(failure.round, 0);
}

#[test]
fn test_unexpected_exception() {
    let exercise = scripted_exercise(vec![TestVector::new().step(7, 7)], raiser);
    let diagnostic = exercise.validate(raiser, 5).unwrap();
    assert!(diagnostic.starts_with("Unexpected exception: ValueError('boom') (round 1, step 1)"));
}

#[test]
fn test_panic_is_an_unexpected_exception() {
    let exercise = scripted_exercise(vec![TestVector::new().step(7, 7)], panicker);
    let failure = failure_of(Validator::default().run(&exercise, panicker, 5).unwrap());
    assert_eq!(failure.kind, FailureKind::UnexpectedException);
    assert!(failure.reason.contains("Panic('candidate bug')"));
}

#[test]
fn test_premature_termination() {
    let exercise = scripted_exercise(
        vec![TestVector::new().step(1, Expected::any()).step(2, 2)],
        quitter,
    );
    let failure = failure_of(Validator::default().run(&exercise, quitter, 5).unwrap());
    assert_eq!(failure.kind, FailureKind::PrematureTermination);
    assert_eq!(failure.stage, Stage::Step(0));
}

#[test]
fn test_type_mismatch_distinguishes_bool_from_int() {
    let exercise = scripted_exercise(vec![TestVector::new().step(true, 1)], echo);
    let failure = failure_of(Validator::default().run(&exercise, echo, 5).unwrap());
    assert_eq!(failure.kind, FailureKind::TypeMismatch);
    assert_eq!(
        failure.reason,
        "Expected type int (1) from the generator, got bool (True)"
    );
}

#[test]
fn test_first_failing_round_stops_validation() {
    let vectors = vec![
        TestVector::new().step(1, 1),
        TestVector::new().step(2, 3),
        TestVector::new().step(4, 5),
    ];
    let exercise = scripted_exercise(vectors, echo);
    let failure = failure_of(Validator::default().run(&exercise, echo, 5).unwrap());
    assert_eq!(failure.round, 0);
    assert_eq!(failure.kind, FailureKind::NotTerminated);

    let failure = failure_of(Validator::default().run(&exercise, raiser, 5).unwrap());
    assert_eq!(failure.round, 0);
}

#[test]
fn test_iteration_cap_bounds_rounds() {
    let exercise = super::test_utils::builtin_exercise(&["TaskRange"]);
    let verdict = Validator::default()
        .run(&exercise, || super::test_utils::builtin_generator("TaskRange"), 7)
        .unwrap();
    assert_eq!(verdict, Verdict::Pass { rounds: 7 });
}
