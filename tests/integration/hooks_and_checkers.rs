//! Hooks on the send side and checkers on the awaited side

use super::test_utils::{builtin_generator, scripted_exercise, Catcher, Echo};
use kipygen::checker::{Checker, ExceptionAssertion};
use kipygen::coroutine::Coroutine;
use kipygen::hook::Hook;
use kipygen::validator::{FailureKind, Validator, Verdict};
use kipygen::value::Value;
use kipygen::vector::{Expected, Input, TestVector};

fn catcher() -> Box<dyn Coroutine> {
    Box::new(Catcher)
}

fn echo() -> Box<dyn Coroutine> {
    Box::new(Echo)
}

fn password() -> Box<dyn Coroutine> {
    builtin_generator("TaskPassword")
}

#[test]
fn test_thrown_exception_propagates_and_is_asserted() {
    // The password generator does not handle injected exceptions
    let vector = TestVector::new()
        .step("secret", ())
        .step(Hook::throw("KeyError"), Checker::raises("KeyError"))
        .step(Input::any(), Checker::Finish);
    let exercise = scripted_exercise(vec![vector], password);
    assert_eq!(exercise.validate(password, 3).unwrap(), "");
}

#[test]
fn test_exception_assertion_compares_arguments_exactly() {
    let assertion = Checker::Raises(ExceptionAssertion::with_args(
        "ValueError",
        vec![Value::Int(1)],
    ));
    let thrown = Hook::Throw(kipygen::coroutine::Exception::new(
        "ValueError",
        vec![Value::Bool(true)],
    ));
    let vector = TestVector::new().step("secret", ()).step(thrown, assertion);
    let exercise = scripted_exercise(vec![vector], password);
    let diagnostic = exercise.validate(password, 3).unwrap();
    assert!(
        diagnostic.starts_with("Expected exception ValueError(1), got ValueError(True)"),
        "{}",
        diagnostic
    );
    assert!(diagnostic.contains("Send:    [ 'secret', Throw ValueError     ]"));
    assert!(diagnostic.contains("Awaited: [ None    , Raises ValueError(1) ]"));
}

#[test]
fn test_handled_throw_yields_a_value() {
    let vector = TestVector::new()
        .step(Hook::throw("StopIteration"), "caught StopIteration")
        .step(5, 5);
    let exercise = scripted_exercise(vec![vector], catcher);
    assert_eq!(exercise.validate(catcher, 3).unwrap(), "");
}

#[test]
fn test_missing_exception_is_reported() {
    let vector = TestVector::new().step(1, Checker::raises("ValueError"));
    let exercise = scripted_exercise(vec![vector], echo);
    let verdict = Validator::default().run(&exercise, echo, 3).unwrap();
    match verdict {
        Verdict::Fail(failure) => {
            assert_eq!(failure.kind, FailureKind::ValueMismatch);
            assert_eq!(
                failure.reason,
                "Expected exception ValueError, got value 1"
            );
        }
        other => panic!("expected a failure, got {:?}", other),
    }
}

#[test]
fn test_any_except_rejects_the_excluded_value() {
    let vector = TestVector::new().step(2, Checker::any_except(2));
    let exercise = scripted_exercise(vec![vector], echo);
    let verdict = Validator::default().run(&exercise, echo, 3).unwrap();
    assert!(matches!(
        verdict,
        Verdict::Fail(ref failure) if failure.kind == FailureKind::Rejected
    ));
}

#[test]
fn test_finish_marker_passes_the_whole_validation() {
    // Neither the steps after the marker nor the later round are evaluated
    let finishing = TestVector::new()
        .step("x", ())
        .step("x", true)
        .step(Input::any(), Checker::Finish)
        .step(1, 2);
    let failing = TestVector::new().step("y", ()).step("y", false);
    let exercise = scripted_exercise(vec![finishing, failing], password);

    assert_eq!(exercise.validate(password, 5).unwrap(), "");
    let verdict = Validator::default().run(&exercise, password, 5).unwrap();
    assert_eq!(verdict, Verdict::Pass { rounds: 1 });
}

#[test]
fn test_round_without_finish_marker_is_still_validated() {
    let plain = TestVector::new().step("x", ()).step("x", true);
    let failing = TestVector::new().step("y", ()).step("y", false);
    let exercise = scripted_exercise(vec![plain, failing], password);
    let diagnostic = exercise.validate(password, 5).unwrap();
    assert!(diagnostic.starts_with("Expected value False from the generator, got True (round 2, step 2)"));
}

#[test]
fn test_finish_marker_fails_when_candidate_continues() {
    let vector = TestVector::new().step(1, Expected::from(Checker::Finish));
    let exercise = scripted_exercise(vec![vector], echo);
    let verdict = Validator::default().run(&exercise, echo, 3).unwrap();
    assert!(matches!(
        verdict,
        Verdict::Fail(ref failure) if failure.kind == FailureKind::NotTerminated
    ));
}
