//! Scripted scenarios against the builtin reference generators

use super::test_utils::{builtin_exercise, builtin_generator, scripted_exercise};
use kipygen::checker::Checker;
use kipygen::registry::TaskRegistry;
use kipygen::value::Value;
use kipygen::vector::{Expected, Input, TestVector};

fn range_generator() -> Box<dyn kipygen::coroutine::Coroutine> {
    builtin_generator("TaskRange")
}

fn password_generator() -> Box<dyn kipygen::coroutine::Coroutine> {
    builtin_generator("TaskPassword")
}

fn calculator_generator() -> Box<dyn kipygen::coroutine::Coroutine> {
    builtin_generator("TaskCalculator")
}

fn op(symbol: &str, operand: i64) -> Value {
    Value::tuple([Value::from(symbol), Value::Int(operand)])
}

#[test]
fn test_range_five_to_ten() {
    let mut vector = TestVector::new()
        .step(5, Expected::any())
        .step(10, Expected::any());
    for expected in 5..=10 {
        vector.push((), expected as i64);
    }
    let exercise = scripted_exercise(vec![vector.clone(), vector], range_generator);
    assert_eq!(exercise.validate(range_generator, 2).unwrap(), "");
}

fn password_vector(last: bool) -> TestVector {
    TestVector::new()
        .step("abc", ())
        .step("abd", false)
        .step(3, false)
        .step(Value::list([Value::from("abc")]), false)
        .step("abc", last)
}

#[test]
fn test_password_accepts_the_same_password() {
    let exercise = scripted_exercise(vec![password_vector(true)], password_generator);
    assert_eq!(exercise.validate(password_generator, 10).unwrap(), "");
}

#[test]
fn test_password_mismatch_is_diagnosed() {
    let exercise = scripted_exercise(
        vec![password_vector(true), password_vector(false)],
        password_generator,
    );
    let diagnostic = exercise.validate(password_generator, 10).unwrap();
    let first_line = diagnostic.lines().next().unwrap();
    assert_eq!(
        first_line,
        "Expected value False from the generator, got True (round 2, step 5)"
    );
    assert!(diagnostic.contains("Send:    [ 'abc', 'abd', 3    , ['abc'], 'abc' ]"));
    assert!(diagnostic.contains("Awaited: [ None , False, False, False  , False ]"));
    assert!(diagnostic.ends_with(&format!("{}^^^^^", " ".repeat(9 + 32))));
}

#[test]
fn test_calculator_division_by_zero_keeps_value() {
    let vector = TestVector::new()
        .step(0, 0)
        .step(op("+", 5), 5)
        .step(op("/", 0), 5)
        .step((), ());
    let exercise = scripted_exercise(vec![vector], calculator_generator);
    assert_eq!(exercise.validate(calculator_generator, 5).unwrap(), "");
}

#[test]
fn test_calculator_type_is_checked() {
    // 3 / 2 * 2 must come back as the integer 3, not 3.0
    let vector = TestVector::new()
        .step(3, 3)
        .step(op("/", 2), 1.5)
        .step(op("*", 2), 3.0)
        .step((), ());
    let exercise = scripted_exercise(vec![vector], calculator_generator);
    let diagnostic = exercise.validate(calculator_generator, 5).unwrap();
    assert!(
        diagnostic.starts_with("Expected type float (3.0) from the generator, got int (3)"),
        "{}",
        diagnostic
    );
}

#[test]
fn test_every_builtin_task_is_self_consistent() {
    let registry = TaskRegistry::with_builtin_tasks().unwrap();
    for task in registry.list_all() {
        let exercise = builtin_exercise(&[task.name()]);
        let diagnostic = exercise.validate(|| task.generator(), 40).unwrap();
        assert_eq!(diagnostic, "", "{} is not self-consistent", task.name());
    }
}

#[test]
fn test_wrong_generator_for_task_fails() {
    let exercise = builtin_exercise(&["TaskConcat"]);
    let diagnostic = exercise.validate(range_generator, 10).unwrap();
    assert!(!diagnostic.is_empty());
    assert!(diagnostic.contains("(round 1, "));
}

#[test]
fn test_wildcard_inputs_are_sampled() {
    let vector = TestVector::new()
        .step(1, Expected::any())
        .step(2, Expected::any())
        .step(Input::any(), 1)
        .step(Input::any_except(0), 2)
        .step(Input::any(), Checker::Finish);
    let exercise = scripted_exercise(vec![vector], range_generator);
    assert_eq!(exercise.validate(range_generator, 3).unwrap(), "");
}
