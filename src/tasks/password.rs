//! Answer `False` to every guess until the stored password comes back.

use super::{fixed_only, not_started_error};
use crate::coroutine::{Coroutine, Outcome};
use crate::task::Task;
use crate::value::Value;
use crate::vector::{TestVector, VectorStream};

pub struct Password;

impl Task for Password {
    fn name(&self) -> &'static str {
        "TaskPassword"
    }

    fn title(&self) -> &'static str {
        "Password"
    }

    fn complexity(&self) -> u32 {
        2
    }

    fn generator(&self) -> Box<dyn Coroutine> {
        Box::new(PasswordGenerator::Fresh)
    }

    fn check_values(&self) -> VectorStream {
        let marker = Value::object();
        let mut vectors = vec![
            guessing("Password".into(), vec![2.into(), "".into()]),
            guessing(1.into(), vec![2.into(), "".into()]),
            guessing(1.into(), vec![]),
            guessing("".into(), vec![]),
            guessing(marker, vec![]),
        ];
        let examples = [
            Value::Int(-1),
            Value::Int(0),
            Value::Int(1),
            Value::from(""),
            Value::from("1"),
            Value::List(vec![]),
            Value::Dict(vec![]),
            Value::Dict(vec![]),
        ];
        vectors.extend(
            examples
                .into_iter()
                .map(|password| {
                    let fakes = fakes(&password);
                    guessing(password, fakes)
                }),
        );
        fixed_only(vectors)
    }

    fn short_description(&self) -> &'static [&'static str] {
        &["A password is sent to the generator. Yield False until the same password \
           is sent again, then yield True and finish"]
    }

    fn origin(&self) -> &'static str {
        module_path!()
    }
}

/// `password`, the wrong guesses, then `password` again.
fn guessing(password: Value, wrong: Vec<Value>) -> TestVector {
    let mut vector = TestVector::new().step(password.clone(), ());
    for guess in wrong {
        vector.push(guess, false);
    }
    vector.step(password, true)
}

/// Near misses for numeric passwords
fn fakes(password: &Value) -> Vec<Value> {
    match password {
        Value::Int(p) => {
            let mut fakes = vec![
                Value::Int(p - 1),
                Value::Int(p + 1),
                Value::Float(*p as f64 + 0.1),
                Value::Float(*p as f64 - 0.1),
            ];
            if *p != 0 {
                fakes.push(Value::Int(-p));
            }
            fakes
        }
        Value::Float(p) => {
            let mut fakes = vec![
                Value::Float(p - 1.0),
                Value::Float(p + 1.0),
                Value::Float(p + 0.1),
                Value::Float(p - 0.1),
            ];
            if *p != 0.0 {
                fakes.push(Value::Float(-p));
            }
            fakes
        }
        _ => Vec::new(),
    }
}

enum PasswordGenerator {
    Fresh,
    AwaitPassword,
    Checking(Value),
    Accepted,
    Done,
}

impl Coroutine for PasswordGenerator {
    fn send(&mut self, input: Value) -> Outcome {
        let state = std::mem::replace(self, PasswordGenerator::Done);
        let (next, outcome) = match state {
            PasswordGenerator::Fresh if !input.is_none() => {
                (PasswordGenerator::Fresh, Outcome::Raised(not_started_error()))
            }
            PasswordGenerator::Fresh => (
                PasswordGenerator::AwaitPassword,
                Outcome::Yielded(Value::None),
            ),
            PasswordGenerator::AwaitPassword => (
                PasswordGenerator::Checking(input),
                Outcome::Yielded(Value::None),
            ),
            PasswordGenerator::Checking(password) if input.loosely_equals(&password) => {
                (PasswordGenerator::Accepted, Outcome::Yielded(Value::Bool(true)))
            }
            PasswordGenerator::Checking(password) => (
                PasswordGenerator::Checking(password),
                Outcome::Yielded(Value::Bool(false)),
            ),
            PasswordGenerator::Accepted | PasswordGenerator::Done => {
                (PasswordGenerator::Done, Outcome::Finished)
            }
        };
        *self = next;
        outcome
    }

    fn close(&mut self) {
        *self = PasswordGenerator::Done;
    }
}
