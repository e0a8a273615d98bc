//! Running calculator over `(operation, number)` pairs.
//!
//! Integer results stay integers. A float result with no fractional part is
//! turned back into an integer. Integer arithmetic that would overflow is
//! carried out in floating point instead. Division by zero leaves the running
//! value unchanged.

use super::{fixed_then_random, not_started_error};
use crate::coroutine::{Coroutine, Exception, Outcome};
use crate::task::Task;
use crate::value::Value;
use crate::vector::{TestVector, VectorStream};
use rand::seq::SliceRandom;
use rand::Rng;

pub struct Calculator;

impl Task for Calculator {
    fn name(&self) -> &'static str {
        "TaskCalculator"
    }

    fn title(&self) -> &'static str {
        "Calculator"
    }

    fn complexity(&self) -> u32 {
        7
    }

    fn generator(&self) -> Box<dyn Coroutine> {
        Box::new(CalculatorGenerator::Fresh)
    }

    fn check_values(&self) -> VectorStream {
        use Operation::*;
        let halving = scripted(3, &[(Div, 2), (Mul, 2)]);
        let fixed = vec![
            scripted(0, &[(Add, 5)]),
            scripted(70, &[(Mul, 2)]),
            scripted(70, &[(Mul, 2), (Sub, 2)]),
            halving.clone(),
            halving,
            scripted(70, &[(Div, 0), (Add, 1)]),
            scripted(70, &[]),
        ];
        fixed_then_random(fixed, random_vector)
    }

    fn short_description(&self) -> &'static [&'static str] {
        &[
            "First the generator receives the initial number, which it yields back. \
             Operations are then applied to it. After that (operation, number) pairs \
             are sent, where:",
            "> number: any int or float",
            "> operation: one of the symbols +, -, *, / for the matching operation",
        ]
    }

    fn origin(&self) -> &'static str {
        module_path!()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operation {
    const ALL: [Operation; 4] = [Operation::Add, Operation::Sub, Operation::Mul, Operation::Div];

    fn symbol(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Sub => "-",
            Operation::Mul => "*",
            Operation::Div => "/",
        }
    }

    fn parse(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    fn pair(self, operand: i64) -> Value {
        Value::tuple([Value::from(self.symbol()), Value::Int(operand)])
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Number::Int(*b as i64)),
            Value::Int(i) => Some(Number::Int(*i)),
            Value::Float(x) => Some(Number::Float(*x)),
            _ => None,
        }
    }

    fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(x) => x,
        }
    }

    fn is_zero(self) -> bool {
        self.as_f64() == 0.0
    }

    /// Integral floats that fit an `i64` become integers.
    fn normalize(self) -> Self {
        match self {
            Number::Float(x)
                if x.is_finite() && x.fract() == 0.0 && x >= i64::MIN as f64 && x < i64::MAX as f64 =>
            {
                Number::Int(x as i64)
            }
            other => other,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Number::Int(i) => Value::Int(i),
            Number::Float(x) => Value::Float(x),
        }
    }
}

/// Apply one operation. `None` for division by zero.
fn apply(op: Operation, lhs: Number, rhs: Number) -> Option<Number> {
    let checked = match (lhs, rhs) {
        (Number::Int(a), Number::Int(b)) => match op {
            Operation::Add => a.checked_add(b),
            Operation::Sub => a.checked_sub(b),
            Operation::Mul => a.checked_mul(b),
            Operation::Div => None,
        },
        _ => None,
    };
    if let Some(result) = checked {
        return Some(Number::Int(result));
    }
    let (a, b) = (lhs.as_f64(), rhs.as_f64());
    let result = match op {
        Operation::Add => a + b,
        Operation::Sub => a - b,
        Operation::Mul => a * b,
        Operation::Div if rhs.is_zero() => return None,
        Operation::Div => a / b,
    };
    Some(Number::Float(result).normalize())
}

/// Initial value, each operation with its running result, then `None`.
fn scripted(initial: i64, operations: &[(Operation, i64)]) -> TestVector {
    let mut vector = TestVector::new().step(initial, initial);
    let mut current = Number::Int(initial);
    for &(op, operand) in operations {
        if let Some(result) = apply(op, current, Number::Int(operand)) {
            current = result;
        }
        vector.push(op.pair(operand), current.into_value());
    }
    vector.step((), ())
}

fn random_vector() -> TestVector {
    let mut rng = rand::thread_rng();
    let initial: i64 = rng.gen_range(-100..=100);
    let mut vector = TestVector::new().step(initial, initial);
    let mut current = Number::Int(initial);
    for _ in 0..rng.gen_range(0..=10) {
        let operand: i64 = rng.gen_range(-100..=100);
        let op = *Operation::ALL.choose(&mut rng).unwrap_or(&Operation::Add);
        let Some(result) = apply(op, current, Number::Int(operand)) else {
            continue;
        };
        current = result;
        vector.push(op.pair(operand), current.into_value());
    }
    vector.step((), ())
}

enum CalculatorGenerator {
    Fresh,
    AwaitInitial,
    Running(Number),
    Closing,
    Done,
}

fn number(value: &Value) -> Result<Number, Exception> {
    Number::from_value(value).ok_or_else(|| {
        Exception::type_error(format!(
            "unsupported operand type: {}",
            value.type_name()
        ))
    })
}

fn evaluate(current: Number, input: &Value) -> Result<Number, Exception> {
    let (symbol, operand) = match input {
        Value::Tuple(items) | Value::List(items) if items.len() == 2 => (&items[0], &items[1]),
        Value::Tuple(_) | Value::List(_) => {
            return Err(Exception::with_message(
                "ValueError",
                "expected an (operation, number) pair",
            ))
        }
        other => {
            return Err(Exception::type_error(format!(
                "cannot unpack non-iterable {} object",
                other.type_name()
            )))
        }
    };
    let operand = number(operand)?;
    match symbol.as_str().and_then(Operation::parse) {
        Some(op) => Ok(apply(op, current, operand).unwrap_or(current)),
        None => Ok(current.normalize()),
    }
}

impl Coroutine for CalculatorGenerator {
    fn send(&mut self, input: Value) -> Outcome {
        let state = std::mem::replace(self, CalculatorGenerator::Done);
        let (next, outcome) = match state {
            CalculatorGenerator::Fresh if !input.is_none() => {
                (CalculatorGenerator::Fresh, Outcome::Raised(not_started_error()))
            }
            CalculatorGenerator::Fresh => {
                (CalculatorGenerator::AwaitInitial, Outcome::Yielded(Value::Int(0)))
            }
            CalculatorGenerator::AwaitInitial => match number(&input) {
                Ok(initial) => (CalculatorGenerator::Running(initial), Outcome::Yielded(input)),
                Err(e) => (CalculatorGenerator::Done, Outcome::Raised(e)),
            },
            CalculatorGenerator::Running(_) if input.is_none() => {
                (CalculatorGenerator::Closing, Outcome::Yielded(Value::None))
            }
            CalculatorGenerator::Running(current) => match evaluate(current, &input) {
                Ok(result) => (
                    CalculatorGenerator::Running(result),
                    Outcome::Yielded(result.into_value()),
                ),
                Err(e) => (CalculatorGenerator::Done, Outcome::Raised(e)),
            },
            CalculatorGenerator::Closing | CalculatorGenerator::Done => {
                (CalculatorGenerator::Done, Outcome::Finished)
            }
        };
        *self = next;
        outcome
    }

    fn close(&mut self) {
        *self = CalculatorGenerator::Done;
    }
}
