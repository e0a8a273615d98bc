//! Yield every integer of an inclusive range.

use super::{fixed_then_random, not_started_error};
use crate::coroutine::{Coroutine, Exception, Outcome};
use crate::task::Task;
use crate::value::Value;
use crate::vector::{Expected, Input, TestVector, VectorStream};
use rand::Rng;

pub struct Range;

impl Task for Range {
    fn name(&self) -> &'static str {
        "TaskRange"
    }

    fn title(&self) -> &'static str {
        "Range"
    }

    fn complexity(&self) -> u32 {
        1
    }

    fn generator(&self) -> Box<dyn Coroutine> {
        Box::new(RangeGenerator::Fresh)
    }

    fn check_values(&self) -> VectorStream {
        let fixed = vec![
            counting(1, 3),
            counting(1, 4),
            counting(123, 127),
            counting(1, 1),
            counting(0, 0),
        ];
        fixed_then_random(fixed, random_vector)
    }

    fn short_description(&self) -> &'static [&'static str] {
        &["Receive start and end, then yield every integer in the range [start, end]"]
    }

    fn origin(&self) -> &'static str {
        module_path!()
    }
}

/// `start, end`, then one wildcard per yielded number.
fn counting(start: i64, end: i64) -> TestVector {
    let mut vector = TestVector::new()
        .step(start, Expected::any())
        .step(end, Expected::any());
    for number in start..=end {
        vector.push(Input::any(), number);
    }
    vector
}

fn random_vector() -> TestVector {
    let mut rng = rand::thread_rng();
    let start: i64 = rng.gen_range(0..=65536);
    let end = start + rng.gen_range(1..=5);
    let mut vector = TestVector::new().step(start, ()).step(end, ());
    for number in start..=end {
        vector.push((), number);
    }
    vector
}

enum RangeGenerator {
    Fresh,
    AwaitStart,
    AwaitEnd { start: i64 },
    Counting { next: i64, end: i64 },
    Done,
}

fn integer(input: &Value) -> Result<i64, Exception> {
    input.as_int().ok_or_else(|| {
        Exception::type_error(format!(
            "range bounds must be int, not {}",
            input.type_name()
        ))
    })
}

impl Coroutine for RangeGenerator {
    fn send(&mut self, input: Value) -> Outcome {
        let state = std::mem::replace(self, RangeGenerator::Done);
        let (next, outcome) = match state {
            RangeGenerator::Fresh if !input.is_none() => {
                (RangeGenerator::Fresh, Outcome::Raised(not_started_error()))
            }
            RangeGenerator::Fresh => (RangeGenerator::AwaitStart, Outcome::Yielded(Value::None)),
            RangeGenerator::AwaitStart => match integer(&input) {
                Ok(start) => (
                    RangeGenerator::AwaitEnd { start },
                    Outcome::Yielded(Value::None),
                ),
                Err(e) => (RangeGenerator::Done, Outcome::Raised(e)),
            },
            RangeGenerator::AwaitEnd { start } => match integer(&input) {
                Ok(end) => (
                    RangeGenerator::Counting { next: start, end },
                    Outcome::Yielded(Value::None),
                ),
                Err(e) => (RangeGenerator::Done, Outcome::Raised(e)),
            },
            RangeGenerator::Counting { next, end } if next <= end => (
                RangeGenerator::Counting {
                    next: next + 1,
                    end,
                },
                Outcome::Yielded(Value::Int(next)),
            ),
            RangeGenerator::Counting { .. } | RangeGenerator::Done => {
                (RangeGenerator::Done, Outcome::Finished)
            }
        };
        *self = next;
        outcome
    }

    fn close(&mut self) {
        *self = RangeGenerator::Done;
    }
}
