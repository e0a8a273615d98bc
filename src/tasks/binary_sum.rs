//! Running sum rendered in binary.

use super::{fixed_only, not_started_error};
use crate::coroutine::{Coroutine, Exception, Outcome};
use crate::task::Task;
use crate::value::Value;
use crate::vector::{TestVector, VectorStream};

pub struct BinarySum;

impl Task for BinarySum {
    fn name(&self) -> &'static str {
        "TaskBinarySum"
    }

    fn title(&self) -> &'static str {
        "Binary sum"
    }

    fn complexity(&self) -> u32 {
        5
    }

    fn generator(&self) -> Box<dyn Coroutine> {
        Box::new(BinarySumGenerator::Fresh)
    }

    fn check_values(&self) -> VectorStream {
        fixed_only(vec![
            TestVector::new().step(212, "11010100").step((), "11010100"),
            TestVector::new().step((), "0"),
            TestVector::new()
                .step(40, "101000")
                .step(12, "110100")
                .step((), "110100"),
        ])
    }

    fn short_description(&self) -> &'static [&'static str] {
        &["First the generator receives a starting number and yields it back in \
           binary. Every following integer is added to the total, and the total \
           is yielded as a binary string"]
    }

    fn origin(&self) -> &'static str {
        module_path!()
    }
}

/// Binary digits without prefix; negative totals keep their sign.
pub(crate) fn binary(number: i64) -> String {
    if number < 0 {
        format!("-{:b}", number.unsigned_abs())
    } else {
        format!("{:b}", number)
    }
}

enum BinarySumGenerator {
    Fresh,
    Summing(i64),
    Reported,
    Done,
}

impl Coroutine for BinarySumGenerator {
    fn send(&mut self, input: Value) -> Outcome {
        let state = std::mem::replace(self, BinarySumGenerator::Done);
        let (next, outcome) = match state {
            BinarySumGenerator::Fresh if !input.is_none() => {
                (BinarySumGenerator::Fresh, Outcome::Raised(not_started_error()))
            }
            BinarySumGenerator::Fresh => (
                BinarySumGenerator::Summing(0),
                Outcome::Yielded(Value::from(binary(0))),
            ),
            BinarySumGenerator::Summing(total) if input.is_none() => (
                BinarySumGenerator::Reported,
                Outcome::Yielded(Value::from(binary(total))),
            ),
            BinarySumGenerator::Summing(total) => match input.as_int() {
                Some(addend) => match total.checked_add(addend) {
                    Some(total) => (
                        BinarySumGenerator::Summing(total),
                        Outcome::Yielded(Value::from(binary(total))),
                    ),
                    None => (
                        BinarySumGenerator::Done,
                        Outcome::Raised(Exception::with_message(
                            "OverflowError",
                            "sum does not fit in 64 bits",
                        )),
                    ),
                },
                None => (
                    BinarySumGenerator::Done,
                    Outcome::Raised(Exception::type_error(format!(
                        "unsupported operand type(s) for +=: 'int' and '{}'",
                        input.type_name()
                    ))),
                ),
            },
            BinarySumGenerator::Reported | BinarySumGenerator::Done => {
                (BinarySumGenerator::Done, Outcome::Finished)
            }
        };
        *self = next;
        outcome
    }

    fn close(&mut self) {
        *self = BinarySumGenerator::Done;
    }
}
