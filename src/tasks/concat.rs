//! Concatenate received strings until a non-string arrives.

use super::{fixed_then_random, not_started_error, triangular_int};
use crate::coroutine::{Coroutine, Outcome};
use crate::task::Task;
use crate::value::Value;
use crate::vector::{TestVector, VectorStream};
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;

/// Characters random strings are drawn from
static ALPHABET: Lazy<Vec<char>> = Lazy::new(|| {
    ('0'..='9').chain('A'..='Z').chain('d'..='z').collect()
});

/// Upper bound (before skew) on the length of one random string
static CHOICES_MAX: Lazy<usize> = Lazy::new(|| (ALPHABET.len() as f64).sqrt() as usize);

pub struct Concat;

impl Task for Concat {
    fn name(&self) -> &'static str {
        "TaskConcat"
    }

    fn title(&self) -> &'static str {
        "String concatenation"
    }

    fn complexity(&self) -> u32 {
        3
    }

    fn generator(&self) -> Box<dyn Coroutine> {
        Box::new(ConcatGenerator::Fresh)
    }

    fn check_values(&self) -> VectorStream {
        let fixed = vec![
            joining(&["123", "45", "6789"]),
            joining(&["Very", " simple", " example"]),
            joining(&["", ""]),
            joining::<&str>(&[]),
        ];
        fixed_then_random(fixed, random_vector)
    }

    fn short_description(&self) -> &'static [&'static str] {
        &["Strings are sent to the generator and must be joined together. \
           On receiving None, yield the joined string and finish"]
    }

    fn origin(&self) -> &'static str {
        module_path!()
    }
}

fn joining<S: AsRef<str>>(parts: &[S]) -> TestVector {
    let mut vector = TestVector::new();
    let mut joined = String::new();
    for part in parts {
        joined.push_str(part.as_ref());
        vector.push(part.as_ref(), ());
    }
    vector.step((), joined)
}

fn random_vector() -> TestVector {
    let mut rng = rand::thread_rng();
    let parts: Vec<String> = (0..triangular_int(&mut rng, 0.0, 20.0, 2.0))
        .map(|_| {
            let length = triangular_int(&mut rng, 0.0, *CHOICES_MAX as f64, 10.0);
            (0..length)
                .filter_map(|_| ALPHABET.choose(&mut rng))
                .collect()
        })
        .collect();
    joining(&parts)
}

enum ConcatGenerator {
    Fresh,
    Collecting(String),
    Joined,
    Done,
}

impl Coroutine for ConcatGenerator {
    fn send(&mut self, input: Value) -> Outcome {
        let state = std::mem::replace(self, ConcatGenerator::Done);
        let (next, outcome) = match (state, input) {
            (ConcatGenerator::Fresh, Value::None) => (
                ConcatGenerator::Collecting(String::new()),
                Outcome::Yielded(Value::None),
            ),
            (ConcatGenerator::Fresh, _) => {
                (ConcatGenerator::Fresh, Outcome::Raised(not_started_error()))
            }
            (ConcatGenerator::Collecting(mut joined), Value::Str(part)) => {
                joined.push_str(&part);
                (
                    ConcatGenerator::Collecting(joined),
                    Outcome::Yielded(Value::None),
                )
            }
            (ConcatGenerator::Collecting(joined), _) => {
                (ConcatGenerator::Joined, Outcome::Yielded(Value::Str(joined)))
            }
            (ConcatGenerator::Joined, _) | (ConcatGenerator::Done, _) => {
                (ConcatGenerator::Done, Outcome::Finished)
            }
        };
        *self = next;
        outcome
    }

    fn close(&mut self) {
        *self = ConcatGenerator::Done;
    }
}
