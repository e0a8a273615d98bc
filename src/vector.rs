//! Test vectors: scripted send/expect rounds.

use crate::checker::{Checker, Wildcard};
use crate::error::ExerciseError;
use crate::hook::Hook;
use crate::value::Value;
use std::fmt;

/// What the validator feeds into the candidate at one step
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Value(Value),
    /// A sampled value
    Wildcard(Wildcard),
    /// An action on the candidate itself
    Hook(Hook),
}

/// What the validator expects back at one step
#[derive(Debug, Clone, PartialEq)]
pub enum Expected {
    /// Equal in value and in type
    Value(Value),
    Checker(Checker),
}

impl Input {
    pub fn any() -> Self {
        Input::Wildcard(Wildcard::Any)
    }

    pub fn any_except(value: impl Into<Value>) -> Self {
        Input::Wildcard(Wildcard::AnyExcept(value.into()))
    }
}

impl Expected {
    pub fn any() -> Self {
        Expected::Checker(Checker::any())
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Value(value) => write!(f, "{}", value),
            Input::Wildcard(wildcard) => write!(f, "{}", wildcard.name()),
            Input::Hook(hook) => write!(f, "{}", hook.name()),
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Value(value) => write!(f, "{}", value),
            Expected::Checker(checker) => write!(f, "{}", checker.name()),
        }
    }
}

macro_rules! impl_from_plain {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Input {
                fn from(value: $ty) -> Self {
                    Input::Value(value.into())
                }
            }

            impl From<$ty> for Expected {
                fn from(value: $ty) -> Self {
                    Expected::Value(value.into())
                }
            }
        )*
    };
}

impl_from_plain!((), bool, i32, i64, f64, &str, String, Value);

impl From<Wildcard> for Input {
    fn from(wildcard: Wildcard) -> Self {
        Input::Wildcard(wildcard)
    }
}

impl From<Hook> for Input {
    fn from(hook: Hook) -> Self {
        Input::Hook(hook)
    }
}

impl From<Wildcard> for Expected {
    fn from(wildcard: Wildcard) -> Self {
        Expected::Checker(Checker::Wildcard(wildcard))
    }
}

impl From<Checker> for Expected {
    fn from(checker: Checker) -> Self {
        Expected::Checker(checker)
    }
}

/// One round-trip scenario: equal-length `send` and `awaited` sequences.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestVector {
    send: Vec<Input>,
    awaited: Vec<Expected>,
}

/// Lazily produced, possibly infinite, sequence of test vectors
pub type VectorStream = Box<dyn Iterator<Item = TestVector> + Send>;

impl TestVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a vector from separate lists, checking that their lengths agree.
    pub fn try_new(send: Vec<Input>, awaited: Vec<Expected>) -> Result<Self, ExerciseError> {
        if send.len() != awaited.len() {
            return Err(ExerciseError::LengthMismatch {
                send: send.len(),
                awaited: awaited.len(),
            });
        }
        Ok(Self { send, awaited })
    }

    /// Append one step, builder style.
    pub fn step(mut self, input: impl Into<Input>, expected: impl Into<Expected>) -> Self {
        self.push(input, expected);
        self
    }

    pub fn push(&mut self, input: impl Into<Input>, expected: impl Into<Expected>) {
        self.send.push(input.into());
        self.awaited.push(expected.into());
    }

    /// Append every step of `other` after the steps of `self`.
    pub fn extend(&mut self, other: TestVector) {
        self.send.extend(other.send);
        self.awaited.extend(other.awaited);
    }

    pub fn send(&self) -> &[Input] {
        &self.send
    }

    pub fn awaited(&self) -> &[Expected] {
        &self.awaited
    }

    pub fn len(&self) -> usize {
        self.send.len()
    }

    pub fn is_empty(&self) -> bool {
        self.send.is_empty()
    }

    pub fn steps(&self) -> impl Iterator<Item = (&Input, &Expected)> {
        self.send.iter().zip(self.awaited.iter())
    }
}
