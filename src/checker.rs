//! Checkers: stand-ins for literal values in test vectors.
//!
//! A [`Wildcard`] can appear on both sides of a vector: as an input it
//! supplies a sampled value, as an expectation it accepts any output (or any
//! output except one). A [`Checker`] is the expectation side and additionally
//! covers exception assertions and the finish marker. Checkers never take part
//! in plain equality; the validator dispatches on them.

use crate::coroutine::{Exception, Outcome};
use crate::validator::FailureKind;
use crate::value::Value;
use rand::seq::SliceRandom;
use rand::Rng;

/// Result of inspecting an observed outcome
#[derive(Debug, Clone, PartialEq)]
pub enum Inspection {
    /// The step is correct
    Pass,
    /// Validation passes immediately; nothing after this step is checked
    Finish,
    Fail(FailureKind, String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Wildcard {
    Any,
    AnyExcept(Value),
}

impl Wildcard {
    /// Pick a value to send in place of this wildcard.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Value {
        loop {
            let candidate = random_value(rng);
            match self {
                Wildcard::Any => return candidate,
                Wildcard::AnyExcept(excluded) if !candidate.loosely_equals(excluded) => {
                    return candidate
                }
                Wildcard::AnyExcept(_) => continue,
            }
        }
    }

    fn inspect_value(&self, output: &Value) -> Inspection {
        match self {
            Wildcard::Any => Inspection::Pass,
            Wildcard::AnyExcept(excluded) if output.loosely_equals(excluded) => Inspection::Fail(
                FailureKind::Rejected,
                format!(
                    "Expected any value except {}, but got exactly that",
                    excluded
                ),
            ),
            Wildcard::AnyExcept(_) => Inspection::Pass,
        }
    }

    pub fn name(&self) -> String {
        match self {
            Wildcard::Any => "Any".to_string(),
            Wildcard::AnyExcept(value) => format!("Any except {}", value),
        }
    }

    pub fn description(&self) -> String {
        match self {
            Wildcard::Any => "any value of any type".to_string(),
            Wildcard::AnyExcept(value) => {
                format!("any value of any type except one (here: {})", value)
            }
        }
    }
}

fn random_value<R: Rng>(rng: &mut R) -> Value {
    let pool = [
        Value::from("123"),
        Value::from("1"),
        Value::None,
        Value::Bool(true),
        Value::Bool(false),
        Value::Int(12),
        Value::Float(2.2),
    ];
    if rng.gen_ratio(1, (pool.len() + 1) as u32) {
        return Value::object();
    }
    pool.choose(rng).cloned().unwrap_or(Value::None)
}

/// Expects the coroutine to raise an exception of a given kind.
///
/// When `args` is set, the exception arguments must match positionally and exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct ExceptionAssertion {
    pub kind: String,
    pub args: Option<Vec<Value>>,
}

impl ExceptionAssertion {
    pub fn kind(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            args: None,
        }
    }

    pub fn with_args(kind: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            kind: kind.into(),
            args: Some(args),
        }
    }

    fn expected_text(&self) -> String {
        match &self.args {
            Some(args) => Exception::new(self.kind.clone(), args.clone()).to_string(),
            None => self.kind.clone(),
        }
    }

    fn check(&self, exception: &Exception) -> Inspection {
        let kind_matches = exception.kind == self.kind;
        let args_match = self.args.as_ref().map_or(true, |args| *args == exception.args);
        if kind_matches && args_match {
            Inspection::Pass
        } else {
            Inspection::Fail(
                FailureKind::UnexpectedException,
                format!(
                    "Expected exception {}, got {}",
                    self.expected_text(),
                    exception
                ),
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Checker {
    Wildcard(Wildcard),
    Raises(ExceptionAssertion),
    /// The coroutine must finish here
    Finish,
}

pub(crate) fn premature_termination() -> Inspection {
    Inspection::Fail(
        FailureKind::PrematureTermination,
        "Generator finished unexpectedly".to_string(),
    )
}

pub(crate) fn unexpected_exception(exception: &Exception) -> Inspection {
    Inspection::Fail(
        FailureKind::UnexpectedException,
        format!("Unexpected exception: {}", exception),
    )
}

impl Checker {
    pub fn any() -> Self {
        Checker::Wildcard(Wildcard::Any)
    }

    pub fn any_except(value: impl Into<Value>) -> Self {
        Checker::Wildcard(Wildcard::AnyExcept(value.into()))
    }

    pub fn raises(kind: impl Into<String>) -> Self {
        Checker::Raises(ExceptionAssertion::kind(kind))
    }

    /// Judge an observed outcome.
    pub fn inspect(&self, observed: &Outcome) -> Inspection {
        match (self, observed) {
            (Checker::Finish, Outcome::Finished) => Inspection::Finish,
            (Checker::Finish, Outcome::Yielded(value)) => Inspection::Fail(
                FailureKind::NotTerminated,
                format!("Expected the generator to finish, got {}", value),
            ),
            (Checker::Raises(assertion), Outcome::Raised(exception)) => assertion.check(exception),
            (Checker::Raises(assertion), Outcome::Yielded(value)) => Inspection::Fail(
                FailureKind::ValueMismatch,
                format!(
                    "Expected exception {}, got value {}",
                    assertion.expected_text(),
                    value
                ),
            ),
            (Checker::Raises(assertion), Outcome::Finished) => Inspection::Fail(
                FailureKind::PrematureTermination,
                format!(
                    "Expected exception {}, but the generator finished",
                    assertion.expected_text()
                ),
            ),
            (_, Outcome::Raised(exception)) => unexpected_exception(exception),
            (Checker::Wildcard(_), Outcome::Finished) => premature_termination(),
            (Checker::Wildcard(wildcard), Outcome::Yielded(value)) => wildcard.inspect_value(value),
        }
    }

    /// Display name used in aligned vectors.
    pub fn name(&self) -> String {
        match self {
            Checker::Wildcard(wildcard) => wildcard.name(),
            Checker::Raises(assertion) => format!("Raises {}", assertion.expected_text()),
            Checker::Finish => "Finish".to_string(),
        }
    }

    pub fn description(&self) -> String {
        match self {
            Checker::Wildcard(wildcard) => wildcard.description(),
            Checker::Raises(assertion) => format!(
                "the generator must raise an exception (here: {})",
                assertion.expected_text()
            ),
            Checker::Finish => "the generator must finish at this point".to_string(),
        }
    }
}

impl From<Wildcard> for Checker {
    fn from(wildcard: Wildcard) -> Self {
        Checker::Wildcard(wildcard)
    }
}
