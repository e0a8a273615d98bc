//! Validator: drives a candidate coroutine through an exercise's composite
//! test vectors and diagnoses the first divergence.
//!
//! Each round builds a fresh candidate, primes it, feeds every step of one
//! composite vector and finally checks that one more `None` finishes it. All
//! exchanges go through a bounded-wait [`Exchange`], so a candidate that
//! blocks is reported as a timeout instead of hanging the validator.
//! Candidate misbehaviour is reported as a [`Failure`], never as an error.

use crate::checker::{self, Inspection};
use crate::config::ValidatorConfig;
use crate::coroutine::{Coroutine, Outcome};
use crate::diff;
use crate::error::ExerciseError;
use crate::exchange::{Exchange, ExchangeError};
use crate::exercise::Exercise;
use crate::value::Value;
use crate::vector::{Expected, Input, TestVector};
use rand::Rng;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// Default bound on every exchange with the candidate
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Width of the `Send:    ` / `Awaited: ` labels
const LABEL_WIDTH: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    ValueMismatch,
    TypeMismatch,
    UnexpectedException,
    PrematureTermination,
    NotTerminated,
    Timeout,
    /// A checker refused the output
    Rejected,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureKind::ValueMismatch => "value mismatch",
            FailureKind::TypeMismatch => "type mismatch",
            FailureKind::UnexpectedException => "unexpected exception",
            FailureKind::PrematureTermination => "premature termination",
            FailureKind::NotTerminated => "not terminated",
            FailureKind::Timeout => "timeout",
            FailureKind::Rejected => "rejected by checker",
        };
        write!(f, "{}", label)
    }
}

/// Where in a round the failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Priming,
    Step(usize),
    Termination,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Priming => write!(f, "while priming"),
            Stage::Step(index) => write!(f, "step {}", index + 1),
            Stage::Termination => write!(f, "after the last step"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub kind: FailureKind,
    /// Zero-based round index
    pub round: usize,
    pub stage: Stage,
    pub reason: String,
    /// Full multi-line report: reason, aligned vectors and caret
    pub diagnostic: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Pass { rounds: usize },
    Fail(Failure),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass { .. })
    }
}

/// How a single round ended
enum Round {
    Passed,
    /// A finish marker matched; the whole validation passes
    Finished,
    Failed(Failure),
}

#[derive(Debug, Clone)]
pub struct Validator {
    timeout: Duration,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Validator {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn from_config(config: &ValidatorConfig) -> Self {
        Self::new(Duration::from_millis(config.timeout_ms))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Empty string on success, otherwise the diagnostic of the first failing round.
    pub fn validate<F>(
        &self,
        exercise: &Exercise,
        factory: F,
        max_iterations: usize,
    ) -> Result<String, ExerciseError>
    where
        F: Fn() -> Box<dyn Coroutine>,
    {
        Ok(match self.run(exercise, factory, max_iterations)? {
            Verdict::Pass { .. } => String::new(),
            Verdict::Fail(failure) => failure.diagnostic,
        })
    }

    /// Validate candidates from `factory` against up to `max_iterations` composite vectors.
    pub fn run<F>(
        &self,
        exercise: &Exercise,
        factory: F,
        max_iterations: usize,
    ) -> Result<Verdict, ExerciseError>
    where
        F: Fn() -> Box<dyn Coroutine>,
    {
        if max_iterations <= 1 {
            return Err(ExerciseError::InvalidIterations(max_iterations));
        }
        let mut rng = rand::thread_rng();
        let mut rounds = 0;
        for (round, vector) in exercise.combined_vectors().take(max_iterations).enumerate() {
            debug!(round, steps = vector.len(), "Validating round");
            match self.run_round(factory(), &vector, round, &mut rng)? {
                Round::Passed => {}
                Round::Finished => {
                    info!(%exercise, round, "Finish marker reached, validation passed");
                    return Ok(Verdict::Pass { rounds: round + 1 });
                }
                Round::Failed(failure) => {
                    info!(
                        %exercise,
                        round,
                        kind = %failure.kind,
                        "Candidate failed validation"
                    );
                    return Ok(Verdict::Fail(failure));
                }
            }
            rounds += 1;
        }
        info!(%exercise, rounds, "Candidate passed validation");
        Ok(Verdict::Pass { rounds })
    }

    fn run_round<R: Rng>(
        &self,
        candidate: Box<dyn Coroutine>,
        vector: &TestVector,
        round: usize,
        rng: &mut R,
    ) -> Result<Round, ExerciseError> {
        let exchange = Exchange::spawn(candidate, self.timeout)?;
        let fail =
            |kind, stage, reason: String| Round::Failed(failure(kind, round, stage, reason, vector));

        match exchange.prime() {
            Ok(Outcome::Yielded(_)) => {}
            Ok(observed) => {
                if let Inspection::Fail(kind, reason) = judge_unexpected(&observed) {
                    return Ok(fail(kind, Stage::Priming, reason));
                }
            }
            Err(error) => {
                let (kind, reason) = exchange_failure(error);
                return Ok(fail(kind, Stage::Priming, reason));
            }
        }

        for (index, (input, expected)) in vector.steps().enumerate() {
            let stage = Stage::Step(index);
            let observed = match input {
                Input::Value(value) => exchange.send(value.clone()),
                Input::Wildcard(wildcard) => exchange.send(wildcard.sample(rng)),
                Input::Hook(hook) => hook.apply(&exchange),
            };
            let observed = match observed {
                Ok(observed) => observed,
                Err(error) => {
                    let (kind, reason) = exchange_failure(error);
                    return Ok(fail(kind, stage, reason));
                }
            };
            match judge(expected, &observed) {
                Inspection::Pass => {}
                Inspection::Finish => return Ok(Round::Finished),
                Inspection::Fail(kind, reason) => return Ok(fail(kind, stage, reason)),
            }
        }

        match exchange.send(Value::None) {
            Ok(Outcome::Finished) => Ok(Round::Passed),
            Ok(Outcome::Yielded(value)) => Ok(fail(
                FailureKind::NotTerminated,
                Stage::Termination,
                format!(
                    "Generator did not stop after all tasks completed (yielded {})",
                    value
                ),
            )),
            Ok(Outcome::Raised(exception)) => Ok(fail(
                FailureKind::UnexpectedException,
                Stage::Termination,
                format!("Unexpected exception: {}", exception),
            )),
            Err(error) => {
                let (kind, reason) = exchange_failure(error);
                Ok(fail(kind, Stage::Termination, reason))
            }
        }
    }
}

/// Compare one observed outcome with its expectation.
pub fn judge(expected: &Expected, observed: &Outcome) -> Inspection {
    match expected {
        Expected::Checker(checker) => checker.inspect(observed),
        Expected::Value(expected) => match observed {
            Outcome::Yielded(actual) if !actual.loosely_equals(expected) => Inspection::Fail(
                FailureKind::ValueMismatch,
                format!(
                    "Expected value {} from the generator, got {}",
                    expected, actual
                ),
            ),
            Outcome::Yielded(actual) if !actual.same_type(expected) => Inspection::Fail(
                FailureKind::TypeMismatch,
                format!(
                    "Expected type {} ({}) from the generator, got {} ({})",
                    expected.type_name(),
                    expected,
                    actual.type_name(),
                    actual
                ),
            ),
            Outcome::Yielded(_) => Inspection::Pass,
            other => judge_unexpected(other),
        },
    }
}

fn judge_unexpected(observed: &Outcome) -> Inspection {
    match observed {
        Outcome::Finished => checker::premature_termination(),
        Outcome::Raised(exception) => checker::unexpected_exception(exception),
        Outcome::Yielded(_) => Inspection::Pass,
    }
}

fn exchange_failure(error: ExchangeError) -> (FailureKind, String) {
    match error {
        ExchangeError::Timeout(timeout) => (
            FailureKind::Timeout,
            format!(
                "Generator gave no answer within {:.1} seconds",
                timeout.as_secs_f64()
            ),
        ),
        ExchangeError::Disconnected => (
            FailureKind::UnexpectedException,
            "Generator worker stopped unexpectedly".to_string(),
        ),
    }
}

fn failure(
    kind: FailureKind,
    round: usize,
    stage: Stage,
    reason: String,
    vector: &TestVector,
) -> Failure {
    let alignment = diff::align(vector.send(), vector.awaited());
    let mut diagnostic = format!("{} (round {}, {})", reason, round + 1, stage);
    diagnostic.push_str(&format!("\nSend:    {}", alignment.send));
    diagnostic.push_str(&format!("\nAwaited: {}", alignment.awaited));
    let caret_column = match stage {
        Stage::Priming => Some(0),
        Stage::Step(index) => Some(index),
        Stage::Termination => None,
    };
    if let Some(index) = caret_column {
        if let Some(&column) = alignment.columns.get(index) {
            diagnostic.push('\n');
            diagnostic.push_str(&diff::caret_line(column, LABEL_WIDTH));
        }
    }
    Failure {
        kind,
        round,
        stage,
        reason,
        diagnostic,
    }
}
