//! Coroutine protocol
//!
//! A coroutine is an explicit state machine that exchanges one input for one
//! outcome per step. The first exchange is [`Coroutine::prime`], whose output
//! is ignored by convention; every following [`Coroutine::send`] answers with
//! a value, reports that the coroutine finished, or reports an exception.
//! Once finished, a coroutine keeps answering [`Outcome::Finished`].

use crate::value::Value;
use std::collections::VecDeque;
use std::fmt;

/// An exception raised by, or injected into, a coroutine.
///
/// Carried as ordinary data so it can cross worker threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Exception {
    pub kind: String,
    pub args: Vec<Value>,
}

impl Exception {
    pub fn new(kind: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            kind: kind.into(),
            args,
        }
    }

    pub fn with_message(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(kind, vec![Value::Str(message.into())])
    }

    pub fn type_error(message: impl Into<String>) -> Self {
        Self::with_message("TypeError", message)
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.kind)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

/// Result of one exchange with a coroutine
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Yielded(Value),
    Finished,
    Raised(Exception),
}

pub trait Coroutine: Send {
    /// Deliver one input and run until the next output.
    fn send(&mut self, input: Value) -> Outcome;

    /// Start the coroutine. Equivalent to sending `None`.
    fn prime(&mut self) -> Outcome {
        self.send(Value::None)
    }

    /// Raise `exception` at the suspension point.
    ///
    /// Coroutines that do not handle injected exceptions let them propagate,
    /// which terminates them.
    fn throw(&mut self, exception: Exception) -> Outcome {
        self.close();
        Outcome::Raised(exception)
    }

    /// Terminate the coroutine. Later sends answer [`Outcome::Finished`].
    fn close(&mut self) {}
}

/// Runs several coroutines back-to-back inside one coroutine.
///
/// When a stage finishes, the input that finished it is handed to the next
/// stage right after priming that stage.
pub struct Chain {
    stages: VecDeque<Box<dyn Coroutine>>,
}

impl Chain {
    pub fn new(stages: Vec<Box<dyn Coroutine>>) -> Self {
        Self {
            stages: stages.into(),
        }
    }
}

impl Coroutine for Chain {
    fn prime(&mut self) -> Outcome {
        match self.stages.front_mut() {
            Some(stage) => stage.prime(),
            None => Outcome::Finished,
        }
    }

    fn send(&mut self, input: Value) -> Outcome {
        loop {
            let Some(current) = self.stages.front_mut() else {
                return Outcome::Finished;
            };
            match current.send(input.clone()) {
                Outcome::Finished => {
                    self.stages.pop_front();
                    let Some(next) = self.stages.front_mut() else {
                        return Outcome::Finished;
                    };
                    if let Outcome::Raised(exception) = next.prime() {
                        return Outcome::Raised(exception);
                    }
                }
                outcome => return outcome,
            }
        }
    }

    fn throw(&mut self, exception: Exception) -> Outcome {
        match self.stages.front_mut() {
            Some(stage) => stage.throw(exception),
            None => Outcome::Raised(exception),
        }
    }

    fn close(&mut self) {
        for stage in self.stages.iter_mut() {
            stage.close();
        }
        self.stages.clear();
    }
}
