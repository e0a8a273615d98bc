//! Bounded-wait exchange with a candidate coroutine.
//!
//! The candidate is moved into a dedicated worker thread. Every request is
//! answered over a channel that the validator reads with a deadline. When the
//! deadline passes the validator abandons the exchange; the worker is not
//! interrupted. Once its blocked call returns it sees the closed request
//! channel, closes the candidate and exits on its own.

use crate::coroutine::{Coroutine, Exception, Outcome};
use crate::error::ExerciseError;
use crate::value::Value;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExchangeError {
    #[error("no answer within {0:?}")]
    Timeout(Duration),

    #[error("candidate worker stopped unexpectedly")]
    Disconnected,
}

enum Request {
    Prime,
    Send(Value),
    Throw(Exception),
}

pub struct Exchange {
    requests: Sender<Request>,
    replies: Receiver<Outcome>,
    timeout: Duration,
}

impl Exchange {
    /// Move `candidate` into a new worker thread.
    pub fn spawn(candidate: Box<dyn Coroutine>, timeout: Duration) -> Result<Self, ExerciseError> {
        let (request_tx, request_rx) = mpsc::channel();
        let (reply_tx, reply_rx) = mpsc::channel();
        thread::Builder::new()
            .name("kipygen-candidate".to_string())
            .spawn(move || serve(candidate, request_rx, reply_tx))
            .map_err(|e| ExerciseError::Worker(e.to_string()))?;
        Ok(Self {
            requests: request_tx,
            replies: reply_rx,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn prime(&self) -> Result<Outcome, ExchangeError> {
        self.call(Request::Prime)
    }

    pub fn send(&self, value: Value) -> Result<Outcome, ExchangeError> {
        self.call(Request::Send(value))
    }

    pub fn throw(&self, exception: Exception) -> Result<Outcome, ExchangeError> {
        self.call(Request::Throw(exception))
    }

    fn call(&self, request: Request) -> Result<Outcome, ExchangeError> {
        self.requests
            .send(request)
            .map_err(|_| ExchangeError::Disconnected)?;
        match self.replies.recv_timeout(self.timeout) {
            Ok(outcome) => Ok(outcome),
            Err(RecvTimeoutError::Timeout) => {
                debug!(timeout = ?self.timeout, "Candidate did not answer, abandoning worker");
                Err(ExchangeError::Timeout(self.timeout))
            }
            Err(RecvTimeoutError::Disconnected) => Err(ExchangeError::Disconnected),
        }
    }
}

fn serve(mut candidate: Box<dyn Coroutine>, requests: Receiver<Request>, replies: Sender<Outcome>) {
    // A panic ends the candidate the same way an uncaught exception would
    let mut broken = false;
    while let Ok(request) = requests.recv() {
        let outcome = if broken {
            Outcome::Finished
        } else {
            panic::catch_unwind(AssertUnwindSafe(|| match request {
                Request::Prime => candidate.prime(),
                Request::Send(value) => candidate.send(value),
                Request::Throw(exception) => candidate.throw(exception),
            }))
            .unwrap_or_else(|payload| {
                broken = true;
                Outcome::Raised(panic_exception(payload))
            })
        };
        if replies.send(outcome).is_err() {
            break;
        }
    }
    if !broken {
        let _ = panic::catch_unwind(AssertUnwindSafe(|| candidate.close()));
    }
    trace!("Candidate worker exiting");
}

fn panic_exception(payload: Box<dyn Any + Send>) -> Exception {
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "candidate panicked".to_string()
    };
    Exception::with_message("Panic", message)
}
