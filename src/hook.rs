//! Send-side hooks: actions performed on the running candidate instead of
//! sending it a passive value.

use crate::coroutine::{Exception, Outcome};
use crate::exchange::{Exchange, ExchangeError};

#[derive(Debug, Clone, PartialEq)]
pub enum Hook {
    /// Raise the exception inside the candidate at its suspension point
    Throw(Exception),
}

impl Hook {
    pub fn throw(kind: impl Into<String>) -> Self {
        Hook::Throw(Exception::new(kind, Vec::new()))
    }

    /// Run the hook against the live candidate and return what it produced.
    pub(crate) fn apply(&self, exchange: &Exchange) -> Result<Outcome, ExchangeError> {
        match self {
            Hook::Throw(exception) => exchange.throw(exception.clone()),
        }
    }

    pub fn name(&self) -> String {
        match self {
            Hook::Throw(exception) => format!("Throw {}", exception.kind),
        }
    }

    pub fn description(&self) -> String {
        match self {
            Hook::Throw(exception) => format!(
                "an exception is raised inside the generator via throw() (here: {})",
                exception.kind
            ),
        }
    }
}
