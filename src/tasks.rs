//! Builtin task catalog
//!
//! Every task ships a reference generator written as an explicit state
//! machine, a few hand-authored vectors covering its edge cases and, for most
//! tasks, an endless stream of randomized vectors.

use crate::coroutine::Exception;
use crate::task::Task;
use crate::vector::{TestVector, VectorStream};
use rand::Rng;
use std::sync::Arc;

mod binary_sum;
mod calculator;
mod chain_queue;
mod concat;
mod password;
mod range;

pub use binary_sum::BinarySum;
pub use calculator::Calculator;
pub use chain_queue::ChainQueue;
pub use concat::Concat;
pub use password::Password;
pub use range::Range;

/// The builtin tasks, in catalog order.
pub fn builtin() -> Vec<Arc<dyn Task>> {
    vec![
        Arc::new(Range),
        Arc::new(Concat),
        Arc::new(Password),
        Arc::new(Calculator),
        Arc::new(BinarySum),
        Arc::new(ChainQueue),
    ]
}

/// Hand-authored vectors followed by an endless randomized tail.
fn fixed_then_random(fixed: Vec<TestVector>, random: fn() -> TestVector) -> VectorStream {
    Box::new(fixed.into_iter().chain(std::iter::repeat_with(random)))
}

fn fixed_only(fixed: Vec<TestVector>) -> VectorStream {
    Box::new(fixed.into_iter())
}

/// Raised when a fresh generator receives anything but `None`.
fn not_started_error() -> Exception {
    Exception::type_error("can't send non-None value to a just-started generator")
}

/// Integer drawn from a triangular distribution over `[low, high]` peaking at
/// `mode`, truncated toward zero. `mode` may lie outside the bounds, which
/// skews the draw past `high`.
fn triangular_int<R: Rng>(rng: &mut R, low: f64, high: f64, mode: f64) -> usize {
    if high == low {
        return low as usize;
    }
    let mut u: f64 = rng.gen();
    let mut c = (mode - low) / (high - low);
    let (mut low, mut high) = (low, high);
    if u > c {
        u = 1.0 - u;
        c = 1.0 - c;
        std::mem::swap(&mut low, &mut high);
    }
    (low + (high - low) * (u * c).sqrt()) as usize
}
