//! Task contract
//!
//! A task is one self-contained coroutine exercise: a reference generator, a
//! stream of test vectors that the reference generator satisfies, a
//! complexity weight and human-readable metadata. Tasks are composed into
//! [`crate::exercise::Exercise`]s and must therefore be stateless: every call
//! to [`Task::generator`] and [`Task::check_values`] starts from scratch.

use crate::coroutine::Coroutine;
use crate::vector::VectorStream;

pub trait Task: Send + Sync {
    /// Registered identifier, `Task` followed by an upper-case name (e.g. `TaskRange`)
    fn name(&self) -> &'static str;

    /// Short human-readable title
    fn title(&self) -> &'static str;

    /// Additive difficulty weight
    fn complexity(&self) -> u32;

    /// A fresh reference step-generator.
    fn generator(&self) -> Box<dyn Coroutine>;

    /// Test vectors: the hand-authored edge cases first, then (optionally)
    /// an endless stream of randomized vectors.
    fn check_values(&self) -> VectorStream;

    /// Description lines shown to the student, in order
    fn short_description(&self) -> &'static [&'static str];

    /// Module that defines the task; use `module_path!()`.
    fn origin(&self) -> &'static str;

    /// Strings sufficient to restore the task; the first one is always the name.
    fn save(&self) -> Vec<String> {
        vec![self.name().to_string()]
    }
}

impl std::fmt::Debug for dyn Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{} complexity={}>", self.name(), self.complexity())
    }
}
