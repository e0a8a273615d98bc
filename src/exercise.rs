//! Exercise composition
//!
//! An exercise asks the student for one coroutine that performs several tasks
//! back-to-back. Its test vectors are built round by round: round `i` takes
//! the `i`-th vector of every member task and concatenates them in task order.
//! The composite stream stops as soon as any member stream is exhausted.

use crate::coroutine::{Chain, Coroutine};
use crate::error::ExerciseError;
use crate::registry::TaskRegistry;
use crate::task::Task;
use crate::validator::Validator;
use crate::vector::{TestVector, VectorStream};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct Exercise {
    tasks: Vec<Arc<dyn Task>>,
}

impl Exercise {
    /// Compose an exercise from an ordered, non-empty list of tasks.
    pub fn new(tasks: Vec<Arc<dyn Task>>) -> Result<Self, ExerciseError> {
        if tasks.is_empty() {
            return Err(ExerciseError::Empty);
        }
        Ok(Self { tasks })
    }

    pub fn tasks(&self) -> &[Arc<dyn Task>] {
        &self.tasks
    }

    /// Sum of the member complexities
    pub fn complexity(&self) -> u32 {
        self.tasks.iter().map(|t| t.complexity()).sum()
    }

    pub fn task_names(&self) -> Vec<&'static str> {
        self.tasks.iter().map(|t| t.name()).collect()
    }

    /// Composite test vectors. Each call starts a fresh stream.
    pub fn combined_vectors(&self) -> CombinedVectors {
        CombinedVectors {
            streams: self.tasks.iter().map(|t| t.check_values()).collect(),
            exhausted: false,
        }
    }

    /// A correct candidate: the member tasks' reference generators, chained.
    pub fn reference_generator(&self) -> Box<dyn Coroutine> {
        Box::new(Chain::new(
            self.tasks.iter().map(|t| t.generator()).collect(),
        ))
    }

    /// Drive candidates built by `factory` through up to `max_iterations`
    /// composite vectors with the default validator settings.
    ///
    /// Returns an empty string when every round passes, or the diagnostic of
    /// the first failing round.
    pub fn validate<F>(&self, factory: F, max_iterations: usize) -> Result<String, ExerciseError>
    where
        F: Fn() -> Box<dyn Coroutine>,
    {
        Validator::default().validate(self, factory, max_iterations)
    }

    /// Per-task save tuples, in task order.
    pub fn save(&self) -> Vec<Vec<String>> {
        self.tasks.iter().map(|t| t.save()).collect()
    }

    /// Restore an exercise saved with [`Exercise::save`].
    pub fn load(data: &[Vec<String>], registry: &TaskRegistry) -> Result<Self, ExerciseError> {
        let tasks = data
            .iter()
            .enumerate()
            .map(|(position, saved)| {
                let name = saved
                    .first()
                    .ok_or(ExerciseError::MalformedSave(position))?;
                registry.get_or_error(name)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(tasks)
    }

    /// Number of non-empty subsets of the registered catalog.
    pub fn combinations_amount(registry: &TaskRegistry) -> u128 {
        combinations_amount(registry.len())
    }

    /// Every non-empty subset of the catalog, by increasing size, over a shuffled base order.
    pub fn enumerate_all_subsets<R: Rng>(registry: &TaskRegistry, rng: &mut R) -> Subsets {
        let mut pool = registry.list_all();
        pool.shuffle(rng);
        Subsets {
            pool,
            size: 1,
            indices: None,
        }
    }

    /// Subsets whose complexity lies in `[min, max]`.
    pub fn filter_by_complexity<R: Rng>(
        registry: &TaskRegistry,
        rng: &mut R,
        min: u32,
        max: u32,
    ) -> impl Iterator<Item = Exercise> {
        Self::enumerate_all_subsets(registry, rng)
            .filter(move |exercise| (min..=max).contains(&exercise.complexity()))
    }
}

impl fmt::Debug for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exercise")
            .field("tasks", &self.task_names())
            .field("complexity", &self.complexity())
            .finish()
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Exercise with {} tasks and complexity {}",
            self.tasks.len(),
            self.complexity()
        )
    }
}

/// Σ C(n, r) for r in 1..=n
pub fn combinations_amount(n: usize) -> u128 {
    let n = n as u128;
    let mut amount = 0u128;
    let mut binomial = 1u128;
    for r in 1..=n {
        binomial = binomial * (n - r + 1) / r;
        amount += binomial;
    }
    amount
}

/// Round-by-round concatenation of the member vector streams
pub struct CombinedVectors {
    streams: Vec<VectorStream>,
    exhausted: bool,
}

impl Iterator for CombinedVectors {
    type Item = TestVector;

    fn next(&mut self) -> Option<TestVector> {
        if self.exhausted {
            return None;
        }
        let mut combined = TestVector::new();
        for stream in self.streams.iter_mut() {
            match stream.next() {
                Some(vector) => combined.extend(vector),
                None => {
                    self.exhausted = true;
                    return None;
                }
            }
        }
        Some(combined)
    }
}

/// Lazy enumeration of the non-empty subsets of a task pool.
///
/// Sizes `1..n` are enumerated as combinations in index order; size `n`
/// yields the whole pool once.
pub struct Subsets {
    pool: Vec<Arc<dyn Task>>,
    size: usize,
    indices: Option<Vec<usize>>,
}

impl Subsets {
    fn emit(&self, indices: &[usize]) -> Exercise {
        Exercise {
            tasks: indices.iter().map(|&i| Arc::clone(&self.pool[i])).collect(),
        }
    }
}

impl Iterator for Subsets {
    type Item = Exercise;

    fn next(&mut self) -> Option<Exercise> {
        let n = self.pool.len();
        loop {
            if self.size > n {
                return None;
            }
            if self.size == n {
                self.size += 1;
                return Some(Exercise {
                    tasks: self.pool.clone(),
                });
            }
            let size = self.size;
            match self.indices.take() {
                None => {
                    let first: Vec<usize> = (0..size).collect();
                    let exercise = self.emit(&first);
                    self.indices = Some(first);
                    return Some(exercise);
                }
                Some(mut indices) => {
                    let Some(i) = (0..size).rev().find(|&i| indices[i] != i + n - size) else {
                        self.size += 1;
                        continue;
                    };
                    indices[i] += 1;
                    for j in i + 1..size {
                        indices[j] = indices[j - 1] + 1;
                    }
                    let exercise = self.emit(&indices);
                    self.indices = Some(indices);
                    return Some(exercise);
                }
            }
        }
    }
}
