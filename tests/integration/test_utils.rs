//! Shared test utilities for integration tests
//!
//! Provides a task with hand-written vectors, a few misbehaving candidates and
//! helpers for building single-task exercises.

use kipygen::coroutine::{Coroutine, Exception, Outcome};
use kipygen::exercise::Exercise;
use kipygen::registry::TaskRegistry;
use kipygen::task::Task;
use kipygen::value::Value;
use kipygen::vector::{TestVector, VectorStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// A task whose vectors are given up front.
pub struct ScriptedTask {
    pub name: &'static str,
    pub vectors: Vec<TestVector>,
    pub factory: fn() -> Box<dyn Coroutine>,
}

impl Task for ScriptedTask {
    fn name(&self) -> &'static str {
        self.name
    }

    fn title(&self) -> &'static str {
        "Scripted"
    }

    fn complexity(&self) -> u32 {
        1
    }

    fn generator(&self) -> Box<dyn Coroutine> {
        (self.factory)()
    }

    fn check_values(&self) -> VectorStream {
        Box::new(self.vectors.clone().into_iter())
    }

    fn short_description(&self) -> &'static [&'static str] {
        &["Follow the script"]
    }

    fn origin(&self) -> &'static str {
        module_path!()
    }
}

/// Exercise made of one scripted task.
pub fn scripted_exercise(vectors: Vec<TestVector>, factory: fn() -> Box<dyn Coroutine>) -> Exercise {
    let task = ScriptedTask {
        name: "TaskScripted",
        vectors,
        factory,
    };
    Exercise::new(vec![Arc::new(task) as Arc<dyn Task>]).unwrap()
}

/// The reference generator of a builtin task.
pub fn builtin_generator(name: &str) -> Box<dyn Coroutine> {
    TaskRegistry::with_builtin_tasks()
        .unwrap()
        .get(name)
        .unwrap()
        .generator()
}

pub fn builtin_exercise(names: &[&str]) -> Exercise {
    let registry = TaskRegistry::with_builtin_tasks().unwrap();
    Exercise::new(names.iter().map(|name| registry.get(name).unwrap()).collect()).unwrap()
}

/// Echoes every input back and never finishes.
pub struct Echo;

impl Coroutine for Echo {
    fn send(&mut self, input: Value) -> Outcome {
        Outcome::Yielded(input)
    }
}

/// Echoes inputs until `None`, answering the first non-`None` input after a long pause.
pub struct SlowEcho {
    pub delay: Duration,
    pub slept: bool,
}

impl Coroutine for SlowEcho {
    fn send(&mut self, input: Value) -> Outcome {
        if !input.is_none() && !self.slept {
            self.slept = true;
            thread::sleep(self.delay);
        }
        Outcome::Yielded(input)
    }
}

/// Raises `ValueError('boom')` on the first non-`None` input.
pub struct Raiser;

impl Coroutine for Raiser {
    fn send(&mut self, input: Value) -> Outcome {
        if input.is_none() {
            Outcome::Yielded(Value::None)
        } else {
            Outcome::Raised(Exception::with_message("ValueError", "boom"))
        }
    }
}

/// Finishes on the first non-`None` input.
pub struct Quitter {
    pub done: bool,
}

impl Coroutine for Quitter {
    fn send(&mut self, input: Value) -> Outcome {
        if self.done || !input.is_none() {
            self.done = true;
            return Outcome::Finished;
        }
        Outcome::Yielded(Value::None)
    }
}

/// Answers a thrown exception with `'caught <kind>'`, echoes values and finishes on `None`.
pub struct Catcher;

impl Coroutine for Catcher {
    fn send(&mut self, input: Value) -> Outcome {
        if input.is_none() {
            return Outcome::Finished;
        }
        Outcome::Yielded(input)
    }

    fn prime(&mut self) -> Outcome {
        Outcome::Yielded(Value::None)
    }

    fn throw(&mut self, exception: Exception) -> Outcome {
        Outcome::Yielded(Value::Str(format!("caught {}", exception.kind)))
    }
}
