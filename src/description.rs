//! Student-facing description of an exercise.
//!
//! Lists the member tasks in order, shows a few composite rounds as aligned
//! send/awaited lines and explains every marker those rounds use.

use crate::diff;
use crate::exercise::Exercise;
use crate::vector::{Expected, Input, TestVector};
use std::fmt::Write;

const INPUT_LABEL: &str = "Input to the generator:    ";
const OUTPUT_LABEL: &str = "Output from the generator: ";

/// Render the description of `exercise` with up to `samples` example rounds.
pub fn describe(exercise: &Exercise, samples: usize) -> String {
    let mut out = String::from(
        "> Build a generator that performs several tasks one after another:",
    );

    let width = if exercise.tasks().len() >= 10 { 4 } else { 3 };
    for (index, task) in exercise.tasks().iter().enumerate() {
        let prefix = format!("{:>width$}", format!("{}. ", index + 1), width = width);
        let continuation = format!("\n{}", " ".repeat(prefix.chars().count()));
        let _ = write!(
            out,
            "\n{}{}",
            prefix,
            task.short_description().join(&continuation)
        );
    }

    let mut markers = Markers::default();
    if samples > 0 {
        out.push_str("\n> Example input and output (lists are aligned by element):");
    }
    for vector in exercise.combined_vectors().take(samples) {
        markers.collect(&vector);
        let alignment = diff::align(vector.send(), vector.awaited());
        let _ = write!(out, "\n{}{}", INPUT_LABEL, alignment.send);
        let _ = write!(out, "\n{}{}", OUTPUT_LABEL, alignment.awaited);
    }

    if !markers.entries.is_empty() {
        out.push_str("\n> Special values:");
        for (name, description) in &markers.entries {
            let _ = write!(out, "\n{} - {}", name, description);
        }
    }
    out
}

/// Distinct markers in first-seen order
#[derive(Default)]
struct Markers {
    entries: Vec<(String, String)>,
}

impl Markers {
    fn collect(&mut self, vector: &TestVector) {
        for (input, expected) in vector.steps() {
            match input {
                Input::Value(_) => {}
                Input::Wildcard(wildcard) => self.add(wildcard.name(), wildcard.description()),
                Input::Hook(hook) => self.add(hook.name(), hook.description()),
            }
            if let Expected::Checker(checker) = expected {
                self.add(checker.name(), checker.description());
            }
        }
    }

    fn add(&mut self, name: String, description: String) {
        if !self.entries.iter().any(|(known, _)| *known == name) {
            self.entries.push((name, description));
        }
    }
}
