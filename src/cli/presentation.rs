//! CLI presentation: tables and colored reports. Pure formatting.

use crate::exercise::Exercise;
use crate::task::Task;
use crate::validator::Verdict;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::sync::Arc;

/// Outcome of checking one task's reference generator
#[derive(Debug, Clone)]
pub struct TaskCheck {
    pub name: String,
    pub verdict: Verdict,
}

pub fn format_task_table(tasks: &[Arc<dyn Task>]) -> String {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Name", "Title", "Complexity"]);
    for task in tasks {
        table.add_row(vec![
            task.name().to_string(),
            task.title().to_string(),
            task.complexity().to_string(),
        ]);
    }
    table.to_string()
}

/// Heading and description of one generated exercise.
pub fn format_generated(index: usize, exercise: &Exercise, description: &str) -> String {
    format!(
        "#{} {} [{}]\n{}",
        index + 1,
        exercise,
        exercise.task_names().join(", "),
        description
    )
}

pub fn format_check_report(checks: &[TaskCheck], color: bool) -> String {
    let mut lines = Vec::with_capacity(checks.len() + 1);
    for check in checks {
        let (status, detail) = match &check.verdict {
            Verdict::Pass { rounds } => ("PASS", format!("{} rounds", rounds)),
            Verdict::Fail(failure) => ("FAIL", failure.diagnostic.clone()),
        };
        let status = match (color, check.verdict.is_pass()) {
            (false, _) => status.to_string(),
            (true, true) => status.green().bold().to_string(),
            (true, false) => status.red().bold().to_string(),
        };
        lines.push(format!("{} {}: {}", status, check.name, detail));
    }
    let failed = checks.iter().filter(|c| !c.verdict.is_pass()).count();
    lines.push(format!(
        "{} checked, {} passed, {} failed",
        checks.len(),
        checks.len() - failed,
        failed
    ));
    lines.join("\n")
}
