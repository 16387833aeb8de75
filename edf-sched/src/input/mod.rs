//! Task-set loading.
//!
//! Three sources feed the scheduler, all producing plain `Vec<Task>`:
//!
//! * **CSV** — header must contain `TaskName`, `ProcessingTime` and
//!   `Deadline`; extra columns are ignored and column order is free.
//!   ```text
//!   TaskName,ProcessingTime,Deadline
//!   A,3,5
//!   B,2,3
//!   ```
//! * **YAML** —
//!   ```yaml
//!   tasks:
//!     - name: A
//!       processing_time: 3
//!       deadline: 5
//!   ```
//! * **Inline** — `NAME:PROCESSING_TIME:DEADLINE` strings from the command
//!   line.
//!
//! A task with a blank name is labelled `Task<n>` (1-based position).
//!
//! Numeric cells that are not numbers surface as
//! [`SchedulerError::TypeValidation`] inside the returned `anyhow::Error`;
//! callers can recover it with `downcast_ref::<SchedulerError>()`.

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::scheduler::SchedulerError;
use crate::task::{parse_number, Task, TaskField};

// ── Constants ─────────────────────────────────────────────────────────────────

/// CSV header naming the task label.
pub const COL_TASK_NAME: &str = "TaskName";
/// CSV header naming the processing time.
pub const COL_PROCESSING_TIME: &str = "ProcessingTime";
/// CSV header naming the deadline.
pub const COL_DEADLINE: &str = "Deadline";

const REQUIRED_COLUMNS: [&str; 3] = [COL_TASK_NAME, COL_PROCESSING_TIME, COL_DEADLINE];

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
#[derive(Debug, Deserialize)]
struct TaskSetFile {
    #[serde(default)]
    tasks: Vec<TaskEntry>,
}

/// Per-task fields as they appear in the YAML file.
///
/// Numeric fields are kept as raw YAML values so that a quoted number
/// (`"3"`) is accepted and anything else is reported as a type error rather
/// than a generic parse failure.
#[derive(Debug, Deserialize)]
struct TaskEntry {
    #[serde(default)]
    name: Option<String>,
    processing_time: serde_yaml::Value,
    deadline: serde_yaml::Value,
}

/// Label used when a record carries no name.
fn default_name(index: usize) -> String {
    format!("Task{}", index + 1)
}

fn name_or_default(name: &str, index: usize) -> String {
    let name = name.trim();
    if name.is_empty() {
        default_name(index)
    } else {
        name.to_string()
    }
}

/// Convert one YAML scalar into a number.
fn yaml_number(task: &str, field: TaskField, value: &serde_yaml::Value) -> Result<f64, SchedulerError> {
    match value {
        serde_yaml::Value::Number(n) => n.as_f64().ok_or_else(|| SchedulerError::TypeValidation {
            task: task.to_string(),
            field,
            value: n.to_string(),
        }),
        serde_yaml::Value::String(s) => parse_number(task, field, s),
        other => Err(SchedulerError::TypeValidation {
            task: task.to_string(),
            field,
            value: serde_yaml::to_string(other)
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
        }),
    }
}

// ── TaskSetLoader ─────────────────────────────────────────────────────────────

/// Collects the task set for one scheduling run.
#[derive(Debug, Default)]
pub struct TaskSetLoader {
    tasks: Vec<Task>,
}

impl TaskSetLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `path` and replace the current task set with its contents.
    ///
    /// The format is chosen from the extension: `.csv`, `.yaml` or `.yml`
    /// (case-insensitive).
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, has an unsupported
    /// extension, lacks a required CSV column, or holds a non-numeric value.
    pub fn load_from_file(&mut self, path: &Path) -> Result<()> {
        info!("Loading task set from: {}", path.display());

        // Reset state before (re-)loading
        self.tasks.clear();

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let tasks = match ext.as_str() {
            "csv" => {
                let file = std::fs::File::open(path)
                    .with_context(|| format!("Cannot open task file: {}", path.display()))?;
                read_csv(file)
                    .with_context(|| format!("Failed to read CSV file: {}", path.display()))?
            }
            "yaml" | "yml" => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Cannot open task file: {}", path.display()))?;
                read_yaml(&content)
                    .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?
            }
            other => bail!(
                "unsupported task file extension '{}' for {} (expected csv, yaml or yml)",
                other,
                path.display()
            ),
        };

        if tasks.is_empty() {
            warn!("No tasks found in {}", path.display());
        }

        self.tasks = tasks;

        info!("Successfully loaded {} task(s)", self.tasks.len());
        for task in &self.tasks {
            debug!(
                "  Task: {} | processing_time: {} | deadline: {}",
                task.name, task.processing_time, task.deadline,
            );
        }

        Ok(())
    }

    /// Append tasks given as `NAME:PROCESSING_TIME:DEADLINE` strings.
    ///
    /// Blank names are numbered after the tasks already held.
    pub fn add_inline<I, S>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for entry in entries {
            let task = parse_inline(entry.as_ref(), self.tasks.len())?;
            debug!(
                "  Inline task: {} | processing_time: {} | deadline: {}",
                task.name, task.processing_time, task.deadline,
            );
            self.tasks.push(task);
        }
        Ok(())
    }

    /// Tasks collected so far, in input order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }
}

// ── Format readers ────────────────────────────────────────────────────────────

/// Read a CSV task table.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Task>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().context("Failed to read CSV header")?.clone();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let (name_idx, proc_idx, deadline_idx) = match (
        column(COL_TASK_NAME),
        column(COL_PROCESSING_TIME),
        column(COL_DEADLINE),
    ) {
        (Some(n), Some(p), Some(d)) => (n, p, d),
        _ => bail!(
            "CSV must include columns: {} (found: {})",
            REQUIRED_COLUMNS.join(", "),
            headers.iter().collect::<Vec<_>>().join(", ")
        ),
    };

    let mut tasks = Vec::new();
    for (index, record) in rdr.records().enumerate() {
        // Header is line 1.
        let line = index + 2;
        let record = record.with_context(|| format!("Malformed CSV record at line {line}"))?;
        let field = |i: usize| record.get(i).unwrap_or("");

        let name = name_or_default(field(name_idx), index);
        let task = Task::from_fields(name, field(proc_idx), field(deadline_idx))
            .with_context(|| format!("Invalid value at line {line}"))?;
        tasks.push(task);
    }

    Ok(tasks)
}

/// Read a YAML task set.
pub fn read_yaml(content: &str) -> Result<Vec<Task>> {
    let file: TaskSetFile = serde_yaml::from_str(content).context("Invalid task set layout")?;

    let mut tasks = Vec::with_capacity(file.tasks.len());
    for (index, entry) in file.tasks.into_iter().enumerate() {
        let name = name_or_default(entry.name.as_deref().unwrap_or(""), index);
        let processing_time = yaml_number(&name, TaskField::ProcessingTime, &entry.processing_time)
            .with_context(|| format!("Invalid value in task #{}", index + 1))?;
        let deadline = yaml_number(&name, TaskField::Deadline, &entry.deadline)
            .with_context(|| format!("Invalid value in task #{}", index + 1))?;
        tasks.push(Task {
            name,
            processing_time,
            deadline,
        });
    }

    Ok(tasks)
}

/// Parse one `NAME:PROCESSING_TIME:DEADLINE` entry.
///
/// Splits from the right, so names may themselves contain `:`.
pub fn parse_inline(entry: &str, index: usize) -> Result<Task> {
    let mut parts = entry.rsplitn(3, ':');
    let (deadline, processing_time, name) = match (parts.next(), parts.next(), parts.next()) {
        (Some(d), Some(p), Some(n)) => (d, p, n),
        _ => bail!(
            "invalid task entry '{}' (expected NAME:PROCESSING_TIME:DEADLINE)",
            entry
        ),
    };

    let name = name_or_default(name, index);
    Task::from_fields(name, processing_time, deadline)
        .with_context(|| format!("Invalid task entry '{entry}'"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
