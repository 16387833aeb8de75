/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core task data structures for the EDF scheduler.
//!
//! Two distinct types model the two sides of the scheduling pipeline:
//!
//! ```text
//! loader  ──(TaskName, ProcessingTime, Deadline)──►  Task  ──(EdfScheduler)──►  Schedule
//!                                                     ↑ input                     ↑ output
//!                                                     borrowed, never mutated     entries + max lateness
//! ```
//!
//! # Ownership model
//! `Task` values are **borrowed** by the scheduler for the duration of one
//! `compute()` call.  The caller keeps ownership of its `Vec<Task>`; the
//! scheduler allocates a fresh [`Schedule`] for every call and never writes
//! back into the input.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::scheduler::SchedulerError;

// ── TaskField ─────────────────────────────────────────────────────────────────

/// Names a numeric field of a [`Task`] in validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    ProcessingTime,
    Deadline,
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskField::ProcessingTime => write!(f, "processing_time"),
            TaskField::Deadline => write!(f, "deadline"),
        }
    }
}

// ── Task (input) ──────────────────────────────────────────────────────────────

/// A single job waiting for the machine.
///
/// All tasks are available at time 0.  Nothing here is validated on
/// construction; [`EdfScheduler::compute`](crate::scheduler::EdfScheduler::compute)
/// checks every task before it sorts anything.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Task {
    /// Display label.  Not required to be unique.
    pub name: String,

    /// Time the task occupies the machine once started.  Must be `> 0`.
    pub processing_time: f64,

    /// Time by which the task should be finished.  Any finite value is legal,
    /// including values at or below zero.
    pub deadline: f64,
}

impl Task {
    pub fn new(name: impl Into<String>, processing_time: f64, deadline: f64) -> Self {
        Self {
            name: name.into(),
            processing_time,
            deadline,
        }
    }

    /// Build a task from untyped text fields, as they arrive from a CSV cell
    /// or a command-line entry.
    ///
    /// Surrounding whitespace is ignored.  Text that does not parse as a
    /// number produces [`SchedulerError::TypeValidation`]; the positivity of
    /// `processing_time` is left to the scheduler.
    pub fn from_fields(
        name: impl Into<String>,
        processing_time: &str,
        deadline: &str,
    ) -> Result<Self, SchedulerError> {
        let name = name.into();
        let processing_time = parse_number(&name, TaskField::ProcessingTime, processing_time)?;
        let deadline = parse_number(&name, TaskField::Deadline, deadline)?;
        Ok(Self {
            name,
            processing_time,
            deadline,
        })
    }
}

/// Parse one numeric field, mapping failures to `TypeValidation`.
pub(crate) fn parse_number(task: &str, field: TaskField, raw: &str) -> Result<f64, SchedulerError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| SchedulerError::TypeValidation {
            task: task.to_string(),
            field,
            value: raw.to_string(),
        })
}

// ── ScheduledEntry (output) ───────────────────────────────────────────────────

/// One bar of the timeline: the task occupies `[start, finish)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledEntry {
    pub name: String,
    pub start: f64,
    pub finish: f64,
    pub deadline: f64,
    /// `max(0, finish - deadline)`.
    pub lateness: f64,
}

impl ScheduledEntry {
    /// Returns `true` if the task finishes after its deadline.
    pub fn is_late(&self) -> bool {
        self.lateness > 0.0
    }
}

// ── Schedule ──────────────────────────────────────────────────────────────────

/// Result of one scheduling run.
///
/// Entries are in execution order and tile `[0, makespan)` with no gaps or
/// overlaps.  Only the scheduler can build one; after that it is read-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    entries: Vec<ScheduledEntry>,
    max_lateness: f64,
}

impl Schedule {
    pub(crate) fn new(entries: Vec<ScheduledEntry>, max_lateness: f64) -> Self {
        Self {
            entries,
            max_lateness,
        }
    }

    /// Entries in execution order.
    pub fn entries(&self) -> &[ScheduledEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduledEntry> {
        self.entries.iter()
    }

    /// Largest lateness of any entry (never negative).
    pub fn max_lateness(&self) -> f64 {
        self.max_lateness
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false` for a schedule returned by the scheduler.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finish time of the last entry — the total time the machine is busy.
    pub fn makespan(&self) -> f64 {
        self.entries.last().map(|e| e.finish).unwrap_or(0.0)
    }

    /// Entries that finish after their deadline, in execution order.
    pub fn late_entries(&self) -> impl Iterator<Item = &ScheduledEntry> {
        self.entries.iter().filter(|e| e.is_late())
    }

    /// Sum of lateness over all entries.
    pub fn total_lateness(&self) -> f64 {
        self.entries.iter().map(|e| e.lateness).sum()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ScheduledEntry;
    type IntoIter = std::slice::Iter<'a, ScheduledEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
