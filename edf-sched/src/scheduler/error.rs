/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error type for the EDF scheduler.
//!
//! Every variant names the task and field that caused the failure, so the
//! presentation layer can show the user exactly which record to fix without
//! parsing the message text.
//!
//! | Variant | Raised when |
//! |---|---|
//! | `EmptyInput` | `compute()` got no tasks |
//! | `InvalidTask` | a `processing_time` is zero or negative |
//! | `TypeValidation` | a numeric field is NaN, infinite, or unparsable text |
//! | `Overflow` | a finish time or lateness derived from finite inputs is not finite |
//! | `TooManyTasksForBruteForce` | the exhaustive optimality check was asked to enumerate too many permutations |
//!
//! **Do not** replace these with `anyhow::Error` in library code — the loaders
//! wrap them in `anyhow` context, and callers rely on `downcast_ref` to recover
//! the structured variant.

use thiserror::Error;

use crate::task::TaskField;

/// Top-level error type returned by
/// [`EdfScheduler::compute()`](super::EdfScheduler::compute).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedulerError {
    /// `compute()` was called with an empty task list.
    #[error("no tasks provided — task list is empty")]
    EmptyInput,

    /// A task violates the positive processing-time invariant.
    #[error("task '{task}' has invalid {field} {value} — must be greater than zero")]
    InvalidTask {
        task: String,
        field: TaskField,
        value: f64,
    },

    /// A field that must be a finite number is not one.
    ///
    /// `value` carries the offending text as received (or the formatted float
    /// for NaN / infinity).
    #[error("task '{task}' has non-numeric {field}: '{value}'")]
    TypeValidation {
        task: String,
        field: TaskField,
        value: String,
    },

    /// Finite inputs produced a finish time or lateness beyond `f64` range.
    ///
    /// `task` is the first task (in execution order) whose timing overflowed.
    #[error("task '{task}' overflows the time range (finish {finish}, lateness {lateness})")]
    Overflow {
        task: String,
        finish: f64,
        lateness: f64,
    },

    /// The brute-force optimality check refuses task sets whose permutation
    /// count would be unreasonable.
    #[error("brute-force check supports at most {limit} tasks, got {count}")]
    TooManyTasksForBruteForce { count: usize, limit: usize },
}
