//! Single-machine Earliest-Deadline-First scheduler.
//!
//! [`EdfScheduler`] sequences a set of [`Task`]s on one machine, starting at
//! time 0, with no preemption and no idle time.  Tasks run in ascending
//! deadline order; ties keep their input order.  The result is a
//! [`Schedule`] — one [`ScheduledEntry`] per task — together with the
//! maximum lateness over all tasks.
//!
//! Ordering by non-decreasing deadline minimises the maximum lateness over
//! every possible sequence (Jackson's rule).  [`optimality`] holds an
//! exhaustive check used to confirm this on small inputs.
//!
//! # Design decisions
//!
//! | Topic | Choice |
//! |---|---|
//! | State | Stateless `compute()` — all per-run state is local |
//! | Input | `&[Task]` borrow — the caller's vector is never reordered |
//! | Ties | `slice::sort_by` is stable, so equal deadlines keep input order |
//! | Error returns | `Result<Schedule, SchedulerError>`, validated before sorting |
//! | Thread safety | `Send + Sync` (zero-sized, no interior mutability) |
//!
//! # Example
//! ```rust
//! use edf_sched::scheduler::EdfScheduler;
//! use edf_sched::task::Task;
//!
//! let tasks = vec![
//!     Task::new("A", 3.0, 5.0),
//!     Task::new("B", 2.0, 3.0),
//!     Task::new("C", 1.0, 2.0),
//! ];
//! let schedule = EdfScheduler::new().compute(&tasks).unwrap();
//! let order: Vec<&str> = schedule.iter().map(|e| e.name.as_str()).collect();
//! assert_eq!(order, ["C", "B", "A"]);
//! assert_eq!(schedule.max_lateness(), 1.0);
//! ```

pub mod error;
pub mod optimality;

pub use error::SchedulerError;

use std::cmp::Ordering;

use tracing::{debug, info, warn};

use crate::task::{Schedule, ScheduledEntry, Task, TaskField};

use optimality::brute_force_max_lateness;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Absolute tolerance when comparing EDF's maximum lateness against the
/// exhaustive minimum.  Both sides sum the same floats in different orders.
const OPTIMALITY_TOLERANCE: f64 = 1e-9;

/// Shorthand for [`EdfScheduler::compute`].
pub fn compute(tasks: &[Task]) -> Result<Schedule, SchedulerError> {
    EdfScheduler::new().compute(tasks)
}

// ── EdfScheduler ──────────────────────────────────────────────────────────────

/// The EDF lateness scheduler.
///
/// Carries no state between calls; every `compute()` allocates its own
/// working set and drops it before returning.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdfScheduler;

impl EdfScheduler {
    pub fn new() -> Self {
        Self
    }

    // ── Public entry point ────────────────────────────────────────────────────

    /// Sequence `tasks` in Earliest-Deadline-First order and report the
    /// resulting maximum lateness.
    ///
    /// # Errors
    /// * [`SchedulerError::EmptyInput`] — `tasks` is empty.
    /// * [`SchedulerError::TypeValidation`] — a `processing_time` or
    ///   `deadline` is NaN or infinite.
    /// * [`SchedulerError::InvalidTask`] — a `processing_time` is `<= 0`.
    /// * [`SchedulerError::Overflow`] — a finish time or lateness leaves the
    ///   finite `f64` range.
    ///
    /// The first offending task (in input order) is reported and no partial
    /// schedule is produced.
    pub fn compute(&self, tasks: &[Task]) -> Result<Schedule, SchedulerError> {
        // ── Preconditions ─────────────────────────────────────────────────────
        if tasks.is_empty() {
            return Err(SchedulerError::EmptyInput);
        }
        for task in tasks {
            Self::validate_task(task)?;
        }

        info!(task_count = tasks.len(), "=== EdfScheduler::compute() ===");

        // ── Earliest deadline first ───────────────────────────────────────────
        let ordered = Self::sort_by_deadline(tasks);

        // ── Sequential, non-preemptive simulation ─────────────────────────────
        let schedule = Self::simulate(&ordered)?;

        info!(
            task_count = schedule.len(),
            max_lateness = schedule.max_lateness(),
            makespan = schedule.makespan(),
            late_tasks = schedule.late_entries().count(),
            "=== Scheduling complete ==="
        );

        Ok(schedule)
    }

    /// Check that `schedule` (as produced by [`compute`](Self::compute) for
    /// `tasks`) achieves the smallest maximum lateness of any ordering.
    ///
    /// Enumerates every permutation, so it is limited to
    /// [`optimality::MAX_BRUTE_FORCE_TASKS`] tasks.
    pub fn verify_optimal(
        &self,
        tasks: &[Task],
        schedule: &Schedule,
    ) -> Result<bool, SchedulerError> {
        let best = brute_force_max_lateness(tasks)?;
        let optimal = schedule.max_lateness() <= best + OPTIMALITY_TOLERANCE;

        if optimal {
            debug!(
                edf = schedule.max_lateness(),
                brute_force = best,
                "EDF maximum lateness matches exhaustive minimum"
            );
        } else {
            warn!(
                edf = schedule.max_lateness(),
                brute_force = best,
                "EDF maximum lateness exceeds exhaustive minimum"
            );
        }

        Ok(optimal)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Per-task validation gate.
    ///
    /// Checks (in order):
    /// 1. `processing_time` is a finite number.
    /// 2. `deadline` is a finite number.
    /// 3. `processing_time > 0`.
    pub(crate) fn validate_task(task: &Task) -> Result<(), SchedulerError> {
        for (field, value) in [
            (TaskField::ProcessingTime, task.processing_time),
            (TaskField::Deadline, task.deadline),
        ] {
            if !value.is_finite() {
                return Err(SchedulerError::TypeValidation {
                    task: task.name.clone(),
                    field,
                    value: value.to_string(),
                });
            }
        }

        if task.processing_time <= 0.0 {
            return Err(SchedulerError::InvalidTask {
                task: task.name.clone(),
                field: TaskField::ProcessingTime,
                value: task.processing_time,
            });
        }

        Ok(())
    }

    /// Stable sort by ascending deadline.  Borrows, so the caller's slice
    /// keeps its order.
    fn sort_by_deadline(tasks: &[Task]) -> Vec<&Task> {
        let mut ordered: Vec<&Task> = tasks.iter().collect();
        // Deadlines are finite after validation, so partial_cmp never fails.
        ordered.sort_by(|a, b| {
            a.deadline
                .partial_cmp(&b.deadline)
                .unwrap_or(Ordering::Equal)
        });
        ordered
    }

    /// Run `ordered` back-to-back from time 0 and build the schedule.
    ///
    /// Fails on the first task whose finish time or lateness is not finite.
    pub(crate) fn simulate(ordered: &[&Task]) -> Result<Schedule, SchedulerError> {
        let mut current_time = 0.0_f64;
        let mut max_lateness = 0.0_f64;
        let mut entries = Vec::with_capacity(ordered.len());

        for task in ordered {
            let start = current_time;
            let finish = start + task.processing_time;
            let lateness = (finish - task.deadline).max(0.0);
            if !finish.is_finite() || !lateness.is_finite() {
                return Err(SchedulerError::Overflow {
                    task: task.name.clone(),
                    finish,
                    lateness,
                });
            }
            max_lateness = max_lateness.max(lateness);

            if lateness > 0.0 {
                warn!(
                    task = %task.name,
                    finish = finish,
                    deadline = task.deadline,
                    lateness = lateness,
                    "✗ misses deadline"
                );
            } else {
                debug!(
                    task = %task.name,
                    start = start,
                    finish = finish,
                    deadline = task.deadline,
                    "✓ scheduled"
                );
            }

            entries.push(ScheduledEntry {
                name: task.name.clone(),
                start,
                finish,
                deadline: task.deadline,
                lateness,
            });
            current_time = finish;
        }

        Ok(Schedule::new(entries, max_lateness))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
