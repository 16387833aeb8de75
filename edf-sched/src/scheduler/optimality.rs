/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Exhaustive optimality check for small task sets.
//!
//! # Theory
//! **Jackson (1955)**: on a single machine with all jobs released at time 0,
//! sequencing jobs in non-decreasing order of due date minimises the maximum
//! lateness
//!
//! $$L_{max} = \max_j \max(0, C_j - d_j)$$
//!
//! The proof is an exchange argument: swapping any adjacent pair that violates
//! deadline order never increases `L_max`.
//!
//! This module does not rely on the proof.  It enumerates all `n!` orderings
//! (Heap's algorithm) and returns the true minimum, so tests and the
//! `--verify` CLI flag can confirm the greedy answer directly.
//!
//! | n | permutations |
//! |---|---|
//! | 4 | 24 |
//! | 6 | 720 |
//! | 8 | 40 320 |

use crate::task::Task;

use super::{EdfScheduler, SchedulerError};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Largest task set the exhaustive search accepts.
pub const MAX_BRUTE_FORCE_TASKS: usize = 8;

// ── Public API ────────────────────────────────────────────────────────────────

/// Maximum lateness of running `order` back-to-back from time 0.
pub fn max_lateness_of(order: &[&Task]) -> f64 {
    let mut current_time = 0.0_f64;
    let mut max_lateness = 0.0_f64;
    for task in order {
        current_time += task.processing_time;
        max_lateness = max_lateness.max(current_time - task.deadline);
    }
    max_lateness
}

/// `max_lateness_of`, rejecting orderings whose timing leaves `f64` range.
fn finite_max_lateness(order: &[&Task]) -> Result<f64, SchedulerError> {
    let value = max_lateness_of(order);
    if value.is_finite() {
        return Ok(value);
    }
    let makespan: f64 = order.iter().map(|t| t.processing_time).sum();
    Err(SchedulerError::Overflow {
        task: order.last().map(|t| t.name.clone()).unwrap_or_default(),
        finish: makespan,
        lateness: value,
    })
}

/// Smallest maximum lateness over every ordering of `tasks`.
///
/// Tasks are validated with the same rules as
/// [`EdfScheduler::compute`](super::EdfScheduler::compute).
///
/// # Errors
/// The same validation and overflow errors as `compute`, plus
/// [`SchedulerError::TooManyTasksForBruteForce`] when `tasks.len()` exceeds
/// [`MAX_BRUTE_FORCE_TASKS`].
pub fn brute_force_max_lateness(tasks: &[Task]) -> Result<f64, SchedulerError> {
    if tasks.is_empty() {
        return Err(SchedulerError::EmptyInput);
    }
    if tasks.len() > MAX_BRUTE_FORCE_TASKS {
        return Err(SchedulerError::TooManyTasksForBruteForce {
            count: tasks.len(),
            limit: MAX_BRUTE_FORCE_TASKS,
        });
    }
    for task in tasks {
        EdfScheduler::validate_task(task)?;
    }

    let mut order: Vec<&Task> = tasks.iter().collect();
    let mut best = finite_max_lateness(&order)?;

    // Heap's algorithm, iterative form.
    let n = order.len();
    let mut c = vec![0usize; n];
    let mut i = 1;
    while i < n {
        if c[i] < i {
            if i % 2 == 0 {
                order.swap(0, i);
            } else {
                order.swap(c[i], i);
            }
            best = best.min(finite_max_lateness(&order)?);
            c[i] += 1;
            i = 1;
        } else {
            c[i] = 0;
            i += 1;
        }
    }

    Ok(best)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_lateness_of_follows_given_order() {
        let a = Task::new("A", 3.0, 5.0);
        let b = Task::new("B", 2.0, 3.0);
        let c = Task::new("C", 1.0, 2.0);
        assert_eq!(max_lateness_of(&[&c, &b, &a]), 1.0);
        assert_eq!(max_lateness_of(&[&a, &b, &c]), 4.0);
    }

    #[test]
    fn max_lateness_of_is_never_negative() {
        let t = Task::new("slack", 1.0, 50.0);
        assert_eq!(max_lateness_of(&[&t]), 0.0);
    }

    #[test]
    fn brute_force_finds_known_minimum() {
        let tasks = vec![
            Task::new("A", 3.0, 5.0),
            Task::new("B", 2.0, 3.0),
            Task::new("C", 1.0, 2.0),
        ];
        assert_eq!(brute_force_max_lateness(&tasks).unwrap(), 1.0);
    }

    #[test]
    fn brute_force_single_task() {
        let tasks = vec![Task::new("Only", 5.0, 2.0)];
        assert_eq!(brute_force_max_lateness(&tasks).unwrap(), 3.0);
    }

    #[test]
    fn brute_force_visits_every_permutation() {
        // Only the ordering d, c, b, a meets every deadline; any other
        // ordering is late.  Input is given in the worst possible order.
        let tasks = vec![
            Task::new("a", 1.0, 4.0),
            Task::new("b", 1.0, 3.0),
            Task::new("c", 1.0, 2.0),
            Task::new("d", 1.0, 1.0),
        ];
        assert_eq!(brute_force_max_lateness(&tasks).unwrap(), 0.0);
    }

    #[test]
    fn brute_force_rejects_empty_input() {
        assert_eq!(
            brute_force_max_lateness(&[]).unwrap_err(),
            SchedulerError::EmptyInput
        );
    }

    #[test]
    fn brute_force_rejects_large_sets() {
        let tasks: Vec<Task> = (0..MAX_BRUTE_FORCE_TASKS + 1)
            .map(|i| Task::new(format!("t{i}"), 1.0, i as f64))
            .collect();
        assert!(matches!(
            brute_force_max_lateness(&tasks),
            Err(SchedulerError::TooManyTasksForBruteForce { count: 9, limit: 8 })
        ));
    }

    #[test]
    fn brute_force_rejects_overflowing_task_sets() {
        let tasks = vec![Task::new("a", 1e308, 0.0), Task::new("b", 1e308, 1.0)];
        assert!(matches!(
            brute_force_max_lateness(&tasks),
            Err(SchedulerError::Overflow { .. })
        ));
    }

    #[test]
    fn brute_force_validates_tasks() {
        let tasks = vec![Task::new("bad", 0.0, 1.0)];
        assert!(matches!(
            brute_force_max_lateness(&tasks),
            Err(SchedulerError::InvalidTask { .. })
        ));
    }
}
