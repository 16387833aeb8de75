/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Schedule invariants checked over generated task sets.

use proptest::prelude::*;

use edf_sched::scheduler::optimality::brute_force_max_lateness;
use edf_sched::{compute, EdfScheduler, SchedulerError, Task};

// ── Strategies ────────────────────────────────────────────────────────────────

/// Integer-valued times keep every sum exact, so equalities below are exact.
fn task_set(max_len: usize) -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec((1u32..20, -10i32..40), 1..=max_len).prop_map(|rows| {
        rows
            .into_iter()
            .enumerate()
            .map(|(i, (p, d))| Task::new(format!("t{i}"), p as f64, d as f64))
            .collect()
    })
}

/// Deadlines drawn from a tiny range so ties are common.
fn tie_heavy_task_set() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec((1u32..5, 0i32..3), 1..=12).prop_map(|rows| {
        rows
            .into_iter()
            .enumerate()
            .map(|(i, (p, d))| Task::new(format!("t{i}"), p as f64, d as f64))
            .collect()
    })
}

proptest! {
    #[test]
    fn schedule_has_no_gaps_or_overlaps(tasks in task_set(20)) {
        let s = compute(&tasks).unwrap();
        prop_assert_eq!(s.len(), tasks.len());
        prop_assert_eq!(s.entries()[0].start, 0.0);
        for pair in s.entries().windows(2) {
            prop_assert_eq!(pair[0].finish, pair[1].start);
        }
        let total: f64 = tasks.iter().map(|t| t.processing_time).sum();
        prop_assert_eq!(s.makespan(), total);
    }

    #[test]
    fn max_lateness_is_max_of_entry_lateness(tasks in task_set(20)) {
        let s = compute(&tasks).unwrap();
        let expected = s.iter().map(|e| e.lateness).fold(0.0_f64, f64::max);
        prop_assert_eq!(s.max_lateness(), expected);
        prop_assert!(s.max_lateness() >= 0.0);
        for e in &s {
            prop_assert_eq!(e.lateness, (e.finish - e.deadline).max(0.0));
        }
    }

    #[test]
    fn compute_is_idempotent(tasks in task_set(20)) {
        let a = compute(&tasks).unwrap();
        let b = compute(&tasks).unwrap();
        prop_assert_eq!(&a, &b);
        for (x, y) in a.iter().zip(&b) {
            prop_assert_eq!(x.finish.to_bits(), y.finish.to_bits());
            prop_assert_eq!(x.lateness.to_bits(), y.lateness.to_bits());
        }
    }

    #[test]
    fn order_is_by_deadline_with_stable_ties(tasks in tie_heavy_task_set()) {
        let s = compute(&tasks).unwrap();
        // Names are t<input index>, so stability means increasing index on ties.
        let index = |name: &str| name[1..].parse::<usize>().unwrap();
        for pair in s.entries().windows(2) {
            prop_assert!(pair[0].deadline <= pair[1].deadline);
            if pair[0].deadline == pair[1].deadline {
                prop_assert!(index(&pair[0].name) < index(&pair[1].name));
            }
        }
    }

    #[test]
    fn edf_is_optimal_against_every_permutation(tasks in task_set(6)) {
        let s = compute(&tasks).unwrap();
        let best = brute_force_max_lateness(&tasks).unwrap();
        prop_assert!(
            s.max_lateness() <= best,
            "EDF max lateness {} exceeds brute-force minimum {}",
            s.max_lateness(),
            best
        );
        prop_assert!(EdfScheduler::new().verify_optimal(&tasks, &s).unwrap());
    }

    #[test]
    fn any_non_positive_processing_time_aborts(
        mut tasks in task_set(10),
        pick in any::<prop::sample::Index>(),
        bad in -5i32..=0,
    ) {
        let i = pick.index(tasks.len());
        tasks[i].processing_time = bad as f64;
        let err = compute(&tasks).unwrap_err();
        let is_invalid_task = matches!(err, SchedulerError::InvalidTask { .. });
        prop_assert!(is_invalid_task);
    }
}

// ── Fixed scenarios ───────────────────────────────────────────────────────────

#[test]
fn empty_input_is_rejected() {
    assert_eq!(compute(&[]).unwrap_err(), SchedulerError::EmptyInput);
}

#[test]
fn reference_scenarios() {
    let cases: [(&[(&str, f64, f64)], &[&str], f64); 3] = [
        (&[("A", 3.0, 5.0), ("B", 2.0, 3.0), ("C", 1.0, 2.0)], &["C", "B", "A"], 1.0),
        (&[("Only", 5.0, 2.0)], &["Only"], 3.0),
        (&[("X", 2.0, 10.0), ("Y", 3.0, 10.0)], &["X", "Y"], 0.0),
    ];

    for (input, order, max_lateness) in cases {
        let tasks: Vec<Task> = input.iter().map(|&(n, p, d)| Task::new(n, p, d)).collect();
        let s = compute(&tasks).unwrap();
        let names: Vec<&str> = s.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, order);
        assert_eq!(s.max_lateness(), max_lateness);
    }
}
