/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! EDF lateness scheduler
//!
//! Sequences tasks on a single machine in Earliest-Deadline-First order and
//! reports the resulting maximum lateness.
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── task          – Task input, ScheduledEntry / Schedule output
//! ├── scheduler/    – EdfScheduler, SchedulerError, brute-force optimality check
//! ├── input/        – CSV / YAML / inline task-set loading
//! └── report        – summary, table / CSV / YAML renderers
//! ```

pub mod input;
pub mod report;
pub mod scheduler;
pub mod task;

pub use scheduler::{compute, EdfScheduler, SchedulerError};
pub use task::{Schedule, ScheduledEntry, Task, TaskField};
