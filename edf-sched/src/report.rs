/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Presentation-ready views of a [`Schedule`].
//!
//! ```text
//! Schedule ──► ScheduleSummary   (max lateness, task count, total time, ...)
//!          ──► render_table()    aligned text, one row per timeline bar
//!          ──► write_csv()       Task,Start,Finish,Deadline,Lateness
//!          ──► to_yaml()         summary + entries
//! ```
//!
//! Each entry maps to one chart bar spanning `[start, finish)` with a marker
//! at `deadline`; nothing here draws, it only shapes the data.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::task::{Schedule, ScheduledEntry};

/// Column headers shared by the table and CSV renderers.
const HEADERS: [&str; 5] = ["Task", "Start", "Finish", "Deadline", "Lateness"];

// ── ScheduleSummary ───────────────────────────────────────────────────────────

/// Lateness of one task, in execution order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskLateness {
    pub name: String,
    pub lateness: f64,
}

/// Headline figures for one schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleSummary {
    /// Largest lateness of any task.
    pub max_lateness: f64,
    /// Number of scheduled tasks.
    pub total_tasks: usize,
    /// Makespan: finish time of the last task.
    pub total_time: f64,
    /// Tasks finishing after their deadline.
    pub late_tasks: usize,
    /// Sum of lateness over all tasks.
    pub total_lateness: f64,
    /// Per-task lateness distribution, in execution order.
    pub lateness_by_task: Vec<TaskLateness>,
}

impl ScheduleSummary {
    pub fn from_schedule(schedule: &Schedule) -> Self {
        Self {
            max_lateness: schedule.max_lateness(),
            total_tasks: schedule.len(),
            total_time: schedule.makespan(),
            late_tasks: schedule.late_entries().count(),
            total_lateness: schedule.total_lateness(),
            lateness_by_task: schedule
                .iter()
                .map(|e| TaskLateness {
                    name: e.name.clone(),
                    lateness: e.lateness,
                })
                .collect(),
        }
    }
}

// ── Renderers ─────────────────────────────────────────────────────────────────

/// Cells of one entry as shown by every tabular renderer.
///
/// Times use `f64`'s `Display`, so whole numbers print without a fraction
/// (`3`, not `3.0`).
fn entry_cells(e: &ScheduledEntry) -> [String; 5] {
    [
        e.name.clone(),
        e.start.to_string(),
        e.finish.to_string(),
        e.deadline.to_string(),
        e.lateness.to_string(),
    ]
}

/// Render the schedule as a left-aligned text table followed by the summary
/// lines.
pub fn render_table(schedule: &Schedule) -> String {
    let rows: Vec<[String; 5]> = schedule.iter().map(entry_cells).collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut push_row = |cells: &[&str]| {
        let line: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{cell:<w$}"))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    };

    push_row(&HEADERS);
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        push_row(&cells);
    }

    let summary = ScheduleSummary::from_schedule(schedule);
    out.push('\n');
    out.push_str(&format!("Maximum lateness: {}\n", summary.max_lateness));
    out.push_str(&format!("Total tasks:      {}\n", summary.total_tasks));
    out.push_str(&format!("Total time:       {}\n", summary.total_time));
    out.push_str(&format!("Late tasks:       {}\n", summary.late_tasks));
    out
}

/// Write one CSV row per entry, with a `Task,Start,Finish,Deadline,Lateness`
/// header.
pub fn write_csv<W: Write>(schedule: &Schedule, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADERS).context("Failed to write CSV header")?;
    for e in schedule {
        wtr.write_record(entry_cells(e)).context("Failed to write CSV row")?;
    }
    wtr.flush().context("Failed to flush CSV output")?;
    Ok(())
}

#[derive(Serialize)]
struct YamlReport<'a> {
    summary: ScheduleSummary,
    schedule: &'a Schedule,
}

/// Serialise the summary and every entry as one YAML document.
pub fn to_yaml(schedule: &Schedule) -> Result<String> {
    let report = YamlReport {
        summary: ScheduleSummary::from_schedule(schedule),
        schedule,
    };
    serde_yaml::to_string(&report).context("Failed to serialise schedule as YAML")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::compute;
    use crate::task::Task;

    fn sample() -> Schedule {
        compute(&[
            Task::new("A", 3.0, 5.0),
            Task::new("B", 2.0, 3.0),
            Task::new("C", 1.0, 2.0),
        ])
        .unwrap()
    }

    #[test]
    fn summary_matches_schedule() {
        let s = ScheduleSummary::from_schedule(&sample());
        assert_eq!(s.max_lateness, 1.0);
        assert_eq!(s.total_tasks, 3);
        assert_eq!(s.total_time, 6.0);
        assert_eq!(s.late_tasks, 1);
        assert_eq!(s.total_lateness, 1.0);
        let names: Vec<&str> = s.lateness_by_task.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["C", "B", "A"]);
        assert_eq!(s.lateness_by_task[2].lateness, 1.0);
    }

    #[test]
    fn table_has_header_rows_and_summary() {
        let table = render_table(&sample());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Task  Start  Finish  Deadline  Lateness");
        assert_eq!(lines[1], "C     0      1       2         0");
        assert_eq!(lines[3], "A     3      6       5         1");
        assert!(table.contains("Maximum lateness: 1\n"));
        assert!(table.contains("Total time:       6\n"));
    }

    #[test]
    fn table_widens_for_long_names() {
        let s = compute(&[Task::new("a-rather-long-name", 0.5, 1.0)]).unwrap();
        let table = render_table(&s);
        let first = table.lines().next().unwrap();
        assert!(first.starts_with("Task                "));
        assert!(table.contains("a-rather-long-name  0      0.5"));
    }

    #[test]
    fn csv_output_has_fixed_header() {
        let mut buf = Vec::new();
        write_csv(&sample(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Task,Start,Finish,Deadline,Lateness"));
        assert_eq!(lines.next(), Some("C,0,1,2,0"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn csv_and_table_format_numbers_alike() {
        let s = compute(&[Task::new("a", 0.5, 0.25), Task::new("b", 2.0, 1.0)]).unwrap();

        let mut buf = Vec::new();
        write_csv(&s, &mut buf).unwrap();
        let csv_text = String::from_utf8(buf).unwrap();
        let table = render_table(&s);

        for (csv_line, table_line) in csv_text.lines().zip(table.lines()) {
            let csv_cells: Vec<&str> = csv_line.split(',').collect();
            let table_cells: Vec<&str> = table_line.split_whitespace().collect();
            assert_eq!(csv_cells, table_cells);
        }
        assert!(csv_text.contains("a,0,0.5,0.25,0.25"), "{csv_text}");
    }

    #[test]
    fn yaml_output_contains_summary_and_entries() {
        let yaml = to_yaml(&sample()).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(value["summary"]["max_lateness"].as_f64(), Some(1.0));
        assert_eq!(value["summary"]["total_tasks"].as_u64(), Some(3));
        assert_eq!(value["schedule"]["entries"][0]["name"].as_str(), Some("C"));
        assert_eq!(value["schedule"]["max_lateness"].as_f64(), Some(1.0));
    }
}
