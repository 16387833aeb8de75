/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};

use edf_sched::input::TaskSetLoader;
use edf_sched::report::{self, ScheduleSummary};
use edf_sched::scheduler::optimality::MAX_BRUTE_FORCE_TASKS;
use edf_sched::scheduler::EdfScheduler;

// ── CLI argument definition ───────────────────────────────────────────────────

/// How the schedule is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Aligned text table plus summary lines.
    Table,
    /// `Task,Start,Finish,Deadline,Lateness` rows.
    Csv,
    /// Summary and entries as one YAML document.
    Yaml,
}

/// Earliest-Deadline-First scheduler minimising maximum lateness.
///
/// Example:
///   edf-sched --input tasks.csv
///   edf-sched -t A:3:5 -t B:2:3 -t C:1:2 --format yaml
#[derive(Debug, Parser)]
#[command(
    name = "edf-sched",
    about = "Single-machine EDF scheduler – minimises maximum lateness",
    long_about = None,
)]
struct Cli {
    /// Task-set file (.csv with TaskName,ProcessingTime,Deadline columns, or .yaml/.yml).
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Extra task as NAME:PROCESSING_TIME:DEADLINE (repeatable, appended after --input).
    #[arg(short = 't', long = "task")]
    tasks: Vec<String>,

    /// Output format.
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Cross-check the result against an exhaustive search (small task sets only).
    #[arg(long = "verify", default_value_t = false)]
    verify: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialise structured logging on stderr; stdout carries the report.
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    info!(
        input  = ?cli.input,
        inline = cli.tasks.len(),
        format = ?cli.format,
        verify = cli.verify,
        "Configuration"
    );

    // ── Collect tasks ─────────────────────────────────────────────────────────
    let mut loader = TaskSetLoader::new();

    if let Some(path) = &cli.input {
        if let Err(e) = loader.load_from_file(path) {
            error!("Failed to load task set: {:#}", e);
            process::exit(1);
        }
    }
    if let Err(e) = loader.add_inline(&cli.tasks) {
        error!("Failed to parse task entry: {:#}", e);
        process::exit(1);
    }

    // ── Schedule ──────────────────────────────────────────────────────────────
    let scheduler = EdfScheduler::new();
    let tasks = loader.into_tasks();

    let schedule = match scheduler.compute(&tasks) {
        Ok(s) => s,
        Err(e) => {
            error!("Scheduling failed: {}", e);
            process::exit(1);
        }
    };

    if cli.verify {
        if tasks.len() > MAX_BRUTE_FORCE_TASKS {
            warn!(
                task_count = tasks.len(),
                limit = MAX_BRUTE_FORCE_TASKS,
                "Too many tasks for exhaustive verification, skipping"
            );
        } else {
            match scheduler.verify_optimal(&tasks, &schedule) {
                Ok(true) => info!("Verified: no ordering has a smaller maximum lateness"),
                Ok(false) => {
                    error!("Verification failed: an ordering with smaller maximum lateness exists");
                    process::exit(2);
                }
                Err(e) => {
                    error!("Verification failed: {}", e);
                    process::exit(1);
                }
            }
        }
    }

    // ── Report ────────────────────────────────────────────────────────────────
    let summary = ScheduleSummary::from_schedule(&schedule);
    info!(
        max_lateness = summary.max_lateness,
        total_tasks  = summary.total_tasks,
        total_time   = summary.total_time,
        late_tasks   = summary.late_tasks,
        "Summary"
    );

    let stdout = io::stdout();
    let result = match cli.format {
        OutputFormat::Table => write!(stdout.lock(), "{}", report::render_table(&schedule))
            .map_err(anyhow::Error::from),
        OutputFormat::Csv => report::write_csv(&schedule, stdout.lock()),
        OutputFormat::Yaml => report::to_yaml(&schedule)
            .and_then(|y| write!(stdout.lock(), "{}", y).map_err(anyhow::Error::from)),
    };

    if let Err(e) = result {
        error!("Failed to write report: {:#}", e);
        process::exit(1);
    }
}
