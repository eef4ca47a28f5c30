/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for the scheduling engines.
//!
//! [`ScheduleError`] is the single error every engine returns.  Its variants
//! follow three failure layers, each carrying a detail enum with the exact
//! offending values:
//!
//! * [`InputIssue`] — the caller's input has the wrong shape or values.
//! * [`StructureIssue`] — the dependency graph does not have the shape the
//!   algorithm needs.
//! * [`RuntimeIssue`] — the computation reached a state it cannot continue
//!   from.
//!
//! All failures are deterministic for a given input; none are retried and no
//! partial schedule accompanies them.

use std::fmt;

use thiserror::Error;

// ── Input validation ──────────────────────────────────────────────────────────

/// Why the caller's input was rejected before any scheduling happened.
///
/// Job, worker, row and column numbers are 1-based, matching the output.
#[derive(Debug, Clone, PartialEq)]
pub enum InputIssue {
    /// `num_jobs` was zero.
    NoJobs,

    /// `num_workers` was zero.
    NoWorkers,

    /// The algorithm needs `num_workers` and none was given.
    MissingWorkerCount,

    /// The number of duration rows does not match `num_jobs`.
    JobCountMismatch { expected: usize, actual: usize },

    /// The number of workers does not match what the algorithm or the
    /// productivity list requires.
    WorkerCountMismatch { expected: usize, actual: usize },

    /// Processor sharing needs at least as many jobs as workers.
    TooManyWorkers { workers: usize, jobs: usize },

    /// A duration row has the wrong number of values.
    StageCountMismatch {
        job: usize,
        expected: usize,
        actual: usize,
    },

    /// A duration is negative (or NaN / infinite).
    InvalidDuration { job: usize, value: f64 },

    /// Processor sharing needs strictly positive initial durations.
    NonPositiveDuration { job: usize, value: f64 },

    /// A worker productivity is zero, negative, NaN or infinite.
    InvalidProductivity { worker: usize, value: f64 },

    /// The dependency matrix is not `num_jobs × num_jobs`.
    NonSquareMatrix {
        expected: usize,
        rows: usize,
        row: usize,
        cols: usize,
    },

    /// A dependency cell is neither `0` nor `1`.
    InvalidMatrixCell { row: usize, col: usize, value: i64 },

    /// Flow-shop workers do not cover stage 1 and stage 2 exactly once.
    WorkerSpecialization { stages: Vec<usize> },
}

impl fmt::Display for InputIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputIssue::NoJobs => write!(f, "at least one job is required"),

            InputIssue::NoWorkers => write!(f, "at least one worker is required"),

            InputIssue::MissingWorkerCount => {
                write!(f, "num_workers is required by this algorithm")
            }

            InputIssue::JobCountMismatch { expected, actual } => write!(
                f,
                "expected {} job row(s) but got {}",
                expected, actual
            ),

            InputIssue::WorkerCountMismatch { expected, actual } => write!(
                f,
                "expected {} worker(s) but got {}",
                expected, actual
            ),

            InputIssue::TooManyWorkers { workers, jobs } => write!(
                f,
                "number of workers ({}) may not exceed number of jobs ({})",
                workers, jobs
            ),

            InputIssue::StageCountMismatch {
                job,
                expected,
                actual,
            } => write!(
                f,
                "job {} must have {} duration value(s) but has {}",
                job, expected, actual
            ),

            InputIssue::InvalidDuration { job, value } => write!(
                f,
                "job {} has invalid duration {} (must be a finite value ≥ 0)",
                job, value
            ),

            InputIssue::NonPositiveDuration { job, value } => write!(
                f,
                "job {} has duration {} (must be > 0)",
                job, value
            ),

            InputIssue::InvalidProductivity { worker, value } => write!(
                f,
                "worker {} has productivity {} (must be a finite value > 0)",
                worker, value
            ),

            InputIssue::NonSquareMatrix {
                expected,
                rows,
                row,
                cols,
            } => {
                if *rows != *expected {
                    write!(
                        f,
                        "dependency matrix has {} row(s), expected {}",
                        rows, expected
                    )
                } else {
                    write!(
                        f,
                        "dependency matrix row {} has {} column(s), expected {}",
                        row, cols, expected
                    )
                }
            }

            InputIssue::InvalidMatrixCell { row, col, value } => write!(
                f,
                "dependency matrix cell ({}, {}) is {} (must be 0 or 1)",
                row, col, value
            ),

            InputIssue::WorkerSpecialization { stages } => write!(
                f,
                "flow-shop workers must be specialized to stages 1 and 2, got {:?}",
                stages
            ),
        }
    }
}

// ── Structural violations ─────────────────────────────────────────────────────

/// Why the dependency graph has the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureIssue {
    /// The graph is not a tree whose edges all lead to a single root.
    NotTreeToRoot,

    /// The graph contains a cycle; `jobs` are the 1-based ids left over once
    /// every job outside a cycle has been peeled off.
    Cycle { jobs: Vec<usize> },
}

impl fmt::Display for StructureIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureIssue::NotTreeToRoot => {
                write!(f, "dependency graph is not a tree leading to a single root")
            }
            StructureIssue::Cycle { jobs } => {
                write!(f, "dependency graph contains a cycle through jobs {:?}", jobs)
            }
        }
    }
}

// ── Runtime invariants ────────────────────────────────────────────────────────

/// Why a running computation had to stop.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeIssue {
    /// No job was ready while `remaining` jobs were still unscheduled.
    Deadlock { remaining: usize },

    /// The processor-sharing simulation found no finite positive next-event
    /// time at simulated time `at`.
    UnresolvableTimeStep { at: f64 },

    /// The processor-sharing simulation exceeded its step bound at `at`.
    NoProgress { at: f64, steps: usize },
}

impl fmt::Display for RuntimeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeIssue::Deadlock { remaining } => write!(
                f,
                "deadlock: no job is ready while {} job(s) remain",
                remaining
            ),
            RuntimeIssue::UnresolvableTimeStep { at } => {
                write!(f, "cannot determine the next time step at t = {:.4}", at)
            }
            RuntimeIssue::NoProgress { at, steps } => write!(
                f,
                "simulation made no progress after {} step(s) at t = {:.4}",
                steps, at
            ),
        }
    }
}

// ── Top-level error ───────────────────────────────────────────────────────────

/// Discriminant of [`ScheduleError`], for callers that map failures onto
/// transport status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InputValidation,
    StructuralViolation,
    RuntimeInvariantViolation,
    UnknownAlgorithm,
}

/// Error returned by every engine and by [`schedule()`](super::schedule).
///
/// | Variant | Suggested HTTP status |
/// |---|---|
/// | `InputValidation` | 400 |
/// | `UnknownAlgorithm` | 404 |
/// | `StructuralViolation` | 422 |
/// | `RuntimeInvariant` | 422 |
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    #[error("invalid input: {0}")]
    InputValidation(InputIssue),

    #[error("structural violation: {0}")]
    StructuralViolation(StructureIssue),

    #[error("runtime invariant violated: {0}")]
    RuntimeInvariant(RuntimeIssue),

    #[error("unknown scheduling algorithm: '{0}' (valid: johnson, level_strategy, level_scheduling, lexicographic, processor_sharing)")]
    UnknownAlgorithm(String),
}

impl ScheduleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScheduleError::InputValidation(_) => ErrorKind::InputValidation,
            ScheduleError::StructuralViolation(_) => ErrorKind::StructuralViolation,
            ScheduleError::RuntimeInvariant(_) => ErrorKind::RuntimeInvariantViolation,
            ScheduleError::UnknownAlgorithm(_) => ErrorKind::UnknownAlgorithm,
        }
    }
}

impl From<InputIssue> for ScheduleError {
    fn from(issue: InputIssue) -> Self {
        ScheduleError::InputValidation(issue)
    }
}

impl From<StructureIssue> for ScheduleError {
    fn from(issue: StructureIssue) -> Self {
        ScheduleError::StructuralViolation(issue)
    }
}

impl From<RuntimeIssue> for ScheduleError {
    fn from(issue: RuntimeIssue) -> Self {
        ScheduleError::RuntimeInvariant(issue)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
