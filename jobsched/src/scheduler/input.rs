/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Caller input and its conversion into validated domain objects.
//!
//! [`Problem`] is the already-typed parameter set a caller hands to an
//! algorithm (counts, duration rows, dependency matrix, worker data).  It has
//! not yet been checked against any algorithm's requirements; each engine's
//! `validate` step uses the helpers below to turn it into owned `Job`,
//! `Worker` and [`JobGraph`] values or an [`InputIssue`].

use crate::graph::JobGraph;
use crate::job::{Job, Worker};

use super::error::{InputIssue, ScheduleError, StructureIssue};

/// Parameters for one scheduling run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Problem {
    pub num_jobs: usize,

    /// Required by every algorithm except the flow shop, which always uses 2.
    pub num_workers: Option<usize>,

    /// One row per job: 2 values for the flow shop, 1 value otherwise.
    /// Level and lexicographic scheduling treat an empty list as unit
    /// durations.
    pub job_times: Vec<Vec<f64>>,

    /// `num_jobs × num_jobs` matrix of 0/1; `dependencies[i][j] == 1` means
    /// job `i + 1` depends on job `j + 1`.  Empty means no dependencies.
    pub dependencies: Vec<Vec<i64>>,

    /// One value per worker; empty means every worker has productivity 1.0.
    pub worker_productivities: Vec<f64>,

    /// Flow shop only: the stage number each worker is specialized to.
    /// Empty means worker 1 → stage 1, worker 2 → stage 2.
    pub worker_stages: Vec<usize>,
}

impl Problem {
    pub fn new(num_jobs: usize) -> Self {
        Self {
            num_jobs,
            ..Default::default()
        }
    }

    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = Some(num_workers);
        self
    }

    pub fn with_job_times(mut self, rows: Vec<Vec<f64>>) -> Self {
        self.job_times = rows;
        self
    }

    pub fn with_dependencies(mut self, matrix: Vec<Vec<i64>>) -> Self {
        self.dependencies = matrix;
        self
    }

    pub fn with_productivities(mut self, productivities: Vec<f64>) -> Self {
        self.worker_productivities = productivities;
        self
    }

    pub fn with_worker_stages(mut self, stages: Vec<usize>) -> Self {
        self.worker_stages = stages;
        self
    }
}

// ── Shared validation helpers ─────────────────────────────────────────────────

pub(crate) fn require_jobs(problem: &Problem) -> Result<usize, ScheduleError> {
    if problem.num_jobs == 0 {
        return Err(InputIssue::NoJobs.into());
    }
    Ok(problem.num_jobs)
}

/// Checks that `job_times` has one row of `width` finite, non-negative values
/// per job and returns the rows.
pub(crate) fn duration_rows(problem: &Problem, width: usize) -> Result<&[Vec<f64>], ScheduleError> {
    let n = require_jobs(problem)?;
    if problem.job_times.len() != n {
        return Err(InputIssue::JobCountMismatch {
            expected: n,
            actual: problem.job_times.len(),
        }
        .into());
    }

    for (i, row) in problem.job_times.iter().enumerate() {
        if row.len() != width {
            return Err(InputIssue::StageCountMismatch {
                job: i + 1,
                expected: width,
                actual: row.len(),
            }
            .into());
        }
        if let Some(&value) = row.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(InputIssue::InvalidDuration { job: i + 1, value }.into());
        }
    }
    Ok(&problem.job_times)
}

/// Jobs with exactly one stage each.  An empty `job_times` yields unit
/// durations.
pub(crate) fn single_stage_jobs(problem: &Problem) -> Result<Vec<Job>, ScheduleError> {
    let n = require_jobs(problem)?;
    if problem.job_times.is_empty() {
        return Ok((1..=n).map(|id| Job::new(id).with_stage(1.0)).collect());
    }

    let rows = duration_rows(problem, 1)?;
    Ok(rows
        .iter()
        .enumerate()
        .map(|(i, row)| Job::new(i + 1).with_stage(row[0]))
        .collect())
}

/// Builds the dependency graph from the 0/1 matrix.  A `1` on the diagonal
/// is reported as a one-job [`StructureIssue::Cycle`].
pub(crate) fn dependency_graph(problem: &Problem) -> Result<JobGraph, ScheduleError> {
    let n = require_jobs(problem)?;
    let mut graph = JobGraph::new(n);
    let matrix = &problem.dependencies;
    if matrix.is_empty() {
        return Ok(graph);
    }

    if matrix.len() != n {
        return Err(InputIssue::NonSquareMatrix {
            expected: n,
            rows: matrix.len(),
            row: 0,
            cols: 0,
        }
        .into());
    }

    for (i, row) in matrix.iter().enumerate() {
        if row.len() != n {
            return Err(InputIssue::NonSquareMatrix {
                expected: n,
                rows: n,
                row: i + 1,
                cols: row.len(),
            }
            .into());
        }
        for (j, &cell) in row.iter().enumerate() {
            match cell {
                0 => {}
                1 if i == j => return Err(StructureIssue::Cycle { jobs: vec![i + 1] }.into()),
                1 => graph.add_dependency(i, j),
                value => {
                    return Err(InputIssue::InvalidMatrixCell {
                        row: i + 1,
                        col: j + 1,
                        value,
                    }
                    .into())
                }
            }
        }
    }
    Ok(graph)
}

/// `num_workers` generic workers with the supplied (or default) productivity.
pub(crate) fn generic_workers(problem: &Problem) -> Result<Vec<Worker>, ScheduleError> {
    let count = problem.num_workers.ok_or(InputIssue::MissingWorkerCount)?;
    if count == 0 {
        return Err(InputIssue::NoWorkers.into());
    }

    let prods = &problem.worker_productivities;
    if prods.is_empty() {
        return Ok((1..=count).map(Worker::new).collect());
    }
    if prods.len() != count {
        return Err(InputIssue::WorkerCountMismatch {
            expected: count,
            actual: prods.len(),
        }
        .into());
    }

    prods
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            if p.is_finite() && p > 0.0 {
                Ok(Worker::new(i + 1).with_productivity(p))
            } else {
                Err(InputIssue::InvalidProductivity {
                    worker: i + 1,
                    value: p,
                }
                .into())
            }
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
