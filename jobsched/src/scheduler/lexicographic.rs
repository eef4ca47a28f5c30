/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Lexicographic (Coffman–Graham style) list scheduling.
//!
//! Transitive dependencies are removed first so only direct precedence
//! shapes the labels.  Labelling then runs from the end of the precedence
//! chain towards its start:
//!
//! 1. jobs nothing depends on get labels `1..=k` in ascending id order;
//! 2. among unlabelled jobs whose dependents are all labelled, the one whose
//!    dependents' labels, sorted descending, form the lexicographically
//!    smallest vector gets the next label.
//!
//! The label is the job's priority for the shared round loop, so jobs that
//! much else waits on run first.

use std::cmp::Ordering;

use tracing::{debug, info};

use crate::graph::JobGraph;
use crate::job::{Job, Worker};
use crate::schedule::Schedule;

use super::error::{ScheduleError, StructureIssue};
use super::input::{dependency_graph, generic_workers, single_stage_jobs, Problem};
use super::rounds::assign_in_rounds;
use super::SchedulingAlgorithm;

#[derive(Debug, Clone)]
pub struct LexicographicInput {
    pub jobs: Vec<Job>,
    pub graph: JobGraph,
    pub workers: Vec<Worker>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LexicographicEngine;

impl SchedulingAlgorithm for LexicographicEngine {
    type Input = LexicographicInput;

    fn validate(&self, problem: &Problem) -> Result<LexicographicInput, ScheduleError> {
        let jobs = single_stage_jobs(problem)?;
        let graph = dependency_graph(problem)?;
        let workers = generic_workers(problem)?;
        graph.ensure_acyclic()?;

        Ok(LexicographicInput {
            jobs,
            graph,
            workers,
        })
    }

    fn run(&self, input: LexicographicInput) -> Result<Schedule, ScheduleError> {
        let LexicographicInput {
            mut jobs,
            mut graph,
            workers,
        } = input;

        graph.remove_transitive_edges();
        let labels = lexicographic_labels(&graph)?;
        for (job, &label) in jobs.iter_mut().zip(&labels) {
            job.priority = label;
        }
        info!(job_count = jobs.len(), "lexicographic priorities assigned");
        debug!(?labels, "per-job labels");

        let mut schedule = assign_in_rounds(&jobs, &graph, &workers)?;
        for job in &jobs {
            schedule.record_priority(job, None);
        }
        Ok(schedule)
    }
}

/// Orders two priority vectors (labels sorted descending).
///
/// Components are compared left to right as integers; when one vector is a
/// prefix of the other, the shorter one sorts first.
pub fn compare_priority_vectors(a: &[u32], b: &[u32]) -> Ordering {
    a.cmp(b)
}

/// Labels `1..=n` for every job of an acyclic graph, indexed like the graph.
///
/// Equal vectors go to the lower job index first, so the labelling is a
/// total order with no repeated label.
///
/// # Errors
/// [`StructureIssue::Cycle`] if some jobs can never become candidates.
pub fn lexicographic_labels(graph: &JobGraph) -> Result<Vec<u32>, ScheduleError> {
    let n = graph.job_count();
    // 0 = not yet labelled
    let mut labels = vec![0u32; n];
    let mut next = 1u32;

    for job in graph.sources() {
        labels[job] = next;
        next += 1;
    }

    while labels.contains(&0) {
        let mut best: Option<(usize, Vec<u32>)> = None;

        for job in (0..n).filter(|&j| labels[j] == 0) {
            let dependents = graph.dependents_of(job);
            if dependents.iter().any(|&d| labels[d] == 0) {
                continue;
            }
            let mut vector: Vec<u32> = dependents.iter().map(|&d| labels[d]).collect();
            vector.sort_unstable_by(|a, b| b.cmp(a));

            let better = match &best {
                Some((_, current)) => compare_priority_vectors(&vector, current) == Ordering::Less,
                None => true,
            };
            if better {
                best = Some((job, vector));
            }
        }

        let Some((job, vector)) = best else {
            let jobs = (0..n).filter(|&j| labels[j] == 0).map(|j| j + 1).collect();
            return Err(StructureIssue::Cycle { jobs }.into());
        };
        debug!(job = job + 1, label = next, ?vector, "label assigned");
        labels[job] = next;
        next += 1;
    }

    Ok(labels)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
