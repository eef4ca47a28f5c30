/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Round-synchronized greedy assignment over a precedence graph.
//!
//! Shared by level and lexicographic scheduling, which differ only in how
//! they fill [`Job::priority`] beforehand.  Each round:
//!
//! 1. collects the ready set: unscheduled jobs whose every dependency was
//!    scheduled in an earlier round;
//! 2. raises every worker's clock to the latest clock (the round barrier);
//! 3. hands the highest-priority ready jobs, at most one per worker, to
//!    workers in order of availability, each job's stages back to back.
//!
//! A stage of work `d` occupies a worker of productivity `p` for `d / p`.
//!
//! Because every dependency finished by the barrier, an item never starts
//! before the items of the jobs it depends on have ended.

use tracing::debug;

use crate::graph::JobGraph;
use crate::job::{Job, Worker};
use crate::schedule::{Schedule, ScheduleItem};

use super::error::{RuntimeIssue, ScheduleError};

/// Assigns `jobs` (ordered by index, `jobs[i].id == i + 1`) to `workers`
/// round by round.
///
/// Ties between equal priorities go to the lower job id; ties between
/// equally available workers go to the lower worker index.
///
/// # Errors
/// [`RuntimeIssue::Deadlock`] if a round finds no ready job while jobs remain
/// (the graph has a cycle).
pub(crate) fn assign_in_rounds(
    jobs: &[Job],
    graph: &JobGraph,
    workers: &[Worker],
) -> Result<Schedule, ScheduleError> {
    let n = jobs.len();
    let mut scheduled = vec![false; n];
    let mut remaining = n;
    let mut clocks = vec![0.0_f64; workers.len()];
    let mut schedule = Schedule::new();
    let mut round = 0usize;

    while remaining > 0 {
        round += 1;

        let mut ready: Vec<usize> = (0..n)
            .filter(|&j| !scheduled[j])
            .filter(|&j| graph.dependencies_of(j).iter().all(|&d| scheduled[d]))
            .collect();

        if ready.is_empty() {
            return Err(RuntimeIssue::Deadlock { remaining }.into());
        }

        ready.sort_by(|&a, &b| jobs[b].priority.cmp(&jobs[a].priority).then(a.cmp(&b)));
        ready.truncate(workers.len());

        let barrier = clocks.iter().copied().fold(0.0, f64::max);
        clocks.iter_mut().for_each(|c| *c = barrier);

        debug!(
            round,
            barrier,
            ready = ?ready.iter().map(|&j| jobs[j].id).collect::<Vec<_>>(),
            "assignment round"
        );

        for j in ready {
            let w = earliest_available(&clocks);
            let job = &jobs[j];
            let worker = &workers[w];

            for stage in &job.stages {
                let start = clocks[w];
                let end = start + stage.duration / worker.productivity;
                schedule.add_item(ScheduleItem::new(job, stage, worker, start, end));
                clocks[w] = end;
            }

            scheduled[j] = true;
            remaining -= 1;
        }
    }

    Ok(schedule)
}

/// Index of the worker with the smallest clock; lowest index on ties.
fn earliest_available(clocks: &[f64]) -> usize {
    let mut best = 0;
    for (i, &c) in clocks.iter().enumerate().skip(1) {
        if c < clocks[best] {
            best = i;
        }
    }
    best
}

// ── Tests ─────────────────────────────────────────────────────────────────────
