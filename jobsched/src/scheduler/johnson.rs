/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Two-machine flow shop sequenced by Johnson's rule.
//!
//! Every job runs stage 1 on the stage-1 worker, then stage 2 on the stage-2
//! worker.  Johnson's rule gives a makespan-optimal order:
//!
//! * Group A — jobs with `d1 ≤ d2`, ascending by `d1`;
//! * Group B — jobs with `d1 > d2`, descending by `d2`;
//! * process A then B.
//!
//! The stage-1 worker runs jobs back to back; the stage-2 worker starts each
//! job at `max(stage-1 end, previous stage-2 end)`.
//!
//! # Reference
//! Johnson (1954), "Optimal two- and three-stage production schedules with
//! setup times included"

use tracing::{debug, info, warn};

use crate::job::{Job, Worker};
use crate::schedule::{Schedule, ScheduleItem};

use super::error::{InputIssue, ScheduleError};
use super::input::{duration_rows, Problem};
use super::SchedulingAlgorithm;

/// Validated flow-shop input: jobs with exactly two stages and one worker per
/// stage.
#[derive(Debug, Clone)]
pub struct FlowShopInput {
    jobs: Vec<Job>,
    stage_one: Worker,
    stage_two: Worker,
}

impl FlowShopInput {
    /// # Errors
    /// * [`InputIssue::NoJobs`] for an empty job list.
    /// * [`InputIssue::StageCountMismatch`] / [`InputIssue::InvalidDuration`]
    ///   for a job without exactly two valid stages.
    /// * [`InputIssue::WorkerCountMismatch`] unless there are two workers.
    /// * [`InputIssue::WorkerSpecialization`] unless one worker is
    ///   specialized to stage 1 and the other to stage 2.
    pub fn new(jobs: Vec<Job>, workers: Vec<Worker>) -> Result<Self, ScheduleError> {
        if jobs.is_empty() {
            return Err(InputIssue::NoJobs.into());
        }
        for job in &jobs {
            if job.stages.len() != 2 {
                return Err(InputIssue::StageCountMismatch {
                    job: job.id,
                    expected: 2,
                    actual: job.stages.len(),
                }
                .into());
            }
            if let Some(s) = job
                .stages
                .iter()
                .find(|s| !s.duration.is_finite() || s.duration < 0.0)
            {
                return Err(InputIssue::InvalidDuration {
                    job: job.id,
                    value: s.duration,
                }
                .into());
            }
        }

        let count = workers.len();
        let Ok([a, b]) = <[Worker; 2]>::try_from(workers) else {
            return Err(InputIssue::WorkerCountMismatch {
                expected: 2,
                actual: count,
            }
            .into());
        };

        let (stage_one, stage_two) = match (a.supported_stage, b.supported_stage) {
            (Some(1), Some(2)) => (a, b),
            (Some(2), Some(1)) => (b, a),
            (x, y) => {
                return Err(InputIssue::WorkerSpecialization {
                    stages: [x, y].into_iter().map(|s| s.unwrap_or(0)).collect(),
                }
                .into())
            }
        };

        Ok(Self {
            jobs,
            stage_one,
            stage_two,
        })
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }
}

/// Johnson's rule engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Johnson;

impl SchedulingAlgorithm for Johnson {
    type Input = FlowShopInput;

    fn validate(&self, problem: &Problem) -> Result<FlowShopInput, ScheduleError> {
        let rows = duration_rows(problem, 2)?;

        if let Some(count) = problem.num_workers {
            if count != 2 {
                return Err(InputIssue::WorkerCountMismatch {
                    expected: 2,
                    actual: count,
                }
                .into());
            }
        }
        if !problem.worker_productivities.is_empty() {
            warn!("worker productivities are ignored by the flow shop");
        }

        let stages = if problem.worker_stages.is_empty() {
            vec![1, 2]
        } else {
            problem.worker_stages.clone()
        };
        if stages.len() != 2 {
            return Err(InputIssue::WorkerCountMismatch {
                expected: 2,
                actual: stages.len(),
            }
            .into());
        }

        let jobs = rows
            .iter()
            .enumerate()
            .map(|(i, row)| Job::new(i + 1).with_stage(row[0]).with_stage(row[1]))
            .collect();
        let workers = stages
            .iter()
            .enumerate()
            .map(|(i, &stage)| Worker::new(i + 1).specialized_to(stage))
            .collect();

        FlowShopInput::new(jobs, workers)
    }

    fn run(&self, input: FlowShopInput) -> Result<Schedule, ScheduleError> {
        let order = johnson_order(&input.jobs);
        info!(
            job_count = input.jobs.len(),
            order = ?order.iter().map(|&j| input.jobs[j].id).collect::<Vec<_>>(),
            "Johnson order computed"
        );

        let mut schedule = Schedule::new();
        let mut stage_one_free = 0.0_f64;
        let mut stage_two_free = 0.0_f64;

        for &j in &order {
            let job = &input.jobs[j];
            let (first, second) = (&job.stages[0], &job.stages[1]);

            let start1 = stage_one_free;
            let end1 = start1 + first.duration;
            stage_one_free = end1;

            let start2 = end1.max(stage_two_free);
            let end2 = start2 + second.duration;
            stage_two_free = end2;

            debug!(
                job = job.id,
                stage1 = ?(start1, end1),
                stage2 = ?(start2, end2),
                "job placed"
            );

            schedule.add_item(ScheduleItem::new(job, first, &input.stage_one, start1, end1));
            schedule.add_item(ScheduleItem::new(job, second, &input.stage_two, start2, end2));
        }

        info!(makespan = stage_two_free, "Johnson schedule complete");
        Ok(schedule)
    }
}

// ── Ordering helpers ──────────────────────────────────────────────────────────

/// Johnson processing order as 0-based indices into `jobs`.  Jobs are assumed
/// to carry two stages.  Equal keys keep input order.
pub fn johnson_order(jobs: &[Job]) -> Vec<usize> {
    let d = |j: usize, s: usize| jobs[j].stages[s].duration;

    let (mut group_a, mut group_b): (Vec<usize>, Vec<usize>) =
        (0..jobs.len()).partition(|&j| d(j, 0) <= d(j, 1));

    group_a.sort_by(|&x, &y| d(x, 0).total_cmp(&d(y, 0)));
    group_b.sort_by(|&x, &y| d(y, 1).total_cmp(&d(x, 1)));

    group_a.extend(group_b);
    group_a
}

/// Makespan of processing `jobs` in `order` (0-based indices) on the two
/// machines.
pub fn flow_shop_makespan(jobs: &[Job], order: &[usize]) -> f64 {
    let mut first_free = 0.0_f64;
    let mut second_free = 0.0_f64;
    for &j in order {
        first_free += jobs[j].stages[0].duration;
        second_free = first_free.max(second_free) + jobs[j].stages[1].duration;
    }
    second_free
}

// ── Tests ─────────────────────────────────────────────────────────────────────
