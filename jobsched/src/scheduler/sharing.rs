/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Processor sharing over independent jobs and uniform workers.
//!
//! The simulation advances in events.  Before each step the active jobs are
//! grouped by equal remaining work (largest first) and every group is handed
//! to a pool of workers, fastest workers to the largest groups.  A pool's
//! capacity is split evenly across its jobs, so every job in a pool runs at
//! `Σ productivity / job count`.  A step lasts until the first job finishes
//! or until a job catches up with a smaller one, which merges their groups.
//!
//! Once every remaining job is equal, one final step shares the fastest
//! workers across all of them and finishes them together.
//!
//! Recorded items overlap on a shared worker: each item's stage duration is
//! the work that worker put into that job during the item, so the rates of a
//! worker's concurrent items add up to its productivity.
//!
//! # Reference
//! Horvath, Lam, Sethi (1977), "A level algorithm for preemptive scheduling"

use tracing::{debug, info, warn};

use crate::job::{Job, Stage, Worker};
use crate::schedule::{Schedule, ScheduleItem};

use super::error::{InputIssue, RuntimeIssue, ScheduleError};
use super::input::{duration_rows, generic_workers, Problem};
use super::SchedulingAlgorithm;

/// Tolerance under which two remaining amounts count as equal and a job
/// counts as finished.
pub const EPSILON: f64 = 1e-4;

// ── Input ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SharingInput {
    jobs: Vec<Job>,
    /// Fastest first; equal productivities keep ascending id.
    workers: Vec<Worker>,
}

impl SharingInput {
    /// Checks the job and worker sets and orders workers fastest first.
    ///
    /// # Errors
    /// * [`InputIssue::NoJobs`] / [`InputIssue::NoWorkers`] for empty sets.
    /// * [`InputIssue::TooManyWorkers`] when workers outnumber jobs.
    /// * [`InputIssue::NonPositiveDuration`] for a job without work.
    /// * [`InputIssue::InvalidProductivity`] for a non-positive worker.
    pub fn new(jobs: Vec<Job>, mut workers: Vec<Worker>) -> Result<Self, ScheduleError> {
        if jobs.is_empty() {
            return Err(InputIssue::NoJobs.into());
        }
        if workers.is_empty() {
            return Err(InputIssue::NoWorkers.into());
        }
        if workers.len() > jobs.len() {
            return Err(InputIssue::TooManyWorkers {
                workers: workers.len(),
                jobs: jobs.len(),
            }
            .into());
        }
        if let Some(job) = jobs
            .iter()
            .find(|j| !(j.remaining_duration.is_finite() && j.remaining_duration > 0.0))
        {
            return Err(InputIssue::NonPositiveDuration {
                job: job.id,
                value: job.remaining_duration,
            }
            .into());
        }
        if let Some(w) = workers
            .iter()
            .find(|w| !(w.productivity.is_finite() && w.productivity > 0.0))
        {
            return Err(InputIssue::InvalidProductivity {
                worker: w.id,
                value: w.productivity,
            }
            .into());
        }

        workers.sort_by(|a, b| {
            b.productivity
                .total_cmp(&a.productivity)
                .then(a.id.cmp(&b.id))
        });
        Ok(Self { jobs, workers })
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }
}

// ── Engine ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessorSharingEngine;

impl SchedulingAlgorithm for ProcessorSharingEngine {
    type Input = SharingInput;

    fn validate(&self, problem: &Problem) -> Result<SharingInput, ScheduleError> {
        let rows = duration_rows(problem, 1)?;
        let workers = generic_workers(problem)?;

        if problem.dependencies.iter().flatten().any(|&c| c != 0) {
            warn!("dependencies are ignored by processor sharing");
        }

        let jobs = rows
            .iter()
            .enumerate()
            .map(|(i, row)| Job::new(i + 1).with_remaining(row[0]))
            .collect();
        SharingInput::new(jobs, workers)
    }

    fn run(&self, input: SharingInput) -> Result<Schedule, ScheduleError> {
        let SharingInput { jobs, workers } = input;
        info!(
            job_count = jobs.len(),
            worker_count = workers.len(),
            "processor sharing started"
        );
        simulate(&jobs, &workers, 2 * jobs.len() + 2)
    }
}

/// Runs the event loop, failing with [`RuntimeIssue::NoProgress`] once more
/// than `max_steps` grouped steps were needed.
fn simulate(
    jobs: &[Job],
    workers: &[Worker],
    max_steps: usize,
) -> Result<Schedule, ScheduleError> {
    let mut state = SharingState::new(jobs);
    let mut schedule = Schedule::new();
    let mut steps = 0usize;

    let last_group = loop {
        let groups = state.groups();
        if groups.len() <= 1 {
            break groups.into_iter().next();
        }

        steps += 1;
        if steps > max_steps {
            return Err(RuntimeIssue::NoProgress {
                at: state.clock,
                steps,
            }
            .into());
        }

        let pools = build_pools(groups, workers);
        let rates = job_rates(&pools, workers, jobs.len());
        let dt = state.next_step(&rates)?;

        debug!(
            step = steps,
            clock = state.clock,
            dt,
            pools = pools.len(),
            "sharing step"
        );

        for pool in &pools {
            record_pool(&mut schedule, pool, jobs, workers, state.clock, dt);
        }
        state.advance(&rates, dt);
    };

    if let Some(group) = last_group {
        let used = group.len().min(workers.len());
        let pool = Pool {
            workers: (0..used).collect(),
            jobs: group,
        };
        let dt = state.final_step(&pool, workers)?;

        debug!(
            clock = state.clock,
            dt,
            jobs = pool.jobs.len(),
            workers = used,
            "final shared step"
        );
        record_pool(&mut schedule, &pool, jobs, workers, state.clock, dt);
        for &j in &pool.jobs {
            state.remaining[j] = 0.0;
        }
        state.clock += dt;
    }

    info!(makespan = state.clock, steps, "processor sharing complete");
    Ok(schedule)
}

// ── Simulation state ──────────────────────────────────────────────────────────

/// Remaining work per job (indexed like the jobs) and the simulated clock.
#[derive(Debug)]
struct SharingState {
    remaining: Vec<f64>,
    clock: f64,
}

impl SharingState {
    fn new(jobs: &[Job]) -> Self {
        Self {
            remaining: jobs.iter().map(|j| j.remaining_duration).collect(),
            clock: 0.0,
        }
    }

    /// Active jobs grouped by equal remaining work, largest group value first.
    /// A job joins the current group while it is within [`EPSILON`] of the
    /// group's first job.
    fn groups(&self) -> Vec<Vec<usize>> {
        let r = &self.remaining;
        let mut active: Vec<usize> = (0..r.len()).filter(|&j| r[j] > EPSILON).collect();
        active.sort_by(|&a, &b| r[b].total_cmp(&r[a]).then(a.cmp(&b)));

        let mut groups: Vec<Vec<usize>> = Vec::new();
        for j in active {
            let starts_group = groups.last().map_or(true, |g| r[g[0]] - r[j] > EPSILON);
            if starts_group {
                groups.push(vec![j]);
            } else if let Some(group) = groups.last_mut() {
                group.push(j);
            }
        }
        groups
    }

    /// Time until the next job finishes or catches up with a smaller one.
    fn next_step(&self, rates: &[f64]) -> Result<f64, ScheduleError> {
        let r = &self.remaining;
        let active: Vec<usize> = (0..r.len()).filter(|&j| r[j] > EPSILON).collect();
        let mut dt = f64::INFINITY;

        for &a in &active {
            if rates[a] > 0.0 {
                dt = dt.min(r[a] / rates[a]);
            }
            for &b in &active {
                let gap = r[a] - r[b];
                let closing = rates[a] - rates[b];
                if gap > EPSILON && closing > 0.0 {
                    dt = dt.min(gap / closing);
                }
            }
        }

        if dt.is_finite() && dt > 0.0 {
            Ok(dt)
        } else {
            Err(RuntimeIssue::UnresolvableTimeStep { at: self.clock }.into())
        }
    }

    /// Length of the closing step that finishes every job of `pool` at once.
    fn final_step(&self, pool: &Pool, workers: &[Worker]) -> Result<f64, ScheduleError> {
        let total: f64 = pool.jobs.iter().map(|&j| self.remaining[j]).sum();
        let dt = total / pool.capacity(workers);
        if dt.is_finite() && dt > 0.0 {
            Ok(dt)
        } else {
            Err(RuntimeIssue::UnresolvableTimeStep { at: self.clock }.into())
        }
    }

    fn advance(&mut self, rates: &[f64], dt: f64) {
        for (r, &rate) in self.remaining.iter_mut().zip(rates) {
            *r = (*r - rate * dt).max(0.0);
        }
        self.clock += dt;
    }
}

// ── Pools ─────────────────────────────────────────────────────────────────────

/// Workers (indices into the fastest-first list) sharing a set of jobs.
#[derive(Debug, Clone, PartialEq)]
struct Pool {
    workers: Vec<usize>,
    jobs: Vec<usize>,
}

impl Pool {
    fn capacity(&self, workers: &[Worker]) -> f64 {
        self.workers.iter().map(|&w| workers[w].productivity).sum()
    }

    /// Another worker would have no job of its own in this pool.
    fn saturated(&self) -> bool {
        self.workers.len() >= self.jobs.len()
    }
}

/// Gives worker `k` group `k`.  Groups beyond the worker count wait this
/// step.  Workers beyond the group count go round-robin, fastest first, to
/// pools that still have more jobs than workers.
fn build_pools(groups: Vec<Vec<usize>>, workers: &[Worker]) -> Vec<Pool> {
    let mut pools: Vec<Pool> = groups
        .into_iter()
        .take(workers.len())
        .enumerate()
        .map(|(k, jobs)| Pool {
            workers: vec![k],
            jobs,
        })
        .collect();

    let mut cursor = 0;
    for extra in pools.len()..workers.len() {
        let open = (0..pools.len())
            .map(|offset| (cursor + offset) % pools.len())
            .find(|&p| !pools[p].saturated());
        match open {
            Some(p) => {
                pools[p].workers.push(extra);
                cursor = p + 1;
            }
            None => debug!(worker = workers[extra].id, "worker idle this step"),
        }
    }
    pools
}

/// Per-job rate for the step; jobs outside every pool wait at `0.0`.
fn job_rates(pools: &[Pool], workers: &[Worker], job_count: usize) -> Vec<f64> {
    let mut rates = vec![0.0; job_count];
    for pool in pools {
        let rate = pool.capacity(workers) / pool.jobs.len() as f64;
        for &j in &pool.jobs {
            rates[j] = rate;
        }
    }
    rates
}

/// One item per (job, worker) pair of the pool over `[start, start + dt]`.
fn record_pool(
    schedule: &mut Schedule,
    pool: &Pool,
    jobs: &[Job],
    workers: &[Worker],
    start: f64,
    dt: f64,
) {
    let share = dt / pool.jobs.len() as f64;
    for &j in &pool.jobs {
        let job = &jobs[j];
        for &w in &pool.workers {
            let worker = &workers[w];
            let stage = Stage::new(
                1,
                format!("Processing of {}", job.name),
                worker.productivity * share,
            );
            schedule.add_item(ScheduleItem::new(job, &stage, worker, start, start + dt));
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(durations: &[f64], productivities: &[f64]) -> Problem {
        Problem::new(durations.len())
            .with_workers(productivities.len())
            .with_job_times(durations.iter().map(|&d| vec![d]).collect())
            .with_productivities(productivities.to_vec())
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    fn assert_conserves_work(s: &Schedule, durations: &[f64]) {
        for (i, &d) in durations.iter().enumerate() {
            let done = s.work_done(i + 1);
            assert!((done - d).abs() < 1e-3, "job {} did {done}, expected {d}", i + 1);
        }
    }

    fn assert_within_capacity(s: &Schedule, productivities: &[f64]) {
        for item in s.items() {
            let t = item.start();
            let load: f64 = s
                .items_for_worker(item.worker_id())
                .iter()
                .filter(|i| i.covers(t))
                .map(|i| i.rate())
                .sum();
            let cap = productivities[item.worker_id() - 1];
            assert!(load <= cap + 1e-9, "worker {} overloaded at {t}", item.worker_id());
        }
    }

    // ── makespans ─────────────────────────────────────────────────────────────

    #[test]
    fn equal_jobs_finish_together() {
        let d = [2.0, 2.0, 2.0, 2.0];
        let s = ProcessorSharingEngine.solve(&problem(&d, &[1.0, 1.0])).unwrap();
        assert!(approx(s.total_duration(), 4.0));
        assert_conserves_work(&s, &d);
        for id in 1..=4 {
            assert!(approx(s.completion_time(id).unwrap(), 4.0));
        }
    }

    #[test]
    fn long_job_bounds_the_makespan() {
        let d = [3.0, 1.0];
        let s = ProcessorSharingEngine.solve(&problem(&d, &[1.0, 1.0])).unwrap();
        assert!(approx(s.total_duration(), 3.0));
        assert!(approx(s.completion_time(2).unwrap(), 1.0));
        assert_conserves_work(&s, &d);
    }

    #[test]
    fn shared_worker_splits_its_productivity() {
        // job 1 alone on worker 1, jobs 2 and 3 share worker 2
        let d = [4.0, 2.0, 2.0];
        let s = ProcessorSharingEngine.solve(&problem(&d, &[1.0, 1.0])).unwrap();
        assert!(approx(s.total_duration(), 4.0));
        let shared = s.items_for_worker(2);
        assert_eq!(shared.len(), 2);
        assert!(shared.iter().all(|i| approx(i.rate(), 0.5)));
        assert_within_capacity(&s, &[1.0, 1.0]);
    }

    #[test]
    fn crossing_merges_groups_before_the_final_step() {
        let d = [6.0, 3.0, 3.0];
        let prods = [2.0, 1.0];
        let s = ProcessorSharingEngine.solve(&problem(&d, &prods)).unwrap();
        // first step ends at 2.0 with every job at 2.0 remaining
        assert!(s.items().iter().any(|i| approx(i.end(), 2.0)));
        assert!(approx(s.total_duration(), 4.0));
        assert_conserves_work(&s, &d);
        assert_within_capacity(&s, &prods);
    }

    #[test]
    fn spare_worker_joins_the_crowded_group() {
        let d = [4.0, 1.0, 1.0];
        let prods = [1.0, 1.0, 1.0];
        let s = ProcessorSharingEngine.solve(&problem(&d, &prods)).unwrap();
        assert!(approx(s.completion_time(2).unwrap(), 1.0));
        assert!(approx(s.completion_time(3).unwrap(), 1.0));
        assert!(approx(s.total_duration(), 4.0));
        assert!(!s.items_for_worker(3).is_empty());
        assert_conserves_work(&s, &d);
        assert_within_capacity(&s, &prods);
    }

    #[test]
    fn fastest_worker_takes_the_largest_job() {
        let d = [5.0, 1.0];
        let s = ProcessorSharingEngine.solve(&problem(&d, &[1.0, 3.0])).unwrap();
        let first = &s.items()[0];
        assert_eq!(first.job_id(), 1);
        assert_eq!(first.worker_id(), 2);
        assert_conserves_work(&s, &d);
    }

    #[test]
    fn single_job_single_worker() {
        let s = ProcessorSharingEngine.solve(&problem(&[3.0], &[1.5])).unwrap();
        assert_eq!(s.len(), 1);
        assert!(approx(s.total_duration(), 2.0));
        assert_eq!(s.items()[0].stage().name, "Processing of Job 1");
    }

    #[test]
    fn groups_use_tolerance() {
        let state = SharingState {
            remaining: vec![2.0, 2.0 + EPSILON / 2.0, 1.0, 0.0],
            clock: 0.0,
        };
        assert_eq!(state.groups(), vec![vec![1, 0], vec![2]]);
    }

    #[test]
    fn extra_workers_skip_saturated_pools() {
        let workers: Vec<Worker> = (1..=4).map(Worker::new).collect();
        let pools = build_pools(vec![vec![0], vec![1, 2]], &workers);
        assert_eq!(pools[0].workers, vec![0]);
        assert_eq!(pools[1].workers, vec![1, 2]);
    }

    // ── runtime guards ────────────────────────────────────────────────────────

    #[test]
    fn stalled_rates_leave_no_time_step() {
        let state = SharingState {
            remaining: vec![3.0, 3.0],
            clock: 1.5,
        };
        assert_eq!(
            state.next_step(&[0.0, 0.0]).unwrap_err(),
            ScheduleError::RuntimeInvariant(RuntimeIssue::UnresolvableTimeStep { at: 1.5 })
        );
    }

    #[test]
    fn finished_pool_has_no_final_step() {
        let workers = vec![Worker::new(1)];
        let state = SharingState {
            remaining: vec![0.0, 0.0],
            clock: 2.0,
        };
        let pool = Pool {
            workers: vec![0],
            jobs: vec![0, 1],
        };
        assert_eq!(
            state.final_step(&pool, &workers).unwrap_err(),
            ScheduleError::RuntimeInvariant(RuntimeIssue::UnresolvableTimeStep { at: 2.0 })
        );
    }

    #[test]
    fn final_step_spreads_the_common_remainder() {
        let workers = vec![Worker::new(1).with_productivity(2.0), Worker::new(2)];
        let state = SharingState {
            remaining: vec![1.5, 1.5, 1.5],
            clock: 0.0,
        };
        let pool = Pool {
            workers: vec![0, 1],
            jobs: vec![0, 1, 2],
        };
        assert!(approx(state.final_step(&pool, &workers).unwrap(), 1.5));
    }

    #[test]
    fn step_guard_stops_the_loop() {
        let jobs = vec![Job::new(1).with_remaining(3.0), Job::new(2).with_remaining(1.0)];
        let workers = vec![Worker::new(1)];
        assert_eq!(
            simulate(&jobs, &workers, 0).unwrap_err(),
            ScheduleError::RuntimeInvariant(RuntimeIssue::NoProgress { at: 0.0, steps: 1 })
        );
        assert!(simulate(&jobs, &workers, 4).is_ok());
    }

    // ── validation ────────────────────────────────────────────────────────────

    #[test]
    fn more_workers_than_jobs_is_rejected() {
        assert_eq!(
            ProcessorSharingEngine
                .solve(&problem(&[1.0], &[1.0, 1.0]))
                .unwrap_err(),
            ScheduleError::InputValidation(InputIssue::TooManyWorkers { workers: 2, jobs: 1 })
        );
    }

    #[test]
    fn zero_duration_is_rejected() {
        assert!(matches!(
            ProcessorSharingEngine.solve(&problem(&[1.0, 0.0], &[1.0])),
            Err(ScheduleError::InputValidation(InputIssue::NonPositiveDuration { job: 2, .. }))
        ));
    }

    #[test]
    fn worker_count_is_required() {
        let p = Problem::new(1).with_job_times(vec![vec![1.0]]);
        assert_eq!(
            ProcessorSharingEngine.solve(&p).unwrap_err(),
            ScheduleError::InputValidation(InputIssue::MissingWorkerCount)
        );
    }

    #[test]
    fn workers_are_ordered_fastest_first() {
        let input = ProcessorSharingEngine
            .validate(&problem(&[1.0, 1.0, 1.0], &[1.0, 2.0, 2.0]))
            .unwrap();
        let ids: Vec<usize> = input.workers().iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
