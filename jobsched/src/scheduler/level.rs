/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Level-based list scheduling.
//!
//! A job's level is the length of the longest dependency chain it heads:
//! jobs nothing depends on sit on level 1 and every other job sits one level
//! above its deepest dependent.  The level becomes the job's priority, so a
//! ready job with a longer chain behind it is assigned first when jobs are
//! handed out round by round (see [`rounds`](super::rounds)).
//!
//! Two variants share the code:
//!
//! | Variant | Accepted graphs |
//! |---|---|
//! | [`LevelVariant::Tree`] (`level_strategy`) | a tree leading to one root |
//! | [`LevelVariant::Dag`] (`level_scheduling`) | any acyclic graph |

use tracing::{debug, info};

use crate::graph::JobGraph;
use crate::job::{Job, Worker};
use crate::schedule::Schedule;

use super::error::ScheduleError;
use super::input::{dependency_graph, generic_workers, single_stage_jobs, Problem};
use super::rounds::assign_in_rounds;
use super::SchedulingAlgorithm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelVariant {
    /// Requires the graph to be a tree leading to a single root.
    Tree,
    /// Accepts any acyclic graph.
    Dag,
}

#[derive(Debug, Clone)]
pub struct LevelInput {
    pub jobs: Vec<Job>,
    pub graph: JobGraph,
    pub workers: Vec<Worker>,
}

#[derive(Debug, Clone, Copy)]
pub struct LevelEngine {
    variant: LevelVariant,
}

impl LevelEngine {
    pub const fn tree() -> Self {
        Self {
            variant: LevelVariant::Tree,
        }
    }

    pub const fn dag() -> Self {
        Self {
            variant: LevelVariant::Dag,
        }
    }
}

impl SchedulingAlgorithm for LevelEngine {
    type Input = LevelInput;

    fn validate(&self, problem: &Problem) -> Result<LevelInput, ScheduleError> {
        let jobs = single_stage_jobs(problem)?;
        let graph = dependency_graph(problem)?;
        let workers = generic_workers(problem)?;

        match self.variant {
            LevelVariant::Tree => graph.ensure_tree_to_root()?,
            LevelVariant::Dag => graph.ensure_acyclic()?,
        }

        Ok(LevelInput {
            jobs,
            graph,
            workers,
        })
    }

    fn run(&self, input: LevelInput) -> Result<Schedule, ScheduleError> {
        let LevelInput {
            mut jobs,
            graph,
            workers,
        } = input;

        let levels = compute_levels(&graph)?;
        for (job, &level) in jobs.iter_mut().zip(&levels) {
            job.priority = level;
        }
        info!(
            variant = ?self.variant,
            depth = levels.iter().copied().max().unwrap_or(0),
            "levels assigned"
        );
        debug!(?levels, "per-job levels");

        let mut schedule = assign_in_rounds(&jobs, &graph, &workers)?;
        for (job, &level) in jobs.iter().zip(&levels) {
            schedule.record_priority(job, Some(level));
        }
        Ok(schedule)
    }
}

/// Level of every job, indexed like the graph.  Jobs with no dependents get
/// level 1; any other job gets one more than its deepest dependent.
///
/// # Errors
/// [`StructureIssue::Cycle`](super::error::StructureIssue::Cycle) when the
/// graph has no topological order.
pub fn compute_levels(graph: &JobGraph) -> Result<Vec<u32>, ScheduleError> {
    let mut levels = vec![0u32; graph.job_count()];
    for job in graph.topological_order()?.into_iter().rev() {
        levels[job] = graph
            .dependents_of(job)
            .iter()
            .map(|&d| levels[d])
            .max()
            .unwrap_or(0)
            + 1;
    }
    Ok(levels)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::error::{InputIssue, StructureIssue};

    /// 0/1 matrix from `(job, dependency)` pairs, both 1-based.
    fn matrix(n: usize, deps: &[(usize, usize)]) -> Vec<Vec<i64>> {
        let mut m = vec![vec![0; n]; n];
        for &(a, b) in deps {
            m[a - 1][b - 1] = 1;
        }
        m
    }

    fn tree_problem() -> Problem {
        // 2, 3 depend on 1; 4, 5 depend on 2
        Problem::new(5)
            .with_workers(2)
            .with_dependencies(matrix(5, &[(2, 1), (3, 1), (4, 2), (5, 2)]))
    }

    // ── levels ────────────────────────────────────────────────────────────────

    #[test]
    fn levels_count_the_chain_below() {
        let g = dependency_graph(&tree_problem()).unwrap();
        assert_eq!(compute_levels(&g).unwrap(), vec![3, 2, 1, 1, 1]);
    }

    #[test]
    fn level_takes_the_deepest_dependent() {
        // 3 depends on 1 and 2; 2 depends on 1
        let p = Problem::new(3).with_dependencies(matrix(3, &[(3, 1), (3, 2), (2, 1)]));
        let g = dependency_graph(&p).unwrap();
        assert_eq!(compute_levels(&g).unwrap(), vec![3, 2, 1]);
    }

    #[test]
    fn independent_jobs_are_all_level_one() {
        let g = JobGraph::new(4);
        assert_eq!(compute_levels(&g).unwrap(), vec![1; 4]);
    }

    // ── tree variant ──────────────────────────────────────────────────────────

    #[test]
    fn tree_schedule_runs_level_by_level() {
        let s = LevelEngine::tree().solve(&tree_problem()).unwrap();
        assert_eq!(s.job_order(), vec![1, 2, 3, 4, 5]);
        assert_eq!(s.total_duration(), 3.0);
        assert_eq!(s.start_time(4), Some(2.0));
    }

    #[test]
    fn tree_records_levels_as_priorities() {
        let s = LevelEngine::tree().solve(&tree_problem()).unwrap();
        let levels: Vec<_> = s.priorities().iter().map(|p| (p.priority, p.level)).collect();
        assert_eq!(levels[0], (3, Some(3)));
        assert_eq!(levels[1], (2, Some(2)));
        assert_eq!(levels[4], (1, Some(1)));
    }

    #[test]
    fn tree_variant_rejects_a_diamond() {
        let p = Problem::new(4)
            .with_workers(2)
            .with_dependencies(matrix(4, &[(2, 1), (3, 1), (4, 2), (4, 3)]));
        assert_eq!(
            LevelEngine::tree().solve(&p).unwrap_err(),
            ScheduleError::StructuralViolation(StructureIssue::NotTreeToRoot)
        );
    }

    // ── DAG variant ───────────────────────────────────────────────────────────

    #[test]
    fn dag_variant_accepts_a_diamond() {
        let p = Problem::new(4)
            .with_workers(2)
            .with_job_times(vec![vec![1.0], vec![3.0], vec![1.0], vec![1.0]])
            .with_dependencies(matrix(4, &[(2, 1), (3, 1), (4, 2), (4, 3)]));
        let s = LevelEngine::dag().solve(&p).unwrap();
        // round 2 ends when job 2 ends at 4.0
        assert_eq!(s.start_time(4), Some(4.0));
        assert_eq!(s.total_duration(), 5.0);
    }

    #[test]
    fn chain_head_runs_before_independent_jobs() {
        // 4 depends on 3, 5 depends on 4; 1 and 2 are independent
        let p = Problem::new(5)
            .with_workers(2)
            .with_dependencies(matrix(5, &[(4, 3), (5, 4)]));
        let s = LevelEngine::dag().solve(&p).unwrap();
        assert_eq!(s.start_time(3), Some(0.0));
        assert_eq!(s.job_order(), vec![3, 1, 4, 2, 5]);
        assert_eq!(s.total_duration(), 3.0);
    }

    #[test]
    fn dag_variant_rejects_cycles() {
        let p = Problem::new(3)
            .with_workers(1)
            .with_dependencies(matrix(3, &[(1, 2), (2, 1)]));
        assert!(matches!(
            LevelEngine::dag().solve(&p),
            Err(ScheduleError::StructuralViolation(StructureIssue::Cycle { .. }))
        ));
    }

    #[test]
    fn dependencies_always_finish_first() {
        let p = Problem::new(6)
            .with_workers(3)
            .with_job_times(vec![vec![2.0], vec![1.0], vec![4.0], vec![1.5], vec![1.0], vec![0.5]])
            .with_dependencies(matrix(6, &[(4, 1), (4, 2), (5, 3), (6, 4), (6, 5)]));
        let s = LevelEngine::dag().solve(&p).unwrap();
        let pairs = [(4, 1), (4, 2), (5, 3), (6, 4), (6, 5)];
        for (job, dep) in pairs {
            assert!(s.start_time(job).unwrap() >= s.completion_time(dep).unwrap());
        }
    }

    #[test]
    fn missing_worker_count_is_rejected() {
        let p = Problem::new(2);
        assert_eq!(
            LevelEngine::dag().solve(&p).unwrap_err(),
            ScheduleError::InputValidation(InputIssue::MissingWorkerCount)
        );
    }
}
