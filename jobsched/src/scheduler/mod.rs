/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Scheduling engines and the static registry that dispatches to them.
//!
//! Every engine implements [`SchedulingAlgorithm`]: `validate` turns a
//! [`Problem`] into the engine's typed input, `run` turns that input into a
//! [`Schedule`].  [`schedule()`] looks an engine up by name, runs both steps
//! and wraps the result in a [`Report`].
//!
//! | Name | Engine | Graph requirement |
//! |---|---|---|
//! | `johnson` | [`johnson::Johnson`] | none (two-stage jobs) |
//! | `level_strategy` | [`level::LevelEngine::tree`] | tree leading to one root |
//! | `level_scheduling` | [`level::LevelEngine::dag`] | acyclic |
//! | `lexicographic` | [`lexicographic::LexicographicEngine`] | acyclic |
//! | `processor_sharing` | [`sharing::ProcessorSharingEngine`] | ignored |
//!
//! # Design decisions
//!
//! | Topic | Choice |
//! |---|---|
//! | Dispatch | Closed `Algorithm` enum, no runtime discovery |
//! | State | Engines are zero-sized or `Copy`; all per-run state is local |
//! | Errors | One `ScheduleError`; never a partial schedule |
//! | Determinism | Every tie is broken by job id or worker id |
//!
//! # Example
//! ```rust,ignore
//! let problem = Problem::new(3)
//!     .with_job_times(vec![vec![5.0, 3.0], vec![2.0, 6.0], vec![4.0, 4.0]]);
//! let report = scheduler::schedule("johnson", &problem)?;
//! assert_eq!(report.job_order, vec![2, 3, 1]);
//! ```

pub mod error;
pub mod input;
pub mod johnson;
pub mod level;
pub mod lexicographic;
pub mod report;
mod rounds;
pub mod sharing;

pub use error::{ErrorKind, InputIssue, RuntimeIssue, ScheduleError, StructureIssue};
pub use input::Problem;
pub use report::{Report, Response};

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::info;

use crate::schedule::Schedule;

// ── Uniform contract ──────────────────────────────────────────────────────────

/// Two-step contract shared by every engine.
pub trait SchedulingAlgorithm {
    /// Typed, validated input the engine runs on.
    type Input;

    /// Checks `problem` against this engine's requirements.
    fn validate(&self, problem: &Problem) -> Result<Self::Input, ScheduleError>;

    /// Computes the schedule.  Fails only on runtime invariant violations
    /// (or on structure the input type could not rule out).
    fn run(&self, input: Self::Input) -> Result<Schedule, ScheduleError>;

    fn solve(&self, problem: &Problem) -> Result<Schedule, ScheduleError> {
        let input = self.validate(problem)?;
        self.run(input)
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Johnson,
    LevelStrategy,
    LevelScheduling,
    Lexicographic,
    ProcessorSharing,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Johnson,
        Algorithm::LevelStrategy,
        Algorithm::LevelScheduling,
        Algorithm::Lexicographic,
        Algorithm::ProcessorSharing,
    ];

    /// Registry key.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Johnson => "johnson",
            Algorithm::LevelStrategy => "level_strategy",
            Algorithm::LevelScheduling => "level_scheduling",
            Algorithm::Lexicographic => "lexicographic",
            Algorithm::ProcessorSharing => "processor_sharing",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Algorithm::Johnson => "Johnson's rule",
            Algorithm::LevelStrategy => "Level strategy (tree)",
            Algorithm::LevelScheduling => "Level scheduling",
            Algorithm::Lexicographic => "Lexicographic scheduling",
            Algorithm::ProcessorSharing => "Processor sharing",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Algorithm::Johnson => {
                "Makespan-optimal order for two-stage jobs on two specialized workers"
            }
            Algorithm::LevelStrategy => {
                "Round-based list scheduling by longest dependent chain; dependencies must form a tree to one root"
            }
            Algorithm::LevelScheduling => {
                "Round-based list scheduling by longest dependent chain over any acyclic dependency graph"
            }
            Algorithm::Lexicographic => {
                "Round-based list scheduling with Coffman-Graham style lexicographic labels"
            }
            Algorithm::ProcessorSharing => {
                "Preemptive sharing of uniform workers across independent jobs"
            }
        }
    }

    /// Validates `problem` for this algorithm and runs it.
    pub fn solve(self, problem: &Problem) -> Result<Schedule, ScheduleError> {
        match self {
            Algorithm::Johnson => johnson::Johnson.solve(problem),
            Algorithm::LevelStrategy => level::LevelEngine::tree().solve(problem),
            Algorithm::LevelScheduling => level::LevelEngine::dag().solve(problem),
            Algorithm::Lexicographic => lexicographic::LexicographicEngine.solve(problem),
            Algorithm::ProcessorSharing => sharing::ProcessorSharingEngine.solve(problem),
        }
    }
}

impl FromStr for Algorithm {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| ScheduleError::UnknownAlgorithm(s.to_string()))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Runs the algorithm registered under `algorithm` on `problem`.
///
/// # Errors
/// [`ScheduleError::UnknownAlgorithm`] for an unregistered name, otherwise
/// whatever the engine's validation or run reports.
pub fn schedule(algorithm: &str, problem: &Problem) -> Result<Report, ScheduleError> {
    let algorithm: Algorithm = algorithm.parse()?;

    info!(
        algorithm = %algorithm,
        job_count = problem.num_jobs,
        worker_count = ?problem.num_workers,
        "=== schedule() ==="
    );

    let schedule = algorithm.solve(problem)?;
    let report = Report::new(algorithm, &schedule);

    info!(
        makespan = report.makespan,
        item_count = schedule.len(),
        "=== Scheduling complete ==="
    );
    Ok(report)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_problem() -> Problem {
        Problem::new(3).with_workers(2).with_dependencies(vec![
            vec![0, 0, 0],
            vec![1, 0, 0],
            vec![0, 1, 0],
        ])
    }

    // ── registry ──────────────────────────────────────────────────────────────

    #[test]
    fn every_name_parses_back() {
        for a in Algorithm::ALL {
            assert_eq!(a.name().parse::<Algorithm>().unwrap(), a);
            assert_eq!(a.to_string(), a.name());
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = schedule("round_robin", &chain_problem()).unwrap_err();
        assert_eq!(err, ScheduleError::UnknownAlgorithm("round_robin".into()));
        assert_eq!(err.kind(), ErrorKind::UnknownAlgorithm);
    }

    #[test]
    fn names_are_case_sensitive() {
        assert!("Johnson".parse::<Algorithm>().is_err());
    }

    // ── dispatch ──────────────────────────────────────────────────────────────

    #[test]
    fn johnson_through_the_registry() {
        let p = Problem::new(3).with_job_times(vec![vec![5.0, 3.0], vec![2.0, 6.0], vec![4.0, 4.0]]);
        let r = schedule("johnson", &p).unwrap();
        assert_eq!(r.algorithm, Algorithm::Johnson);
        assert_eq!(r.job_order, vec![2, 3, 1]);
        assert_eq!(r.makespan, 15.0);
        assert_eq!(r.gantt.len(), 6);
        assert!(r.priorities.is_empty());
    }

    #[test]
    fn level_variants_share_the_chain_result() {
        let tree = schedule("level_strategy", &chain_problem()).unwrap();
        let dag = schedule("level_scheduling", &chain_problem()).unwrap();
        assert_eq!(tree.job_order, vec![1, 2, 3]);
        assert_eq!(tree.job_order, dag.job_order);
        assert_eq!(tree.makespan, 3.0);
        assert_eq!(tree.priorities.len(), 3);
    }

    #[test]
    fn lexicographic_reports_priorities_without_levels() {
        let r = schedule("lexicographic", &chain_problem()).unwrap();
        assert_eq!(r.job_order, vec![1, 2, 3]);
        assert!(r.priorities.iter().all(|p| p.level.is_none()));
    }

    #[test]
    fn processor_sharing_through_the_registry() {
        let p = Problem::new(2)
            .with_workers(1)
            .with_job_times(vec![vec![1.0], vec![1.0]]);
        let r = schedule("processor_sharing", &p).unwrap();
        assert!((r.makespan - 2.0).abs() < 1e-9);
    }

    #[test]
    fn failures_carry_no_partial_schedule() {
        let p = Problem::new(2).with_workers(1).with_dependencies(vec![vec![0, 1], vec![1, 0]]);
        let resp = Response::from(schedule("level_scheduling", &p));
        assert!(!resp.is_success());
    }

    #[test]
    fn repeated_runs_are_identical() {
        let p = Problem::new(5)
            .with_workers(2)
            .with_job_times(vec![vec![2.0], vec![1.0], vec![3.0], vec![1.0], vec![2.0]])
            .with_dependencies(vec![
                vec![0, 0, 0, 0, 0],
                vec![1, 0, 0, 0, 0],
                vec![1, 0, 0, 0, 0],
                vec![0, 1, 1, 0, 0],
                vec![0, 0, 1, 0, 0],
            ]);
        for name in ["level_scheduling", "lexicographic"] {
            let a = serde_json::to_string(&schedule(name, &p).unwrap()).unwrap();
            let b = serde_json::to_string(&schedule(name, &p).unwrap()).unwrap();
            assert_eq!(a, b);
        }
    }
}
