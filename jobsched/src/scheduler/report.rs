/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Caller-facing output of one scheduling run.

use std::fmt;

use serde::Serialize;

use crate::job::JobId;
use crate::schedule::{project, GanttEntry, JobPriority, Schedule};

use super::error::ScheduleError;
use super::Algorithm;

/// What a successful run returns: job order, makespan, priorities (level and
/// lexicographic only) and the Gantt projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub algorithm: Algorithm,
    pub job_order: Vec<JobId>,
    pub makespan: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub priorities: Vec<JobPriority>,
    pub gantt: Vec<GanttEntry>,
}

impl Report {
    pub fn new(algorithm: Algorithm, schedule: &Schedule) -> Self {
        Self {
            algorithm,
            job_order: schedule.job_order(),
            makespan: schedule.total_duration(),
            priorities: schedule.priorities().to_vec(),
            gantt: project(schedule),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let order: Vec<String> = self.job_order.iter().map(|id| id.to_string()).collect();
        writeln!(f, "Algorithm: {}", self.algorithm.title())?;
        writeln!(f, "Job order: {}", order.join(", "))?;
        writeln!(f, "Makespan:  {:.3}", self.makespan)?;

        if !self.priorities.is_empty() {
            writeln!(f)?;
            writeln!(f, "{:>6} {:>9} {:>6}", "Job", "Priority", "Level")?;
            for p in &self.priorities {
                let level = p.level.map_or_else(|| "-".to_string(), |l| l.to_string());
                writeln!(f, "{:>6} {:>9} {:>6}", p.job_id, p.priority, level)?;
            }
        }

        writeln!(f)?;
        writeln!(
            f,
            "{:<12} {:>5} {:>6} {:>10} {:>10}",
            "Worker", "Job", "Stage", "Start", "End"
        )?;
        for e in &self.gantt {
            writeln!(
                f,
                "{:<12} {:>5} {:>6} {:>10.3} {:>10.3}",
                e.worker, e.job_id, e.stage, e.start, e.end
            )?;
        }
        Ok(())
    }
}

/// JSON envelope: the report itself on success, `{ "error": true,
/// "message": ... }` on failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Success(Report),
    Failure { error: bool, message: String },
}

impl Response {
    pub fn failure(message: impl Into<String>) -> Self {
        Response::Failure {
            error: true,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }
}

impl From<Result<Report, ScheduleError>> for Response {
    fn from(result: Result<Report, ScheduleError>) -> Self {
        match result {
            Ok(report) => Response::Success(report),
            Err(e) => Response::failure(e.to_string()),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{Job, Worker};
    use crate::schedule::ScheduleItem;
    use crate::scheduler::error::InputIssue;

    fn two_item_schedule() -> Schedule {
        let j1 = Job::new(1).with_stage(2.0);
        let j2 = Job::new(2).with_stage(1.0);
        let w = Worker::new(1);
        let mut s = Schedule::new();
        s.add_item(ScheduleItem::new(&j2, &j2.stages[0], &w, 0.0, 1.0));
        s.add_item(ScheduleItem::new(&j1, &j1.stages[0], &w, 1.0, 3.0));
        s
    }

    #[test]
    fn report_summarizes_the_schedule() {
        let r = Report::new(Algorithm::LevelScheduling, &two_item_schedule());
        assert_eq!(r.job_order, vec![2, 1]);
        assert_eq!(r.makespan, 3.0);
        assert_eq!(r.gantt.len(), 2);
        assert!(r.priorities.is_empty());
    }

    #[test]
    fn report_serializes_algorithm_by_name() {
        let r = Report::new(Algorithm::ProcessorSharing, &two_item_schedule());
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["algorithm"], "processor_sharing");
        assert_eq!(json["job_order"], serde_json::json!([2, 1]));
        assert!(json.get("priorities").is_none());
        assert!(json["gantt"][0].get("worker_id").is_none());
    }

    #[test]
    fn failure_envelope_has_error_flag_and_message() {
        let err: ScheduleError = InputIssue::NoJobs.into();
        let resp = Response::from(Err(err));
        assert!(!resp.is_success());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["error"], true);
        assert_eq!(json["message"], "invalid input: at least one job is required");
    }

    #[test]
    fn text_rendering_lists_every_bar() {
        let r = Report::new(Algorithm::Johnson, &two_item_schedule());
        let text = r.to_string();
        assert!(text.contains("Job order: 2, 1"));
        assert!(text.contains("Makespan:  3.000"));
        assert_eq!(text.matches("Worker 1").count(), 2);
    }
}
