/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Schedule (solution) model.
//!
//! A [`Schedule`] is the insertion-ordered list of [`ScheduleItem`]s an
//! engine produced, together with the priority table it used (if any).
//! [`gantt`] projects it into a time-ordered, chart-ready sequence.

pub mod gantt;

use serde::Serialize;

use crate::job::{Job, JobId, Stage, Worker, WorkerId};

pub use gantt::{project, GanttEntry};

// ── ScheduleItem ──────────────────────────────────────────────────────────────

/// Immutable record: one stage of one job ran on one worker during
/// `[start, end]`.
///
/// The stage is copied in; its `duration` is the amount of work performed in
/// this interval, which for processor sharing is less than the interval
/// length times the worker's productivity whenever the worker is shared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleItem {
    job_id: JobId,
    stage: Stage,
    worker_id: WorkerId,
    worker_name: String,
    start: f64,
    end: f64,
}

impl ScheduleItem {
    pub fn new(job: &Job, stage: &Stage, worker: &Worker, start: f64, end: f64) -> Self {
        debug_assert!(start <= end, "schedule item ends before it starts");
        Self {
            job_id: job.id,
            stage: stage.clone(),
            worker_id: worker.id,
            worker_name: worker.name.clone(),
            start,
            end,
        }
    }

    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn worker_id(&self) -> WorkerId {
        self.worker_id
    }

    pub fn worker_name(&self) -> &str {
        &self.worker_name
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Work performed per unit of time.  `0.0` for zero-length items.
    pub fn rate(&self) -> f64 {
        let len = self.length();
        if len > 0.0 {
            self.stage.duration / len
        } else {
            0.0
        }
    }

    /// Returns `true` if the item is running at instant `t` (half-open).
    pub fn covers(&self, t: f64) -> bool {
        self.start <= t && t < self.end
    }
}

// ── Priority table ────────────────────────────────────────────────────────────

/// Priority a strategy assigned to one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JobPriority {
    pub job_id: JobId,
    pub priority: u32,
    /// Topological level, for strategies that compute one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
}

// ── Schedule ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schedule {
    items: Vec<ScheduleItem>,
    priorities: Vec<JobPriority>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&mut self, item: ScheduleItem) {
        self.items.push(item);
    }

    /// Records the priority a strategy gave `job`.
    pub fn record_priority(&mut self, job: &Job, level: Option<u32>) {
        self.priorities.push(JobPriority {
            job_id: job.id,
            priority: job.priority,
            level,
        });
    }

    pub fn items(&self) -> &[ScheduleItem] {
        &self.items
    }

    pub fn priorities(&self) -> &[JobPriority] {
        &self.priorities
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Makespan: latest end time across all items, `0.0` when empty.
    pub fn total_duration(&self) -> f64 {
        self.items.iter().map(|i| i.end).fold(0.0, f64::max)
    }

    /// Job ids in execution-start order.
    ///
    /// Items are ordered by start time (stable, so insertion order breaks
    /// ties) and each job is listed at its first appearance.
    pub fn job_order(&self) -> Vec<JobId> {
        let mut by_start: Vec<&ScheduleItem> = self.items.iter().collect();
        by_start.sort_by(|a, b| a.start.total_cmp(&b.start));

        let mut seen = Vec::new();
        for item in by_start {
            if !seen.contains(&item.job_id) {
                seen.push(item.job_id);
            }
        }
        seen
    }

    pub fn items_for_job(&self, job_id: JobId) -> Vec<&ScheduleItem> {
        self.items.iter().filter(|i| i.job_id == job_id).collect()
    }

    pub fn items_for_worker(&self, worker_id: WorkerId) -> Vec<&ScheduleItem> {
        self.items
            .iter()
            .filter(|i| i.worker_id == worker_id)
            .collect()
    }

    /// Earliest start of any item of `job_id`.
    pub fn start_time(&self, job_id: JobId) -> Option<f64> {
        self.items
            .iter()
            .filter(|i| i.job_id == job_id)
            .map(|i| i.start)
            .reduce(f64::min)
    }

    /// Latest end of any item of `job_id`.
    pub fn completion_time(&self, job_id: JobId) -> Option<f64> {
        self.items
            .iter()
            .filter(|i| i.job_id == job_id)
            .map(|i| i.end)
            .reduce(f64::max)
    }

    /// Total work recorded for `job_id` (sum of item stage durations).
    pub fn work_done(&self, job_id: JobId) -> f64 {
        self.items
            .iter()
            .filter(|i| i.job_id == job_id)
            .map(|i| i.stage.duration)
            .sum()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
