/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core job data structures shared by every scheduling engine.
//!
//! ```text
//! caller input ──►  Job / Worker  ──(engine)──►  ScheduleItem  ──►  Schedule
//!                   ↑ built fresh per call        ↑ immutable record
//! ```
//!
//! # Ownership model
//! Every `Job` and `Worker` is built from caller input at the start of one
//! algorithm run and dropped when the run returns.  The only field an engine
//! writes after construction is [`Job::priority`], and only the engine that
//! owns the job does so.  Processor sharing keeps its remaining-work counters
//! in a private simulation state instead of mutating [`Job::remaining_duration`].

use serde::Serialize;

/// 1-based job identifier, stable across one run and used in all output.
pub type JobId = usize;

/// 1-based worker identifier.
pub type WorkerId = usize;

/// Productivity assumed for a worker when the caller supplies none.
pub const DEFAULT_PRODUCTIVITY: f64 = 1.0;

// ── Stage ─────────────────────────────────────────────────────────────────────

/// One processing step of a job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stage {
    /// 1-based position within the owning job.
    pub number: usize,
    pub name: String,
    /// Amount of work in the stage.  Never negative.
    pub duration: f64,
}

impl Stage {
    pub fn new(number: usize, name: impl Into<String>, duration: f64) -> Self {
        Self {
            number,
            name: name.into(),
            duration,
        }
    }
}

// ── Job ───────────────────────────────────────────────────────────────────────

/// A unit of work to be scheduled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Job {
    pub id: JobId,
    pub name: String,

    /// Priority assigned by a strategy (level or lexicographic).  `0` until a
    /// strategy runs; higher means "start earlier".
    pub priority: u32,

    /// Initial amount of work for processor sharing.  Engines that work with
    /// stages leave this at `0.0`.
    pub remaining_duration: f64,

    pub stages: Vec<Stage>,
}

impl Job {
    /// Creates a job named `"Job {id}"` with no stages.
    pub fn new(id: JobId) -> Self {
        Self {
            id,
            name: format!("Job {id}"),
            priority: 0,
            remaining_duration: 0.0,
            stages: Vec::new(),
        }
    }

    /// Appends a stage numbered after the existing ones.
    pub fn with_stage(mut self, duration: f64) -> Self {
        let number = self.stages.len() + 1;
        let name = format!("Stage {number} of {}", self.name);
        self.stages.push(Stage::new(number, name, duration));
        self
    }

    /// Sets the initial remaining work used by processor sharing.
    pub fn with_remaining(mut self, remaining: f64) -> Self {
        self.remaining_duration = remaining;
        self
    }

    /// 0-based position of this job in its input vector and dependency graph.
    #[inline]
    pub fn index(&self) -> usize {
        self.id - 1
    }

    /// Looks up a stage by its 1-based number.
    pub fn stage(&self, number: usize) -> Option<&Stage> {
        number
            .checked_sub(1)
            .and_then(|i| self.stages.get(i))
    }

    /// Sum of all stage durations.
    pub fn total_duration(&self) -> f64 {
        self.stages.iter().map(|s| s.duration).sum()
    }
}

// ── Worker ────────────────────────────────────────────────────────────────────

/// A processing resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Worker {
    pub id: WorkerId,
    pub name: String,

    /// Throughput multiplier, strictly positive.  A worker with productivity
    /// `2.0` completes two units of work per unit of time.
    pub productivity: f64,

    /// When set, the worker only processes stages with this 1-based number.
    /// Used by the two-machine flow shop.
    pub supported_stage: Option<usize>,
}

impl Worker {
    /// Creates a generic worker named `"Worker {id}"` with default productivity.
    pub fn new(id: WorkerId) -> Self {
        Self {
            id,
            name: format!("Worker {id}"),
            productivity: DEFAULT_PRODUCTIVITY,
            supported_stage: None,
        }
    }

    pub fn with_productivity(mut self, productivity: f64) -> Self {
        self.productivity = productivity;
        self
    }

    /// Restricts the worker to stage `number`.
    pub fn specialized_to(mut self, number: usize) -> Self {
        self.supported_stage = Some(number);
        self
    }

    /// Returns `true` if this worker may process stage `number`.
    pub fn supports(&self, number: usize) -> bool {
        self.supported_stage.map_or(true, |s| s == number)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
