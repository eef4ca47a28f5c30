/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! jobsched – classical job-scheduling heuristics
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── job          – Job, Stage, Worker
//! ├── schedule/    – ScheduleItem, Schedule, Gantt projection
//! ├── graph/       – dependency graph + boolean-matrix closure helpers
//! ├── scheduler/   – registry, typed input/errors, the four engines
//! └── config/      – YAML / JSON problem files
//! ```

pub mod config;
pub mod graph;
pub mod job;
pub mod schedule;
pub mod scheduler;
