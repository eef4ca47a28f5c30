/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Chart-ready projection of a [`Schedule`].
//!
//! Free functions rather than methods so a caller holding only a slice of
//! items can project them too.

use serde::Serialize;

use super::{Schedule, ScheduleItem};
use crate::job::{JobId, WorkerId};

/// One bar of a Gantt chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GanttEntry {
    pub worker: String,
    #[serde(skip)]
    pub worker_id: WorkerId,
    pub job_id: JobId,
    pub stage: usize,
    pub start: f64,
    pub end: f64,
}

impl From<&ScheduleItem> for GanttEntry {
    fn from(item: &ScheduleItem) -> Self {
        Self {
            worker: item.worker_name().to_string(),
            worker_id: item.worker_id(),
            job_id: item.job_id(),
            stage: item.stage().number,
            start: item.start(),
            end: item.end(),
        }
    }
}

/// Projects `schedule` into Gantt entries sorted by start time, then worker
/// id, then job id.
pub fn project(schedule: &Schedule) -> Vec<GanttEntry> {
    project_items(schedule.items())
}

pub fn project_items(items: &[ScheduleItem]) -> Vec<GanttEntry> {
    let mut entries: Vec<GanttEntry> = items.iter().map(GanttEntry::from).collect();
    entries.sort_by(|a, b| {
        a.start
            .total_cmp(&b.start)
            .then(a.worker_id.cmp(&b.worker_id))
            .then(a.job_id.cmp(&b.job_id))
    });
    entries
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{Job, Worker};

    #[test]
    fn entries_are_sorted_by_start_then_worker() {
        let j1 = Job::new(1).with_stage(3.0).with_stage(2.0);
        let j2 = Job::new(2).with_stage(1.0);
        let w1 = Worker::new(1);
        let w2 = Worker::new(2);

        let mut s = Schedule::new();
        s.add_item(ScheduleItem::new(&j1, &j1.stages[1], &w2, 3.0, 5.0));
        s.add_item(ScheduleItem::new(&j2, &j2.stages[0], &w2, 0.0, 1.0));
        s.add_item(ScheduleItem::new(&j1, &j1.stages[0], &w1, 0.0, 3.0));

        let g = project(&s);
        let keys: Vec<(usize, usize, usize)> =
            g.iter().map(|e| (e.worker_id, e.job_id, e.stage)).collect();
        assert_eq!(keys, vec![(1, 1, 1), (2, 2, 1), (2, 1, 2)]);
        assert_eq!(g[0].worker, "Worker 1");
        assert_eq!(g[2].start, 3.0);
        assert_eq!(g[2].end, 5.0);
    }

    #[test]
    fn empty_schedule_projects_to_nothing() {
        assert!(project(&Schedule::new()).is_empty());
    }
}
