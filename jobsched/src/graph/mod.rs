/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Dependency graph over the jobs of one scheduling run.
//!
//! Jobs are addressed by their 0-based index (`job.id - 1`).  The edge
//! `a → b` means **"a depends on b"**: `b` must complete before `a` may
//! start.  Every engine and the input matrix use this one direction.
//!
//! | Query | Meaning |
//! |---|---|
//! | [`dependencies_of`](JobGraph::dependencies_of) | outgoing edges: what a job waits for |
//! | [`dependents_of`](JobGraph::dependents_of) | incoming edges: who waits for a job |
//! | [`roots`](JobGraph::roots) | no outgoing edge: jobs that wait for nothing |
//! | [`sources`](JobGraph::sources) | no incoming edge: jobs nothing waits for |
//!
//! The adjacency is a dense boolean matrix; job counts handled here are
//! small and the matrix form is what the input and the closure helpers use.

pub mod closure;

use tracing::debug;

use crate::scheduler::error::{ScheduleError, StructureIssue};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobGraph {
    adj: closure::Matrix,
}

impl JobGraph {
    /// Creates a graph with `job_count` jobs and no dependencies.
    pub fn new(job_count: usize) -> Self {
        Self {
            adj: vec![vec![false; job_count]; job_count],
        }
    }

    pub fn job_count(&self) -> usize {
        self.adj.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adj
            .iter()
            .map(|row| row.iter().filter(|&&e| e).count())
            .sum()
    }

    /// Records that `from` depends on `to`.
    ///
    /// # Panics
    /// If either index is out of range.
    pub fn add_dependency(&mut self, from: usize, to: usize) {
        self.adj[from][to] = true;
    }

    /// # Panics
    /// If either index is out of range.
    pub fn remove_dependency(&mut self, from: usize, to: usize) {
        self.adj[from][to] = false;
    }

    /// Returns `true` if `from` directly depends on `to`.
    pub fn depends_on(&self, from: usize, to: usize) -> bool {
        self.adj
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .unwrap_or(false)
    }

    /// Jobs `job` directly depends on, ascending.
    pub fn dependencies_of(&self, job: usize) -> Vec<usize> {
        match self.adj.get(job) {
            Some(row) => (0..row.len()).filter(|&j| row[j]).collect(),
            None => Vec::new(),
        }
    }

    /// Jobs that directly depend on `job`, ascending.
    pub fn dependents_of(&self, job: usize) -> Vec<usize> {
        (0..self.job_count())
            .filter(|&i| self.depends_on(i, job))
            .collect()
    }

    /// Jobs with no outgoing edge (they depend on nothing), ascending.
    pub fn roots(&self) -> Vec<usize> {
        (0..self.job_count())
            .filter(|&i| !self.adj[i].iter().any(|&e| e))
            .collect()
    }

    /// Jobs with no incoming edge (nothing depends on them), ascending.
    pub fn sources(&self) -> Vec<usize> {
        (0..self.job_count())
            .filter(|&j| !(0..self.job_count()).any(|i| self.adj[i][j]))
            .collect()
    }

    /// Deletes every edge implied by a longer path through a third job,
    /// leaving the minimal equivalent precedence relation.
    pub fn remove_transitive_edges(&mut self) {
        let before = self.edge_count();
        self.adj = closure::transitive_reduction(&self.adj);
        debug!(
            before,
            after = self.edge_count(),
            "removed transitive dependencies"
        );
    }

    pub fn is_acyclic(&self) -> bool {
        !closure::has_cycle(&self.adj)
    }

    /// Orders jobs so that every job comes after all jobs it depends on.
    /// Among jobs that become available together, lower indices come first.
    ///
    /// # Errors
    /// [`StructureIssue::Cycle`] listing the jobs that could not be ordered.
    pub fn topological_order(&self) -> Result<Vec<usize>, ScheduleError> {
        let n = self.job_count();
        let mut placed = vec![false; n];
        let mut order = Vec::with_capacity(n);

        while order.len() < n {
            let wave: Vec<usize> = (0..n)
                .filter(|&j| !placed[j])
                .filter(|&j| self.dependencies_of(j).iter().all(|&d| placed[d]))
                .collect();

            if wave.is_empty() {
                let jobs = (0..n).filter(|&j| !placed[j]).map(|j| j + 1).collect();
                return Err(StructureIssue::Cycle { jobs }.into());
            }
            for j in wave {
                placed[j] = true;
                order.push(j);
            }
        }
        Ok(order)
    }

    /// # Errors
    /// [`StructureIssue::Cycle`] if any job can reach itself.
    pub fn ensure_acyclic(&self) -> Result<(), ScheduleError> {
        self.topological_order().map(|_| ())
    }

    /// Returns `true` iff the graph is a tree leading to one root: exactly one
    /// job depends on nothing, every other job depends on exactly one job, and
    /// following dependencies from any job ends at that root without looping.
    pub fn is_tree_to_root(&self) -> bool {
        let n = self.job_count();
        let roots = self.roots();
        let &[root] = roots.as_slice() else {
            return false;
        };

        let mut next = vec![root; n];
        for (job, slot) in next.iter_mut().enumerate() {
            if job == root {
                continue;
            }
            match self.dependencies_of(job).as_slice() {
                &[parent] => *slot = parent,
                _ => return false,
            }
        }

        (0..n).all(|start| {
            let mut cur = start;
            let mut steps = 0;
            while cur != root {
                cur = next[cur];
                steps += 1;
                if steps > n {
                    return false;
                }
            }
            true
        })
    }

    /// # Errors
    /// [`StructureIssue::NotTreeToRoot`] when [`is_tree_to_root`](Self::is_tree_to_root) fails.
    pub fn ensure_tree_to_root(&self) -> Result<(), ScheduleError> {
        if self.is_tree_to_root() {
            Ok(())
        } else {
            Err(StructureIssue::NotTreeToRoot.into())
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
