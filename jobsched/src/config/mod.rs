/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Problem file loading.
//!
//! A problem file describes one scheduling run.  The expected YAML structure
//! is (JSON works too):
//! ```yaml
//! algorithm: johnson          # optional, the CLI flag wins
//! num_jobs: 3
//! num_workers: 2              # optional for johnson
//! job_times:                  # alias: job_durations
//!   - [5, 3]
//!   - [2, 6]
//!   - [4, 4]
//! dependencies: []            # n × n 0/1, row i depends on column j
//! worker_productivities: []   # flat list or one-value rows
//! worker_stages: [1, 2]       # johnson only
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::scheduler::Problem;

// ── Private YAML deserialization types ────────────────────────────────────────

/// Maps directly onto the file layout; callers get a [`Problem`] instead.
#[derive(Debug, Deserialize)]
struct ProblemFile {
    #[serde(default)]
    algorithm: Option<String>,
    num_jobs: usize,
    #[serde(default)]
    num_workers: Option<usize>,
    #[serde(default, alias = "job_durations")]
    job_times: Vec<Vec<f64>>,
    #[serde(default)]
    dependencies: Vec<Vec<i64>>,
    #[serde(default)]
    worker_productivities: Option<Productivities>,
    #[serde(default)]
    worker_stages: Vec<usize>,
}

/// Productivities are accepted as a flat list or as a column of one-value
/// rows.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Productivities {
    Flat(Vec<f64>),
    Rows(Vec<Vec<f64>>),
}

impl Productivities {
    fn flatten(self) -> Result<Vec<f64>> {
        match self {
            Productivities::Flat(values) => Ok(values),
            Productivities::Rows(rows) => rows
                .into_iter()
                .enumerate()
                .map(|(i, row)| match row.as_slice() {
                    &[value] => Ok(value),
                    _ => bail!(
                        "worker_productivities row {} must hold exactly one value, got {}",
                        i + 1,
                        row.len()
                    ),
                })
                .collect(),
        }
    }
}

// ── ProblemLoader ─────────────────────────────────────────────────────────────

/// Loads a [`Problem`] (and an optional algorithm name) from a file.
#[derive(Debug, Default)]
pub struct ProblemLoader {
    problem: Option<Problem>,
    algorithm: Option<String>,
}

impl ProblemLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `path`.  A second call replaces whatever was loaded before.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or does not match the
    /// problem layout.
    pub fn load_from_file(&mut self, path: &Path) -> Result<()> {
        info!("Loading problem from: {}", path.display());

        self.problem = None;
        self.algorithm = None;

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open problem file: {}", path.display()))?;

        self.load_from_str(&content)
            .with_context(|| format!("Failed to parse problem file: {}", path.display()))
    }

    /// Same as [`load_from_file`](Self::load_from_file) for in-memory text.
    pub fn load_from_str(&mut self, content: &str) -> Result<()> {
        self.problem = None;
        self.algorithm = None;

        let file: ProblemFile = serde_yaml::from_str(content)?;
        let worker_productivities = match file.worker_productivities {
            Some(p) => p.flatten()?,
            None => Vec::new(),
        };

        let problem = Problem {
            num_jobs: file.num_jobs,
            num_workers: file.num_workers,
            job_times: file.job_times,
            dependencies: file.dependencies,
            worker_productivities,
            worker_stages: file.worker_stages,
        };

        debug!(
            num_jobs = problem.num_jobs,
            num_workers = ?problem.num_workers,
            duration_rows = problem.job_times.len(),
            matrix_rows = problem.dependencies.len(),
            "problem parsed"
        );
        info!(
            algorithm = ?file.algorithm,
            "Loaded problem with {} job(s)",
            problem.num_jobs
        );

        self.problem = Some(problem);
        self.algorithm = file.algorithm;
        Ok(())
    }

    pub fn problem(&self) -> Option<&Problem> {
        self.problem.as_ref()
    }

    /// Algorithm named in the file, if any.
    pub fn algorithm(&self) -> Option<&str> {
        self.algorithm.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.problem.is_some()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
