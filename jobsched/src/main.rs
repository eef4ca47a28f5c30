/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};

use jobsched::config::ProblemLoader;
use jobsched::scheduler::{self, Algorithm, Response};

// ── CLI argument definition ───────────────────────────────────────────────────

/// Classical job-scheduling heuristics.
///
/// Example:
///   jobsched run --problem demos/johnson.yaml --format text
#[derive(Debug, Parser)]
#[command(
    name = "jobsched",
    about = "Johnson, level, lexicographic and processor-sharing schedulers",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the registered algorithms.
    List,

    /// Schedule the jobs described in a problem file.
    Run {
        /// Path to the YAML (or JSON) problem file.
        #[arg(short = 'p', long = "problem")]
        problem: PathBuf,

        /// Algorithm name; overrides the one in the problem file.
        #[arg(short = 'a', long = "algorithm")]
        algorithm: Option<String>,

        /// Output format.
        #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::Json)]
        format: Format,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    // Logs go to stderr so stdout carries only the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::List => list_algorithms(),
        Command::Run {
            problem,
            algorithm,
            format,
        } => {
            let response = run_problem(&problem, algorithm.as_deref()).unwrap_or_else(|e| {
                error!("Failed to run problem: {:#}", e);
                Response::failure(format!("{e:#}"))
            });
            print_response(&response, format);
            if !response.is_success() {
                process::exit(1);
            }
        }
    }
}

fn list_algorithms() {
    for a in Algorithm::ALL {
        println!("{:<18} {}", a.name(), a.title());
        println!("{:<18} {}", "", a.description());
    }
}

/// Loads `path` and schedules it.  Scheduling failures become a failure
/// response; only loading problems surface as `Err`.
fn run_problem(path: &Path, algorithm: Option<&str>) -> Result<Response> {
    let mut loader = ProblemLoader::new();
    loader.load_from_file(path)?;

    let problem = loader
        .problem()
        .context("problem file produced no problem")?;
    let name = algorithm
        .or(loader.algorithm())
        .context("no algorithm given on the command line or in the problem file")?;

    info!(algorithm = name, problem = %path.display(), "Scheduling");
    Ok(Response::from(scheduler::schedule(name, problem)))
}

fn print_response(response: &Response, format: Format) {
    match (format, response) {
        (Format::Text, Response::Success(report)) => print!("{report}"),
        (Format::Text, Response::Failure { message, .. }) => println!("error: {message}"),
        (Format::Json, _) => match serde_json::to_string_pretty(response) {
            Ok(json) => println!("{json}"),
            Err(e) => error!("Failed to render response: {}", e),
        },
    }
}
