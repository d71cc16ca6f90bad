// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Config, Error};

use std::path::PathBuf;

/// Which family of benchmark results a binary renders.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Suite {
    /// core-to-core latency heatmaps
    Pairwise,
    /// per-element TLB latency plot
    Series,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JobKind {
    Heatmap { operation: String },
    Series,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    label: String,
    kind: JobKind,
    input: PathBuf,
    output: PathBuf,
    required: bool,
}

impl Job {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> &JobKind {
        &self.kind
    }

    pub fn input(&self) -> &PathBuf {
        &self.input
    }

    pub fn output(&self) -> &PathBuf {
        &self.output
    }

    pub fn required(&self) -> bool {
        self.required
    }
}

/// The jobs an invocation will run, decided before any file is parsed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plan {
    jobs: Vec<Job>,
    skipped: Vec<Job>,
}

impl Plan {
    /// Enumerates the expected inputs for `suite`.
    ///
    /// Optional jobs whose input is absent or not a regular file are recorded
    /// as skipped. A required input in that state fails the whole plan.
    pub fn discover(config: &Config, suite: Suite) -> Result<Plan, Error> {
        let mut plan = Plan::default();
        for job in candidates(config, suite)? {
            match std::fs::metadata(&job.input) {
                Ok(meta) if meta.is_file() => plan.jobs.push(job),
                Err(e) if job.required => {
                    return Err(Error::MissingInput {
                        path: job.input,
                        source: e,
                    })
                }
                Ok(_) if job.required => return Err(missing(&job, "not a regular file")),
                _ => {
                    debug!("no input for {}: {}", job.label, job.input.display());
                    plan.skipped.push(job);
                }
            }
        }
        Ok(plan)
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn skipped(&self) -> &[Job] {
        &self.skipped
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn print(&self) {
        info!("-----");
        for job in &self.jobs {
            info!(
                "Plan: Run: {} Input: {} Output: {}",
                job.label,
                job.input.display(),
                job.output.display()
            );
        }
        for job in &self.skipped {
            info!("Plan: Skip: {} (no {})", job.label, job.input.display());
        }
        if self.jobs.is_empty() {
            info!("Plan: nothing to render");
        }
    }
}

fn missing(job: &Job, reason: &str) -> Error {
    Error::MissingInput {
        path: job.input.clone(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, reason),
    }
}

fn candidates(config: &Config, suite: Suite) -> Result<Vec<Job>, Error> {
    let data = config.data_dir();
    let figures = config.figures_dir();

    let mut jobs = Vec::new();
    match suite {
        Suite::Pairwise => {
            let pairwise = config.pairwise();
            for required in pairwise.required() {
                if !pairwise.operations().contains(required) {
                    return Err(Error::Config(format!(
                        "required operation {} is not in operations",
                        required
                    )));
                }
            }
            for operation in pairwise.operations() {
                validate_operation(operation)?;
                if jobs
                    .iter()
                    .any(|j: &Job| j.kind == JobKind::Heatmap { operation: operation.clone() })
                {
                    return Err(Error::Config(format!("operation {} listed twice", operation)));
                }
                jobs.push(Job {
                    label: operation.clone(),
                    kind: JobKind::Heatmap {
                        operation: operation.clone(),
                    },
                    input: data.join(pairwise.input_file(operation)),
                    output: figures.join(pairwise.output_file(operation)),
                    required: pairwise.is_required(operation),
                });
            }
        }
        Suite::Series => {
            let series = config.series();
            if series.enabled() {
                jobs.push(Job {
                    label: "tlb".to_string(),
                    kind: JobKind::Series,
                    input: data.join(series.input()),
                    output: figures.join(series.output()),
                    required: series.required(),
                });
            }
        }
    }
    Ok(jobs)
}

/// operation labels become part of file names
fn validate_operation(operation: &str) -> Result<(), Error> {
    if operation.is_empty() {
        return Err(Error::Config("empty operation name".to_string()));
    }
    if !operation
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(Error::Config(format!(
            "operation name {:?} may only contain letters, digits, '_' and '-'",
            operation
        )));
    }
    Ok(())
}
