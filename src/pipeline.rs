// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::plan::{Job, JobKind, Plan};
use crate::render::{Heatmap, LinePlot, Renderer};
use crate::{Config, DenseMatrix, Error, PairwiseDataset, SeriesDataset};

use std::path::{Path, PathBuf};

/// What a run produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub artifacts: Vec<PathBuf>,
    pub skipped: Vec<String>,
}

/// Runs each planned job through load, shape and render, stopping at the
/// first failure.
pub struct Pipeline<'a, R: Renderer> {
    config: &'a Config,
    renderer: R,
}

impl<'a, R: Renderer> Pipeline<'a, R> {
    pub fn new(config: &'a Config, renderer: R) -> Self {
        Self { config, renderer }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    pub fn run(&mut self, plan: &Plan) -> Result<Report, Error> {
        let mut report = Report {
            artifacts: Vec::new(),
            skipped: plan.skipped().iter().map(|j| j.label().to_owned()).collect(),
        };
        for job in plan.jobs() {
            self.run_job(job)?;
            info!("wrote {}", job.output().display());
            report.artifacts.push(job.output().clone());
        }
        Ok(report)
    }

    fn run_job(&mut self, job: &Job) -> Result<(), Error> {
        match job.kind() {
            JobKind::Heatmap { operation } => {
                let pairwise = self.config.pairwise();
                let dataset = PairwiseDataset::load(job.input(), pairwise.duplicates())?;
                let matrix = DenseMatrix::from_dataset(&dataset, pairwise.gap_policy())?;
                debug!(
                    "{}: {} measurements over {}x{} cores",
                    operation,
                    dataset.len(),
                    matrix.height(),
                    matrix.width()
                );
                let plot = Heatmap::new(&matrix, heatmap_caption(operation)).size(pairwise.size());
                prepare_output(job.output())?;
                self.renderer.heatmap(&plot, job.output())
            }
            JobKind::Series => {
                let series = SeriesDataset::load(job.input())?;
                debug!("{}: {} elements", job.label(), series.len());
                let plot = LinePlot::new(&series, "Output Latency Per Element")
                    .x_desc("Element Index")
                    .y_desc("Output Latency (Nanoseconds)")
                    .size(self.config.series().size());
                prepare_output(job.output())?;
                self.renderer.line(&plot, job.output())
            }
        }
    }
}

fn prepare_output(output: &Path) -> Result<(), Error> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| Error::Output {
                path: parent.to_owned(),
                source,
            })?;
        }
    }
    Ok(())
}

pub(crate) fn heatmap_caption(operation: &str) -> String {
    format!(
        "{} Latency (Nanoseconds) Per CPU Core Pair",
        title_case(operation)
    )
}

/// Uppercases the first letter of each alphabetic run and lowercases the rest.
pub(crate) fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut previous_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if previous_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_alpha = true;
        } else {
            out.push(c);
            previous_alpha = false;
        }
    }
    out
}
