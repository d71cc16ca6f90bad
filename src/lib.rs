// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Turns raw latency benchmark results into figures: core-to-core latency
//! heatmaps and a per-element TLB latency plot.

#[macro_use]
extern crate log;

#[macro_use]
mod macros;

mod config;
mod dataset;
mod error;
mod logger;
mod matrix;
mod parse;
mod pipeline;
mod plan;
mod reader;
mod render;

pub use crate::config::{Config, General, Pairwise, Series, NAME, VERSION};
pub use crate::dataset::{DuplicatePolicy, PairwiseDataset, SeriesDataset};
pub use crate::error::{Error, RowError};
pub use crate::logger::Logger;
pub use crate::matrix::{DenseMatrix, GapPolicy};
pub use crate::parse::{parse_fields, parse_row, DELIMITER, PAIRWISE_ARITY, SERIES_ARITY};
pub use crate::pipeline::{Pipeline, Report};
pub use crate::plan::{Job, JobKind, Plan, Suite};
pub use crate::reader::{Header, Line, Reader};
pub use crate::render::{BitmapRenderer, Heatmap, LinePlot, Renderer};

/// Plans and renders every figure of `suite` with the bitmap renderer.
pub fn run(config: &Config, suite: Suite) -> Result<Report, Error> {
    let plan = Plan::discover(config, suite)?;
    plan.print();
    Pipeline::new(config, BitmapRenderer).run(&plan)
}
