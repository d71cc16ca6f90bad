// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::colour::LINE_COLOUR;
use super::LinePlot;
use crate::SeriesDataset;

use plotters::prelude::*;

use std::error::Error;
use std::ops::Range;
use std::path::Path;

pub fn draw(plot: &LinePlot<'_>, path: &Path) -> Result<(), Box<dyn Error>> {
    let values = plot.series.values();
    let x_end = (values.len() as i64).max(1);
    let y_range = value_range(plot.series);

    let root = BitMapBackend::new(path, plot.size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&plot.caption, ("sans-serif", 40))
        .margin(20)
        .set_label_area_size(LabelAreaPosition::Left, 100)
        .set_label_area_size(LabelAreaPosition::Bottom, 60)
        .build_cartesian_2d(0i64..x_end, y_range)?;

    chart
        .configure_mesh()
        .x_desc(plot.x_desc.as_str())
        .y_desc(plot.y_desc.as_str())
        .label_style(("sans-serif", 20))
        .draw()?;

    let series = values
        .iter()
        .enumerate()
        .map(|(index, value)| (index as i64, *value as f64));
    chart.draw_series(LineSeries::new(series, LINE_COLOUR.stroke_width(2)))?;

    root.present()?;
    Ok(())
}

/// y axis covering every value, padded when the series is flat or empty
///
/// The axis is in floating point so that any pair of i64 values gives a
/// finite, non-empty span.
pub(super) fn value_range(series: &SeriesDataset) -> Range<f64> {
    match (series.min(), series.max()) {
        (Some(min), Some(max)) if min < max => min as f64..max as f64,
        (Some(value), _) => {
            let value = value as f64;
            let pad = (value.abs() * 0.05).max(1.0);
            value - pad..value + pad
        }
        _ => 0.0..1.0,
    }
}
