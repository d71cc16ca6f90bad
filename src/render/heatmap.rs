// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use super::colour::{colour_from_value, text_colour};
use super::Heatmap;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use std::convert::TryFrom;
use std::error::Error;
use std::path::Path;

const TITLE_HEIGHT: i32 = 80;
const TITLE_SIZE: i32 = 48;
const MARGIN: i32 = 20;
/// room for the row and column coordinate labels, in pixels
const LABEL_AREA: i32 = 80;
const LABEL_SIZE: i32 = 28;
const LEGEND_WIDTH: i32 = 220;
const LEGEND_STEPS: i32 = 64;

/// Pixel geometry of the cell grid, fixed by the image size alone.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(super) struct Layout {
    pub grid_width: i32,
    pub cell_width: i32,
    pub cell_height: i32,
}

/// Works out the cell size before anything is drawn. An empty matrix has no
/// grid and gives `None`.
pub(super) fn layout(plot: &Heatmap<'_>) -> Result<Option<Layout>, String> {
    let matrix = plot.matrix;
    if matrix.is_empty() {
        return Ok(None);
    }

    let (width, height) = (i64::from(plot.size.0), i64::from(plot.size.1));
    let grid_width = width - 2 * i64::from(MARGIN) - i64::from(LEGEND_WIDTH);
    let grid_height = height - i64::from(TITLE_HEIGHT) - i64::from(MARGIN);
    let cell_width = (grid_width - i64::from(LABEL_AREA)) / matrix.width() as i64;
    let cell_height = (grid_height - i64::from(LABEL_AREA)) / matrix.height() as i64;

    let too_small = || {
        format!(
            "{}x{} pixels cannot fit a {}x{} grid",
            plot.size.0,
            plot.size.1,
            matrix.height(),
            matrix.width()
        )
    };
    if cell_width < 1 || cell_height < 1 {
        return Err(too_small());
    }

    let narrow = |v: i64| i32::try_from(v).map_err(|_| too_small());
    Ok(Some(Layout {
        grid_width: narrow(grid_width)?,
        cell_width: narrow(cell_width)?,
        cell_height: narrow(cell_height)?,
    }))
}

pub fn draw(plot: &Heatmap<'_>, path: &Path) -> Result<(), Box<dyn Error>> {
    let matrix = plot.matrix;
    let layout = layout(plot)?;

    let root = BitMapBackend::new(path, plot.size).into_drawing_area();
    root.fill(&WHITE)?;

    let (title, body) = root.split_vertically(TITLE_HEIGHT);
    let title_style = TextStyle::from(("sans-serif", TITLE_SIZE).into_font())
        .pos(Pos::new(HPos::Center, VPos::Center));
    title.draw(&Text::new(
        plot.caption.clone(),
        (plot.size.0 as i32 / 2, TITLE_HEIGHT / 2),
        title_style,
    ))?;

    let (layout, min, max) = match (layout, matrix.min(), matrix.max()) {
        (Some(layout), Some(min), Some(max)) => (layout, min, max),
        _ => {
            root.present()?;
            return Ok(());
        }
    };

    let body = body.margin(0, MARGIN, MARGIN, MARGIN);
    let (grid, legend) = body.split_horizontally(layout.grid_width);
    let (cell_w, cell_h) = (layout.cell_width, layout.cell_height);

    let centre = Pos::new(HPos::Center, VPos::Center);
    let label_style = TextStyle::from(("sans-serif", LABEL_SIZE).into_font()).pos(centre);

    // column labels run along the top, rows down the left
    for (j, col) in matrix.cols().iter().enumerate() {
        let x = LABEL_AREA + j as i32 * cell_w + cell_w / 2;
        grid.draw(&Text::new(
            col.to_string(),
            (x, LABEL_AREA / 2),
            label_style.clone(),
        ))?;
    }
    for (i, row) in matrix.rows().iter().enumerate() {
        let y = LABEL_AREA + i as i32 * cell_h + cell_h / 2;
        grid.draw(&Text::new(
            row.to_string(),
            (LABEL_AREA / 2, y),
            label_style.clone(),
        ))?;
    }

    let font_size = (cell_w.min(cell_h) / 3).max(10).min(LABEL_SIZE);
    for (i, j, value) in matrix.cells() {
        let x0 = LABEL_AREA + j as i32 * cell_w;
        let y0 = LABEL_AREA + i as i32 * cell_h;

        let fill = colour_from_value(value, min, max);
        grid.draw(&Rectangle::new(
            [(x0, y0), (x0 + cell_w, y0 + cell_h)],
            fill.filled(),
        ))?;

        let ink = text_colour(&fill);
        let style = TextStyle::from(("sans-serif", font_size).into_font())
            .color(&ink)
            .pos(centre);
        grid.draw(&Text::new(
            value.to_string(),
            (x0 + cell_w / 2, y0 + cell_h / 2),
            style,
        ))?;
    }

    draw_legend(&legend, min, max)?;

    root.present()?;
    Ok(())
}

/// value shown at `fraction` of the way from `min` to `max`
pub(super) fn legend_value(min: i64, max: i64, fraction: f64) -> i64 {
    // float to int casts saturate
    (min as f64 + (max as f64 - min as f64) * fraction).round() as i64
}

/// labels for the top, middle and bottom of the legend
pub(super) fn legend_labels(min: i64, max: i64) -> [i64; 3] {
    let mid = (i128::from(min) + i128::from(max)) / 2;
    [max, mid as i64, min]
}

/// vertical colour bar with max at the top and min at the bottom
fn draw_legend(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    min: i64,
    max: i64,
) -> Result<(), Box<dyn Error>> {
    let (_, height) = area.dim_in_pixel();
    let top = LABEL_AREA;
    let step = (height as i32 - 2 * LABEL_AREA) / LEGEND_STEPS;
    if step < 1 {
        return Ok(());
    }

    let bar_left = 30;
    let bar_right = 80;
    for k in 0..LEGEND_STEPS {
        let fraction = 1.0 - k as f64 / (LEGEND_STEPS - 1) as f64;
        let value = legend_value(min, max, fraction);
        let y0 = top + k * step;
        area.draw(&Rectangle::new(
            [(bar_left, y0), (bar_right, y0 + step)],
            colour_from_value(value, min, max).filled(),
        ))?;
    }

    let bottom = top + LEGEND_STEPS * step;
    let style = TextStyle::from(("sans-serif", LABEL_SIZE).into_font())
        .pos(Pos::new(HPos::Left, VPos::Center));
    let [high, mid, low] = legend_labels(min, max);
    for (value, y) in &[(high, top), (mid, (top + bottom) / 2), (low, bottom)] {
        area.draw(&Text::new(
            value.to_string(),
            (bar_right + 10, *y),
            style.clone(),
        ))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DenseMatrix, GapPolicy, PairwiseDataset};

    fn matrix(cores: i64) -> DenseMatrix {
        let dataset = PairwiseDataset::from_rows(
            (0..cores).flat_map(|a| (0..cores).map(move |b| [a, b, a * 10 + b])),
        );
        DenseMatrix::from_dataset(&dataset, GapPolicy::Reject).unwrap()
    }

    #[test]
    fn default_size_layout() {
        let matrix = matrix(2);
        let layout = layout(&Heatmap::new(&matrix, "Read")).unwrap().unwrap();
        assert_eq!(layout.grid_width, 2500 - 40 - 220);
        assert_eq!(layout.cell_width, (2240 - 80) / 2);
        assert_eq!(layout.cell_height, (1500 - 80 - 20 - 80) / 2);
    }

    #[test]
    fn empty_matrix_has_no_grid() {
        let matrix = DenseMatrix::default();
        assert_eq!(layout(&Heatmap::new(&matrix, "Read")), Ok(None));
    }

    #[test]
    fn too_small_for_grid() {
        let matrix = matrix(2);
        let plot = Heatmap::new(&matrix, "Read").size((300, 300));
        assert_eq!(
            layout(&plot),
            Err("300x300 pixels cannot fit a 2x2 grid".to_string())
        );

        let plot = Heatmap::new(&matrix, "Read").size((0, 0));
        assert!(layout(&plot).is_err());
    }

    #[test]
    fn legend_handles_extremes() {
        assert_eq!(legend_labels(0, 100), [100, 50, 0]);
        assert_eq!(legend_labels(i64::MIN, i64::MAX), [i64::MAX, 0, i64::MIN]);
        assert_eq!(legend_value(i64::MIN, i64::MAX, 1.0), i64::MAX);
        assert_eq!(legend_value(i64::MIN, i64::MAX, 0.0), i64::MIN);
        assert_eq!(legend_value(7, 7, 0.5), 7);
    }
}
