// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod colour;
mod heatmap;
mod line;

use crate::{DenseMatrix, Error, SeriesDataset};

use std::path::{Path, PathBuf};

/// A dense matrix with the labels needed to draw it as a heatmap.
#[derive(Clone, Debug)]
pub struct Heatmap<'a> {
    pub caption: String,
    pub size: (u32, u32),
    pub matrix: &'a DenseMatrix,
}

impl<'a> Heatmap<'a> {
    pub fn new(matrix: &'a DenseMatrix, caption: impl AsRef<str>) -> Self {
        Self {
            caption: caption.as_ref().to_owned(),
            size: (2500, 1500),
            matrix,
        }
    }

    pub fn size(mut self, size: (u32, u32)) -> Self {
        self.size = size;
        self
    }
}

/// A series with the labels needed to draw it as a line plot.
#[derive(Clone, Debug)]
pub struct LinePlot<'a> {
    pub caption: String,
    pub x_desc: String,
    pub y_desc: String,
    pub size: (u32, u32),
    pub series: &'a SeriesDataset,
}

impl<'a> LinePlot<'a> {
    pub fn new(series: &'a SeriesDataset, caption: impl AsRef<str>) -> Self {
        Self {
            caption: caption.as_ref().to_owned(),
            x_desc: String::new(),
            y_desc: String::new(),
            size: (1280, 960),
            series,
        }
    }

    pub fn x_desc(mut self, x_desc: impl AsRef<str>) -> Self {
        self.x_desc = x_desc.as_ref().to_owned();
        self
    }

    pub fn y_desc(mut self, y_desc: impl AsRef<str>) -> Self {
        self.y_desc = y_desc.as_ref().to_owned();
        self
    }

    pub fn size(mut self, size: (u32, u32)) -> Self {
        self.size = size;
        self
    }
}

/// Turns shaped data into an image file at `path`.
pub trait Renderer {
    fn heatmap(&mut self, plot: &Heatmap<'_>, path: &Path) -> Result<(), Error>;

    fn line(&mut self, plot: &LinePlot<'_>, path: &Path) -> Result<(), Error>;
}

/// Draws PNG bitmaps with plotters.
///
/// Each image is drawn to a scratch file beside `path` and renamed into place
/// only once drawing succeeded, so a failed render leaves nothing behind.
#[derive(Copy, Clone, Debug, Default)]
pub struct BitmapRenderer;

impl Renderer for BitmapRenderer {
    fn heatmap(&mut self, plot: &Heatmap<'_>, path: &Path) -> Result<(), Error> {
        debug!("drawing {}x{} heatmap", plot.matrix.height(), plot.matrix.width());
        publish(path, |scratch| heatmap::draw(plot, scratch))
    }

    fn line(&mut self, plot: &LinePlot<'_>, path: &Path) -> Result<(), Error> {
        debug!("drawing line plot of {} values", plot.series.len());
        publish(path, |scratch| line::draw(plot, scratch))
    }
}

/// `.partial-<name>` in the same directory, keeping the extension the
/// bitmap backend picks its encoder from
fn scratch_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".partial-{}", name))
}

fn publish<F>(path: &Path, draw: F) -> Result<(), Error>
where
    F: FnOnce(&Path) -> Result<(), Box<dyn std::error::Error>>,
{
    let scratch = scratch_path(path);
    // the backend flushes on drop, so the scratch file may exist either way
    let result = draw(&scratch);
    match result {
        Ok(()) => std::fs::rename(&scratch, path).map_err(|source| {
            let _ = std::fs::remove_file(&scratch);
            Error::Output {
                path: path.to_owned(),
                source,
            }
        }),
        Err(e) => {
            let _ = std::fs::remove_file(&scratch);
            Err(Error::Render {
                path: path.to_owned(),
                reason: e.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GapPolicy, PairwiseDataset};
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "perfgraph-render-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn square() -> DenseMatrix {
        let dataset =
            PairwiseDataset::from_rows(vec![[0, 0, 10], [0, 1, 20], [1, 0, 30], [1, 1, 40]]);
        DenseMatrix::from_dataset(&dataset, GapPolicy::Reject).unwrap()
    }

    #[test]
    fn scratch_keeps_extension() {
        let scratch = scratch_path(Path::new("figures/cco_read_table.png"));
        assert_eq!(scratch, Path::new("figures/.partial-cco_read_table.png"));
        assert_eq!(scratch.extension().unwrap(), "png");
    }

    #[test]
    fn undersized_heatmap_leaves_no_file() {
        let dir = scratch_dir("undersized");
        let out = dir.join("cco_read_table.png");
        let matrix = square();
        let plot = Heatmap::new(&matrix, "Read").size((300, 300));

        match BitmapRenderer.heatmap(&plot, &out) {
            Err(Error::Render { path, reason }) => {
                assert_eq!(path, out);
                assert_eq!(reason, "300x300 pixels cannot fit a 2x2 grid");
            }
            other => panic!("expected render error, got {:?}", other),
        }
        assert!(!out.exists());
        assert!(!scratch_path(&out).exists());
    }

    #[test]
    fn failed_draw_removes_partial_output() {
        let dir = scratch_dir("failed");
        let out = dir.join("tlb_graph.png");
        let result = publish(&out, |scratch| {
            fs::write(scratch, b"half an image")?;
            Err("drawing failed".into())
        });
        assert!(matches!(result, Err(Error::Render { .. })));
        assert!(!out.exists());
        assert!(!scratch_path(&out).exists());
    }

    #[test]
    fn successful_draw_is_renamed_into_place() {
        let dir = scratch_dir("success");
        let out = dir.join("tlb_graph.png");
        fs::write(&out, b"previous run").unwrap();
        publish(&out, |scratch| {
            fs::write(scratch, b"image")?;
            Ok(())
        })
        .unwrap();
        assert_eq!(fs::read(&out).unwrap(), b"image");
        assert!(!scratch_path(&out).exists());
    }

    #[test]
    fn draws_heatmap_and_line_plot() {
        let dir = scratch_dir("draw");
        let matrix = square();
        let out = dir.join("cco_read_table.png");
        BitmapRenderer
            .heatmap(&Heatmap::new(&matrix, "Read").size((800, 600)), &out)
            .unwrap();
        assert!(out.is_file());

        let series = SeriesDataset::from_rows(vec![[3], [1], [4], [1], [5]]);
        let out = dir.join("tlb_graph.png");
        BitmapRenderer
            .line(&LinePlot::new(&series, "Output Latency Per Element"), &out)
            .unwrap();
        assert!(out.is_file());
    }

    #[test]
    fn draws_empty_and_extreme_data() {
        let dir = scratch_dir("extreme");
        let empty = DenseMatrix::default();
        let out = dir.join("empty.png");
        BitmapRenderer
            .heatmap(&Heatmap::new(&empty, "Read").size((800, 600)), &out)
            .unwrap();
        assert!(out.is_file());

        let dataset = PairwiseDataset::from_rows(vec![[0, 0, i64::MIN], [0, 1, i64::MAX]]);
        let matrix = DenseMatrix::from_dataset(&dataset, GapPolicy::Reject).unwrap();
        let out = dir.join("extreme.png");
        BitmapRenderer
            .heatmap(&Heatmap::new(&matrix, "Read").size((1200, 600)), &out)
            .unwrap();
        assert!(out.is_file());

        for values in &[vec![[i64::MAX]], vec![[i64::MIN], [i64::MAX]], vec![]] {
            let series = SeriesDataset::from_rows(values.clone());
            let out = dir.join("extreme_line.png");
            BitmapRenderer
                .line(&LinePlot::new(&series, "Output Latency Per Element"), &out)
                .unwrap();
            assert!(out.is_file());
        }
    }
}
