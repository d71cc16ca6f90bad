// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Error, PairwiseDataset};

/// How to treat coordinates in the observed grid with no measurement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GapPolicy {
    /// A missing cell is an error.
    Reject,
    /// Missing cells take the given value.
    Fill(i64),
}

impl Default for GapPolicy {
    fn default() -> Self {
        Self::Reject
    }
}

impl From<Option<i64>> for GapPolicy {
    fn from(fill: Option<i64>) -> Self {
        match fill {
            Some(value) => Self::Fill(value),
            None => Self::Reject,
        }
    }
}

/// A pairwise dataset pivoted onto a dense row-major grid.
///
/// Rows are the distinct row coordinates of the source dataset in ascending
/// order, and columns likewise.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DenseMatrix {
    rows: Vec<i64>,
    cols: Vec<i64>,
    cells: Vec<i64>,
}

impl DenseMatrix {
    pub fn from_dataset(dataset: &PairwiseDataset, policy: GapPolicy) -> Result<Self, Error> {
        let rows = dataset.row_coordinates();
        let cols = dataset.col_coordinates();

        let mut cells = Vec::with_capacity(rows.len() * cols.len());
        let mut filled = 0;
        for &row in &rows {
            for &col in &cols {
                let value = match (dataset.get(row, col), policy) {
                    (Some(value), _) => value,
                    (None, GapPolicy::Fill(value)) => {
                        filled += 1;
                        value
                    }
                    (None, GapPolicy::Reject) => {
                        return Err(Error::GapInCoordinateGrid { row, col });
                    }
                };
                cells.push(value);
            }
        }

        if filled > 0 {
            debug!("filled {} missing cells", filled);
        }

        Ok(Self { rows, cols, cells })
    }

    /// Row coordinates, top to bottom.
    pub fn rows(&self) -> &[i64] {
        &self.rows
    }

    /// Column coordinates, left to right.
    pub fn cols(&self) -> &[i64] {
        &self.cols
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.cols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell by position in the grid.
    pub fn get(&self, i: usize, j: usize) -> Option<i64> {
        if i < self.height() && j < self.width() {
            Some(self.cells[i * self.width() + j])
        } else {
            None
        }
    }

    /// Cell by row and column coordinate.
    pub fn at(&self, row: i64, col: i64) -> Option<i64> {
        let i = self.rows.binary_search(&row).ok()?;
        let j = self.cols.binary_search(&col).ok()?;
        self.get(i, j)
    }

    pub fn row(&self, i: usize) -> Option<&[i64]> {
        if i < self.height() {
            let start = i * self.width();
            Some(&self.cells[start..start + self.width()])
        } else {
            None
        }
    }

    /// Cells in row-major order as `(i, j, value)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, i64)> + '_ {
        let width = self.width();
        self.cells
            .iter()
            .enumerate()
            .map(move |(n, value)| (n / width, n % width, *value))
    }

    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        (0..self.height())
            .filter_map(|i| self.row(i).map(|r| r.to_vec()))
            .collect()
    }

    pub fn min(&self) -> Option<i64> {
        self.cells.iter().copied().min()
    }

    pub fn max(&self) -> Option<i64> {
        self.cells.iter().copied().max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> PairwiseDataset {
        PairwiseDataset::from_rows(vec![[0, 0, 10], [0, 1, 20], [1, 0, 30], [1, 1, 40]])
    }

    #[test]
    fn pivot_square() {
        let matrix = DenseMatrix::from_dataset(&square(), GapPolicy::Reject).unwrap();
        assert_eq!(matrix.rows(), &[0, 1]);
        assert_eq!(matrix.cols(), &[0, 1]);
        assert_eq!(matrix.to_rows(), vec![vec![10, 20], vec![30, 40]]);
        assert_eq!(matrix.min(), Some(10));
        assert_eq!(matrix.max(), Some(40));
    }

    #[test]
    fn dense_grid_reads_back() {
        let mut dataset = PairwiseDataset::new();
        let rows = [3, 5, 9];
        let cols = [-2, 0, 4, 7];
        for &r in &rows {
            for &c in &cols {
                dataset.insert(r, c, r * 100 + c);
            }
        }

        let matrix = DenseMatrix::from_dataset(&dataset, GapPolicy::Reject).unwrap();
        assert_eq!(matrix.height(), rows.len());
        assert_eq!(matrix.width(), cols.len());
        for ((r, c), value) in dataset.iter() {
            assert_eq!(matrix.at(r, c), Some(value));
        }
        for (i, j, value) in matrix.cells() {
            assert_eq!(dataset.get(rows[i], cols[j]), Some(value));
        }
    }

    #[test]
    fn non_square_grid() {
        let dataset = PairwiseDataset::from_rows(vec![[0, 0, 1], [0, 1, 2], [0, 2, 3]]);
        let matrix = DenseMatrix::from_dataset(&dataset, GapPolicy::Reject).unwrap();
        assert_eq!(matrix.height(), 1);
        assert_eq!(matrix.width(), 3);
        assert_eq!(matrix.row(0), Some(&[1, 2, 3][..]));
        assert_eq!(matrix.row(1), None);
        assert_eq!(matrix.get(0, 3), None);
    }

    #[test]
    fn gap_is_rejected() {
        // core-to-core results never measure a core against itself
        let dataset = PairwiseDataset::from_rows(vec![[0, 1, 20], [1, 0, 20]]);
        match DenseMatrix::from_dataset(&dataset, GapPolicy::Reject) {
            Err(Error::GapInCoordinateGrid { row, col }) => assert_eq!((row, col), (0, 0)),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn gap_is_filled() {
        let dataset = PairwiseDataset::from_rows(vec![[0, 1, 20], [1, 0, 20]]);
        let matrix = DenseMatrix::from_dataset(&dataset, GapPolicy::Fill(0)).unwrap();
        assert_eq!(matrix.to_rows(), vec![vec![0, 20], vec![20, 0]]);
    }

    #[test]
    fn empty_dataset() {
        let matrix = DenseMatrix::from_dataset(&PairwiseDataset::new(), GapPolicy::Reject).unwrap();
        assert!(matrix.is_empty());
        assert_eq!(matrix.height(), 0);
        assert_eq!(matrix.width(), 0);
        assert_eq!(matrix.min(), None);
        assert_eq!(matrix.cells().count(), 0);
    }

    #[test]
    fn gap_policy_from_option() {
        assert_eq!(GapPolicy::from(None), GapPolicy::Reject);
        assert_eq!(GapPolicy::from(Some(-1)), GapPolicy::Fill(-1));
    }
}
