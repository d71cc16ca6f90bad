// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::parse::{parse_row, DELIMITER, PAIRWISE_ARITY, SERIES_ARITY};
use crate::reader::{Header, Reader};
use crate::Error;

use serde_derive::*;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// What to do when a pairwise file repeats a coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
#[serde(deny_unknown_fields)]
pub enum DuplicatePolicy {
    /// The later measurement replaces the earlier one.
    Overwrite,
    /// A repeated coordinate aborts the load.
    Reject,
}

impl Default for DuplicatePolicy {
    fn default() -> Self {
        Self::Overwrite
    }
}

/// Latency measurements keyed by (row, column) coordinate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PairwiseDataset {
    entries: BTreeMap<(i64, i64), i64>,
}

impl PairwiseDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dataset from `[row, col, value]` rows, last write wins.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = [i64; 3]>,
    {
        let mut dataset = Self::new();
        for [row, col, value] in rows {
            dataset.insert(row, col, value);
        }
        dataset
    }

    /// Reads a comma-delimited pairwise results file with a header line.
    ///
    /// The first malformed row aborts the load and no dataset is returned.
    pub fn load<P: AsRef<Path>>(path: P, policy: DuplicatePolicy) -> Result<Self, Error> {
        let reader = Reader::open(path, Header::Skip)?;
        let path = reader.path().to_path_buf();

        let mut dataset = Self::new();
        for line in reader {
            let line = line?;
            let [row, col, value] =
                parse_row::<PAIRWISE_ARITY>(&line.text, DELIMITER).map_err(|source| {
                    Error::MalformedRow {
                        path: path.clone(),
                        line: line.number,
                        source,
                    }
                })?;

            if let Some(previous) = dataset.insert(row, col, value) {
                match policy {
                    DuplicatePolicy::Overwrite => {
                        debug!(
                            "{}:{} overwrites ({}, {}) = {} with {}",
                            path.display(),
                            line.number,
                            row,
                            col,
                            previous,
                            value
                        );
                    }
                    DuplicatePolicy::Reject => {
                        return Err(Error::DuplicateCoordinate {
                            path,
                            line: line.number,
                            row,
                            col,
                        });
                    }
                }
            }
        }

        debug!("loaded {} entries from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    /// Inserts a value, returning the value it replaced.
    pub fn insert(&mut self, row: i64, col: i64, value: i64) -> Option<i64> {
        self.entries.insert((row, col), value)
    }

    pub fn get(&self, row: i64, col: i64) -> Option<i64> {
        self.entries.get(&(row, col)).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending (row, col) order.
    pub fn iter(&self) -> impl Iterator<Item = ((i64, i64), i64)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }

    /// Distinct row coordinates in ascending order.
    pub fn row_coordinates(&self) -> Vec<i64> {
        self.entries
            .keys()
            .map(|(row, _)| *row)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct column coordinates in ascending order.
    pub fn col_coordinates(&self) -> Vec<i64> {
        self.entries
            .keys()
            .map(|(_, col)| *col)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Latency measurements in the order they were recorded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeriesDataset {
    values: Vec<i64>,
}

impl SeriesDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = [i64; 1]>,
    {
        Self {
            values: rows.into_iter().map(|[value]| value).collect(),
        }
    }

    /// Reads a results file holding one integer per line and no header.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let reader = Reader::open(path, Header::Keep)?;
        let path = reader.path().to_path_buf();

        let mut values = Vec::new();
        for line in reader {
            let line = line?;
            let [value] =
                parse_row::<SERIES_ARITY>(&line.text, DELIMITER).map_err(|source| {
                    Error::MalformedRow {
                        path: path.clone(),
                        line: line.number,
                        source,
                    }
                })?;
            values.push(value);
        }

        debug!("loaded {} values from {}", values.len(), path.display());
        Ok(Self { values })
    }

    pub fn push(&mut self, value: i64) {
        self.values.push(value);
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn min(&self) -> Option<i64> {
        self.values.iter().copied().min()
    }

    pub fn max(&self) -> Option<i64> {
        self.values.iter().copied().max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RowError;
    use std::fs;
    use std::path::PathBuf;

    fn scratch(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("perfgraph-dataset-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn load_pairwise() {
        let path = scratch("square.csv", "row,col,latency\n0,0,10\n0,1,20\n1,0,30\n1,1,40\n");
        let dataset = PairwiseDataset::load(&path, DuplicatePolicy::Overwrite).unwrap();
        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.get(0, 0), Some(10));
        assert_eq!(dataset.get(0, 1), Some(20));
        assert_eq!(dataset.get(1, 0), Some(30));
        assert_eq!(dataset.get(1, 1), Some(40));
        assert_eq!(dataset.get(2, 2), None);
        assert_eq!(dataset.row_coordinates(), vec![0, 1]);
        assert_eq!(dataset.col_coordinates(), vec![0, 1]);
    }

    #[test]
    fn last_write_wins() {
        let path = scratch("dup.csv", "h\n0,0,5\n0,1,7\n0,0,9\n");
        let dataset = PairwiseDataset::load(&path, DuplicatePolicy::Overwrite).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.get(0, 0), Some(9));
    }

    #[test]
    fn reject_duplicates() {
        let path = scratch("dup_reject.csv", "h\n0,0,5\n0,1,7\n0,0,9\n");
        match PairwiseDataset::load(&path, DuplicatePolicy::Reject) {
            Err(Error::DuplicateCoordinate { line, row, col, .. }) => {
                assert_eq!(line, 4);
                assert_eq!((row, col), (0, 0));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn short_row_aborts() {
        let path = scratch("short.csv", "h\n0,0,5\n0,1\n1,1,3\n");
        match PairwiseDataset::load(&path, DuplicatePolicy::Overwrite) {
            Err(Error::MalformedRow { line, source, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(
                    source,
                    RowError::Arity {
                        expected: 3,
                        found: 2
                    }
                );
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn non_numeric_aborts() {
        let path = scratch("nan.csv", "h\n0,0,5\n0,1,fast\n");
        assert!(matches!(
            PairwiseDataset::load(&path, DuplicatePolicy::Overwrite),
            Err(Error::MalformedRow { line: 3, .. })
        ));
    }

    #[test]
    fn header_is_not_validated() {
        let path = scratch("header_only.csv", "this,is,not,a,row\n");
        let dataset = PairwiseDataset::load(&path, DuplicatePolicy::Overwrite).unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn from_rows_matches_load() {
        let rows = vec![[0, 0, 10], [0, 1, 20], [1, 0, 30], [1, 1, 40]];
        let path = scratch("rows.csv", "h\n0,0,10\n0,1,20\n1,0,30\n1,1,40\n");
        assert_eq!(
            PairwiseDataset::from_rows(rows),
            PairwiseDataset::load(&path, DuplicatePolicy::Overwrite).unwrap()
        );
    }

    #[test]
    fn entry_count_is_distinct_keys() {
        let rows = vec![[2, 1, 1], [0, 0, 2], [2, 1, 3], [1, 5, 4], [0, 0, 5]];
        let dataset = PairwiseDataset::from_rows(rows.clone());
        assert!(dataset.len() <= rows.len());
        assert_eq!(dataset.len(), 3);
        let keys: Vec<(i64, i64)> = dataset.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![(0, 0), (1, 5), (2, 1)]);
    }

    #[test]
    fn load_series_in_order() {
        let path = scratch("series.csv", "30\n10\n20\n10\n");
        let series = SeriesDataset::load(&path).unwrap();
        assert_eq!(series.values(), &[30, 10, 20, 10]);
        assert_eq!(series.len(), 4);
        assert_eq!(series.min(), Some(10));
        assert_eq!(series.max(), Some(30));
    }

    #[test]
    fn series_rejects_extra_fields() {
        let path = scratch("series_bad.csv", "30\n10,11\n");
        assert!(matches!(
            SeriesDataset::load(&path),
            Err(Error::MalformedRow { line: 2, .. })
        ));
    }

    #[test]
    fn series_rejects_blank_line() {
        let path = scratch("series_blank.csv", "30\n\n20\n");
        assert!(matches!(
            SeriesDataset::load(&path),
            Err(Error::MalformedRow { line: 2, .. })
        ));
    }

    #[test]
    fn missing_series() {
        let path = std::env::temp_dir().join("perfgraph-dataset-missing.csv");
        assert!(matches!(
            SeriesDataset::load(&path),
            Err(Error::MissingInput { .. })
        ));
    }
}
