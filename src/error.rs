// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Reasons a single line can fail to parse into a row.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("field {index} ({field:?}) is not an integer: {source}")]
    Field {
        index: usize,
        field: String,
        source: ParseIntError,
    },
    #[error("expected {expected} fields, found {found}")]
    Arity { expected: usize, found: usize },
    #[error("line is not valid UTF-8")]
    Encoding,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("missing input {}: {source}", .path.display())]
    MissingInput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed reading {} at line {line}: {source}", .path.display())]
    Read {
        path: PathBuf,
        line: usize,
        source: std::io::Error,
    },
    #[error("malformed row in {} at line {line}: {source}", .path.display())]
    MalformedRow {
        path: PathBuf,
        line: usize,
        source: RowError,
    },
    #[error("duplicate coordinate ({row}, {col}) in {} at line {line}", .path.display())]
    DuplicateCoordinate {
        path: PathBuf,
        line: usize,
        row: i64,
        col: i64,
    },
    #[error("gap in coordinate grid: no value for ({row}, {col})")]
    GapInCoordinateGrid { row: i64, col: i64 },
    #[error("failed to render {}: {reason}", .path.display())]
    Render { path: PathBuf, reason: String },
    #[error("failed to prepare output {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("bad config: {0}")]
    Config(String),
}
