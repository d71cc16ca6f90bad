// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::RowError;

use std::convert::TryFrom;

pub const DELIMITER: char = ',';

/// row index, column index, value
pub const PAIRWISE_ARITY: usize = 3;

/// value
pub const SERIES_ARITY: usize = 1;

/// Splits `line` on `delimiter` and parses every field as a decimal integer.
///
/// Parsing is strict: no surrounding whitespace, no fractional part and no
/// digit separators. A field that fails to parse is reported before the
/// field count is checked against `arity`.
pub fn parse_fields(line: &str, delimiter: char, arity: usize) -> Result<Vec<i64>, RowError> {
    let mut fields = Vec::with_capacity(arity);
    for (index, field) in line.split(delimiter).enumerate() {
        let value = field.parse::<i64>().map_err(|source| RowError::Field {
            index,
            field: field.to_string(),
            source,
        })?;
        fields.push(value);
    }

    if fields.len() != arity {
        return Err(RowError::Arity {
            expected: arity,
            found: fields.len(),
        });
    }

    Ok(fields)
}

/// Parses a line into a fixed-arity row, the arity carried in the type.
pub fn parse_row<const N: usize>(line: &str, delimiter: char) -> Result<[i64; N], RowError> {
    let fields = parse_fields(line, delimiter, N)?;
    let found = fields.len();
    <[i64; N]>::try_from(fields).map_err(|_| RowError::Arity { expected: N, found })
}
