// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Error, RowError};

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Lines};
use std::path::{Path, PathBuf};

/// Whether the first line of a file is a column header.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Header {
    Skip,
    Keep,
}

/// One line of input with its line ending removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    /// 1-based position in the file, counting the header
    pub number: usize,
    pub text: String,
}

/// A single-pass reader over the lines of a results file.
///
/// The file handle is owned by the reader and closed when it is dropped,
/// whether the lines were fully consumed or not.
pub struct Reader {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    number: usize,
    skip_header: bool,
}

impl Reader {
    pub fn open<P: AsRef<Path>>(path: P, header: Header) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|source| Error::MissingInput {
            path: path.clone(),
            source,
        })?;
        debug!("opened {}", path.display());
        Ok(Self {
            path,
            lines: BufReader::new(file).lines(),
            number: 0,
            skip_header: header == Header::Skip,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Iterator for Reader {
    type Item = Result<Line, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(source) if source.kind() == ErrorKind::InvalidData => {
                    return Some(Err(Error::MalformedRow {
                        path: self.path.clone(),
                        line: self.number + 1,
                        source: RowError::Encoding,
                    }))
                }
                Err(source) => {
                    return Some(Err(Error::Read {
                        path: self.path.clone(),
                        line: self.number + 1,
                        source,
                    }))
                }
            };
            self.number += 1;

            if self.skip_header {
                self.skip_header = false;
                trace!("skipping header: {}", text);
                continue;
            }

            return Some(Ok(Line {
                number: self.number,
                text,
            }));
        }
    }
}
