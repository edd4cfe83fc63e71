//! Record sources feeding the pipeline.
//!
//! Partitioning the corpus is the harness's concern: the pipeline
//! consumes ready-made partitions and the map stage itself never opens a
//! file. Records stay raw bytes until the map stage decodes them, so one
//! bad record cannot poison its partition.

use anyhow::{Context, Result};
use bytes::Bytes;
use glob::glob;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// The record stream of one partition.
///
/// An item error means the source failed mid-stream, which aborts the
/// whole job rather than under-counting.
pub type RecordStream = Box<dyn Iterator<Item = io::Result<Bytes>> + Send>;

/// One partition of the input corpus: an ordered stream of text-line
/// records, consumed exactly once by a single map task.
pub struct Partition {
    /// Where the records come from; used in diagnostics only.
    pub source: String,
    /// The records, in input order.
    pub records: RecordStream,
}

impl Partition {
    /// A partition over an in-memory sequence of records.
    pub fn from_records(source: impl Into<String>, records: Vec<Bytes>) -> Self {
        Self {
            source: source.into(),
            records: Box::new(records.into_iter().map(Ok)),
        }
    }

    /// A partition streaming newline-delimited records from a file.
    ///
    /// The file is opened up front; read errors after that surface
    /// through the stream.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open input file {}", path.display()))?;
        let records = BufReader::new(file)
            .split(b'\n')
            .map(|record| record.map(Bytes::from));
        Ok(Self {
            source: path.to_string_lossy().into_owned(),
            records: Box::new(records),
        })
    }
}

/// Build one partition per file matching `pattern`.
///
/// Files are matched in the order `glob` yields them; the order carries
/// no meaning for the final counts.
pub fn partitions_from_glob(pattern: &str) -> Result<Vec<Partition>> {
    let mut partitions = Vec::new();
    for pathspec in glob(pattern).context("invalid input pattern")?.flatten() {
        partitions.push(Partition::from_file(&pathspec)?);
    }
    Ok(partitions)
}
