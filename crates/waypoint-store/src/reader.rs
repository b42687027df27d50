//! Store file reading operations.
//!
//! This module provides async, line-by-line reading of store files with line
//! number tracking for error reporting, plus a resilient whole-file loader
//! that skips damaged lines and collects warnings.

use crate::error::{Error, Result};
use crate::record::Record;
use crate::warning::{Warning, WarningCollector};
use futures::Stream;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Async reader for store records.
///
/// Wraps an async reader and yields one [`Record`] per line, tracking the
/// 1-based line number of the last line read so parse failures can be
/// reported with useful context.
pub struct RecordReader<R> {
    reader: BufReader<R>,
    /// 1-based counting; 0 before any lines are read.
    line_number: usize,
}

impl<R: AsyncRead + Unpin> RecordReader<R> {
    /// Creates a new `RecordReader` wrapping the given async reader.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
        }
    }

    /// Returns the 1-based line number of the last line read.
    ///
    /// Returns 0 before any lines have been read.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Reads the next record.
    ///
    /// Empty lines (after trimming) are skipped. Returns `Ok(None)` at end
    /// of input.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails, or `Error::Json` if a non-empty
    /// line is not a valid record. The line number of the failing line is
    /// available via [`line_number`](Self::line_number).
    pub async fn read_record(&mut self) -> Result<Option<Record>> {
        loop {
            let mut line = String::new();
            let bytes = self.reader.read_line(&mut line).await?;
            if bytes == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let record: Record = serde_json::from_str(trimmed)?;
            return Ok(Some(record));
        }
    }

    /// Converts this reader into a stream of records.
    ///
    /// The stream ends after the first `Err` item or at end of input.
    pub fn into_stream(self) -> impl Stream<Item = Result<Record>> {
        futures::stream::try_unfold(self, |mut reader| async move {
            let record = reader.read_record().await?;
            Ok(record.map(|r| (r, reader)))
        })
    }
}

/// Reads all records from a store file, skipping damaged lines.
///
/// Lines that fail to parse are recorded as [`Warning::MalformedRecord`] and
/// skipped; everything that parses is returned in file order.
///
/// # Errors
///
/// Returns `Error::Io` only for I/O failures (missing file, permission
/// errors). Parse failures never abort the load.
pub async fn read_records_resilient(path: &Path) -> Result<(Vec<Record>, Vec<Warning>)> {
    let file = File::open(path).await?;
    let mut reader = BufReader::new(file);
    let collector = WarningCollector::new();

    let mut records = Vec::new();
    let mut line_number = 0usize;

    loop {
        let mut line = String::new();
        let bytes = reader.read_line(&mut line).await?;
        if bytes == 0 {
            break;
        }
        line_number += 1;

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match serde_json::from_str::<Record>(trimmed) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(line_number, error = %e, "skipping malformed store record");
                collector.add(Warning::MalformedRecord {
                    line_number,
                    error: e.to_string(),
                });
            }
        }
    }

    Ok((records, collector.into_warnings()))
}

/// Validates that a parsed record sequence is shaped like a store file.
///
/// Every `node` and `edge` record must follow a `graph` header with a
/// matching ID somewhere in the file.
///
/// # Errors
///
/// Returns `Error::InvalidRecord` naming the first orphaned record.
pub fn check_record_ownership(records: &[Record]) -> Result<()> {
    let graph_ids: std::collections::HashSet<&str> = records
        .iter()
        .filter_map(|r| match r {
            Record::Graph(g) => Some(g.id.as_str()),
            _ => None,
        })
        .collect();

    for record in records {
        if !matches!(record, Record::Graph(_)) && !graph_ids.contains(record.graph_id()) {
            return Err(Error::InvalidRecord(format!(
                "record belongs to unknown graph '{}'",
                record.graph_id()
            )));
        }
    }

    Ok(())
}
