//! Store file writing operations.
//!
//! This module provides buffered async writing of store records, one JSON
//! record per line.

use crate::error::Result;
use crate::record::Record;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

/// Async writer for store records.
///
/// Wraps an async writer and serializes each [`Record`] to a single line
/// followed by a newline character.
pub struct RecordWriter<W> {
    writer: BufWriter<W>,
}

impl<W: AsyncWrite + Unpin> RecordWriter<W> {
    /// Creates a new `RecordWriter` wrapping the given async writer.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::new(writer),
        }
    }

    /// Creates a new `RecordWriter` with a custom buffer capacity.
    #[must_use]
    pub fn with_capacity(writer: W, capacity: usize) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, writer),
        }
    }

    /// Serializes one record and writes it as a line.
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` if serialization fails or `Error::Io` if the
    /// write fails.
    pub async fn write(&mut self, record: &Record) -> Result<()> {
        let json = serde_json::to_string(record)?;
        self.writer.write_all(json.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        Ok(())
    }

    /// Flushes buffered data to the underlying writer.
    ///
    /// Must be called before dropping the writer or the final buffer contents
    /// may be lost.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the flush fails.
    pub async fn flush(&mut self) -> Result<()> {
        self.writer.flush().await?;
        Ok(())
    }

    /// Consumes the writer, returning the underlying buffered writer.
    ///
    /// Call [`flush`](Self::flush) first to ensure all data is written.
    #[must_use]
    pub fn into_inner(self) -> BufWriter<W> {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::NodeRecord;
    use std::io::Cursor;

    #[tokio::test]
    async fn writes_one_record_per_line() {
        let buffer = Cursor::new(Vec::new());
        let mut writer = RecordWriter::new(buffer);

        for id in ["a", "b"] {
            writer
                .write(&Record::Node(NodeRecord {
                    graph_id: "g1".to_string(),
                    id: id.to_string(),
                    name: id.to_uppercase(),
                }))
                .await
                .unwrap();
        }
        writer.flush().await.unwrap();

        let bytes = writer.into_inner().into_inner().into_inner();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().all(|l| l.contains("\"kind\":\"node\"")));
    }
}
