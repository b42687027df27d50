//! Atomic write operations for store files.
//!
//! Records are first written to a temporary file with a `.tmp` extension,
//! flushed, and then renamed over the target path. Renames within one
//! filesystem are atomic on POSIX systems, so a crash mid-write leaves the
//! original file intact (the leftover `.tmp` file is overwritten by the next
//! successful save).

use crate::error::Result;
use crate::record::Record;
use crate::writer::RecordWriter;
use std::path::Path;
use tokio::fs::File;

/// Atomically writes a slice of records to a store file.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created, a record fails
/// to serialize, an I/O error occurs, or the rename fails (e.g. a
/// cross-filesystem move). On failure the original file is left unchanged.
pub async fn write_records_atomic(path: &Path, records: &[Record]) -> Result<()> {
    let temp_path = path.with_extension("tmp");

    let file = File::create(&temp_path).await?;
    let mut writer = RecordWriter::new(file);

    for record in records {
        writer.write(record).await?;
    }
    writer.flush().await?;

    // Ensure the handle is closed before the rename.
    drop(writer);

    tokio::fs::rename(&temp_path, path).await?;

    tracing::debug!(path = %path.display(), records = records.len(), "store file written");
    Ok(())
}
