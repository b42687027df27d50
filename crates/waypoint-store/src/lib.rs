//! JSONL record storage for waypoint graphs.
//!
//! A stored graph is flattened into one JSON record per line: a `graph`
//! header record followed by its `node` and `edge` records, all keyed by the
//! graph ID. This keeps the store diffable and lets a damaged line be skipped
//! without losing the rest of the file.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod atomic;
pub mod error;
pub mod reader;
pub mod record;
pub mod warning;
pub mod writer;

pub use atomic::write_records_atomic;
pub use error::{Error, Result};
pub use reader::{RecordReader, read_records_resilient};
pub use record::{EdgeRecord, GraphRecord, NodeRecord, Record};
pub use warning::{Warning, WarningCollector};
pub use writer::RecordWriter;
