//! Storage abstraction for validated graphs.
//!
//! The engine treats persistence as an opaque collaborator: a store accepts
//! a validated [`Graph`] keyed by its ID and hands the same graph back later.
//! The store owns its on-disk schema; the engine defines none of its own.
//!
//! The trait is async and object-safe (`Box<dyn GraphStore>`) so a blocking
//! in-memory store and a genuinely async backend can sit behind the same
//! interface.

use crate::domain::{Graph, GraphId};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::Path;

pub mod jsonl;

/// Outcome of a save operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The graph was stored.
    Saved,

    /// A graph with this ID is already stored; nothing was written.
    AlreadyExists,
}

/// Summary of one stored graph, for listings.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct GraphSummary {
    /// Graph ID.
    pub id: GraphId,

    /// Graph name.
    pub name: String,

    /// Number of nodes.
    pub nodes: usize,

    /// Number of edges.
    pub edges: usize,

    /// When the graph was persisted.
    pub saved_at: DateTime<Utc>,
}

/// Storage interface for validated graphs.
///
/// Mutating operations change in-memory state only; [`persist`](Self::persist)
/// writes the store to its backing file. Callers persist after mutations,
/// mirroring an explicit open/save lifecycle.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Stores a graph under its ID.
    ///
    /// Saving an ID that is already stored is a no-op reported as
    /// [`SaveOutcome::AlreadyExists`]; the stored graph is not replaced.
    async fn save_graph(&mut self, graph: &Graph) -> Result<SaveOutcome>;

    /// Loads a stored graph by ID. Returns `None` when the ID is unknown.
    async fn load_graph(&self, id: &GraphId) -> Result<Option<Graph>>;

    /// Summaries of all stored graphs, in storage order.
    async fn list_graphs(&self) -> Result<Vec<GraphSummary>>;

    /// Writes the store to its backing file.
    async fn persist(&self) -> Result<()>;
}

/// Opens the JSONL-backed store at the given path.
///
/// A missing file yields an empty store; damaged lines in an existing file
/// are skipped with logged warnings.
///
/// # Errors
///
/// Returns an error only for real I/O failures (e.g. permissions).
pub async fn create_store(path: &Path) -> Result<Box<dyn GraphStore>> {
    let store = jsonl::JsonlGraphStore::open(path).await?;
    Ok(Box::new(store))
}
