//! JSONL-backed graph store.
//!
//! Graphs are held in memory and persisted through `waypoint-store`: one
//! `graph` header record per graph followed by its `node` and `edge` records,
//! written atomically. Loading is resilient — damaged lines, records for
//! unknown graphs, and edges whose endpoints were lost are skipped with
//! logged warnings instead of failing the whole store.

use crate::domain::{Edge, EdgeId, Graph, GraphId, Node, NodeId};
use crate::error::Result;
use crate::storage::{GraphStore, GraphSummary, SaveOutcome};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use waypoint_store::{
    EdgeRecord, GraphRecord, NodeRecord, Record, read_records_resilient, write_records_atomic,
};

/// One stored graph plus its persistence metadata.
#[derive(Debug, Clone)]
struct StoredGraph {
    graph: Graph,
    saved_at: DateTime<Utc>,
}

/// Graph store backed by a JSONL file.
#[derive(Debug)]
pub struct JsonlGraphStore {
    path: PathBuf,
    graphs: HashMap<GraphId, StoredGraph>,

    /// Graph IDs in storage order, for deterministic listings and saves.
    order: Vec<GraphId>,
}

impl JsonlGraphStore {
    /// Opens the store at `path`, loading any existing records.
    ///
    /// A missing file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error for I/O failures other than a missing file.
    pub async fn open(path: &Path) -> Result<Self> {
        let mut store = Self {
            path: path.to_path_buf(),
            graphs: HashMap::new(),
            order: Vec::new(),
        };

        let records = match read_records_resilient(path).await {
            Ok((records, warnings)) => {
                for warning in &warnings {
                    tracing::warn!(?warning, "store file damage");
                }
                records
            }
            Err(waypoint_store::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no store file yet; starting empty");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        store.assemble(records);
        Ok(store)
    }

    /// Reassembles graphs from a flat record sequence.
    ///
    /// Records appear in file order: headers register graphs, node and edge
    /// records attach to them. Orphaned records and dangling edges are
    /// dropped with a warning; a stored graph that lost all its node records
    /// is dropped entirely (a graph requires at least one node).
    fn assemble(&mut self, records: Vec<Record>) {
        for record in records {
            match record {
                Record::Graph(GraphRecord { id, name, saved_at }) => {
                    let id = GraphId::new(id);
                    if self.graphs.contains_key(&id) {
                        tracing::warn!(graph = %id, "duplicate graph header; keeping first");
                        continue;
                    }
                    self.order.push(id.clone());
                    self.graphs.insert(
                        id.clone(),
                        StoredGraph {
                            graph: Graph {
                                id,
                                name,
                                nodes: Vec::new(),
                                edges: Vec::new(),
                            },
                            saved_at,
                        },
                    );
                }
                Record::Node(NodeRecord { graph_id, id, name }) => {
                    let graph_id = GraphId::new(graph_id);
                    if let Some(stored) = self.graphs.get_mut(&graph_id) {
                        stored.graph.nodes.push(Node {
                            id: NodeId::new(id),
                            name,
                        });
                    } else {
                        tracing::warn!(graph = %graph_id, node = %id, "orphaned node record");
                    }
                }
                Record::Edge(EdgeRecord {
                    graph_id,
                    id,
                    from,
                    to,
                    cost,
                }) => {
                    let graph_id = GraphId::new(graph_id);
                    if let Some(stored) = self.graphs.get_mut(&graph_id) {
                        stored.graph.edges.push(Edge {
                            id: EdgeId::new(id),
                            from: NodeId::new(from),
                            to: NodeId::new(to),
                            cost,
                        });
                    } else {
                        tracing::warn!(graph = %graph_id, edge = %id, "orphaned edge record");
                    }
                }
            }
        }

        // Re-check invariants that file damage can break.
        let graphs = &mut self.graphs;
        self.order.retain(|id| {
            let Some(stored) = graphs.get_mut(id) else {
                return false;
            };

            if stored.graph.nodes.is_empty() {
                tracing::warn!(graph = %id, "stored graph has no nodes; dropping");
                graphs.remove(id);
                return false;
            }

            let node_ids: HashSet<NodeId> =
                stored.graph.nodes.iter().map(|n| n.id.clone()).collect();
            stored.graph.edges.retain(|edge| {
                let intact = node_ids.contains(&edge.from) && node_ids.contains(&edge.to);
                if !intact {
                    tracing::warn!(graph = %id, edge = %edge.id, "dangling edge; dropping");
                }
                intact
            });

            true
        });
    }

    /// Flattens the store into a record sequence for persistence.
    fn to_records(&self) -> Vec<Record> {
        let mut records = Vec::new();
        for id in &self.order {
            let stored = &self.graphs[id];
            records.push(Record::Graph(GraphRecord {
                id: stored.graph.id.as_str().to_string(),
                name: stored.graph.name.clone(),
                saved_at: stored.saved_at,
            }));
            for node in &stored.graph.nodes {
                records.push(Record::Node(NodeRecord {
                    graph_id: id.as_str().to_string(),
                    id: node.id.as_str().to_string(),
                    name: node.name.clone(),
                }));
            }
            for edge in &stored.graph.edges {
                records.push(Record::Edge(EdgeRecord {
                    graph_id: id.as_str().to_string(),
                    id: edge.id.as_str().to_string(),
                    from: edge.from.as_str().to_string(),
                    to: edge.to.as_str().to_string(),
                    cost: edge.cost,
                }));
            }
        }
        records
    }
}

#[async_trait]
impl GraphStore for JsonlGraphStore {
    async fn save_graph(&mut self, graph: &Graph) -> Result<SaveOutcome> {
        if self.graphs.contains_key(&graph.id) {
            tracing::info!(graph = %graph.id, "graph already stored; not replaced");
            return Ok(SaveOutcome::AlreadyExists);
        }

        self.order.push(graph.id.clone());
        self.graphs.insert(
            graph.id.clone(),
            StoredGraph {
                graph: graph.clone(),
                saved_at: Utc::now(),
            },
        );

        Ok(SaveOutcome::Saved)
    }

    async fn load_graph(&self, id: &GraphId) -> Result<Option<Graph>> {
        Ok(self.graphs.get(id).map(|stored| stored.graph.clone()))
    }

    async fn list_graphs(&self) -> Result<Vec<GraphSummary>> {
        Ok(self
            .order
            .iter()
            .map(|id| {
                let stored = &self.graphs[id];
                GraphSummary {
                    id: id.clone(),
                    name: stored.graph.name.clone(),
                    nodes: stored.graph.nodes.len(),
                    edges: stored.graph.edges.len(),
                    saved_at: stored.saved_at,
                }
            })
            .collect())
    }

    async fn persist(&self) -> Result<()> {
        write_records_atomic(&self.path, &self.to_records()).await?;
        Ok(())
    }
}
