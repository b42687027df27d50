//! Store record types.
//!
//! Each line of a store file is one [`Record`]: a `graph` header followed by
//! the `node` and `edge` records belonging to it. Records carry the graph ID
//! they belong to so a file can hold any number of graphs and still be
//! reassembled after lines are reordered or dropped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Header record for a stored graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphRecord {
    /// Unique graph ID.
    pub id: String,

    /// Human-readable graph name.
    pub name: String,

    /// When this graph was persisted.
    pub saved_at: DateTime<Utc>,
}

/// Record for a single node of a stored graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// ID of the graph this node belongs to.
    pub graph_id: String,

    /// Node ID, unique within its graph.
    pub id: String,

    /// Human-readable node name.
    pub name: String,
}

/// Record for a single edge of a stored graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// ID of the graph this edge belongs to.
    pub graph_id: String,

    /// Edge ID.
    pub id: String,

    /// Source node ID.
    pub from: String,

    /// Target node ID.
    pub to: String,

    /// Traversal cost.
    pub cost: f64,
}

/// A single line of a store file.
///
/// Serialized with an internal `kind` tag so lines remain self-describing:
///
/// ```json
/// {"kind":"graph","id":"g1","name":"demo","saved_at":"..."}
/// {"kind":"node","graph_id":"g1","id":"a","name":"A"}
/// {"kind":"edge","graph_id":"g1","id":"e1","from":"a","to":"b","cost":1.0}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Record {
    /// Graph header record.
    Graph(GraphRecord),

    /// Node record.
    Node(NodeRecord),

    /// Edge record.
    Edge(EdgeRecord),
}

impl Record {
    /// The ID of the graph this record belongs to.
    #[must_use]
    pub fn graph_id(&self) -> &str {
        match self {
            Record::Graph(g) => &g.id,
            Record::Node(n) => &n.graph_id,
            Record::Edge(e) => &e.graph_id,
        }
    }
}
