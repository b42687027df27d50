//! Domain types for graph validation and path queries.
//!
//! A [`Graph`] is immutable once built by the validator: node and edge order
//! is the declaration order of the source document, and every algorithm's
//! deterministic output ordering derives from it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GraphId(pub String);

/// Unique identifier for a node within its graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub String);

/// Unique identifier for an edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            /// Create a new ID from anything string-like.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The ID as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(GraphId);
string_id!(NodeId);
string_id!(EdgeId);

/// A validated graph.
///
/// Constructed once by [`crate::validate::build_graph`] (or loaded from the
/// store) and treated as read-only thereafter. Invariants: node IDs are
/// unique, every edge endpoint resolves to a node, there is at least one
/// node, and every edge cost is non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    /// Unique identifier for the graph.
    pub id: GraphId,

    /// Human-readable graph name.
    pub name: String,

    /// Nodes in declaration order.
    pub nodes: Vec<Node>,

    /// Edges in declaration order.
    pub edges: Vec<Edge>,
}

/// A node of a [`Graph`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node ID, unique within its graph.
    pub id: NodeId,

    /// Human-readable node name.
    pub name: String,
}

/// A directed, weighted edge of a [`Graph`].
///
/// Parallel edges between the same pair of nodes are allowed and kept
/// distinct (multigraph semantics).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Edge ID.
    pub id: EdgeId,

    /// Source node ID.
    pub from: NodeId,

    /// Target node ID.
    pub to: NodeId,

    /// Traversal cost. Non-negative; an absent or blank cost in the source
    /// document defaults to 0.
    pub cost: f64,
}

/// Cache identity for path computations within one query batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    /// Start node ID.
    pub start: NodeId,

    /// End node ID.
    pub end: NodeId,
}

/// One path through a graph with its total cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathAnswer {
    /// Node IDs along the path, inclusive of start and end.
    pub nodes: Vec<NodeId>,

    /// Sum of traversed edge costs.
    pub cost: f64,
}

/// A simple cycle: a closed walk returning to its start node without
/// revisiting any other node.
///
/// The node sequence is rotation-normalized to begin (and end) at the
/// lexicographically smallest node ID in the cycle, so `first == last` and
/// equal cycles compare equal regardless of where they were discovered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cycle {
    /// Node IDs of the closed walk, `first == last`.
    pub nodes: Vec<NodeId>,
}

/// A batch of query descriptors, as deserialized from a JSON query file.
///
/// Entries are kept as raw JSON values so one malformed entry produces a
/// per-entry failure answer instead of aborting the whole batch.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryBatch {
    /// Query entries in declaration order.
    pub queries: Vec<QueryEntry>,
}

/// A single raw query entry of a [`QueryBatch`].
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct QueryEntry(pub serde_json::Value);

/// Endpoints of a path query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    /// Start node ID.
    pub start: NodeId,

    /// End node ID.
    pub end: NodeId,
}

/// A parsed query descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuerySpec {
    /// Enumerate all simple paths between the endpoints.
    Paths(Endpoints),

    /// Report the cheapest path between the endpoints.
    Cheapest(Endpoints),
}

impl QuerySpec {
    /// The endpoints of this query.
    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        match self {
            QuerySpec::Paths(e) | QuerySpec::Cheapest(e) => e,
        }
    }

    /// The cache key for this query's path computation.
    #[must_use]
    pub fn key(&self) -> QueryKey {
        let e = self.endpoints();
        QueryKey {
            start: e.start.clone(),
            end: e.end.clone(),
        }
    }
}

impl QueryEntry {
    /// Parses the raw entry into a [`QuerySpec`].
    ///
    /// The wire format is an object with exactly one of the keys `paths` or
    /// `cheapest`, each holding `{"start": ..., "end": ...}`.
    ///
    /// # Errors
    ///
    /// Returns a human-readable description of why the entry is malformed.
    /// Malformed entries are reported per-entry by the engine; they never
    /// abort the batch.
    pub fn parse(&self) -> Result<QuerySpec, String> {
        let obj = self
            .0
            .as_object()
            .ok_or_else(|| "query entry is not an object".to_string())?;

        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        match keys.as_slice() {
            ["paths"] => {
                let endpoints = serde_json::from_value(obj["paths"].clone())
                    .map_err(|e| format!("invalid 'paths' query: {e}"))?;
                Ok(QuerySpec::Paths(endpoints))
            }
            ["cheapest"] => {
                let endpoints = serde_json::from_value(obj["cheapest"].clone())
                    .map_err(|e| format!("invalid 'cheapest' query: {e}"))?;
                Ok(QuerySpec::Cheapest(endpoints))
            }
            [] => Err("query entry is empty; expected 'paths' or 'cheapest'".to_string()),
            other => Err(format!(
                "unknown or ambiguous query kind: {}",
                other.join(", ")
            )),
        }
    }
}

/// One answer of a query batch, tagged with its kind and endpoints.
///
/// Answers are returned in the same order as the input queries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Answer {
    /// All simple paths between the endpoints. An empty list is a valid
    /// no-route outcome.
    Paths {
        /// Start node ID.
        from: NodeId,
        /// End node ID.
        to: NodeId,
        /// Every simple path in deterministic discovery order.
        paths: Vec<PathAnswer>,
    },

    /// The cheapest path between the endpoints, or `None` when no route
    /// exists.
    Cheapest {
        /// Start node ID.
        from: NodeId,
        /// End node ID.
        to: NodeId,
        /// Minimum-cost path, if any route exists.
        path: Option<PathAnswer>,
    },

    /// The query entry itself was malformed. Isolated to this entry; the
    /// rest of the batch still runs.
    Invalid {
        /// Why the entry could not be parsed.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_entry_parses_paths_kind() {
        let entry = QueryEntry(json!({"paths": {"start": "a", "end": "b"}}));
        let spec = entry.parse().unwrap();
        assert_eq!(
            spec,
            QuerySpec::Paths(Endpoints {
                start: NodeId::new("a"),
                end: NodeId::new("b"),
            })
        );
    }

    #[test]
    fn query_entry_parses_cheapest_kind() {
        let entry = QueryEntry(json!({"cheapest": {"start": "a", "end": "c"}}));
        assert!(matches!(entry.parse().unwrap(), QuerySpec::Cheapest(_)));
    }

    #[test]
    fn query_entry_rejects_unknown_kind() {
        let entry = QueryEntry(json!({"longest": {"start": "a", "end": "b"}}));
        let err = entry.parse().unwrap_err();
        assert!(err.contains("longest"));
    }

    #[test]
    fn query_entry_rejects_missing_fields() {
        let entry = QueryEntry(json!({"paths": {"start": "a"}}));
        assert!(entry.parse().is_err());
    }

    #[test]
    fn query_entry_rejects_ambiguous_entry() {
        let entry = QueryEntry(json!({
            "paths": {"start": "a", "end": "b"},
            "cheapest": {"start": "a", "end": "b"},
        }));
        assert!(entry.parse().is_err());
    }

    #[test]
    fn query_key_is_shared_across_kinds() {
        let paths = QueryEntry(json!({"paths": {"start": "a", "end": "b"}}));
        let cheapest = QueryEntry(json!({"cheapest": {"start": "a", "end": "b"}}));
        assert_eq!(
            paths.parse().unwrap().key(),
            cheapest.parse().unwrap().key()
        );
    }

    #[test]
    fn answer_serializes_with_kind_tag() {
        let answer = Answer::Cheapest {
            from: NodeId::new("a"),
            to: NodeId::new("b"),
            path: None,
        };
        let json = serde_json::to_value(&answer).unwrap();
        assert_eq!(json["kind"], "cheapest");
        assert_eq!(json["path"], serde_json::Value::Null);
    }
}
