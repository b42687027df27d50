//! Error types for waypoint operations.
//!
//! Validation failures have their own enum, [`ValidateError`], so callers can
//! distinguish structural input problems (malformed document shape) from
//! semantic ones (violated graph invariants). The absence of a path or cycle
//! is never an error; those are ordinary empty results.

use crate::domain::{EdgeId, GraphId, NodeId};
use std::io;
use thiserror::Error;

/// A violation found while building a graph from a source document.
///
/// The validator fails fast: the first violation encountered is returned and
/// no partial graph is surfaced.
#[derive(Debug, Error, PartialEq)]
pub enum ValidateError {
    /// The document root is not a `graph` element.
    #[error("document root element is '{0}', expected 'graph'")]
    NotAGraph(String),

    /// A required tag is missing from its container.
    #[error("missing '{tag}' tag in '{container}'")]
    MissingTag {
        /// The required tag.
        tag: String,
        /// The element that should contain it.
        container: String,
    },

    /// A tag that must appear exactly once appeared more than once.
    #[error("duplicate '{tag}' tag in '{container}'")]
    DuplicateTag {
        /// The duplicated tag.
        tag: String,
        /// The element containing the duplicates.
        container: String,
    },

    /// Two nodes share the same ID.
    #[error("duplicate node ID '{0}'")]
    DuplicateNodeId(NodeId),

    /// The `nodes` group contains no node entries.
    #[error("nodes group is empty; a graph requires at least one node")]
    EmptyNodeSet,

    /// An edge endpoint does not resolve to a node of the graph.
    #[error("edge '{edge}' references unknown node '{node}'")]
    UnknownEndpoint {
        /// The edge with the dangling endpoint.
        edge: EdgeId,
        /// The node ID that does not exist.
        node: NodeId,
    },

    /// An edge cost is present but not a number.
    #[error("edge '{edge}' has malformed cost '{text}'")]
    MalformedCost {
        /// The edge carrying the cost.
        edge: EdgeId,
        /// The offending cost text.
        text: String,
    },

    /// An edge cost is negative. Negative costs are rejected up front because
    /// shortest-path requires non-negative costs.
    #[error("edge '{edge}' has negative cost {cost}")]
    NegativeCost {
        /// The edge carrying the cost.
        edge: EdgeId,
        /// The negative cost value.
        cost: f64,
    },
}

/// The error type for waypoint operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// XML document could not be parsed at all.
    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Store error.
    #[error("Store error: {0}")]
    Store(#[from] waypoint_store::Error),

    /// Graph validation failed.
    #[error("Invalid input: {0}")]
    Validate(#[from] ValidateError),

    /// No stored graph with the given ID.
    #[error("Graph not found: {0}")]
    GraphNotFound(GraphId),

    /// A negative edge cost reached the shortest-path algorithm. Dijkstra
    /// requires non-negative costs; this precondition is checked before the
    /// algorithm runs.
    #[error("shortest path precondition violated: edge '{edge}' has negative cost {cost}")]
    NegativeCost {
        /// The offending edge.
        edge: EdgeId,
        /// The negative cost value.
        cost: f64,
    },
}

/// A specialized Result type for waypoint operations.
pub type Result<T> = std::result::Result<T, Error>;
