//! Adjacency index derived from a validated graph.
//!
//! The index maps each node ID to its outgoing edges in edge-declaration
//! order. It is built once per graph in O(|V|+|E|) and is read-only
//! afterwards, so it is safe to share across concurrent readers.

use crate::domain::{EdgeId, Graph, NodeId};
use std::collections::HashMap;

/// One outgoing adjacency entry.
///
/// Parallel edges between the same pair of nodes produce distinct entries;
/// they are never merged.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    /// Target node of the edge.
    pub to: NodeId,

    /// Edge cost.
    pub cost: f64,

    /// The edge this entry came from.
    pub edge: EdgeId,
}

/// Outgoing-edge lookup table for a [`Graph`].
#[derive(Debug, Clone)]
pub struct AdjacencyIndex {
    /// Node ID to outgoing entries, in edge-declaration order.
    adjacency: HashMap<NodeId, Vec<Neighbor>>,

    /// Node IDs in declaration order.
    node_order: Vec<NodeId>,

    /// First negative-cost edge seen during the build, if any. Lets the
    /// shortest-path precondition be checked without rescanning edges.
    negative_edge: Option<(EdgeId, f64)>,
}

impl AdjacencyIndex {
    /// Builds the index from a graph in O(|V|+|E|).
    ///
    /// Every node gets an entry, so nodes without outgoing edges map to an
    /// empty slice rather than a missing key.
    #[must_use]
    pub fn build(graph: &Graph) -> Self {
        let mut adjacency: HashMap<NodeId, Vec<Neighbor>> = HashMap::new();
        let mut node_order = Vec::with_capacity(graph.nodes.len());

        for node in &graph.nodes {
            adjacency.entry(node.id.clone()).or_default();
            node_order.push(node.id.clone());
        }

        let mut negative_edge = None;
        for edge in &graph.edges {
            if edge.cost < 0.0 && negative_edge.is_none() {
                negative_edge = Some((edge.id.clone(), edge.cost));
            }
            adjacency
                .entry(edge.from.clone())
                .or_default()
                .push(Neighbor {
                    to: edge.to.clone(),
                    cost: edge.cost,
                    edge: edge.id.clone(),
                });
        }

        Self {
            adjacency,
            node_order,
            negative_edge,
        }
    }

    /// Outgoing entries of a node, in edge-declaration order.
    ///
    /// Unknown node IDs return an empty slice.
    #[must_use]
    pub fn neighbors(&self, node: &NodeId) -> &[Neighbor] {
        self.adjacency.get(node).map_or(&[], Vec::as_slice)
    }

    /// Whether the node exists in the indexed graph.
    #[must_use]
    pub fn contains(&self, node: &NodeId) -> bool {
        self.adjacency.contains_key(node)
    }

    /// Node IDs in declaration order.
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.node_order
    }

    /// Number of nodes in the indexed graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_order.len()
    }

    /// The first negative-cost edge seen during the build, if any.
    ///
    /// A validated graph never has one; a graph loaded from an external
    /// store might.
    #[must_use]
    pub fn negative_edge(&self) -> Option<(&EdgeId, f64)> {
        self.negative_edge.as_ref().map(|(id, cost)| (id, *cost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Edge, GraphId, Node};

    fn graph(edges: &[(&str, &str, &str, f64)]) -> Graph {
        let mut nodes = Vec::new();
        for id in ["a", "b", "c"] {
            nodes.push(Node {
                id: NodeId::new(id),
                name: id.to_uppercase(),
            });
        }
        Graph {
            id: GraphId::new("g"),
            name: "test".to_string(),
            nodes,
            edges: edges
                .iter()
                .map(|(id, from, to, cost)| Edge {
                    id: EdgeId::new(*id),
                    from: NodeId::new(*from),
                    to: NodeId::new(*to),
                    cost: *cost,
                })
                .collect(),
        }
    }

    #[test]
    fn entries_follow_edge_declaration_order() {
        let index = AdjacencyIndex::build(&graph(&[
            ("e1", "a", "c", 5.0),
            ("e2", "a", "b", 1.0),
        ]));

        let out: Vec<&str> = index
            .neighbors(&NodeId::new("a"))
            .iter()
            .map(|n| n.to.as_str())
            .collect();
        assert_eq!(out, vec!["c", "b"]);
    }

    #[test]
    fn parallel_edges_stay_distinct() {
        let index = AdjacencyIndex::build(&graph(&[
            ("e1", "a", "b", 1.0),
            ("e2", "a", "b", 3.0),
        ]));

        let out = index.neighbors(&NodeId::new("a"));
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].edge, EdgeId::new("e1"));
        assert_eq!(out[1].edge, EdgeId::new("e2"));
    }

    #[test]
    fn node_without_outgoing_edges_maps_to_empty() {
        let index = AdjacencyIndex::build(&graph(&[("e1", "a", "b", 1.0)]));

        assert!(index.contains(&NodeId::new("c")));
        assert!(index.neighbors(&NodeId::new("c")).is_empty());
        assert!(index.neighbors(&NodeId::new("missing")).is_empty());
    }

    #[test]
    fn negative_edge_is_flagged() {
        let index = AdjacencyIndex::build(&graph(&[
            ("e1", "a", "b", 1.0),
            ("e2", "b", "c", -2.0),
        ]));

        let (edge, cost) = index.negative_edge().unwrap();
        assert_eq!(edge, &EdgeId::new("e2"));
        assert_eq!(cost, -2.0);
    }
}
