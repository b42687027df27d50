//! Property tests for the path algorithms.
//!
//! Over small random graphs with non-negative integer costs, the
//! shortest-path result must agree with exhaustive enumeration: its cost is
//! the minimum over all simple paths, and it exists exactly when some simple
//! path exists. Integer costs keep the floating-point sums exact.

use proptest::prelude::*;
use waypoint::domain::{Edge, EdgeId, Graph, Node, NodeId};
use waypoint::index::AdjacencyIndex;
use waypoint::paths::{all_paths, shortest_path};

/// Node IDs n0..n{count-1}.
fn node_id(i: usize) -> NodeId {
    NodeId::new(format!("n{i}"))
}

fn graph_from(node_count: usize, raw_edges: &[(usize, usize, u8)]) -> Graph {
    Graph {
        id: "prop".into(),
        name: "random".to_string(),
        nodes: (0..node_count)
            .map(|i| Node {
                id: node_id(i),
                name: format!("N{i}"),
            })
            .collect(),
        edges: raw_edges
            .iter()
            .enumerate()
            .map(|(i, &(from, to, cost))| Edge {
                id: EdgeId::new(format!("e{i}")),
                from: node_id(from % node_count),
                to: node_id(to % node_count),
                cost: f64::from(cost),
            })
            .collect(),
    }
}

proptest! {
    #[test]
    fn shortest_agrees_with_exhaustive_enumeration(
        node_count in 2usize..6,
        raw_edges in prop::collection::vec((0usize..6, 0usize..6, 0u8..10), 0..12),
    ) {
        let graph = graph_from(node_count, &raw_edges);
        let index = AdjacencyIndex::build(&graph);

        let start = node_id(0);
        let end = node_id(node_count - 1);

        let enumerated = all_paths(&index, &start, &end);
        let shortest = shortest_path(&index, &start, &end).unwrap();

        match shortest {
            Some(path) => {
                let min = enumerated
                    .iter()
                    .map(|p| p.cost)
                    .fold(f64::INFINITY, f64::min);
                prop_assert!(!enumerated.is_empty());
                prop_assert_eq!(path.cost, min);
                prop_assert_eq!(path.nodes.first(), Some(&start));
                prop_assert_eq!(path.nodes.last(), Some(&end));
            }
            None => prop_assert!(enumerated.is_empty()),
        }
    }

    #[test]
    fn enumerated_paths_are_simple(
        node_count in 2usize..6,
        raw_edges in prop::collection::vec((0usize..6, 0usize..6, 0u8..10), 0..12),
    ) {
        let graph = graph_from(node_count, &raw_edges);
        let index = AdjacencyIndex::build(&graph);

        for path in all_paths(&index, &node_id(0), &node_id(node_count - 1)) {
            let mut seen = std::collections::HashSet::new();
            for node in &path.nodes {
                prop_assert!(seen.insert(node.clone()), "node revisited in {:?}", path.nodes);
            }
        }
    }
}
