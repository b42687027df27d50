//! Path finding over an [`AdjacencyIndex`].
//!
//! Two algorithms live here:
//!
//! - [`shortest_path`]: label-correcting Dijkstra with a binary-heap priority
//!   queue. Requires non-negative edge costs.
//! - [`all_paths`]: exhaustive depth-first enumeration of simple paths.
//!   Worst-case exponential in branching factor; completeness is the
//!   contract, not polynomial bounds.
//!
//! # Determinism
//!
//! Both functions produce the same output for the same input:
//!
//! - Dijkstra breaks ties among equal tentative costs by lexical node-ID
//!   order (the heap orders by `(cost, node)`); the first node settled wins.
//! - `all_paths` returns paths in DFS discovery order, exploring neighbors
//!   in edge-declaration order.
//!
//! The absence of a route is an ordinary outcome (`Ok(None)` / empty vec),
//! never an error.

use crate::domain::{NodeId, PathAnswer};
use crate::error::{Error, Result};
use crate::index::AdjacencyIndex;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Heap entry for Dijkstra's priority queue.
///
/// Ordered so that `BinaryHeap` (a max-heap) pops the entry with the lowest
/// tentative cost first, with lexical node-ID order as the tie-break.
#[derive(Debug, Clone, PartialEq)]
struct HeapEntry {
    cost: f64,
    node: NodeId,
}

impl Eq for HeapEntry {}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: the max-heap must yield the minimum.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Finds a minimum-cost path from `start` to `end`.
///
/// Returns `Ok(None)` when `end` is unreachable or either endpoint is not a
/// node of the graph. `start == end` yields the trivial single-node path
/// with cost 0.
///
/// Complexity: O((V+E) log V). Stale heap entries are skipped lazily instead
/// of being removed, so a node may appear in the heap more than once.
///
/// # Errors
///
/// Returns [`Error::NegativeCost`] if the index carries a negative-cost
/// edge. Dijkstra's correctness depends on non-negative costs, so this is
/// checked before the algorithm runs.
pub fn shortest_path(
    index: &AdjacencyIndex,
    start: &NodeId,
    end: &NodeId,
) -> Result<Option<PathAnswer>> {
    if let Some((edge, cost)) = index.negative_edge() {
        return Err(Error::NegativeCost {
            edge: edge.clone(),
            cost,
        });
    }

    if !index.contains(start) || !index.contains(end) {
        return Ok(None);
    }

    if start == end {
        return Ok(Some(PathAnswer {
            nodes: vec![start.clone()],
            cost: 0.0,
        }));
    }

    let mut dist: HashMap<NodeId, f64> = HashMap::new();
    let mut prev: HashMap<NodeId, NodeId> = HashMap::new();
    let mut heap = BinaryHeap::new();

    dist.insert(start.clone(), 0.0);
    heap.push(HeapEntry {
        cost: 0.0,
        node: start.clone(),
    });

    while let Some(HeapEntry { cost, node }) = heap.pop() {
        // Lazy deletion: a cheaper label for this node was already settled.
        if dist.get(&node).is_some_and(|&best| cost > best) {
            continue;
        }

        if &node == end {
            return Ok(Some(PathAnswer {
                nodes: reconstruct(&prev, start, end),
                cost,
            }));
        }

        for neighbor in index.neighbors(&node) {
            let tentative = cost + neighbor.cost;
            let improved = dist
                .get(&neighbor.to)
                .is_none_or(|&known| tentative < known);

            if improved {
                dist.insert(neighbor.to.clone(), tentative);
                prev.insert(neighbor.to.clone(), node.clone());
                heap.push(HeapEntry {
                    cost: tentative,
                    node: neighbor.to.clone(),
                });
            }
        }
    }

    Ok(None)
}

/// Rebuilds the settled path from the predecessor map.
fn reconstruct(prev: &HashMap<NodeId, NodeId>, start: &NodeId, end: &NodeId) -> Vec<NodeId> {
    let mut path = vec![end.clone()];
    let mut current = end;
    while current != start {
        current = &prev[current];
        path.push(current.clone());
    }
    path.reverse();
    path
}

/// Enumerates every simple path from `start` to `end` with its total cost.
///
/// A simple path visits no node more than once, so the search terminates on
/// cyclic graphs. Paths are returned in DFS discovery order with neighbors
/// explored in edge-declaration order. Unknown endpoints or the absence of
/// any route yield an empty vec. `start == end` yields the single trivial
/// path.
#[must_use]
pub fn all_paths(index: &AdjacencyIndex, start: &NodeId, end: &NodeId) -> Vec<PathAnswer> {
    if !index.contains(start) || !index.contains(end) {
        return Vec::new();
    }

    if start == end {
        return vec![PathAnswer {
            nodes: vec![start.clone()],
            cost: 0.0,
        }];
    }

    let mut found = Vec::new();
    let mut path = vec![start.clone()];
    let mut visited: HashSet<NodeId> = HashSet::from([start.clone()]);

    dfs_paths(index, start, end, &mut path, &mut visited, 0.0, &mut found);
    found
}

/// DFS step: extends the current path by each outgoing edge of `current`
/// whose target is not already on the path.
fn dfs_paths(
    index: &AdjacencyIndex,
    current: &NodeId,
    end: &NodeId,
    path: &mut Vec<NodeId>,
    visited: &mut HashSet<NodeId>,
    cost: f64,
    found: &mut Vec<PathAnswer>,
) {
    for neighbor in index.neighbors(current) {
        if &neighbor.to == end {
            let mut nodes = path.clone();
            nodes.push(end.clone());
            found.push(PathAnswer {
                nodes,
                cost: cost + neighbor.cost,
            });
            continue;
        }

        if visited.contains(&neighbor.to) {
            continue;
        }

        visited.insert(neighbor.to.clone());
        path.push(neighbor.to.clone());
        dfs_paths(
            index,
            &neighbor.to,
            end,
            path,
            visited,
            cost + neighbor.cost,
            found,
        );
        path.pop();
        visited.remove(&neighbor.to);
    }
}
