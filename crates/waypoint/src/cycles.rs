//! Simple cycle enumeration over an [`AdjacencyIndex`].
//!
//! # Cycle identity
//!
//! A cycle is identified by its rotation-normalized node-ID sequence: the
//! closed walk is rotated so it starts (and ends) at its lexicographically
//! smallest node. Parallel edges do not distinguish cycles — a cycle answer
//! is a node sequence, which cannot express which of two parallel edges was
//! taken, so the node sequence is the whole identity.
//!
//! # Enumeration
//!
//! For each node `s` in lexical order, a depth-first search explores only
//! nodes lexically greater than `s`; an edge back to `s` closes a cycle.
//! Every simple cycle is therefore discovered exactly once, anchored at its
//! smallest node, already in normalized form. A per-anchor seen-set drops
//! the duplicates that parallel edges would otherwise produce.
//!
//! An acyclic graph yields an empty sequence, not an error.

use crate::domain::{Cycle, NodeId};
use crate::index::AdjacencyIndex;
use std::collections::HashSet;

/// Enumerates the distinct simple cycles of the indexed graph.
///
/// Cycles are ordered by their anchor (lexically smallest node) first, then
/// by DFS discovery order within one anchor, so output is deterministic for
/// identical input.
#[must_use]
pub fn find_cycles(index: &AdjacencyIndex) -> Vec<Cycle> {
    let mut anchors: Vec<&NodeId> = index.nodes().iter().collect();
    anchors.sort_unstable();

    let mut cycles = Vec::new();

    for anchor in anchors {
        let mut seen: HashSet<Vec<NodeId>> = HashSet::new();
        let mut walk = vec![anchor.clone()];
        let mut on_walk: HashSet<NodeId> = HashSet::from([anchor.clone()]);

        dfs_cycles(
            index,
            anchor,
            anchor,
            &mut walk,
            &mut on_walk,
            &mut seen,
            &mut cycles,
        );
    }

    tracing::debug!(count = cycles.len(), "cycle enumeration finished");
    cycles
}

/// DFS step: extends the current walk by nodes lexically greater than the
/// anchor; an edge back to the anchor closes a cycle.
fn dfs_cycles(
    index: &AdjacencyIndex,
    anchor: &NodeId,
    current: &NodeId,
    walk: &mut Vec<NodeId>,
    on_walk: &mut HashSet<NodeId>,
    seen: &mut HashSet<Vec<NodeId>>,
    cycles: &mut Vec<Cycle>,
) {
    for neighbor in index.neighbors(current) {
        if &neighbor.to == anchor {
            let mut nodes = walk.clone();
            nodes.push(anchor.clone());
            if seen.insert(nodes.clone()) {
                cycles.push(Cycle { nodes });
            }
            continue;
        }

        // Restricting the walk to nodes greater than the anchor guarantees
        // each cycle is found exactly once, at its smallest node.
        if neighbor.to <= *anchor || on_walk.contains(&neighbor.to) {
            continue;
        }

        on_walk.insert(neighbor.to.clone());
        walk.push(neighbor.to.clone());
        dfs_cycles(index, anchor, &neighbor.to, walk, on_walk, seen, cycles);
        walk.pop();
        on_walk.remove(&neighbor.to);
    }
}
