//! Graph validation: hierarchical document in, validated [`Graph`] out.
//!
//! The expected document shape is a `graph` root with exactly one `id`, one
//! `name`, one non-empty `nodes` group, and one `edges` group. Entries inside
//! *both* groups are `<node>` elements — a quirk of the wire format this tool
//! consumes:
//!
//! ```xml
//! <graph>
//!   <id>g1</id>
//!   <name>demo</name>
//!   <nodes>
//!     <node><id>a</id><name>A</name></node>
//!   </nodes>
//!   <edges>
//!     <node><id>e1</id><from>a</from><to>a</to><cost>1</cost></node>
//!   </edges>
//! </graph>
//! ```
//!
//! Validation is a pure transform and fails fast: the first structural or
//! semantic violation is returned and no partial graph escapes.

use crate::domain::{Edge, EdgeId, Graph, GraphId, Node, NodeId};
use crate::error::ValidateError;
use roxmltree::Document;
use std::collections::HashSet;

/// Tag of entries inside the `nodes` and `edges` groups.
const ENTRY_TAG: &str = "node";

/// Builds a validated [`Graph`] from a parsed XML document.
///
/// # Errors
///
/// Returns the first [`ValidateError`] encountered: missing/duplicate
/// required tags, a non-`graph` root, duplicate node IDs, an empty node
/// group, dangling edge endpoints, or malformed/negative costs.
pub fn build_graph(document: &Document<'_>) -> Result<Graph, ValidateError> {
    let root = document.root_element();
    if root.tag_name().name() != "graph" {
        return Err(ValidateError::NotAGraph(root.tag_name().name().to_string()));
    }

    let id = GraphId::new(element_text(&unique_child(&root, "id")?));
    let name = element_text(&unique_child(&root, "name")?).to_string();

    let (nodes, node_ids) = validate_nodes(&root)?;
    let edges = validate_edges(&root, &node_ids)?;

    tracing::debug!(
        graph = %id,
        nodes = nodes.len(),
        edges = edges.len(),
        "graph validated"
    );

    Ok(Graph {
        id,
        name,
        nodes,
        edges,
    })
}

/// Validates the `nodes` group, returning the nodes in declaration order and
/// the set of their IDs for endpoint resolution.
fn validate_nodes<'a>(
    root: &roxmltree::Node<'a, '_>,
) -> Result<(Vec<Node>, HashSet<NodeId>), ValidateError> {
    let group = unique_child(root, "nodes")?;

    let mut nodes = Vec::new();
    let mut ids = HashSet::new();

    for entry in elements(&group, ENTRY_TAG) {
        let id = NodeId::new(element_text(&unique_child(&entry, "id")?));
        if !ids.insert(id.clone()) {
            return Err(ValidateError::DuplicateNodeId(id));
        }

        let name = element_text(&unique_child(&entry, "name")?).to_string();
        nodes.push(Node { id, name });
    }

    if nodes.is_empty() {
        return Err(ValidateError::EmptyNodeSet);
    }

    Ok((nodes, ids))
}

/// Validates the `edges` group against the known node IDs.
fn validate_edges(
    root: &roxmltree::Node<'_, '_>,
    node_ids: &HashSet<NodeId>,
) -> Result<Vec<Edge>, ValidateError> {
    let group = unique_child(root, "edges")?;

    let mut edges = Vec::new();

    for entry in elements(&group, ENTRY_TAG) {
        let id = EdgeId::new(element_text(&unique_child(&entry, "id")?));

        let from = NodeId::new(element_text(&unique_child(&entry, "from")?));
        if !node_ids.contains(&from) {
            return Err(ValidateError::UnknownEndpoint {
                edge: id,
                node: from,
            });
        }

        let to = NodeId::new(element_text(&unique_child(&entry, "to")?));
        if !node_ids.contains(&to) {
            return Err(ValidateError::UnknownEndpoint { edge: id, node: to });
        }

        let cost = parse_cost(&entry, &id)?;

        edges.push(Edge { id, from, to, cost });
    }

    Ok(edges)
}

/// Parses the optional `cost` tag of an edge entry.
///
/// Absent or blank costs default to 0. A present cost must be a non-negative
/// number.
fn parse_cost(entry: &roxmltree::Node<'_, '_>, edge: &EdgeId) -> Result<f64, ValidateError> {
    let Some(cost_element) = optional_unique_child(entry, "cost")? else {
        return Ok(0.0);
    };

    let text = element_text(&cost_element);
    if text.is_empty() {
        return Ok(0.0);
    }

    let cost: f64 = text.parse().map_err(|_| ValidateError::MalformedCost {
        edge: edge.clone(),
        text: text.to_string(),
    })?;

    // NaN would otherwise slip past the sign check.
    if !cost.is_finite() {
        return Err(ValidateError::MalformedCost {
            edge: edge.clone(),
            text: text.to_string(),
        });
    }

    if cost < 0.0 {
        return Err(ValidateError::NegativeCost {
            edge: edge.clone(),
            cost,
        });
    }

    Ok(cost)
}

/// Element children of `parent` with the given tag, in document order.
fn elements<'a, 'input>(
    parent: &roxmltree::Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = roxmltree::Node<'a, 'input>> {
    parent
        .children()
        .filter(move |c| c.is_element() && c.tag_name().name() == tag)
}

/// Requires exactly one child element with the given tag.
fn unique_child<'a, 'input>(
    parent: &roxmltree::Node<'a, 'input>,
    tag: &str,
) -> Result<roxmltree::Node<'a, 'input>, ValidateError> {
    let mut matches = parent
        .children()
        .filter(|c| c.is_element() && c.tag_name().name() == tag);

    let first = matches.next().ok_or_else(|| ValidateError::MissingTag {
        tag: tag.to_string(),
        container: parent.tag_name().name().to_string(),
    })?;

    if matches.next().is_some() {
        return Err(ValidateError::DuplicateTag {
            tag: tag.to_string(),
            container: parent.tag_name().name().to_string(),
        });
    }

    Ok(first)
}

/// Requires at most one child element with the given tag.
fn optional_unique_child<'a, 'input>(
    parent: &roxmltree::Node<'a, 'input>,
    tag: &str,
) -> Result<Option<roxmltree::Node<'a, 'input>>, ValidateError> {
    match unique_child(parent, tag) {
        Ok(node) => Ok(Some(node)),
        Err(ValidateError::MissingTag { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Trimmed text content of an element; empty string when absent.
fn element_text<'a>(node: &roxmltree::Node<'a, '_>) -> &'a str {
    node.text().unwrap_or("").trim()
}
