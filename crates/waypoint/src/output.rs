//! Output rendering for CLI commands.
//!
//! Every command can render either human-readable text (with color) or JSON
//! for programmatic use, selected by the global `--json` flag.

use crate::domain::{Answer, Cycle, Graph, NodeId, PathAnswer};
use crate::error::Result;
use crate::storage::{GraphSummary, SaveOutcome};
use colored::Colorize;

/// How command results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text with color.
    Text,

    /// JSON for programmatic use.
    Json,
}

/// Renders a path as `a -> b -> c (cost 3)`.
fn format_path(path: &PathAnswer) -> String {
    let route = path
        .nodes
        .iter()
        .map(NodeId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ");
    format!("{route} (cost {})", path.cost)
}

/// Renders a cycle as `a -> b -> a`.
fn format_cycle(cycle: &Cycle) -> String {
    cycle
        .nodes
        .iter()
        .map(NodeId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Prints the answers of a query batch, in input order.
///
/// # Errors
///
/// Returns `Error::Json` if JSON serialization fails.
pub fn print_answers(answers: &[Answer], mode: OutputMode) -> Result<()> {
    if mode == OutputMode::Json {
        println!("{}", serde_json::to_string_pretty(answers)?);
        return Ok(());
    }

    for answer in answers {
        match answer {
            Answer::Paths { from, to, paths } => {
                println!(
                    "{} {} -> {}: {} path(s)",
                    "paths".bold(),
                    from,
                    to,
                    paths.len()
                );
                for path in paths {
                    println!("  {}", format_path(path));
                }
            }
            Answer::Cheapest { from, to, path } => match path {
                Some(path) => {
                    println!(
                        "{} {} -> {}: {}",
                        "cheapest".bold(),
                        from,
                        to,
                        format_path(path).green()
                    );
                }
                None => {
                    println!(
                        "{} {} -> {}: {}",
                        "cheapest".bold(),
                        from,
                        to,
                        "no path found".yellow()
                    );
                }
            },
            Answer::Invalid { reason } => {
                println!("{} {}", "invalid query:".red(), reason);
            }
        }
    }

    Ok(())
}

/// Prints the cycles of a graph.
///
/// # Errors
///
/// Returns `Error::Json` if JSON serialization fails.
pub fn print_cycles(graph: &Graph, cycles: &[Cycle], mode: OutputMode) -> Result<()> {
    if mode == OutputMode::Json {
        println!("{}", serde_json::to_string_pretty(cycles)?);
        return Ok(());
    }

    if cycles.is_empty() {
        println!("graph '{}' is acyclic", graph.id);
    } else {
        println!("graph '{}' has {} cycle(s):", graph.id, cycles.len());
        for cycle in cycles {
            println!("  {}", format_cycle(cycle).cyan());
        }
    }

    Ok(())
}

/// Prints the result of loading and storing a graph.
pub fn print_load(graph: &Graph, outcome: SaveOutcome, mode: OutputMode) {
    if mode == OutputMode::Json {
        // Cycle output follows separately; only report the save here.
        println!(
            "{}",
            serde_json::json!({
                "graph": graph.id,
                "nodes": graph.nodes.len(),
                "edges": graph.edges.len(),
                "saved": outcome == SaveOutcome::Saved,
            })
        );
        return;
    }

    match outcome {
        SaveOutcome::Saved => println!(
            "{} graph '{}' ({} nodes, {} edges)",
            "saved".green().bold(),
            graph.id,
            graph.nodes.len(),
            graph.edges.len()
        ),
        SaveOutcome::AlreadyExists => println!(
            "graph '{}' already exists in the store; not replaced",
            graph.id
        ),
    }
}

/// Prints summaries of stored graphs.
///
/// # Errors
///
/// Returns `Error::Json` if JSON serialization fails.
pub fn print_summaries(summaries: &[GraphSummary], mode: OutputMode) -> Result<()> {
    if mode == OutputMode::Json {
        println!("{}", serde_json::to_string_pretty(summaries)?);
        return Ok(());
    }

    if summaries.is_empty() {
        println!("no graphs stored");
        return Ok(());
    }

    for summary in summaries {
        println!(
            "{}  {} ({} nodes, {} edges, saved {})",
            summary.id.to_string().bold(),
            summary.name,
            summary.nodes,
            summary.edges,
            summary.saved_at.format("%Y-%m-%d %H:%M:%S")
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_path_joins_nodes_and_cost() {
        let path = PathAnswer {
            nodes: vec![NodeId::new("a"), NodeId::new("b"), NodeId::new("c")],
            cost: 3.0,
        };
        assert_eq!(format_path(&path), "a -> b -> c (cost 3)");
    }

    #[test]
    fn format_cycle_closes_the_walk() {
        let cycle = Cycle {
            nodes: vec![NodeId::new("a"), NodeId::new("b"), NodeId::new("a")],
        };
        assert_eq!(format_cycle(&cycle), "a -> b -> a");
    }
}
