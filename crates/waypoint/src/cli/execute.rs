//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands.

use anyhow::Result;

use super::args::{CyclesArgs, InitArgs, ListArgs, LoadArgs, QueryArgs};
use crate::app::App;
use crate::output::OutputMode;

/// Execute the init command
pub async fn execute_init(args: &InitArgs) -> Result<()> {
    use crate::commands::init;

    let current_dir = std::env::current_dir()?;
    let result = init::init(&current_dir).await?;

    if !args.quiet {
        println!(
            "Initialized waypoint in {}",
            result.waypoint_dir.display()
        );
        println!("  Config: {}", result.config_file.display());
        println!("  Graphs: {}", result.store_file.display());
    }

    Ok(())
}

/// Execute the load command
///
/// Reads the XML document, validates it into a graph, stores the graph, and
/// reports any cycles found in it.
pub async fn execute_load(app: &mut App, args: &LoadArgs, output_mode: OutputMode) -> Result<()> {
    use crate::cycles::find_cycles;
    use crate::error::Error;
    use crate::index::AdjacencyIndex;
    use crate::output;
    use crate::validate::build_graph;

    let text = tokio::fs::read_to_string(&args.file).await?;
    let document = roxmltree::Document::parse(&text).map_err(Error::Xml)?;
    let graph = build_graph(&document).map_err(Error::Validate)?;

    let outcome = app.store_mut().save_graph(&graph).await?;
    app.save().await?;

    output::print_load(&graph, outcome, output_mode);

    let index = AdjacencyIndex::build(&graph);
    let cycles = find_cycles(&index);
    output::print_cycles(&graph, &cycles, output_mode)?;

    Ok(())
}

/// Execute the query command
///
/// Loads the named graph, reads the JSON query batch, and answers each entry
/// in order.
pub async fn execute_query(app: &App, args: &QueryArgs, output_mode: OutputMode) -> Result<()> {
    use crate::domain::QueryBatch;
    use crate::engine::QueryEngine;
    use crate::index::AdjacencyIndex;
    use crate::output;

    let graph = load_graph(app, &args.graph_id).await?;

    let text = tokio::fs::read_to_string(&args.file).await?;
    let batch: QueryBatch = serde_json::from_str(&text)?;

    let index = AdjacencyIndex::build(&graph);
    let mut engine = QueryEngine::new(&index);
    let answers = engine.run_batch(&batch);

    output::print_answers(&answers, output_mode)?;
    Ok(())
}

/// Execute the cycles command
pub async fn execute_cycles(app: &App, args: &CyclesArgs, output_mode: OutputMode) -> Result<()> {
    use crate::cycles::find_cycles;
    use crate::index::AdjacencyIndex;
    use crate::output;

    let graph = load_graph(app, &args.graph_id).await?;

    let index = AdjacencyIndex::build(&graph);
    let cycles = find_cycles(&index);

    output::print_cycles(&graph, &cycles, output_mode)?;
    Ok(())
}

/// Execute the list command
pub async fn execute_list(app: &App, _args: &ListArgs, output_mode: OutputMode) -> Result<()> {
    use crate::output;

    let summaries = app.store().list_graphs().await?;
    output::print_summaries(&summaries, output_mode)?;
    Ok(())
}

/// Fetches a stored graph by ID, turning absence into an error.
async fn load_graph(app: &App, graph_id: &str) -> Result<crate::domain::Graph> {
    use crate::domain::GraphId;
    use crate::error::Error;

    let id = GraphId::new(graph_id);
    let graph = app
        .store()
        .load_graph(&id)
        .await?
        .ok_or(Error::GraphNotFound(id))?;
    Ok(graph)
}
