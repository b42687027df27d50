//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for waypoint using clap's
//! derive API.
//!
//! # Commands
//!
//! - `init`: Initialize a waypoint workspace
//! - `load`: Validate an XML graph document and store the graph
//! - `query`: Run a JSON query batch against a stored graph
//! - `cycles`: Report the simple cycles of a stored graph
//! - `list`: List stored graphs
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! waypoint init
//! waypoint load routes.xml
//! waypoint query routes queries.json
//! waypoint --json cycles routes
//! ```

mod args;
mod execute;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use args::{CyclesArgs, InitArgs, ListArgs, LoadArgs, QueryArgs};

/// Waypoint - graph validation and path queries
///
/// Validates XML graph documents, stores the graphs in JSONL, and answers
/// path and cycle queries against them. Graphs live in
/// `.waypoint/graphs.jsonl` for easy version control integration.
#[derive(Parser, Debug)]
#[command(name = "waypoint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Initialize a waypoint workspace
    ///
    /// Creates the `.waypoint/` directory with configuration and an empty
    /// graph store. Run this once in your project root.
    Init(InitArgs),

    /// Validate an XML graph document and store the graph
    ///
    /// The document is checked against the graph invariants (unique node
    /// IDs, resolvable edge endpoints, non-negative costs). On success the
    /// graph is stored and its cycles are reported.
    Load(LoadArgs),

    /// Run a JSON query batch against a stored graph
    ///
    /// Each entry asks for all simple paths or the cheapest path between two
    /// nodes. Answers come back in query order; a malformed entry fails
    /// alone without aborting the batch.
    Query(QueryArgs),

    /// Report the simple cycles of a stored graph
    Cycles(CyclesArgs),

    /// List stored graphs
    List(ListArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    pub async fn execute(&self) -> Result<()> {
        use crate::app::App;
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Init(args)) => execute::execute_init(args).await,
            Some(Commands::Load(args)) => {
                let mut app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_load(&mut app, args, output_mode).await
            }
            Some(Commands::Query(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_query(&app, args, output_mode).await
            }
            Some(Commands::Cycles(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_cycles(&app, args, output_mode).await
            }
            Some(Commands::List(args)) => {
                let app = App::from_directory(&std::env::current_dir()?).await?;
                execute::execute_list(&app, args, output_mode).await
            }
            None => {
                println!("Waypoint graph validation and path queries");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parse_no_command() {
        let cli = Cli::try_parse_from(["waypoint"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn parse_global_json_flag() {
        let cli = Cli::try_parse_from(["waypoint", "--json", "list"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Some(Commands::List(_))));
    }

    #[test]
    fn parse_init_default() {
        let cli = Cli::try_parse_from(["waypoint", "init"]).unwrap();
        match cli.command {
            Some(Commands::Init(args)) => assert!(!args.quiet),
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn parse_init_quiet() {
        let cli = Cli::try_parse_from(["waypoint", "init", "-q"]).unwrap();
        match cli.command {
            Some(Commands::Init(args)) => assert!(args.quiet),
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn parse_load_with_file() {
        let cli = Cli::try_parse_from(["waypoint", "load", "routes.xml"]).unwrap();
        match cli.command {
            Some(Commands::Load(args)) => {
                assert_eq!(args.file, PathBuf::from("routes.xml"));
            }
            _ => panic!("Expected Load command"),
        }
    }

    #[test]
    fn parse_load_requires_file() {
        assert!(Cli::try_parse_from(["waypoint", "load"]).is_err());
    }

    #[test]
    fn parse_query_with_graph_and_file() {
        let cli = Cli::try_parse_from(["waypoint", "query", "routes", "queries.json"]).unwrap();
        match cli.command {
            Some(Commands::Query(args)) => {
                assert_eq!(args.graph_id, "routes");
                assert_eq!(args.file, PathBuf::from("queries.json"));
            }
            _ => panic!("Expected Query command"),
        }
    }

    #[test]
    fn parse_query_requires_both_arguments() {
        assert!(Cli::try_parse_from(["waypoint", "query", "routes"]).is_err());
    }

    #[test]
    fn parse_cycles() {
        let cli = Cli::try_parse_from(["waypoint", "cycles", "routes"]).unwrap();
        match cli.command {
            Some(Commands::Cycles(args)) => assert_eq!(args.graph_id, "routes"),
            _ => panic!("Expected Cycles command"),
        }
    }

    #[test]
    fn parse_list_with_json() {
        let cli = Cli::try_parse_from(["waypoint", "--json", "list"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Some(Commands::List(_))));
    }
}
