//! Command-line interface definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Fuzzy search through a numbered bilingual rule set
#[derive(Debug, Parser)]
#[command(name = "rulesearch")]
#[command(about = "Fuzzy search through a numbered bilingual rule set", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the rules JSON file (overrides config)
    #[arg(short = 'f', long, global = true)]
    pub rules_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error logging
    #[arg(long, global = true)]
    pub quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fuzzy search in either language; a bare number shows that rule
    Search(SearchArgs),
    /// Find rules containing every keyword
    Keywords(KeywordsArgs),
    /// Show a rule by number
    Rule {
        number: u32,
    },
    /// Show a random rule
    Random,
    /// Manage the daily rule rotation
    Daily {
        #[command(subcommand)]
        command: DailyCommand,
        /// Path to the group store (overrides config)
        #[arg(long, global = true)]
        groups_file: Option<PathBuf>,
    },
    /// Prompt for queries until quit
    Interactive(DisplayArgs),
    /// Run as an MCP server over stdio
    Serve,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Search query; several words are joined with spaces
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    #[command(flatten)]
    pub display: DisplayArgs,
}

#[derive(Debug, Args)]
pub struct KeywordsArgs {
    /// Keywords that must all be present
    #[arg(required = true, num_args = 1..)]
    pub keywords: Vec<String>,

    /// Minimum average similarity (0.0 to 1.0)
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Show similarity scores in results
    #[arg(short, long)]
    pub show_scores: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct DisplayArgs {
    /// Similarity threshold (0.0 to 1.0)
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Maximum number of results
    #[arg(short, long)]
    pub max_results: Option<usize>,

    /// Show similarity scores in results
    #[arg(short, long)]
    pub show_scores: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum DailyCommand {
    /// Register a group for daily rules
    Add {
        #[arg(allow_negative_numbers = true)]
        group: i64,
    },
    /// Draw today's rule for a group
    Pick {
        #[arg(allow_negative_numbers = true)]
        group: i64,
    },
    /// Unregister a group
    Remove {
        #[arg(allow_negative_numbers = true)]
        group: i64,
    },
    /// List registered groups and their progress
    List,
}
