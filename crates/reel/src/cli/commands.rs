//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use reel::KnowledgeCategory;
use std::path::PathBuf;

/// Reel - concept to screenplay to shot list, reviewed by a critic and handed to production
#[derive(Parser, Debug)]
#[command(name = "reel")]
#[command(about = "Concept to screenplay to shot list, reviewed by a critic and handed to production", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file layered over the defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline for a concept
    Produce {
        /// One-line concept for the piece
        concept: String,

        /// Stop production after this many shots
        #[arg(long)]
        max_shots: Option<usize>,

        /// Directory for artifacts (overrides [studio] output_dir)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Query or fill the knowledge base the agents draw on
    #[command(subcommand)]
    Knowledge(KnowledgeCommands),
}

/// Knowledge base subcommands
#[derive(Subcommand, Debug)]
pub enum KnowledgeCommands {
    /// Print the context the agents would receive for a query
    Query {
        /// Free-text query
        query: String,

        /// Restrict to one category (screenwriting, cinematography, general)
        #[arg(long)]
        category: Option<KnowledgeCategory>,

        /// Maximum number of items
        #[arg(long, default_value = "3")]
        top_k: usize,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Chunk the text documents in a directory into the configured store
    Ingest {
        /// Directory of .txt / .md documents
        dir: PathBuf,
    },
}

/// Output format for command results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Human,
    /// JSON
    Json,
}
