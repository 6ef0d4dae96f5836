//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the reel binary.

mod commands;
mod knowledge;
mod produce;

pub use commands::{Cli, Commands, KnowledgeCommands, OutputFormat};
pub use knowledge::{ingest_knowledge, query_knowledge};
pub use produce::produce;
