//! Reel CLI binary.
//!
//! This binary provides command-line access to Reel's functionality:
//! - Run the full concept-to-production pipeline
//! - Query the knowledge base the agents draw on, or fill it from text files

use clap::Parser;
use reel::StudioConfig;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, KnowledgeCommands, ingest_knowledge, produce, query_knowledge};

    // Credentials may live in a .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = StudioConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Produce {
            concept,
            max_shots,
            output_dir,
            format,
        } => {
            produce(config, &concept, max_shots, output_dir, format).await?;
        }

        Commands::Knowledge(KnowledgeCommands::Query {
            query,
            category,
            top_k,
            format,
        }) => {
            query_knowledge(&config, &query, category, top_k, format).await?;
        }

        Commands::Knowledge(KnowledgeCommands::Ingest { dir }) => {
            ingest_knowledge(&config, &dir).await?;
        }
    }

    Ok(())
}
