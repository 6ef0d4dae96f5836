//! Knowledge base command handlers.

use super::OutputFormat;
use reel::{
    KnowledgeCategory, KnowledgeRetriever, ReelResult, StudioConfig, build_retriever,
    ingest_documents,
};
use std::path::Path;

/// Print what the agents would retrieve for `query`.
pub async fn query_knowledge(
    config: &StudioConfig,
    query: &str,
    category: Option<KnowledgeCategory>,
    top_k: usize,
    format: OutputFormat,
) -> ReelResult<()> {
    let retriever = build_retriever(config).await;
    let items = retriever.retrieve(query, category, top_k).await;

    match format {
        OutputFormat::Json => {
            let text = serde_json::to_string_pretty(&items)
                .map_err(|e| reel::JsonError::new(e.to_string()))?;
            println!("{}", text);
        }
        OutputFormat::Human => {
            println!("{}", KnowledgeRetriever::format_context(&items));
        }
    }

    Ok(())
}

/// Chunk the documents in `dir` into the configured knowledge store.
pub async fn ingest_knowledge(config: &StudioConfig, dir: &Path) -> ReelResult<()> {
    let report = ingest_documents(config, dir).await?;

    println!("Ingested {} document(s)", report.files_ingested());
    println!("  Chunks stored: {}", report.chunks_stored());
    if *report.files_failed() > 0 {
        eprintln!("  Failed: {} (see log)", report.files_failed());
    }
    Ok(())
}
