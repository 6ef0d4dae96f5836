//! Wiring configured backends into an orchestrator.

use crate::StudioConfig;
use reel_error::{ConfigError, ReelResult};
use reel_knowledge::{ChromaStore, IngestReport, KnowledgeRetriever, ingest_directory};
use reel_orchestrator::Orchestrator;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Build the knowledge retriever for `config`.
///
/// A Chroma server that cannot be reached is not an error; the retriever
/// falls back to the seed knowledge.
#[instrument(skip_all)]
pub async fn build_retriever(config: &StudioConfig) -> KnowledgeRetriever {
    let knowledge = config.knowledge();
    let Some(url) = knowledge.chroma_url() else {
        info!("No knowledge store configured, using seed knowledge");
        return KnowledgeRetriever::new();
    };

    match ChromaStore::connect(url, knowledge.collection()).await {
        Ok(store) => {
            info!(url = %url, collection = %knowledge.collection(), "Connected to knowledge store");
            KnowledgeRetriever::new().with_store(Arc::new(store))
        }
        Err(e) => {
            warn!(url = %url, error = %e, "Knowledge store unavailable, using seed knowledge");
            KnowledgeRetriever::new()
        }
    }
}

/// Build an orchestrator from `config`.
///
/// A text provider without its API key degrades to the mock driver, as does
/// media provider `auto` when no media token is set.
///
/// # Errors
///
/// Returns error if an explicitly selected media provider has no token.
#[instrument(skip_all)]
pub async fn build_orchestrator(config: &StudioConfig) -> ReelResult<Orchestrator> {
    let llm = config.llm();
    let driver = llm
        .provider()
        .resolve()
        .build_driver(llm.model().as_deref())?;

    let retriever = Arc::new(build_retriever(config).await);

    let output_dir = config.studio().output_dir();
    let engine = config.media().provider().build_engine(output_dir.clone())?;

    info!(
        provider = driver.provider_name(),
        model = driver.model_name(),
        output_dir = %output_dir.display(),
        "Studio assembled"
    );
    Ok(Orchestrator::new(
        driver,
        retriever,
        Arc::new(engine),
        output_dir.clone(),
    ))
}

/// Fill the configured knowledge store from the text documents in `dir`.
///
/// The collection is created when the server does not have it yet.
///
/// # Errors
///
/// Returns error if no Chroma url is configured, the server cannot be
/// reached, or `dir` cannot be listed.
#[instrument(skip(config))]
pub async fn ingest_documents(config: &StudioConfig, dir: &Path) -> ReelResult<IngestReport> {
    let knowledge = config.knowledge();
    let Some(url) = knowledge.chroma_url() else {
        return Err(ConfigError::new(
            "knowledge.chroma_url must be set to ingest documents",
        )
        .into());
    };

    let store = ChromaStore::get_or_create(url, knowledge.collection()).await?;
    ingest_directory(&store, dir).await
}
