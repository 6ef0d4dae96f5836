//! Tests for assembling a studio from configuration.

use reel::{
    KnowledgeCategory, PROJECT_STATE_FILE, ReelErrorKind, SCREENPLAY_FILE, SHOTLIST_FILE,
    StudioConfig, build_orchestrator, build_retriever, ingest_documents,
};
use tempfile::TempDir;

fn mock_config(output_dir: &std::path::Path) -> StudioConfig {
    StudioConfig::from_toml_str(
        "[llm]\nprovider = \"mock\"\n\n[media]\nprovider = \"mock\"\n",
    )
    .unwrap()
    .with_output_dir(output_dir)
}

#[tokio::test]
async fn test_mock_studio_runs_end_to_end() {
    let dir = TempDir::new().unwrap();
    let studio = build_orchestrator(&mock_config(dir.path())).await.unwrap();
    assert_eq!(studio.output_dir(), dir.path());

    let outcome = studio.run_pipeline("A detective in a neon city", Some(1)).await;

    assert!(outcome.is_success());
    assert_eq!(outcome.title(), "Neon Static");
    assert!(*outcome.approved());
    assert_eq!(outcome.produced().len(), 1);
    for file in [SCREENPLAY_FILE, SHOTLIST_FILE, PROJECT_STATE_FILE] {
        assert!(dir.path().join(file).exists(), "missing {}", file);
    }
}

#[tokio::test]
async fn test_unreachable_chroma_falls_back_to_seed() {
    let config = StudioConfig::from_toml_str(
        "[knowledge]\nchroma_url = \"http://127.0.0.1:9\"\ncollection = \"missing\"\n",
    )
    .unwrap();

    let retriever = build_retriever(&config).await;
    assert!(!retriever.has_store());

    let items = retriever
        .retrieve("hero", Some(KnowledgeCategory::Screenwriting), 3)
        .await;
    assert!(!items.is_empty());
}

#[tokio::test]
async fn test_no_chroma_url_uses_seed_only() {
    let retriever = build_retriever(&StudioConfig::default()).await;
    assert!(!retriever.has_store());
}

#[tokio::test]
async fn test_ingest_requires_chroma_url() {
    let dir = TempDir::new().unwrap();
    let err = ingest_documents(&StudioConfig::default(), dir.path())
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), ReelErrorKind::Config(_)));
}

#[tokio::test]
async fn test_ingest_unreachable_chroma_is_error() {
    let dir = TempDir::new().unwrap();
    let config = StudioConfig::from_toml_str(
        "[knowledge]\nchroma_url = \"http://127.0.0.1:9\"\n",
    )
    .unwrap();

    let err = ingest_documents(&config, dir.path()).await.unwrap_err();
    assert!(matches!(err.kind(), ReelErrorKind::Knowledge(_)));
}
