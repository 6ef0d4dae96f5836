//! Craft knowledge retrieval for Reel agents.
//!
//! The [`KnowledgeRetriever`] answers topical queries with short reference
//! snippets. It asks an indexed [`KnowledgeStore`](reel_interface::KnowledgeStore)
//! first and falls back to keyword scoring over a small built-in seed set,
//! so it always has an answer.
//!
//! [`ingest_directory`] fills the indexed store from a directory of text
//! documents.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chroma;
mod ingest;
mod retriever;
mod seed;

pub use chroma::{ChromaStore, DEFAULT_COLLECTION};
pub use ingest::{
    CHUNK_OVERLAP, CHUNK_SIZE, ChunkSink, DocumentChunk, INGEST_EXTENSIONS, IngestReport,
    MIN_CHUNK_CHARS, UPSERT_BATCH_SIZE, category_for_source, chunk_document, ingest_directory,
    ingestible_files,
};
pub use retriever::{CONTEXT_HEADER, DEFAULT_TOP_K, KnowledgeRetriever, NO_KNOWLEDGE};
pub use seed::seed_knowledge;
