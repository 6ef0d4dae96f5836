//! Loading reference texts into an indexed knowledge store.
//!
//! Documents are split into overlapping character windows, tagged with a
//! category guessed from the file name, and upserted in batches.

use async_trait::async_trait;
use reel_core::KnowledgeCategory;
use reel_error::{KnowledgeError, KnowledgeErrorKind, ReelResult};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument, warn};

/// Characters per chunk.
pub const CHUNK_SIZE: usize = 1000;

/// Characters shared by consecutive chunks.
pub const CHUNK_OVERLAP: usize = 200;

/// Chunks shorter than this are dropped.
pub const MIN_CHUNK_CHARS: usize = 50;

/// Chunks sent per upsert request.
pub const UPSERT_BATCH_SIZE: usize = 100;

/// File extensions picked up from an ingestion directory.
pub const INGEST_EXTENSIONS: &[&str] = &["txt", "md"];

/// One window of a source document, ready to index.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct DocumentChunk {
    /// Store id, `{source}_{offset}`
    id: String,
    /// File name of the source document
    source: String,
    /// Category guessed from the file name
    category: KnowledgeCategory,
    /// Character offset of the chunk in its document
    offset: usize,
    /// Chunk text
    text: String,
}

impl DocumentChunk {
    /// Metadata stored next to the chunk; `source` and `category` are what
    /// the query side reads back.
    pub fn metadata(&self) -> Value {
        json!({
            "source": self.source,
            "category": self.category.to_string(),
            "chunk_id": self.offset,
        })
    }
}

/// Guess a category from keywords in a file name.
///
/// # Examples
///
/// ```
/// use reel_core::KnowledgeCategory;
/// use reel_knowledge::category_for_source;
///
/// assert_eq!(category_for_source("Painting_With_Light.txt"), KnowledgeCategory::Cinematography);
/// assert_eq!(category_for_source("story.md"), KnowledgeCategory::Screenwriting);
/// assert_eq!(category_for_source("notes.txt"), KnowledgeCategory::General);
/// ```
pub fn category_for_source(file_name: &str) -> KnowledgeCategory {
    let name = file_name.to_lowercase();
    let has = |keys: &[&str]| keys.iter().any(|k| name.contains(k));
    if has(&["cinematography", "light", "camera"]) {
        KnowledgeCategory::Cinematography
    } else if has(&["screen", "story", "hero"]) {
        KnowledgeCategory::Screenwriting
    } else {
        KnowledgeCategory::General
    }
}

/// Split `text` into [`CHUNK_SIZE`] windows advancing by
/// `CHUNK_SIZE - CHUNK_OVERLAP` characters, skipping windows shorter than
/// [`MIN_CHUNK_CHARS`].
pub fn chunk_document(source: &str, text: &str) -> Vec<DocumentChunk> {
    let chars: Vec<char> = text.chars().collect();
    let category = category_for_source(source);
    let step = CHUNK_SIZE - CHUNK_OVERLAP;

    (0..chars.len())
        .step_by(step)
        .filter_map(|offset| {
            let end = (offset + CHUNK_SIZE).min(chars.len());
            let window = &chars[offset..end];
            if window.len() < MIN_CHUNK_CHARS {
                return None;
            }
            Some(DocumentChunk {
                id: format!("{}_{}", source, offset),
                source: source.to_string(),
                category,
                offset,
                text: window.iter().collect(),
            })
        })
        .collect()
}

/// Destination for indexed chunks.
#[async_trait]
pub trait ChunkSink: Send + Sync {
    /// Insert or replace `chunks` by id.
    async fn upsert(&self, chunks: &[DocumentChunk]) -> ReelResult<()>;
}

/// What an ingestion run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, derive_getters::Getters)]
pub struct IngestReport {
    /// Documents whose chunks were all stored
    files_ingested: usize,
    /// Documents that could not be read or stored
    files_failed: usize,
    /// Chunks stored
    chunks_stored: usize,
}

fn ingest_error(path: &Path, reason: impl ToString) -> KnowledgeError {
    KnowledgeError::new(KnowledgeErrorKind::Ingest {
        path: path.display().to_string(),
        reason: reason.to_string(),
    })
}

/// Text files in `dir` with an [`INGEST_EXTENSIONS`] extension, in name order.
///
/// # Errors
///
/// Returns error if the directory cannot be listed.
pub async fn ingestible_files(dir: &Path) -> ReelResult<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| ingest_error(dir, e))?;

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|e| ingest_error(dir, e))? {
        let path = entry.path();
        let wanted = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| INGEST_EXTENSIONS.contains(&ext.to_lowercase().as_str()));
        let is_file = entry
            .file_type()
            .await
            .map(|t| t.is_file())
            .unwrap_or(false);
        if wanted && is_file {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Chunk every text file in `dir` and upsert the chunks into `sink`.
///
/// A file that cannot be read or stored is logged and counted as failed;
/// the remaining files are still ingested.
///
/// # Errors
///
/// Returns error if the directory cannot be listed.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub async fn ingest_directory(sink: &dyn ChunkSink, dir: &Path) -> ReelResult<IngestReport> {
    let files = ingestible_files(dir).await?;
    if files.is_empty() {
        warn!("No text documents found to ingest");
    } else {
        info!(files = files.len(), "Found documents to ingest");
    }

    let mut report = IngestReport::default();
    for path in files {
        match ingest_file(sink, &path).await {
            Ok(stored) => {
                report.files_ingested += 1;
                report.chunks_stored += stored;
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to ingest document");
                report.files_failed += 1;
            }
        }
    }

    info!(
        files = report.files_ingested,
        failed = report.files_failed,
        chunks = report.chunks_stored,
        "Ingestion complete"
    );
    Ok(report)
}

async fn ingest_file(sink: &dyn ChunkSink, path: &Path) -> ReelResult<usize> {
    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ingest_error(path, e))?;

    let chunks = chunk_document(&source, &text);
    info!(source = %source, chunks = chunks.len(), category = %category_for_source(&source), "Processing document");

    for batch in chunks.chunks(UPSERT_BATCH_SIZE) {
        sink.upsert(batch).await?;
    }
    Ok(chunks.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_boundaries_overlap() {
        let text: String = (0..2000).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let chunks = chunk_document("notes.txt", &text);

        // Windows start at 0, 800 and 1600; the last runs to the end.
        let offsets: Vec<usize> = chunks.iter().map(|c| *c.offset()).collect();
        assert_eq!(offsets, vec![0, 800, 1600]);
        assert_eq!(chunks[0].text().chars().count(), CHUNK_SIZE);
        assert_eq!(chunks[2].text().chars().count(), 400);

        let tail: String = chunks[0].text().chars().skip(800).collect();
        let head: String = chunks[1].text().chars().take(CHUNK_OVERLAP).collect();
        assert_eq!(tail, head);
        assert_eq!(chunks[1].id(), "notes.txt_800");
    }

    #[test]
    fn test_tiny_trailing_chunk_is_skipped() {
        // 1640 chars: windows at 0 and 800 are long, the one at 1600 has 40.
        let text = "x".repeat(1640);
        let chunks = chunk_document("notes.txt", &text);
        assert_eq!(chunks.len(), 2);

        assert!(chunk_document("notes.txt", &"y".repeat(49)).is_empty());
        assert_eq!(chunk_document("notes.txt", &"y".repeat(50)).len(), 1);
    }

    #[test]
    fn test_offsets_count_characters() {
        let text = "é".repeat(900);
        let chunks = chunk_document("notes.txt", &text);
        assert_eq!(*chunks[1].offset(), 800);
        assert_eq!(chunks[1].text().chars().count(), 100);
    }

    #[test]
    fn test_category_heuristic() {
        assert_eq!(category_for_source("Cinematography_Theory.txt"), KnowledgeCategory::Cinematography);
        assert_eq!(category_for_source("camera_moves.md"), KnowledgeCategory::Cinematography);
        assert_eq!(category_for_source("Save_The_Cat_Screenwriting.txt"), KnowledgeCategory::Screenwriting);
        assert_eq!(category_for_source("heroes.txt"), KnowledgeCategory::Screenwriting);
        // Cinematography keywords win over screenwriting ones.
        assert_eq!(category_for_source("lighting_the_story.txt"), KnowledgeCategory::Cinematography);
        assert_eq!(category_for_source("cooking.txt"), KnowledgeCategory::General);
    }

    #[test]
    fn test_metadata_layout() {
        let chunk = &chunk_document("story.txt", &"z".repeat(60))[0];
        assert_eq!(
            chunk.metadata(),
            json!({"source": "story.txt", "category": "Screenwriting", "chunk_id": 0})
        );
    }
}
