//! Knowledge store backed by a Chroma server.

use async_trait::async_trait;
use reel_core::{KnowledgeCategory, KnowledgeItem};
use reel_error::{KnowledgeError, KnowledgeErrorKind, ReelResult};
use crate::{ChunkSink, DocumentChunk};
use reel_interface::KnowledgeStore;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use tracing::{debug, info, instrument};

/// Chroma's HTTP API root below the server URL.
const API_PREFIX: &str = "/api/v1";

/// Collection `reel knowledge ingest` fills and the retriever queries.
pub const DEFAULT_COLLECTION: &str = "reel_knowledge";

/// Author recorded for items that come from indexed documents.
const INDEXED_AUTHOR: &str = "Inferred from source";

/// Title used when a document carries no `source` metadata.
const UNTITLED_EXCERPT: &str = "Book Excerpt";

#[derive(Debug, Deserialize)]
struct CollectionInfo {
    id: String,
}

/// Chroma returns one inner list per query text.
#[derive(Debug, Default, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    documents: Vec<Vec<Option<String>>>,
    #[serde(default)]
    metadatas: Vec<Vec<Option<Map<String, Value>>>>,
}

/// A [`KnowledgeStore`] speaking the Chroma HTTP API.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct ChromaStore {
    #[getter(skip)]
    client: Client,
    /// Server base URL
    base_url: String,
    /// Collection name
    collection: String,
    /// Server-side collection id
    collection_id: String,
}

impl ChromaStore {
    /// Look up `collection` on the server at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the server is unreachable or the collection does not
    /// exist.
    #[instrument(skip_all, fields(base_url = %base_url, collection = %collection))]
    pub async fn connect(base_url: &str, collection: &str) -> ReelResult<Self> {
        let client = Client::new();
        let base_url = base_url.trim_end_matches('/').to_string();
        let url = format!("{}{}/collections/{}", base_url, API_PREFIX, collection);

        let response = client.get(&url).send().await.map_err(|e| {
            KnowledgeError::new(KnowledgeErrorKind::Unavailable(e.to_string()))
        })?;

        if !response.status().is_success() {
            return Err(KnowledgeError::new(KnowledgeErrorKind::CollectionNotFound(
                collection.to_string(),
            ))
            .into());
        }

        Self::from_collection_response(client, base_url, collection, response).await
    }

    /// Look up `collection`, creating it when the server does not have it.
    ///
    /// # Errors
    ///
    /// Returns error if the server is unreachable or refuses to create the
    /// collection.
    #[instrument(skip_all, fields(base_url = %base_url, collection = %collection))]
    pub async fn get_or_create(base_url: &str, collection: &str) -> ReelResult<Self> {
        let client = Client::new();
        let base_url = base_url.trim_end_matches('/').to_string();
        let url = format!("{}{}/collections", base_url, API_PREFIX);

        let response = client
            .post(&url)
            .json(&json!({"name": collection, "get_or_create": true}))
            .send()
            .await
            .map_err(|e| KnowledgeError::new(KnowledgeErrorKind::Unavailable(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(KnowledgeError::new(KnowledgeErrorKind::UpsertFailed {
                status: status.as_u16(),
                message,
            })
            .into());
        }

        Self::from_collection_response(client, base_url, collection, response).await
    }

    async fn from_collection_response(
        client: Client,
        base_url: String,
        collection: &str,
        response: reqwest::Response,
    ) -> ReelResult<Self> {
        let info: CollectionInfo = response.json().await.map_err(|e| {
            KnowledgeError::new(KnowledgeErrorKind::InvalidResponse(e.to_string()))
        })?;

        info!(collection_id = %info.id, "Connected to knowledge store");

        Ok(Self {
            client,
            base_url,
            collection: collection.to_string(),
            collection_id: info.id,
        })
    }

    fn collection_url(&self, action: &str) -> String {
        format!(
            "{}{}/collections/{}/{}",
            self.base_url, API_PREFIX, self.collection_id, action
        )
    }
}

/// Request body for a Chroma upsert.
fn upsert_body(chunks: &[DocumentChunk]) -> Value {
    json!({
        "ids": chunks.iter().map(|c| c.id().as_str()).collect::<Vec<_>>(),
        "documents": chunks.iter().map(|c| c.text().as_str()).collect::<Vec<_>>(),
        "metadatas": chunks.iter().map(DocumentChunk::metadata).collect::<Vec<_>>(),
    })
}

#[async_trait]
impl ChunkSink for ChromaStore {
    #[instrument(skip_all, fields(collection = %self.collection, chunks = chunks.len()))]
    async fn upsert(&self, chunks: &[DocumentChunk]) -> ReelResult<()> {
        if chunks.is_empty() {
            return Ok(());
        }

        let response = self
            .client
            .post(self.collection_url("upsert"))
            .json(&upsert_body(chunks))
            .send()
            .await
            .map_err(|e| KnowledgeError::new(KnowledgeErrorKind::Unavailable(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(KnowledgeError::new(KnowledgeErrorKind::UpsertFailed {
                status: status.as_u16(),
                message,
            })
            .into());
        }

        debug!("Upserted chunk batch");
        Ok(())
    }
}

#[async_trait]
impl KnowledgeStore for ChromaStore {
    #[instrument(skip(self), fields(collection = %self.collection))]
    async fn query(
        &self,
        text: &str,
        n_results: usize,
        category: Option<KnowledgeCategory>,
    ) -> ReelResult<Vec<KnowledgeItem>> {
        let url = self.collection_url("query");

        let mut body = json!({
            "query_texts": [text],
            "n_results": n_results,
        });
        if let Some(category) = category {
            body["where"] = json!({"category": category.to_string()});
        }

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| KnowledgeError::new(KnowledgeErrorKind::Unavailable(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(KnowledgeError::new(KnowledgeErrorKind::QueryFailed {
                status: status.as_u16(),
                message,
            })
            .into());
        }

        let parsed: QueryResponse = response.json().await.map_err(|e| {
            KnowledgeError::new(KnowledgeErrorKind::InvalidResponse(e.to_string()))
        })?;

        let items = items_from_response(parsed);
        debug!(hits = items.len(), "Chroma query complete");
        Ok(items)
    }

    fn store_name(&self) -> &'static str {
        "chroma"
    }
}

fn items_from_response(response: QueryResponse) -> Vec<KnowledgeItem> {
    let documents = response.documents.into_iter().next().unwrap_or_default();
    let metadatas = response.metadatas.into_iter().next().unwrap_or_default();

    documents
        .into_iter()
        .enumerate()
        .filter_map(|(i, doc)| {
            let doc = doc?;
            let meta = metadatas.get(i).cloned().flatten().unwrap_or_default();
            let text = |key: &str| meta.get(key).and_then(Value::as_str).map(str::to_string);
            let category = text("category")
                .map(|c| KnowledgeCategory::from_label(&c))
                .unwrap_or_default();
            let title = text("source").unwrap_or_else(|| UNTITLED_EXCERPT.to_string());
            Some(KnowledgeItem::new(
                category,
                title,
                INDEXED_AUTHOR,
                doc,
                Vec::new(),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_from_response_maps_metadata() {
        let raw = json!({
            "documents": [["Low key lighting builds dread.", "Act two midpoint."]],
            "metadatas": [[
                {"source": "painting_with_light.pdf", "category": "Cinematography"},
                {"category": "Poetry"}
            ]]
        });
        let response: QueryResponse = serde_json::from_value(raw).unwrap();
        let items = items_from_response(response);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title(), "painting_with_light.pdf");
        assert_eq!(*items[0].category(), KnowledgeCategory::Cinematography);
        assert_eq!(items[0].author(), INDEXED_AUTHOR);
        assert!(items[0].tags().is_empty());
        assert_eq!(items[1].title(), UNTITLED_EXCERPT);
        assert_eq!(*items[1].category(), KnowledgeCategory::General);
    }

    #[test]
    fn test_upsert_body_columns_line_up() {
        let chunks = crate::chunk_document("camera_work.txt", &"c".repeat(1200));
        let body = upsert_body(&chunks);

        assert_eq!(body["ids"], json!(["camera_work.txt_0", "camera_work.txt_800"]));
        assert_eq!(body["documents"].as_array().unwrap().len(), 2);
        assert_eq!(body["metadatas"][1]["chunk_id"], 800);
        assert_eq!(body["metadatas"][1]["category"], "Cinematography");
        assert_eq!(body["metadatas"][1]["source"], "camera_work.txt");
    }

    #[test]
    fn test_empty_response_yields_no_items() {
        assert!(items_from_response(QueryResponse::default()).is_empty());
    }
}
