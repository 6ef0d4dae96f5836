//! Knowledge retrieval with an indexed store and a keyword fallback.

use crate::seed_knowledge;
use reel_core::{KnowledgeCategory, KnowledgeItem};
use reel_interface::KnowledgeStore;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// Number of items returned when the caller does not ask for more.
pub const DEFAULT_TOP_K: usize = 3;

/// First line of a formatted context block.
pub const CONTEXT_HEADER: &str = "### Relevant Technical Context:";

/// Context text used when nothing relevant was found.
pub const NO_KNOWLEDGE: &str = "No specific technical knowledge found.";

const CONTENT_PREVIEW_CHARS: usize = 500;

/// Supplies reference snippets to agents.
///
/// Retrieval never fails: when the store is missing or errors, the seed set
/// is scored by keyword instead.
///
/// # Examples
///
/// ```
/// use reel_knowledge::KnowledgeRetriever;
/// use reel_core::KnowledgeCategory;
///
/// # #[tokio::main]
/// # async fn main() {
/// let retriever = KnowledgeRetriever::new();
/// let items = retriever
///     .retrieve("lighting drama", Some(KnowledgeCategory::Cinematography), 3)
///     .await;
/// assert_eq!(items[0].title(), "Rembrandt Lighting");
/// # }
/// ```
#[derive(Clone)]
pub struct KnowledgeRetriever {
    store: Option<Arc<dyn KnowledgeStore>>,
    seed: Vec<KnowledgeItem>,
}

impl std::fmt::Debug for KnowledgeRetriever {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KnowledgeRetriever")
            .field("store", &self.store.as_ref().map(|s| s.store_name()))
            .field("seed", &self.seed.len())
            .finish()
    }
}

impl Default for KnowledgeRetriever {
    fn default() -> Self {
        Self::new()
    }
}

impl KnowledgeRetriever {
    /// Retriever over the built-in seed set only.
    pub fn new() -> Self {
        Self {
            store: None,
            seed: seed_knowledge(),
        }
    }

    /// Ask `store` first, falling back to the seed set.
    pub fn with_store(mut self, store: Arc<dyn KnowledgeStore>) -> Self {
        info!(store = store.store_name(), "Knowledge store attached");
        self.store = Some(store);
        self
    }

    /// Replace the fallback items.
    pub fn with_seed(mut self, seed: Vec<KnowledgeItem>) -> Self {
        self.seed = seed;
        self
    }

    /// True when an indexed store is attached.
    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    /// Up to `top_k` items relevant to `query`, most relevant first.
    #[instrument(skip(self), fields(store = self.store.is_some()))]
    pub async fn retrieve(
        &self,
        query: &str,
        category: Option<KnowledgeCategory>,
        top_k: usize,
    ) -> Vec<KnowledgeItem> {
        if let Some(store) = &self.store {
            match store.query(query, top_k, category).await {
                Ok(items) => {
                    debug!(hits = items.len(), "Knowledge store answered");
                    return items;
                }
                Err(e) => error!(error = %e, "Knowledge store query failed"),
            }
        }

        info!("Falling back to in-memory keyword search");
        self.keyword_search(query, category, top_k)
    }

    /// Score the seed set against the query terms.
    ///
    /// Each term adds 3 when contained in the title, 2 when equal to a tag
    /// and 1 when contained in the content. Zero scores are dropped and ties
    /// keep seed order.
    pub fn keyword_search(
        &self,
        query: &str,
        category: Option<KnowledgeCategory>,
        top_k: usize,
    ) -> Vec<KnowledgeItem> {
        let terms: BTreeSet<String> = query.split_whitespace().map(str::to_lowercase).collect();

        let mut scored: Vec<(u32, &KnowledgeItem)> = self
            .seed
            .iter()
            .filter(|item| category.is_none_or(|c| *item.category() == c))
            .map(|item| (score(item, &terms), item))
            .filter(|(score, _)| *score > 0)
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored
            .into_iter()
            .take(top_k)
            .map(|(_, item)| item.clone())
            .collect()
    }

    /// Render items as the context block injected into agent prompts.
    ///
    /// # Examples
    ///
    /// ```
    /// use reel_knowledge::{KnowledgeRetriever, NO_KNOWLEDGE};
    ///
    /// assert_eq!(KnowledgeRetriever::format_context(&[]), NO_KNOWLEDGE);
    /// ```
    pub fn format_context(items: &[KnowledgeItem]) -> String {
        if items.is_empty() {
            return NO_KNOWLEDGE.to_string();
        }

        let mut context = format!("{}\n", CONTEXT_HEADER);
        for item in items {
            let preview: String = item.content().chars().take(CONTENT_PREVIEW_CHARS).collect();
            context.push_str(&format!(
                "- **{}** ({}): {}...\n",
                item.title(),
                item.category(),
                preview
            ));
        }
        context
    }
}

fn score(item: &KnowledgeItem, terms: &BTreeSet<String>) -> u32 {
    let title = item.title().to_lowercase();
    let content = item.content().to_lowercase();
    let tags: Vec<String> = item.tags().iter().map(|t| t.to_lowercase()).collect();

    terms
        .iter()
        .map(|term| {
            let mut points = 0;
            if title.contains(term.as_str()) {
                points += 3;
            }
            if tags.iter().any(|tag| tag == term) {
                points += 2;
            }
            if content.contains(term.as_str()) {
                points += 1;
            }
            points
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, content: &str, tags: &[&str]) -> KnowledgeItem {
        KnowledgeItem::new(
            KnowledgeCategory::General,
            title,
            "Anon",
            content,
            tags.iter().map(|t| t.to_string()).collect(),
        )
    }

    #[test]
    fn test_score_fields_accumulate() {
        let terms: BTreeSet<String> = ["noir".to_string()].into();
        let both = item("Noir", "classic noir look", &["noir"]);
        assert_eq!(score(&both, &terms), 6);

        let content_only = item("Shadows", "noir", &[]);
        assert_eq!(score(&content_only, &terms), 1);
    }

    #[test]
    fn test_tag_must_match_exactly() {
        let terms: BTreeSet<String> = ["camera".to_string()].into();
        let tagged = item("X", "y", &["camera_angle"]);
        assert_eq!(score(&tagged, &terms), 0);
    }

    #[test]
    fn test_repeated_terms_count_once() {
        let retriever = KnowledgeRetriever::new().with_seed(vec![item("Dolly", "", &[])]);
        let hits = retriever.keyword_search("dolly dolly DOLLY", None, 3);
        assert_eq!(hits.len(), 1);
        let terms: BTreeSet<String> = "dolly dolly DOLLY"
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        assert_eq!(score(&hits[0], &terms), 3);
    }
}
