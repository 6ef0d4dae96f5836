//! Reference knowledge items supplied to agents.

use serde::{Deserialize, Serialize};

/// Topic a knowledge item belongs to.
///
/// # Examples
///
/// ```
/// use reel_core::KnowledgeCategory;
/// use std::str::FromStr;
///
/// let category = KnowledgeCategory::from_str("cinematography").unwrap();
/// assert_eq!(category, KnowledgeCategory::Cinematography);
/// assert_eq!(category.to_string(), "Cinematography");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum KnowledgeCategory {
    /// Story structure and character craft
    Screenwriting,
    /// Lighting, camera and color craft
    Cinematography,
    /// Anything else
    #[default]
    General,
}

impl KnowledgeCategory {
    /// Parse a category label, mapping unknown labels to `General`.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }
}

/// A reference snippet from a craft book or technique sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct KnowledgeItem {
    /// Topic of the snippet
    category: KnowledgeCategory,
    /// Title of the technique or source
    title: String,
    /// Author or origin
    author: String,
    /// Body text
    content: String,
    /// Lowercase keywords
    tags: Vec<String>,
}

impl KnowledgeItem {
    /// Create a knowledge item.
    pub fn new(
        category: KnowledgeCategory,
        title: impl Into<String>,
        author: impl Into<String>,
        content: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            category,
            title: title.into(),
            author: author.into(),
            content: content.into(),
            tags,
        }
    }
}
