//! Media provider selection.

use crate::{
    HuggingFaceImageGenerator, HuggingFaceVideoGenerator, ImageGenerator, MockImageGenerator,
    MockVideoGenerator, ReplicateImageGenerator, ReplicateVideoGenerator, VideoGenerator,
    VisualEngine,
};
use reel_error::ReelResult;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Which media backend a run uses.
///
/// # Examples
///
/// ```
/// use reel_production::MediaProvider;
///
/// let provider: MediaProvider = "huggingface".parse().unwrap();
/// assert_eq!(provider, MediaProvider::HuggingFace);
/// assert_eq!(MediaProvider::Mock.resolve(), MediaProvider::Mock);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MediaProvider {
    /// HuggingFace when `HF_TOKEN` is set, else Replicate when
    /// `REPLICATE_API_TOKEN` is set, else mock
    #[default]
    Auto,
    /// HuggingFace Inference API
    #[strum(serialize = "huggingface")]
    #[serde(rename = "huggingface")]
    HuggingFace,
    /// Replicate predictions API
    Replicate,
    /// Placeholder files
    Mock,
}

fn has_env(var: &str) -> bool {
    std::env::var(var).map(|v| !v.trim().is_empty()).unwrap_or(false)
}

impl MediaProvider {
    /// Turn `Auto` into a concrete provider based on available tokens.
    pub fn resolve(self) -> Self {
        match self {
            MediaProvider::Auto if has_env("HF_TOKEN") => MediaProvider::HuggingFace,
            MediaProvider::Auto if has_env("REPLICATE_API_TOKEN") => MediaProvider::Replicate,
            MediaProvider::Auto => {
                warn!("No media tokens found, using mock media provider");
                MediaProvider::Mock
            }
            other => other,
        }
    }

    /// Build the engine for this provider writing under `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns error if the provider's token is not set.
    pub fn build_engine(&self, output_dir: impl Into<PathBuf>) -> ReelResult<VisualEngine> {
        let provider = self.resolve();
        let (image, video): (Arc<dyn ImageGenerator>, Arc<dyn VideoGenerator>) = match provider {
            MediaProvider::HuggingFace => (
                Arc::new(HuggingFaceImageGenerator::from_env(None)?),
                Arc::new(HuggingFaceVideoGenerator::from_env(None)?),
            ),
            MediaProvider::Replicate => (
                Arc::new(ReplicateImageGenerator::from_env(None)?),
                Arc::new(ReplicateVideoGenerator::from_env(None)?),
            ),
            MediaProvider::Mock | MediaProvider::Auto => {
                (Arc::new(MockImageGenerator), Arc::new(MockVideoGenerator))
            }
        };
        info!(
            provider = %provider,
            image = image.model_name(),
            video = video.model_name(),
            "Selected media provider"
        );
        Ok(VisualEngine::new(image, video, output_dir))
    }
}
