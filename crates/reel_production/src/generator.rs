//! Media generation traits.

use async_trait::async_trait;
use reel_error::{ProductionError, ProductionErrorKind, ReelResult};
use std::path::{Path, PathBuf};

/// Produces a still image from a text prompt.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Render `prompt` at `aspect_ratio` (e.g. `16:9`) into `output_path`.
    ///
    /// Returns the path of the written file.
    async fn generate(
        &self,
        prompt: &str,
        output_path: &Path,
        aspect_ratio: &str,
    ) -> ReelResult<PathBuf>;

    /// Model identifier, for logs.
    fn model_name(&self) -> &str;
}

/// Produces a clip, optionally animated from an anchor image.
#[async_trait]
pub trait VideoGenerator: Send + Sync {
    /// Render a clip for `prompt` from the still at `image_path` into
    /// `output_path`. Text-to-video backends ignore the image.
    ///
    /// Returns the path of the written file.
    async fn generate(
        &self,
        image_path: &Path,
        prompt: &str,
        output_path: &Path,
    ) -> ReelResult<PathBuf>;

    /// Model identifier, for logs.
    fn model_name(&self) -> &str;
}

/// Read a provider token from the environment.
pub(crate) fn token_from_env(var: &str) -> ReelResult<String> {
    std::env::var(var)
        .ok()
        .filter(|token| !token.trim().is_empty())
        .ok_or_else(|| {
            ProductionError::new(ProductionErrorKind::MissingCredentials(var.to_string())).into()
        })
}

/// Write media bytes, creating the parent directory first.
pub(crate) async fn write_media(output_path: &Path, bytes: &[u8]) -> ReelResult<PathBuf> {
    if let Some(parent) = output_path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            ProductionError::new(ProductionErrorKind::FileWrite(format!(
                "{}: {}",
                parent.display(),
                e
            )))
        })?;
    }
    tokio::fs::write(output_path, bytes).await.map_err(|e| {
        ProductionError::new(ProductionErrorKind::FileWrite(format!(
            "{}: {}",
            output_path.display(),
            e
        )))
    })?;
    tracing::info!(path = %output_path.display(), bytes = bytes.len(), "Media saved");
    Ok(output_path.to_path_buf())
}
