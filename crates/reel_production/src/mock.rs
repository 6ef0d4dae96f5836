//! Offline generators that write placeholder files.

use crate::generator::write_media;
use crate::{ImageGenerator, VideoGenerator};
use async_trait::async_trait;
use reel_error::ReelResult;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes a text placeholder instead of an image.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockImageGenerator;

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate(
        &self,
        prompt: &str,
        output_path: &Path,
        aspect_ratio: &str,
    ) -> ReelResult<PathBuf> {
        info!(path = %output_path.display(), "Writing placeholder anchor frame");
        let body = format!("placeholder still ({})\n{}\n", aspect_ratio, prompt);
        write_media(output_path, body.as_bytes()).await
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

/// Writes a text placeholder instead of a clip.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockVideoGenerator;

#[async_trait]
impl VideoGenerator for MockVideoGenerator {
    async fn generate(
        &self,
        image_path: &Path,
        prompt: &str,
        output_path: &Path,
    ) -> ReelResult<PathBuf> {
        info!(path = %output_path.display(), "Writing placeholder clip");
        let body = format!(
            "placeholder clip from {}\n{}\n",
            image_path.display(),
            prompt
        );
        write_media(output_path, body.as_bytes()).await
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
