//! The anchor-frame-first shot producer.

use crate::{ImageGenerator, VideoGenerator};
use async_trait::async_trait;
use reel_core::{ShotResult, shot_id};
use reel_error::{ReelResult, StorageError, StorageErrorKind};
use reel_interface::ShotProducer;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Aspect ratio used when a shot does not name one.
pub const DEFAULT_ASPECT_RATIO: &str = "16:9";

/// Produces shots as a still anchor frame plus a clip animated from it.
///
/// A shot fails only when the anchor frame cannot be made. A failed clip is
/// logged and the shot still counts as produced.
#[derive(Clone)]
pub struct VisualEngine {
    image: Arc<dyn ImageGenerator>,
    video: Arc<dyn VideoGenerator>,
    output_dir: PathBuf,
}

impl std::fmt::Debug for VisualEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisualEngine")
            .field("image", &self.image.model_name())
            .field("video", &self.video.model_name())
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

impl VisualEngine {
    /// Create an engine writing under `output_dir/shots`.
    pub fn new(
        image: Arc<dyn ImageGenerator>,
        video: Arc<dyn VideoGenerator>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            image,
            video,
            output_dir: output_dir.into(),
        }
    }

    /// Directory the media files land in.
    pub fn shots_dir(&self) -> PathBuf {
        self.output_dir.join("shots")
    }

    fn text_field<'a>(shot: &'a Value, key: &str, default: &'a str) -> &'a str {
        shot.get(key).and_then(Value::as_str).unwrap_or(default)
    }

    async fn ensure_dir(dir: &Path) -> ReelResult<()> {
        tokio::fs::create_dir_all(dir).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                dir.display(),
                e
            )))
        })?;
        Ok(())
    }
}

#[async_trait]
impl ShotProducer for VisualEngine {
    #[instrument(skip_all, fields(shot_id = %shot_id(shot)))]
    async fn generate_shot(&self, shot: &Value) -> ReelResult<ShotResult> {
        let id = shot_id(shot);
        let visual_prompt = Self::text_field(shot, "visual_prompt", "");
        let shot_type = Self::text_field(shot, "shot_type", "wide");
        let aspect_ratio = Self::text_field(shot, "aspect_ratio", DEFAULT_ASPECT_RATIO);

        let preview: String = visual_prompt.chars().take(50).collect();
        info!(prompt = %preview, "Processing shot");

        let shots_dir = self.shots_dir();
        Self::ensure_dir(&shots_dir).await?;

        let anchor_path = shots_dir.join(format!("shot_{}_anchor.png", id));
        let anchor_prompt = format!("Cinematic still, {}, {}", shot_type, visual_prompt);
        info!(model = self.image.model_name(), "Generating anchor frame");
        let anchor = match self
            .image
            .generate(&anchor_prompt, &anchor_path, aspect_ratio)
            .await
        {
            Ok(path) if tokio::fs::try_exists(&path).await.unwrap_or(false) => path,
            Ok(path) => {
                error!(path = %path.display(), "Anchor frame was not written");
                return Ok(ShotResult::failed(shot.clone()));
            }
            Err(e) => {
                error!(error = %e, "Failed to generate anchor frame");
                return Ok(ShotResult::failed(shot.clone()));
            }
        };

        let clip_path = shots_dir.join(format!("shot_{}_clip.mp4", id));
        info!(model = self.video.model_name(), "Generating motion from anchor");
        if let Err(e) = self
            .video
            .generate(&anchor, visual_prompt, &clip_path)
            .await
        {
            warn!(error = %e, "Clip generation failed, keeping anchor frame");
            return Ok(ShotResult::anchor_only(anchor, shot.clone()));
        }

        Ok(ShotResult::success(anchor, clip_path, shot.clone()))
    }
}
