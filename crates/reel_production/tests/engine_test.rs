use async_trait::async_trait;
use reel_core::ShotStatus;
use reel_error::{ProductionError, ProductionErrorKind, ReelResult};
use reel_interface::ShotProducer;
use reel_production::{
    ImageGenerator, MediaProvider, MockImageGenerator, MockVideoGenerator, VideoGenerator,
    VisualEngine,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Records the prompt and aspect ratio of every call.
#[derive(Default)]
struct RecordingImage {
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

#[async_trait]
impl ImageGenerator for RecordingImage {
    async fn generate(
        &self,
        prompt: &str,
        output_path: &Path,
        aspect_ratio: &str,
    ) -> ReelResult<PathBuf> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), aspect_ratio.to_string()));
        MockImageGenerator
            .generate(prompt, output_path, aspect_ratio)
            .await
    }

    fn model_name(&self) -> &str {
        "recording"
    }
}

struct FailingImage;

#[async_trait]
impl ImageGenerator for FailingImage {
    async fn generate(&self, _: &str, _: &Path, _: &str) -> ReelResult<PathBuf> {
        Err(ProductionError::new(ProductionErrorKind::Api {
            status: 503,
            message: "model loading".into(),
        })
        .into())
    }

    fn model_name(&self) -> &str {
        "failing"
    }
}

/// Claims success without writing anything.
struct PhantomImage;

#[async_trait]
impl ImageGenerator for PhantomImage {
    async fn generate(&self, _: &str, output_path: &Path, _: &str) -> ReelResult<PathBuf> {
        Ok(output_path.to_path_buf())
    }

    fn model_name(&self) -> &str {
        "phantom"
    }
}

struct FailingVideo;

#[async_trait]
impl VideoGenerator for FailingVideo {
    async fn generate(&self, _: &Path, _: &str, _: &Path) -> ReelResult<PathBuf> {
        Err(ProductionError::new(ProductionErrorKind::MissingOutput("clip".into())).into())
    }

    fn model_name(&self) -> &str {
        "failing"
    }
}

#[tokio::test]
async fn test_anchor_first_protocol() {
    let dir = TempDir::new().unwrap();
    let image = RecordingImage::default();
    let calls = image.calls.clone();
    let engine = VisualEngine::new(Arc::new(image), Arc::new(MockVideoGenerator), dir.path());

    let shot = json!({
        "shot_id": 1,
        "shot_type": "close_up",
        "visual_prompt": "img_ch_cole lights a cigarette"
    });
    let result = engine.generate_shot(&shot).await.unwrap();

    assert_eq!(*result.status(), ShotStatus::Success);
    let anchor = result.anchor_frame().clone().unwrap();
    let clip = result.video_clip().clone().unwrap();
    assert_eq!(anchor, dir.path().join("shots").join("shot_1_anchor.png"));
    assert_eq!(clip, dir.path().join("shots").join("shot_1_clip.mp4"));
    assert!(anchor.exists());
    assert!(clip.exists());
    assert_eq!(result.shot_metadata(), &shot);

    let calls = calls.lock().unwrap();
    assert_eq!(
        calls[0],
        (
            "Cinematic still, close_up, img_ch_cole lights a cigarette".to_string(),
            "16:9".to_string()
        )
    );
}

#[tokio::test]
async fn test_shot_aspect_ratio_is_passed_through() {
    let dir = TempDir::new().unwrap();
    let image = RecordingImage::default();
    let calls = image.calls.clone();
    let engine = VisualEngine::new(Arc::new(image), Arc::new(MockVideoGenerator), dir.path());

    engine
        .generate_shot(&json!({"shot_id": "2B", "aspect_ratio": "2.39:1"}))
        .await
        .unwrap();

    let calls = calls.lock().unwrap();
    assert_eq!(calls[0].0, "Cinematic still, wide, ");
    assert_eq!(calls[0].1, "2.39:1");
}

#[tokio::test]
async fn test_anchor_failure_fails_shot() {
    let dir = TempDir::new().unwrap();
    let engine = VisualEngine::new(Arc::new(FailingImage), Arc::new(MockVideoGenerator), dir.path());

    let result = engine.generate_shot(&json!({"shot_id": 3})).await.unwrap();
    assert!(!result.is_success());
    assert!(result.anchor_frame().is_none());
}

#[tokio::test]
async fn test_missing_anchor_file_fails_shot() {
    let dir = TempDir::new().unwrap();
    let engine = VisualEngine::new(Arc::new(PhantomImage), Arc::new(MockVideoGenerator), dir.path());

    let result = engine.generate_shot(&json!({"shot_id": 4})).await.unwrap();
    assert_eq!(*result.status(), ShotStatus::Failed);
}

#[tokio::test]
async fn test_clip_failure_keeps_anchor() {
    let dir = TempDir::new().unwrap();
    let engine = VisualEngine::new(Arc::new(MockImageGenerator), Arc::new(FailingVideo), dir.path());

    let result = engine.generate_shot(&json!({"shot_id": 5})).await.unwrap();
    assert!(result.is_success());
    assert!(result.anchor_frame().as_ref().unwrap().exists());
    assert!(result.video_clip().is_none());
}

#[tokio::test]
async fn test_mock_provider_builds_engine() {
    let dir = TempDir::new().unwrap();
    let engine = MediaProvider::Mock.build_engine(dir.path()).unwrap();
    assert_eq!(engine.shots_dir(), dir.path().join("shots"));

    let result = engine.generate_shot(&json!({"shot_id": 6})).await.unwrap();
    assert!(result.is_success());
}
