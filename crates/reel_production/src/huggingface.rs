//! HuggingFace Inference API media generators.

use crate::generator::{token_from_env, write_media};
use crate::{ImageGenerator, VideoGenerator};
use async_trait::async_trait;
use reel_error::{ProductionError, ProductionErrorKind, ReelResult};
use reqwest::Client;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument, warn};

/// Default still image model.
pub const HF_IMAGE_MODEL: &str = "black-forest-labs/FLUX.1-schnell";

/// Default clip model.
pub const HF_VIDEO_MODEL: &str = "damo-vilab/text-to-video-ms-1.7b";

const ROUTER_URL: &str = "https://router.huggingface.co/hf-inference/models";

/// Minimal HuggingFace inference client shared by both generators.
#[derive(Debug, Clone)]
struct InferenceClient {
    client: Client,
    token: String,
    model: String,
}

impl InferenceClient {
    fn new(token: String, model: String) -> Self {
        Self {
            client: Client::new(),
            token,
            model,
        }
    }

    fn url(&self) -> String {
        format!("{}/{}", ROUTER_URL, self.model)
    }

    /// POST `payload` and return the body when its content type passes
    /// `accept`.
    async fn infer(&self, payload: &Value, accept: fn(&str) -> bool) -> ReelResult<Vec<u8>> {
        let response = self
            .client
            .post(self.url())
            .bearer_auth(&self.token)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "HTTP request failed");
                ProductionError::new(ProductionErrorKind::Api {
                    status: 0,
                    message: format!("Request failed: {}", e),
                })
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, error = %message, "HuggingFace API error");
            return Err(ProductionError::new(ProductionErrorKind::Api {
                status: status.as_u16(),
                message,
            })
            .into());
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !accept(&content_type) {
            warn!(content_type = %content_type, "Unexpected response type");
            return Err(
                ProductionError::new(ProductionErrorKind::UnexpectedContentType(content_type))
                    .into(),
            );
        }

        let bytes = response.bytes().await.map_err(|e| {
            ProductionError::new(ProductionErrorKind::Download(e.to_string()))
        })?;
        Ok(bytes.to_vec())
    }
}

fn is_image(content_type: &str) -> bool {
    content_type == "image/jpeg" || content_type == "image/png"
}

fn is_video(content_type: &str) -> bool {
    content_type.contains("video") || content_type == "application/octet-stream"
}

/// Output height for an aspect ratio at 1024 pixels wide.
fn image_height(aspect_ratio: &str) -> u32 {
    if aspect_ratio == "16:9" { 576 } else { 1024 }
}

/// Still image generation through the HuggingFace router.
#[derive(Debug, Clone)]
pub struct HuggingFaceImageGenerator {
    inner: InferenceClient,
}

impl HuggingFaceImageGenerator {
    /// Creates a generator, reading the token from `HF_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns error if the token is not set.
    pub fn from_env(model: Option<&str>) -> ReelResult<Self> {
        let token = token_from_env("HF_TOKEN")?;
        Ok(Self::with_token(token, model.unwrap_or(HF_IMAGE_MODEL)))
    }

    /// Creates a generator with an explicit token.
    pub fn with_token(token: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            inner: InferenceClient::new(token.into(), model.into()),
        }
    }

    /// Request body for one still.
    pub fn payload(prompt: &str, aspect_ratio: &str) -> Value {
        json!({
            "inputs": format!("{} --aspect_ratio {}", prompt, aspect_ratio),
            "parameters": {
                "num_inference_steps": 4,
                "guidance_scale": 0.0,
                "width": 1024,
                "height": image_height(aspect_ratio),
            }
        })
    }
}

#[async_trait]
impl ImageGenerator for HuggingFaceImageGenerator {
    #[instrument(skip(self, prompt), fields(model = %self.inner.model))]
    async fn generate(
        &self,
        prompt: &str,
        output_path: &Path,
        aspect_ratio: &str,
    ) -> ReelResult<PathBuf> {
        let preview: String = prompt.chars().take(50).collect();
        info!(prompt = %preview, "Generating image");
        let bytes = self
            .inner
            .infer(&Self::payload(prompt, aspect_ratio), is_image)
            .await?;
        write_media(output_path, &bytes).await
    }

    fn model_name(&self) -> &str {
        &self.inner.model
    }
}

/// Text-to-video generation through the HuggingFace router.
///
/// The free inference tier only serves text-to-video reliably, so the
/// anchor image is not sent.
#[derive(Debug, Clone)]
pub struct HuggingFaceVideoGenerator {
    inner: InferenceClient,
}

impl HuggingFaceVideoGenerator {
    /// Creates a generator, reading the token from `HF_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns error if the token is not set.
    pub fn from_env(model: Option<&str>) -> ReelResult<Self> {
        let token = token_from_env("HF_TOKEN")?;
        Ok(Self::with_token(token, model.unwrap_or(HF_VIDEO_MODEL)))
    }

    /// Creates a generator with an explicit token.
    pub fn with_token(token: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            inner: InferenceClient::new(token.into(), model.into()),
        }
    }
}

#[async_trait]
impl VideoGenerator for HuggingFaceVideoGenerator {
    #[instrument(skip(self, prompt), fields(model = %self.inner.model))]
    async fn generate(
        &self,
        _image_path: &Path,
        prompt: &str,
        output_path: &Path,
    ) -> ReelResult<PathBuf> {
        info!("Generating video");
        let bytes = self
            .inner
            .infer(&json!({ "inputs": prompt }), is_video)
            .await?;
        write_media(output_path, &bytes).await
    }

    fn model_name(&self) -> &str {
        &self.inner.model
    }
}
