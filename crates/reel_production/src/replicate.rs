//! Replicate predictions API media generators.

use crate::generator::{token_from_env, write_media};
use crate::{ImageGenerator, VideoGenerator};
use async_trait::async_trait;
use base64::Engine as _;
use reel_error::{ProductionError, ProductionErrorKind, ReelResult};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Default still image model.
pub const REPLICATE_IMAGE_MODEL: &str = "black-forest-labs/flux-dev";

/// Default image-to-video model.
pub const REPLICATE_VIDEO_MODEL: &str = "thudm/cogvideox-5b";

const API_URL: &str = "https://api.replicate.com/v1";
const POLL_INTERVAL: Duration = Duration::from_secs(2);
const MAX_POLLS: usize = 300;

#[derive(Debug, Deserialize)]
struct PredictionUrls {
    get: String,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    status: String,
    #[serde(default)]
    output: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
    urls: PredictionUrls,
}

impl Prediction {
    fn is_finished(&self) -> bool {
        matches!(self.status.as_str(), "succeeded" | "failed" | "canceled")
    }
}

/// First output URL of a finished prediction.
///
/// Image models return a list of URLs, video models a single one.
fn output_url(output: &Value) -> Option<&str> {
    match output {
        Value::String(url) => Some(url.as_str()),
        Value::Array(items) => items.first().and_then(Value::as_str),
        _ => None,
    }
}

/// Minimal Replicate client shared by both generators.
#[derive(Debug, Clone)]
struct PredictionClient {
    client: Client,
    token: String,
    model: String,
}

impl PredictionClient {
    fn new(token: String, model: String) -> Self {
        Self {
            client: Client::new(),
            token,
            model,
        }
    }

    fn api_error(status: u16, message: impl Into<String>) -> ProductionError {
        ProductionError::new(ProductionErrorKind::Api {
            status,
            message: message.into(),
        })
    }

    async fn read_prediction(response: reqwest::Response) -> ReelResult<Prediction> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, error = %message, "Replicate API error");
            return Err(Self::api_error(status.as_u16(), message).into());
        }
        let prediction = response
            .json()
            .await
            .map_err(|e| Self::api_error(status.as_u16(), e.to_string()))?;
        Ok(prediction)
    }

    /// Run the model on `input`, wait for it to finish and download the
    /// first output.
    async fn run(&self, input: Value) -> ReelResult<Vec<u8>> {
        let url = format!("{}/models/{}/predictions", API_URL, self.model);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header("Prefer", "wait")
            .json(&json!({ "input": input }))
            .send()
            .await
            .map_err(|e| Self::api_error(0, format!("Request failed: {}", e)))?;
        let mut prediction = Self::read_prediction(response).await?;

        let mut polls = 0;
        while !prediction.is_finished() && polls < MAX_POLLS {
            tokio::time::sleep(POLL_INTERVAL).await;
            polls += 1;
            debug!(status = %prediction.status, polls, "Waiting for prediction");
            let response = self
                .client
                .get(&prediction.urls.get)
                .bearer_auth(&self.token)
                .send()
                .await
                .map_err(|e| Self::api_error(0, format!("Poll failed: {}", e)))?;
            prediction = Self::read_prediction(response).await?;
        }

        if prediction.status != "succeeded" {
            let reason = prediction
                .error
                .map(|e| e.to_string())
                .unwrap_or_else(|| format!("prediction {}", prediction.status));
            return Err(ProductionError::new(ProductionErrorKind::MissingOutput(reason)).into());
        }

        let media_url = prediction
            .output
            .as_ref()
            .and_then(output_url)
            .ok_or_else(|| {
                ProductionError::new(ProductionErrorKind::MissingOutput(self.model.clone()))
            })?
            .to_string();

        let response = self
            .client
            .get(&media_url)
            .send()
            .await
            .map_err(|e| ProductionError::new(ProductionErrorKind::Download(e.to_string())))?;
        if !response.status().is_success() {
            return Err(ProductionError::new(ProductionErrorKind::Download(format!(
                "{} returned {}",
                media_url,
                response.status()
            )))
            .into());
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProductionError::new(ProductionErrorKind::Download(e.to_string())))?;
        Ok(bytes.to_vec())
    }
}

/// Still image generation on Replicate.
#[derive(Debug, Clone)]
pub struct ReplicateImageGenerator {
    inner: PredictionClient,
}

impl ReplicateImageGenerator {
    /// Creates a generator, reading the token from `REPLICATE_API_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns error if the token is not set.
    pub fn from_env(model: Option<&str>) -> ReelResult<Self> {
        let token = token_from_env("REPLICATE_API_TOKEN")?;
        Ok(Self::with_token(token, model.unwrap_or(REPLICATE_IMAGE_MODEL)))
    }

    /// Creates a generator with an explicit token.
    pub fn with_token(token: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            inner: PredictionClient::new(token.into(), model.into()),
        }
    }

    /// Model input for one still.
    pub fn input(prompt: &str, aspect_ratio: &str) -> Value {
        json!({
            "prompt": prompt,
            "aspect_ratio": aspect_ratio,
            "output_format": "png",
            "output_quality": 90,
        })
    }
}

#[async_trait]
impl ImageGenerator for ReplicateImageGenerator {
    #[instrument(skip(self, prompt), fields(model = %self.inner.model))]
    async fn generate(
        &self,
        prompt: &str,
        output_path: &Path,
        aspect_ratio: &str,
    ) -> ReelResult<PathBuf> {
        let preview: String = prompt.chars().take(50).collect();
        info!(prompt = %preview, "Generating image");
        let bytes = self.inner.run(Self::input(prompt, aspect_ratio)).await?;
        write_media(output_path, &bytes).await
    }

    fn model_name(&self) -> &str {
        &self.inner.model
    }
}

/// Image-to-video generation on Replicate.
///
/// The anchor still is uploaded inline as a data URI.
#[derive(Debug, Clone)]
pub struct ReplicateVideoGenerator {
    inner: PredictionClient,
}

impl ReplicateVideoGenerator {
    /// Creates a generator, reading the token from `REPLICATE_API_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns error if the token is not set.
    pub fn from_env(model: Option<&str>) -> ReelResult<Self> {
        let token = token_from_env("REPLICATE_API_TOKEN")?;
        Ok(Self::with_token(token, model.unwrap_or(REPLICATE_VIDEO_MODEL)))
    }

    /// Creates a generator with an explicit token.
    pub fn with_token(token: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            inner: PredictionClient::new(token.into(), model.into()),
        }
    }

    /// Model input for one clip animated from `image_bytes`.
    pub fn input(prompt: &str, image_bytes: &[u8]) -> Value {
        let encoded = base64::engine::general_purpose::STANDARD.encode(image_bytes);
        json!({
            "prompt": prompt,
            "image_start": format!("data:image/png;base64,{}", encoded),
            "num_frames": 49,
            "guidance_scale": 6,
            "num_inference_steps": 50,
        })
    }
}

#[async_trait]
impl VideoGenerator for ReplicateVideoGenerator {
    #[instrument(skip(self, prompt), fields(model = %self.inner.model))]
    async fn generate(
        &self,
        image_path: &Path,
        prompt: &str,
        output_path: &Path,
    ) -> ReelResult<PathBuf> {
        info!(anchor = %image_path.display(), "Generating video");
        let image_bytes = tokio::fs::read(image_path).await.map_err(|e| {
            ProductionError::new(ProductionErrorKind::Download(format!(
                "{}: {}",
                image_path.display(),
                e
            )))
        })?;
        let bytes = self.inner.run(Self::input(prompt, &image_bytes)).await?;
        write_media(output_path, &bytes).await
    }

    fn model_name(&self) -> &str {
        &self.inner.model
    }
}
