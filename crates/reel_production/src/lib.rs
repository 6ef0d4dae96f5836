//! Anchor-frame-first shot production for Reel.
//!
//! The [`VisualEngine`] turns each shot document into a still image and a
//! short clip animated from that still. Image and video backends sit behind
//! the [`ImageGenerator`] and [`VideoGenerator`] traits; the provider is
//! chosen once at startup with [`MediaProvider`].
//!
//! # Available Providers
//!
//! - **HuggingFace** - Inference API, token from `HF_TOKEN`
//! - **Replicate** - predictions API, token from `REPLICATE_API_TOKEN`
//! - **Mock** - placeholder files, no network

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod engine;
mod generator;
mod huggingface;
mod mock;
mod provider;
mod replicate;

pub use engine::{DEFAULT_ASPECT_RATIO, VisualEngine};
pub use generator::{ImageGenerator, VideoGenerator};
pub use huggingface::{
    HF_IMAGE_MODEL, HF_VIDEO_MODEL, HuggingFaceImageGenerator, HuggingFaceVideoGenerator,
};
pub use mock::{MockImageGenerator, MockVideoGenerator};
pub use provider::MediaProvider;
pub use replicate::{
    REPLICATE_IMAGE_MODEL, REPLICATE_VIDEO_MODEL, ReplicateImageGenerator,
    ReplicateVideoGenerator,
};
