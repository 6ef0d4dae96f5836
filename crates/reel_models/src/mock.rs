//! Offline driver with canned responses.

use async_trait::async_trait;
use reel_core::{GenerateRequest, GenerateResponse};
use reel_error::ReelResult;
use reel_interface::ReelDriver;
use tracing::{info, instrument};

const IDENTITY_RESPONSE: &str = r#"
{
    "profiles": [
        {
            "name": "Detective Cole",
            "archetype": "The Anti-Hero",
            "visual_embedding_trigger": "img_ch_cole",
            "canonical_appearance": "40s, weary face, stubble, trench coat, glowing blue cybernetic scope on left eye.",
            "wardrobe": {
                "default": "Weathered leather trench coat over tactical vest.",
                "formal": "N/A"
            }
        }
    ]
}
"#;

const NARRATIVE_RESPONSE: &str = r#"
{
    "title": "Neon Static",
    "scene_header": {
        "slugline": "EXT. NEON ALLEY - NIGHT",
        "focal_character": "Detective Cole"
    },
    "act_structure": {
        "act": "I",
        "beat": "Inciting Incident"
    },
    "character_arcs": {
        "Detective Cole": "Apathetic -> Curious"
    },
    "scene_beats": [
        {
            "action": "Rain slicks the pavement. COLE (40s) lights a cigarette, illuminating his cybernetic eye.",
            "dialogue": "COLE: Another glitch in the matrix.",
            "emotional_shift": "Resignation"
        },
        {
            "action": "He spots a GLOWING ARTIFACT in the trash.",
            "dialogue": "",
            "emotional_shift": "Intrigue"
        }
    ],
    "emotional_trajectory": ["Weary", "Alert"],
    "visual_intent_markers": ["High Contrast", "Noir", "Neon"]
}
"#;

const SHOT_LIST_RESPONSE: &str = r#"
{
    "shots": [
        {
            "shot_id": 1,
            "narrative_beat_ref": "Cole lights cigarette",
            "shot_type": "medium_close_up",
            "lens_mm": 50,
            "lighting": {"key": "soft_neon_blue", "fill": "negative", "ratio": "8:1"},
            "movement": {"type": "static", "speed": "N/A"},
            "aspect_ratio": "2.39:1",
            "mood": "tech_noir",
            "visual_prompt": "img_ch_cole, medium close up, lighting cigarette, neon rain background, cybernetic eye glow, 50mm lens, cinematic lighting"
        },
        {
            "shot_id": 2,
            "narrative_beat_ref": "Spots artifact",
            "shot_type": "close_up",
            "lens_mm": 85,
            "lighting": {"key": "artifact_glow_gold", "fill": "dim_street", "ratio": "4:1"},
            "movement": {"type": "dolly_in", "speed": "slow"},
            "aspect_ratio": "2.39:1",
            "mood": "mystery",
            "visual_prompt": "close up of glowing golden artifact in trash, wet pavement, shallow depth of field, 85mm lens"
        }
    ]
}
"#;

const CRITIQUE_RESPONSE: &str = r#"
{
    "status": "approved",
    "feedback": "Visuals align well with narrative."
}
"#;

const UNMATCHED_RESPONSE: &str = r#"{"error": "Mock driver could not match prompt pattern."}"#;

/// Driver that answers each pipeline prompt with a fixed document.
///
/// The response is picked by matching phrases in the user prompt, so the
/// whole pipeline runs end to end without network access or API keys.
///
/// # Examples
///
/// ```
/// use reel_core::{GenerateRequest, Message};
/// use reel_interface::ReelDriver;
/// use reel_models::MockDriver;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::user("Evaluate this shot list")])
///     .build()?;
/// let response = MockDriver::new().generate(&request).await?;
/// assert!(response.text().contains("approved"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MockDriver;

impl MockDriver {
    /// Creates a mock driver.
    pub fn new() -> Self {
        Self
    }

    /// Canned response for a user prompt.
    pub fn respond(prompt: &str) -> &'static str {
        let prompt = prompt.to_lowercase();
        if prompt.contains("define visual profiles") {
            IDENTITY_RESPONSE
        } else if prompt.contains("develop the narrative") {
            NARRATIVE_RESPONSE
        } else if prompt.contains("generate optical specifications") {
            SHOT_LIST_RESPONSE
        } else if prompt.contains("evaluate this shot list") {
            CRITIQUE_RESPONSE
        } else {
            UNMATCHED_RESPONSE
        }
    }
}

#[async_trait]
impl ReelDriver for MockDriver {
    #[instrument(skip(self, req))]
    async fn generate(&self, req: &GenerateRequest) -> ReelResult<GenerateResponse> {
        let prompt = req.user_prompt().unwrap_or_default();
        let preview: String = prompt.chars().take(50).collect();
        info!(prompt = %preview, "Mock driver generating response");
        Ok(GenerateResponse::from_text(Self::respond(prompt)))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
