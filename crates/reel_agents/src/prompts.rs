//! Prompt templates for the pipeline agents.
//!
//! System prompts carry a `{context}` placeholder that is replaced with the
//! retrieved knowledge block (and identity constraints, where relevant).
//! The output schemas here are the only definition of the screenplay and
//! shot list documents.

use reel_core::IdentityProfile;

/// Placeholder substituted by [`render_system_prompt`].
const CONTEXT_PLACEHOLDER: &str = "{context}";

/// System prompt for character identity definition.
pub const IDENTITY_SYSTEM_PROMPT: &str = r#"
You are the Identity Manager for a cinematic production.
Your goal is to define canonical visual profiles for characters to ensure consistency across the movie.

Output must be a JSON object:
{
    "profiles": [
        {
            "name": "Character Name",
            "archetype": "The Hero / The Villain",
            "visual_embedding_trigger": "unique_trigger_word",
            "canonical_appearance": "Detailed physical description (face, body, age, key features).",
            "wardrobe": {
                "default": "Primary outfit description",
                "alternate": "Secondary outfit"
            }
        }
    ]
}
"#;

/// System prompt for screenplay development.
pub const NARRATIVE_SYSTEM_PROMPT: &str = r#"
You are the Narrative Engine (Screenwriter) of a distributed cinematic intelligence.
Your task is to develop a scene based on the project state and concept.

Protocol:
1. Apply three-act structure.
2. Design character arcs with internal contradiction.
3. Detect plot holes.

Input Context:
{context}

Output Schema (Strict JSON):
{
  "title": "Working title of the film",
  "scene_header": {
    "slugline": "EXT. LOCATION - DAY",
    "focal_character": "NAME"
  },
  "act_structure": {
    "act": "I/II/III",
    "beat": "Inciting Incident / Climax / etc."
  },
  "character_arcs": {
    "CharacterName": "Current emotional state -> Target state"
  },
  "scene_beats": [
    {
      "action": "Description of action",
      "dialogue": "Optional dialogue",
      "emotional_shift": "Description of subtext"
    }
  ],
  "emotional_trajectory": ["Start Mood", "End Mood"],
  "visual_intent_markers": ["High Contrast", "Fast Paced", "Claustrophobic"]
}
"#;

/// System prompt for translating a screenplay into a shot list.
pub const CINEMATOGRAPHY_SYSTEM_PROMPT: &str = r#"
You are the Cinematography Engine (DOP) of a distributed cinematic intelligence.
Translate NARRATIVE BEATS into OPTICAL SPECIFICATIONS.

Protocol:
1. Avoid adjectives without parameters.
2. Use measurable technical terms.

Input Context:
{context}

Output Schema (Strict JSON):
{
  "shots": [
    {
      "shot_id": 1,
      "narrative_beat_ref": "Reference to action in script",
      "shot_type": "medium_close_up / wide / extreme_long",
      "lens_mm": 35,
      "lighting": {
        "key": "soft_box / hard_sun",
        "fill": "negative / bounce",
        "ratio": "4:1"
      },
      "movement": {
        "type": "dolly_in / static / handheld",
        "speed": "slow / frenetic"
      },
      "aspect_ratio": "2.39:1",
      "mood": "intimate_high_contrast",
      "visual_prompt": "Prompt for the image model (Must include IDENTITY TRIGGER if character present)"
    }
  ]
}
"#;

/// System prompt for reviewing a shot list.
pub const CRITIC_SYSTEM_PROMPT: &str = r#"
You are the Visual Critic of a distributed cinematic intelligence.
Review a shot list against the screenplay it was planned from.

Checklist:
1. Every scene beat is covered by at least one shot.
2. Each visual_prompt names the identity trigger of every character on screen.
3. Lens, lighting and movement choices serve the emotional beat.
4. Parameters are measurable, not adjectives.

Approve only when every item holds. Otherwise reject with concrete, actionable feedback.

Output Schema (Strict JSON):
{
  "status": "approved" | "rejected",
  "feedback": "What must change, or why the plan works"
}
"#;

/// Substitute the context block into a system prompt template.
///
/// # Examples
///
/// ```
/// use reel_agents::{render_system_prompt, NARRATIVE_SYSTEM_PROMPT};
///
/// let prompt = render_system_prompt(NARRATIVE_SYSTEM_PROMPT, "- **Save the Cat**");
/// assert!(prompt.contains("Input Context:\n- **Save the Cat**"));
/// assert!(!prompt.contains("{context}"));
/// ```
pub fn render_system_prompt(template: &str, context: &str) -> String {
    template.replace(CONTEXT_PLACEHOLDER, context)
}

/// Identity block appended to the cinematography context.
///
/// Empty when there are no identities.
pub fn identity_constraints(identities: &[IdentityProfile]) -> String {
    if identities.is_empty() {
        return String::new();
    }

    let mut block =
        String::from("\n### Identity Constraints (MUST USE VISUAL EMBEDDING TRIGGERS):\n");
    for profile in identities {
        block.push_str(&format!(
            "- {}: Trigger='{}', Appearance='{}'\n",
            profile.name(),
            profile.visual_embedding_trigger(),
            profile.canonical_appearance()
        ));
    }
    block
}

/// Cast block appended to the narrative request.
pub(crate) fn established_characters(identities: &[IdentityProfile]) -> String {
    if identities.is_empty() {
        return String::new();
    }

    let mut block = String::from("\n\n### Established Characters:\n");
    for profile in identities {
        block.push_str(&format!(
            "- {} ({}): {}\n",
            profile.name(),
            profile.archetype(),
            profile.canonical_appearance()
        ));
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cole() -> IdentityProfile {
        IdentityProfile::builder()
            .name("Cole")
            .archetype("The Anti-Hero")
            .visual_embedding_trigger("img_ch_cole")
            .canonical_appearance("40s, stubble")
            .build()
            .unwrap()
    }

    #[test]
    fn test_identity_constraints_line_format() {
        let block = identity_constraints(&[cole()]);
        assert!(block.contains("- Cole: Trigger='img_ch_cole', Appearance='40s, stubble'\n"));
        assert!(identity_constraints(&[]).is_empty());
    }

    #[test]
    fn test_established_characters_lists_archetype() {
        let block = established_characters(&[cole()]);
        assert!(block.contains("- Cole (The Anti-Hero): 40s, stubble"));
    }

    #[test]
    fn test_templates_have_context_slot() {
        for template in [NARRATIVE_SYSTEM_PROMPT, CINEMATOGRAPHY_SYSTEM_PROMPT] {
            assert!(template.contains(CONTEXT_PLACEHOLDER));
        }
    }
}
