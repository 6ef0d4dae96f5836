//! Character identity profiles.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Canonical visual and narrative identity of one character.
///
/// Profiles are created by the identity phase and never change afterwards.
/// The trigger token is what downstream image prompts use to keep a
/// character consistent, so it must be unique within a project.
///
/// # Examples
///
/// ```
/// use reel_core::IdentityProfile;
///
/// let profile = IdentityProfile::builder()
///     .name("Detective Cole")
///     .archetype("The Anti-Hero")
///     .visual_embedding_trigger("img_ch_cole")
///     .canonical_appearance("40s, weary face, stubble")
///     .build()
///     .unwrap();
///
/// assert_eq!(profile.name(), "Detective Cole");
/// assert!(profile.wardrobe().is_empty());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct IdentityProfile {
    /// Character name, unique key in the project
    name: String,
    /// Archetype label such as "The Mentor"
    archetype: String,
    /// Token that identifies the character in image prompts
    visual_embedding_trigger: String,
    /// Canonical physical description
    canonical_appearance: String,
    /// Wardrobe variant name to description
    #[builder(default)]
    #[serde(default)]
    wardrobe: BTreeMap<String, String>,
}

impl IdentityProfile {
    /// Start building a profile.
    pub fn builder() -> IdentityProfileBuilder {
        IdentityProfileBuilder::default()
    }
}
