//! Built-in craft knowledge used when no indexed store is reachable.

use reel_core::{KnowledgeCategory, KnowledgeItem};

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

/// The fixed seed set, in ranking tie-break order.
pub fn seed_knowledge() -> Vec<KnowledgeItem> {
    vec![
        KnowledgeItem::new(
            KnowledgeCategory::Screenwriting,
            "Three-Act Structure",
            "Syd Field",
            "The paradigm of the three-act structure breaks the screenplay into Setup (Act I), \
             Confrontation (Act II), and Resolution (Act III). Key plot points connect these acts. \
             Plot Point I disrupts the status quo, and Plot Point II leads to the climax.",
            tags(&["structure", "plot", "foundation"]),
        ),
        KnowledgeItem::new(
            KnowledgeCategory::Screenwriting,
            "The Hero's Journey",
            "Joseph Campbell",
            "The monomyth where a hero ventures forth from the world of common day into a region \
             of supernatural wonder: fabulous forces are there encountered and a decisive victory \
             is won.",
            tags(&["myth", "character_arc", "archetype"]),
        ),
        KnowledgeItem::new(
            KnowledgeCategory::Cinematography,
            "Rembrandt Lighting",
            "Standard Technique",
            "A lighting technique that characterizes a small, inverted triangle of light on the \
             shadowed cheek of the subject. It creates a dramatic, moody feel, often used in film \
             noir or emotional scenes.",
            tags(&["lighting", "drama", "technique"]),
        ),
        KnowledgeItem::new(
            KnowledgeCategory::Cinematography,
            "Dutch Angle",
            "Standard Technique",
            "The camera is set at an angle on its roll axis so that the shot is composed with \
             vertical lines at an angle to the side of the frame, or so that the horizon line of \
             the shot is not parallel with the bottom of the camera frame. Creates tension or \
             disorientation.",
            tags(&["camera_angle", "tension", "composition"]),
        ),
        KnowledgeItem::new(
            KnowledgeCategory::Cinematography,
            "Teal and Orange",
            "Color Theory",
            "A color grading look that uses complementary colors (teal used for \
             shadows/backgrounds, orange for highlights/skin tones) to create high contrast and \
             visual separation.",
            tags(&["color", "grading", "aesthetic"]),
        ),
    ]
}
