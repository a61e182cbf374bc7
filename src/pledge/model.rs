use crate::foundation::core::{PillarId, PledgeId, Rgb8, SlotId};

/// A fixed pledge category with display attributes.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Pillar {
    /// Stable key, e.g. `"climate"`.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Display icon (emoji or glyph).
    pub icon: String,
    /// Leaf color on the tree.
    pub color: Rgb8,
}

impl Pillar {
    /// The default four-pillar table.
    pub fn default_set() -> Vec<Pillar> {
        fn pillar(key: &str, name: &str, icon: &str, color: Rgb8) -> Pillar {
            Pillar {
                key: key.to_string(),
                name: name.to_string(),
                icon: icon.to_string(),
                color,
            }
        }
        vec![
            pillar(
                "climate",
                "Climate & Carbon",
                "\u{1F33F}",
                Rgb8::new(0x4C, 0xAF, 0x50),
            ),
            pillar(
                "circularity",
                "Circularity & Waste",
                "\u{267B}",
                Rgb8::new(0x26, 0xA6, 0x9A),
            ),
            pillar("water", "Water", "\u{1F4A7}", Rgb8::new(0x42, 0xA5, 0xF5)),
            pillar(
                "habitat",
                "Habitat & Species",
                "\u{1F43E}",
                Rgb8::new(0xEF, 0x53, 0x50),
            ),
        ]
    }
}

/// A user-visible commitment, displayed as a leaf once placed.
///
/// Immutable after creation except for the slot back-link, which is set once
/// when the placement animation completes (or immediately for bulk placement).
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Pledge {
    /// Index of this pledge in the owning store.
    pub id: PledgeId,
    /// Display name.
    pub name: String,
    /// Category the pledge belongs to.
    pub pillar: PillarId,
    /// Free-text message; may be empty.
    pub message: String,
    /// Seconds since session start at creation time.
    pub created_at: f64,
    /// The slot displaying this pledge; `None` until placement completes.
    pub slot: Option<SlotId>,
}
