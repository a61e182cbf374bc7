pub use kurbo::{Point, Vec2};

/// Normalized canvas width used by all engine coordinates.
pub const NORMALIZED_W: f64 = 1000.0;
/// Normalized canvas height used by all engine coordinates.
pub const NORMALIZED_H: f64 = 1000.0;

/// Straight (non-premultiplied) RGB color; alpha travels separately through
/// the draw calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Per-channel linear interpolation, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Self::new(ch(self.r, other.r), ch(self.g, other.g), ch(self.b, other.b))
    }
}

/// Identifies a branch by index into [`crate::TreeData::branches`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct BranchId(pub usize);

/// Identifies a leaf slot by index into [`crate::TreeData::slots`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SlotId(pub usize);

/// Identifies a pledge by index into the owning [`crate::PledgeStore`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PledgeId(pub usize);

/// Identifies a pillar by index into the session's pillar table.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PillarId(pub usize);
