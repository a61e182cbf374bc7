use crate::foundation::core::{NORMALIZED_H, NORMALIZED_W, Point, Vec2};

/// Screen/normalized coordinate transform for hosts.
///
/// Fits the normalized canvas into the display with a 1.5x zoom and centered
/// letterbox offsets; recompute on every resize.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Normalized-to-pixel scale factor.
    pub scale: f64,
    /// Pixel offset of the normalized origin.
    pub offset: Vec2,
}

impl Viewport {
    /// Fit to a display of `width` x `height` pixels.
    pub fn fit(width: f64, height: f64) -> Self {
        let scale = (width / NORMALIZED_W).min(height / NORMALIZED_H) * 1.5;
        Self {
            scale,
            offset: Vec2::new(
                (width - NORMALIZED_W * scale) / 2.0,
                (height - NORMALIZED_H * scale) / 2.0,
            ),
        }
    }

    /// Map a normalized point to pixels.
    pub fn to_screen(&self, p: Point) -> Point {
        Point::new(p.x * self.scale + self.offset.x, p.y * self.scale + self.offset.y)
    }

    /// Map a pixel point back to normalized coordinates.
    pub fn to_normalized(&self, p: Point) -> Point {
        Point::new((p.x - self.offset.x) / self.scale, (p.y - self.offset.y) / self.scale)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/viewport.rs"]
mod tests;
