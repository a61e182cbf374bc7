use crate::foundation::core::{Point, Rgb8};

/// Visual style of a drawn leaf glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LeafStyle {
    /// Tree style: soft glow halo plus vein highlight.
    Glow,
    /// Screensaver style: solid fill, no glow.
    Flat,
}

/// Opaque drawing surface the engine renders against.
///
/// All coordinates are normalized (0..1000 on both axes); hosts map them to
/// screen space with a [`crate::Viewport`]. Leaf `scale` is a multiplier on
/// the host's nominal leaf size, 1.0 being a fully grown tree leaf.
pub trait DrawSurface {
    /// Clear the frame.
    fn clear(&mut self);

    /// Stroke a quadratic curve.
    fn curve(&mut self, start: Point, control: Point, end: Point, width: f64, color: Rgb8, alpha: f64);

    /// Stroke a straight line.
    fn line(&mut self, from: Point, to: Point, width: f64, color: Rgb8, alpha: f64);

    /// Fill a leaf glyph.
    fn leaf(&mut self, pos: Point, scale: f64, rotation: f64, color: Rgb8, alpha: f64, style: LeafStyle);

    /// Draw centered label text.
    fn text(&mut self, pos: Point, text: &str, color: Rgb8, alpha: f64);
}

/// No-op surface for headless advancement (tests, timing-only runs).
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSurface;

impl DrawSurface for NullSurface {
    fn clear(&mut self) {}
    fn curve(&mut self, _: Point, _: Point, _: Point, _: f64, _: Rgb8, _: f64) {}
    fn line(&mut self, _: Point, _: Point, _: f64, _: Rgb8, _: f64) {}
    fn leaf(&mut self, _: Point, _: f64, _: f64, _: Rgb8, _: f64, _: LeafStyle) {}
    fn text(&mut self, _: Point, _: &str, _: Rgb8, _: f64) {}
}

/// One recorded draw call.
#[allow(missing_docs)]
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Frame clear.
    Clear,
    /// Quadratic curve stroke.
    Curve {
        start: Point,
        control: Point,
        end: Point,
        width: f64,
        color: Rgb8,
        alpha: f64,
    },
    /// Straight line stroke.
    Line {
        from: Point,
        to: Point,
        width: f64,
        color: Rgb8,
        alpha: f64,
    },
    /// Leaf glyph fill.
    Leaf {
        pos: Point,
        scale: f64,
        rotation: f64,
        color: Rgb8,
        alpha: f64,
        style: LeafStyle,
    },
    /// Centered label text.
    Text {
        pos: Point,
        text: String,
        color: Rgb8,
        alpha: f64,
    },
}

/// Surface that records every draw call, for tests and debugging hosts.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    /// Every draw call issued so far, in order.
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    /// Empty recording surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded leaf draws, in order.
    pub fn leaves(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Leaf { .. }))
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn curve(&mut self, start: Point, control: Point, end: Point, width: f64, color: Rgb8, alpha: f64) {
        self.ops.push(DrawOp::Curve {
            start,
            control,
            end,
            width,
            color,
            alpha,
        });
    }

    fn line(&mut self, from: Point, to: Point, width: f64, color: Rgb8, alpha: f64) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            width,
            color,
            alpha,
        });
    }

    fn leaf(&mut self, pos: Point, scale: f64, rotation: f64, color: Rgb8, alpha: f64, style: LeafStyle) {
        self.ops.push(DrawOp::Leaf {
            pos,
            scale,
            rotation,
            color,
            alpha,
            style,
        });
    }

    fn text(&mut self, pos: Point, text: &str, color: Rgb8, alpha: f64) {
        self.ops.push(DrawOp::Text {
            pos,
            text: text.to_string(),
            color,
            alpha,
        });
    }
}
