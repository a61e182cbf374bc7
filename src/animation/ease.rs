use std::f64::consts::PI;

/// Easing curves applied to normalized animation progress.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// Identity.
    Linear,
    /// Quadratic accelerate-in.
    InQuad,
    /// Quadratic decelerate-out.
    OutQuad,
    /// Quadratic ease on both ends.
    InOutQuad,
    /// Cubic accelerate-in.
    InCubic,
    /// Cubic decelerate-out.
    OutCubic,
    /// Cubic ease on both ends.
    InOutCubic,
    /// Overshooting settle (c = 1.70158).
    OutBack,
    /// Elastic overshooting settle; exceeds 1 inside the interval, exact at
    /// the endpoints.
    OutElastic,
}

impl Ease {
    /// Ease `t`; input is clamped to `[0, 1]` first.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::OutBack => {
                let c = 1.70158;
                1.0 + (c + 1.0) * (t - 1.0).powi(3) + c * (t - 1.0).powi(2)
            }
            Self::OutElastic => {
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    let c = 2.0 * PI / 3.0;
                    2f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c).sin() + 1.0
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
