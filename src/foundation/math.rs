use crate::foundation::core::Point;

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Remap `value` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// Not clamped: values outside the input range extrapolate.
pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    out_min + (out_max - out_min) * ((value - in_min) / (in_max - in_min))
}

/// Euclidean distance between two points.
pub fn dist(a: Point, b: Point) -> f64 {
    (b - a).hypot()
}

/// Point on the quadratic Bezier `(p0, cp, p1)` at parameter `t`.
pub fn quad_point(p0: Point, cp: Point, p1: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    Point::new(
        mt * mt * p0.x + 2.0 * mt * t * cp.x + t * t * p1.x,
        mt * mt * p0.y + 2.0 * mt * t * cp.y + t * t * p1.y,
    )
}

/// Approximate arc length of a quadratic Bezier via an 8-segment polyline.
pub fn quad_len(p0: Point, cp: Point, p1: Point) -> f64 {
    const SEGMENTS: usize = 8;
    let mut total = 0.0;
    let mut prev = p0;
    for i in 1..=SEGMENTS {
        let t = i as f64 / SEGMENTS as f64;
        let p = quad_point(p0, cp, p1, t);
        total += dist(prev, p);
        prev = p;
    }
    total
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
