//! Closed-form ambient motion.
//!
//! Sway is a deterministic time-varying offset applied at draw time; stored
//! branch and slot geometry is never mutated. A slot's offset accumulates the
//! endpoint deltas of every ancestor branch on its path, with the final
//! branch's delta scaled by the slot's parametric position.

use crate::{
    foundation::core::{BranchId, Point, Vec2},
    tree::model::{Branch, LeafSlot, TreeData},
};

/// Wind gust envelope shared by every swaying element.
pub fn gust(time: f64) -> f64 {
    (time * 0.4).sin() * 0.4 + (time * 0.7).sin() * 0.3 + 0.3
}

/// Gust-driven offset for an element at `depth` with per-element phase `id`.
///
/// `scale` halves the effect for control points; `strength` is the session
/// wind scalar in `[0, 1]`.
pub fn wind_offset(depth: u32, id: usize, time: f64, scale: f64, strength: f64) -> Vec2 {
    if strength <= 0.0 {
        return Vec2::ZERO;
    }
    let w = f64::from(depth) * 2.5 * strength * gust(time) * scale;
    Vec2::new(
        (time * 1.5 + id as f64 * 0.4).sin() * w + w * 0.6,
        (time * 1.1 + id as f64 * 0.3).cos() * w * 0.25,
    )
}

/// Sway delta of a branch endpoint relative to its stored position.
pub fn end_delta(branch: &Branch, time: f64, strength: f64) -> Vec2 {
    let amt = f64::from(branch.depth) * 0.4;
    let freq = 0.35 + (branch.id.0 % 19) as f64 * 0.015;
    let base = Vec2::new(
        (time * freq).sin() * amt,
        (time * freq * 0.7).cos() * amt * 0.35,
    );
    base + wind_offset(branch.depth, branch.id.0, time, 1.0, strength)
}

/// Sway delta of a branch control point (half the endpoint sway).
pub fn control_delta(branch: &Branch, time: f64, strength: f64) -> Vec2 {
    let amt = f64::from(branch.depth) * 0.2;
    let freq = 0.35 + (branch.id.0 % 19) as f64 * 0.015;
    let base = Vec2::new(
        (time * freq).sin() * amt,
        (time * freq * 0.7).cos() * amt * 0.2,
    );
    base + wind_offset(branch.depth, branch.id.0, time, 0.5, strength)
}

/// A slot's live position: resting coordinate plus accumulated ancestor sway.
pub fn swayed_slot_pos(tree: &TreeData, slot: &LeafSlot, time: f64, strength: f64) -> Point {
    if slot.branch_path.is_empty() {
        return slot.pos;
    }

    let mut accum = Vec2::ZERO;
    let last = slot.branch_path.len() - 1;
    for &id in &slot.branch_path[..last] {
        accum += end_delta(tree.branch(id), time, strength);
    }
    accum += end_delta(tree.branch(slot.branch_path[last]), time, strength) * slot.branch_t;

    slot.pos + accum
}

/// One curve segment of a branch path with live sway applied.
#[derive(Clone, Copy, Debug)]
pub struct SwaySegment {
    /// Swayed curve start.
    pub start: Point,
    /// Swayed quadratic control point.
    pub control: Point,
    /// Swayed curve end.
    pub end: Point,
}

/// Swayed segments for a root-to-slot branch path, accumulating each parent's
/// endpoint delta into its descendants.
pub fn swayed_path(tree: &TreeData, path: &[BranchId], time: f64, strength: f64) -> Vec<SwaySegment> {
    let mut segments = Vec::with_capacity(path.len());
    let mut accum = Vec2::ZERO;
    for &id in path {
        let branch = tree.branch(id);
        let own_end = end_delta(branch, time, strength);
        segments.push(SwaySegment {
            start: branch.start + accum,
            control: branch.control + control_delta(branch, time, strength) + accum,
            end: branch.end + own_end + accum,
        });
        accum += own_end;
    }
    segments
}

#[cfg(test)]
#[path = "../../tests/unit/animation/sway.rs"]
mod tests;
