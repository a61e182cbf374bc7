use crate::{
    foundation::core::{Point, SlotId},
    foundation::math::dist,
    foundation::rng::SeededRng,
    tree::model::TreeData,
};

/// Uniform seeded choice among selectable slots.
///
/// `None` means the tree is full relative to the currently active branches;
/// callers treat that as "placement cannot proceed now", not as a defect.
/// Selection consumes the caller's rng so placement order is reproducible for
/// a fixed seed.
pub fn find_available_slot(tree: &TreeData, rng: &mut SeededRng) -> Option<SlotId> {
    let eligible: Vec<SlotId> = tree
        .slots
        .iter()
        .filter(|s| s.selectable(tree.active_branches))
        .map(|s| s.id)
        .collect();
    let idx = rng.index(eligible.len())?;
    Some(eligible[idx])
}

/// Deterministic nearest selectable slot to `p`, or `None` if none eligible.
pub fn find_nearest_slot(tree: &TreeData, p: Point) -> Option<SlotId> {
    tree.slots
        .iter()
        .filter(|s| s.selectable(tree.active_branches))
        .min_by(|a, b| dist(p, a.pos).total_cmp(&dist(p, b.pos)))
        .map(|s| s.id)
}

/// Count of currently occupied slots.
pub fn occupied_count(tree: &TreeData) -> usize {
    tree.slots.iter().filter(|s| s.occupied).count()
}

/// Growth rule: how many main branches are unlocked after `total_placed`
/// pledges. Starts at 1 and gains one branch per 100 placements, capped at 5.
pub fn active_branches_for(total_placed: usize) -> usize {
    (total_placed / 100 + 1).min(5)
}

#[cfg(test)]
#[path = "../../tests/unit/tree/slots.rs"]
mod tests;
