use super::*;
use crate::tree::generate::generate;

#[test]
fn trunk_never_sways() {
    let tree = generate(42);
    let trunk = tree.branch(tree.root);
    for i in 0..20 {
        let t = i as f64 * 0.37;
        assert_eq!(end_delta(trunk, t, 1.0), Vec2::ZERO);
        assert_eq!(control_delta(trunk, t, 1.0), Vec2::ZERO);
    }
}

#[test]
fn deeper_branches_sway_more() {
    let tree = generate(42);
    let shallow = tree
        .branches
        .iter()
        .find(|b| b.depth == 1)
        .unwrap();
    let deep = tree
        .branches
        .iter()
        .find(|b| b.depth == 6)
        .unwrap();

    let amp = |b: &Branch| {
        (0..200)
            .map(|i| end_delta(b, i as f64 * 0.1, 0.0).hypot())
            .fold(0.0, f64::max)
    };
    assert!(amp(deep) > amp(shallow));
}

#[test]
fn wind_offset_vanishes_without_strength() {
    assert_eq!(wind_offset(5, 3, 1.7, 1.0, 0.0), Vec2::ZERO);
    assert_ne!(wind_offset(5, 3, 1.7, 1.0, 1.0), Vec2::ZERO);
}

#[test]
fn wind_amplifies_sway() {
    let tree = generate(42);
    let branch = tree.branches.iter().find(|b| b.depth == 4).unwrap();
    let calm = (0..200)
        .map(|i| end_delta(branch, i as f64 * 0.1, 0.0).hypot())
        .fold(0.0, f64::max);
    let windy = (0..200)
        .map(|i| end_delta(branch, i as f64 * 0.1, 1.0).hypot())
        .fold(0.0, f64::max);
    assert!(windy > calm);
}

#[test]
fn swayed_path_chains_parent_deltas() {
    let tree = generate(42);
    let slot = tree.slots.iter().find(|s| s.depth >= 3).unwrap();
    let segments = swayed_path(&tree, &slot.branch_path, 2.0, 0.5);
    assert_eq!(segments.len(), slot.branch_path.len());

    // Each segment starts where the previous one's sway left its end point's
    // parent: start deltas equal the accumulated parent end deltas.
    for (i, seg) in segments.iter().enumerate() {
        let branch = tree.branch(slot.branch_path[i]);
        if i == 0 {
            assert_eq!(seg.start, branch.start);
        } else {
            let prev = &segments[i - 1];
            let delta = seg.start - branch.start;
            let prev_delta = prev.end - tree.branch(slot.branch_path[i - 1]).end;
            assert!((delta - prev_delta).hypot() < 1e-9);
        }
    }
}

#[test]
fn slot_position_follows_its_branch() {
    let tree = generate(42);
    let slot = tree.slots.iter().find(|s| s.depth >= 2).unwrap();

    let still = swayed_slot_pos(&tree, slot, 0.0, 0.0);
    let moved = swayed_slot_pos(&tree, slot, 3.1, 0.0);
    // Offset from rest equals the accumulated ancestor deltas, so the slot
    // drifts over time but stays anchored near its rest position.
    assert_ne!(still, moved);
    let max_drift: f64 = slot
        .branch_path
        .iter()
        .map(|&id| f64::from(tree.branch(id).depth) * 0.4 * 1.35)
        .sum();
    assert!((moved - slot.pos).hypot() <= max_drift + 1e-6);
}

#[test]
fn sway_is_a_pure_function_of_time() {
    let tree = generate(42);
    let slot = &tree.slots[10];
    let a = swayed_slot_pos(&tree, slot, 5.0, 0.7);
    let b = swayed_slot_pos(&tree, slot, 5.0, 0.7);
    assert_eq!(a, b);
}
