use super::*;
use crate::tree::generate::generate;

#[test]
fn growth_rule_boundaries() {
    assert_eq!(active_branches_for(0), 1);
    assert_eq!(active_branches_for(99), 1);
    assert_eq!(active_branches_for(100), 2);
    assert_eq!(active_branches_for(399), 4);
    assert_eq!(active_branches_for(400), 5);
    assert_eq!(active_branches_for(10_000), 5);
}

#[test]
fn available_slot_respects_active_branch_gate() {
    let tree = generate(42);
    let mut rng = SeededRng::new(1);
    for _ in 0..200 {
        let id = find_available_slot(&tree, &mut rng).unwrap();
        let slot = tree.slot(id);
        assert!(slot.main_branch.is_none_or(|i| i < tree.active_branches));
    }
}

#[test]
fn available_slot_skips_occupied_and_reserved() {
    let mut tree = generate(42);
    for slot in &mut tree.slots {
        match slot.main_branch {
            Some(0) => slot.occupied = true,
            None => slot.reserved = true,
            _ => {}
        }
    }
    let mut rng = SeededRng::new(1);
    assert!(find_available_slot(&tree, &mut rng).is_none());
}

#[test]
fn selection_order_is_reproducible() {
    let tree = generate(42);
    let mut a = SeededRng::new(9);
    let mut b = SeededRng::new(9);
    for _ in 0..50 {
        assert_eq!(
            find_available_slot(&tree, &mut a),
            find_available_slot(&tree, &mut b)
        );
    }
}

#[test]
fn nearest_slot_minimizes_distance() {
    let tree = generate(42);
    let p = Point::new(520.0, 600.0);
    let nearest = find_nearest_slot(&tree, p).unwrap();
    let best = dist(p, tree.slot(nearest).pos);
    for slot in &tree.slots {
        if slot.selectable(tree.active_branches) {
            assert!(dist(p, slot.pos) >= best);
        }
    }
}

#[test]
fn occupied_count_tracks_flags() {
    let mut tree = generate(42);
    assert_eq!(occupied_count(&tree), 0);
    tree.slots[0].occupied = true;
    tree.slots[5].occupied = true;
    assert_eq!(occupied_count(&tree), 2);
}
