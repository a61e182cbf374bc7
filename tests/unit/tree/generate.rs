use super::*;

#[test]
fn same_seed_is_bit_identical() {
    let a = generate(42);
    let b = generate(42);
    let ja = serde_json::to_string(&a).unwrap();
    let jb = serde_json::to_string(&b).unwrap();
    assert_eq!(ja, jb);
}

#[test]
fn different_seeds_differ() {
    let a = generate(1);
    let b = generate(2);
    assert_ne!(
        serde_json::to_string(&a.branches).unwrap(),
        serde_json::to_string(&b.branches).unwrap()
    );
}

#[test]
fn trunk_shape() {
    let tree = generate(42);
    let trunk = tree.branch(tree.root);
    assert_eq!(trunk.depth, 0);
    assert_eq!(trunk.start, Point::new(500.0, 780.0));
    assert!(trunk.main_branch.is_none());
    assert_eq!(trunk.children.len(), 5);
    // Trunk grows straight up on the y-down canvas.
    assert!(trunk.end.y < trunk.start.y);
    assert!((trunk.length - 154.0).abs() < 1e-9);
}

#[test]
fn five_main_branches_tagged_in_order() {
    let tree = generate(42);
    let trunk = tree.branch(tree.root);
    for (i, &child) in trunk.children.iter().enumerate() {
        assert_eq!(tree.branch(child).main_branch, Some(i));
    }
}

#[test]
fn depth_increases_and_thickness_decreases_down_the_tree() {
    let tree = generate(42);
    for branch in &tree.branches {
        for &child_id in &branch.children {
            let child = tree.branch(child_id);
            assert_eq!(child.depth, branch.depth + 1);
            assert!(child.thickness < branch.thickness);
            // Children tags inherit from the parent chain.
            if branch.depth >= 1 {
                assert_eq!(child.main_branch, branch.main_branch);
            }
        }
    }
}

#[test]
fn depth_never_exceeds_max() {
    let tree = generate(42);
    assert!(tree.branches.iter().all(|b| b.depth <= MAX_DEPTH));
    assert_eq!(
        tree.branches.iter().map(|b| b.depth).max(),
        Some(MAX_DEPTH)
    );
}

#[test]
fn scattered_slots_stay_inside_parametric_band() {
    let tree = generate(42);
    for slot in &tree.slots {
        assert!((0.15..=1.0).contains(&slot.branch_t));
        if slot.branch_t > 0.95 {
            // Only terminal tip slots sit past the scatter band.
            assert_eq!(slot.depth, MAX_DEPTH);
            assert_eq!(slot.branch_t, 1.0);
        }
    }
}

#[test]
fn deeper_branches_carry_more_slots() {
    let tree = generate(42);
    let count_at = |d: u32| tree.slots.iter().filter(|s| s.depth == d).count();
    // 5 + depth * 5 slots per branch, and branch counts double per level.
    assert!(count_at(2) > count_at(1));
    assert!(count_at(4) > count_at(2));
}

#[test]
fn tree_starts_with_one_active_branch_and_no_occupancy() {
    let tree = generate(42);
    assert_eq!(tree.active_branches, 1);
    assert!(tree.slots.iter().all(|s| !s.occupied && !s.reserved));
    assert!(!tree.chart_mode);
    assert!(!tree.screensaver_mode);
    assert_eq!(tree.chart_blend, 0.0);
    assert_eq!(tree.screensaver_blend, 0.0);
}

#[test]
fn branch_paths_lead_from_root_to_slot_branch() {
    let tree = generate(42);
    for slot in &tree.slots {
        assert_eq!(slot.branch_path.first(), Some(&tree.root));
        let last = *slot.branch_path.last().unwrap();
        assert_eq!(tree.branch(last).depth, slot.depth);
        for pair in slot.branch_path.windows(2) {
            assert!(tree.branch(pair[0]).children.contains(&pair[1]));
        }
    }
}
