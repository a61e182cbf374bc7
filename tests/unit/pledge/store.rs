use super::*;

#[test]
fn create_assigns_sequential_ids() {
    let mut store = PledgeStore::new();
    let a = store.create("Ada", PillarId(0), "m", 0.0);
    let b = store.create("Ben", PillarId(1), "", 1.0);
    assert_eq!(a, PledgeId(0));
    assert_eq!(b, PledgeId(1));
    assert_eq!(store.count(), 2);
    assert_eq!(store.get(a).name, "Ada");
    assert_eq!(store.get(b).pillar, PillarId(1));
}

#[test]
fn new_pledges_have_no_slot() {
    let mut store = PledgeStore::new();
    let id = store.create("Ada", PillarId(0), "m", 0.0);
    assert_eq!(store.get(id).slot, None);
    store.get_mut(id).slot = Some(SlotId(7));
    assert_eq!(store.by_slot(SlotId(7)).unwrap().id, id);
    assert!(store.by_slot(SlotId(8)).is_none());
}

#[test]
fn sample_pledges_draw_from_pools_deterministically() {
    let mut rng_a = SeededRng::new(3);
    let mut rng_b = SeededRng::new(3);
    let mut a = PledgeStore::new();
    let mut b = PledgeStore::new();
    for _ in 0..20 {
        let pa = a.create_sample(&mut rng_a, 4, 0.0);
        let pb = b.create_sample(&mut rng_b, 4, 0.0);
        assert_eq!(a.get(pa).name, b.get(pb).name);
        assert_eq!(a.get(pa).pillar, b.get(pb).pillar);
        assert_eq!(a.get(pa).message, b.get(pb).message);
        assert!(a.get(pa).pillar.0 < 4);
    }
}

#[test]
fn iter_preserves_creation_order() {
    let mut store = PledgeStore::new();
    for i in 0..5 {
        store.create(format!("p{i}"), PillarId(0), "", i as f64);
    }
    let names: Vec<&str> = store.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["p0", "p1", "p2", "p3", "p4"]);
}
