use super::*;

#[test]
fn same_seed_same_stream() {
    let mut a = SeededRng::new(42);
    let mut b = SeededRng::new(42);
    for _ in 0..100 {
        assert_eq!(a.next(), b.next());
    }
}

#[test]
fn different_seeds_diverge() {
    let mut a = SeededRng::new(1);
    let mut b = SeededRng::new(2);
    let xs: Vec<f64> = (0..10).map(|_| a.next()).collect();
    let ys: Vec<f64> = (0..10).map(|_| b.next()).collect();
    assert_ne!(xs, ys);
}

#[test]
fn next_stays_in_unit_interval() {
    let mut rng = SeededRng::new(7);
    for _ in 0..10_000 {
        let v = rng.next();
        assert!((0.0..1.0).contains(&v), "out of range: {v}");
    }
}

#[test]
fn range_respects_bounds() {
    let mut rng = SeededRng::new(13);
    for _ in 0..1_000 {
        let v = rng.range(-3.0, 8.0);
        assert!((-3.0..8.0).contains(&v));
    }
}

#[test]
fn int_range_is_inclusive() {
    let mut rng = SeededRng::new(99);
    let mut seen = [false; 4];
    for _ in 0..1_000 {
        let v = rng.int_range(0, 3);
        assert!((0..=3).contains(&v));
        seen[v as usize] = true;
    }
    assert!(seen.iter().all(|&s| s), "all values should appear: {seen:?}");
}

#[test]
fn pick_and_index_handle_empty() {
    let mut rng = SeededRng::new(5);
    let empty: [u8; 0] = [];
    assert!(rng.pick(&empty).is_none());
    assert!(rng.index(0).is_none());
    assert!(rng.pick(&[1, 2, 3]).is_some());
    assert!(rng.index(3).unwrap() < 3);
}
