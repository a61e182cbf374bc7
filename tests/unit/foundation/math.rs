use super::*;

#[test]
fn lerp_endpoints() {
    assert_eq!(lerp(2.0, 10.0, 0.0), 2.0);
    assert_eq!(lerp(2.0, 10.0, 1.0), 10.0);
    assert_eq!(lerp(2.0, 10.0, 0.5), 6.0);
}

#[test]
fn map_range_extrapolates() {
    assert_eq!(map_range(0.0, 0.0, 6.0, 8.0, 0.8), 8.0);
    assert_eq!(map_range(6.0, 0.0, 6.0, 8.0, 0.8), 0.8);
    assert!(map_range(12.0, 0.0, 6.0, 8.0, 0.8) < 0.8);
}

#[test]
fn dist_is_euclidean() {
    let d = dist(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
    assert!((d - 5.0).abs() < 1e-12);
}

#[test]
fn quad_point_hits_endpoints() {
    let p0 = Point::new(0.0, 0.0);
    let cp = Point::new(5.0, 10.0);
    let p1 = Point::new(10.0, 0.0);
    assert_eq!(quad_point(p0, cp, p1, 0.0), p0);
    assert_eq!(quad_point(p0, cp, p1, 1.0), p1);
    let mid = quad_point(p0, cp, p1, 0.5);
    assert!((mid.x - 5.0).abs() < 1e-12);
    assert!((mid.y - 5.0).abs() < 1e-12);
}

#[test]
fn quad_len_of_straight_line_is_chord() {
    let p0 = Point::new(0.0, 0.0);
    let p1 = Point::new(10.0, 0.0);
    let cp = Point::new(5.0, 0.0);
    assert!((quad_len(p0, cp, p1) - 10.0).abs() < 1e-9);
}

#[test]
fn quad_len_of_curve_exceeds_chord() {
    let p0 = Point::new(0.0, 0.0);
    let p1 = Point::new(10.0, 0.0);
    let cp = Point::new(5.0, 12.0);
    assert!(quad_len(p0, cp, p1) > 10.0);
}
