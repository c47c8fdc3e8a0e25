use super::*;

fn sample(x: f64, y: f64) -> Sample {
    Sample {
        position: Point::new(x, y),
        heading: 0.0,
    }
}

#[test]
fn idle_anchor_records_a_single_sample() {
    let mut h = PointHistory::new(16);
    for _ in 0..100 {
        h.push_if_moved(sample(5.0, 5.0), 0.5);
    }
    assert_eq!(h.len(), 1);
}

#[test]
fn moves_within_epsilon_are_filtered() {
    let mut h = PointHistory::new(16);
    assert!(h.push_if_moved(sample(0.0, 0.0), 1.0));
    assert!(!h.push_if_moved(sample(0.5, 0.0), 1.0));
    assert!(h.push_if_moved(sample(2.0, 0.0), 1.0));
    assert_eq!(h.len(), 2);
}

#[test]
fn idle_updates_keep_heading_current() {
    let mut h = PointHistory::new(4);
    h.push_if_moved(sample(0.0, 0.0), 0.1);
    h.push_if_moved(
        Sample {
            position: Point::new(0.0, 0.0),
            heading: 1.25,
        },
        0.1,
    );
    assert_eq!(h.newest().map(|s| s.heading), Some(1.25));
}

#[test]
fn overflow_evicts_oldest_without_growing() {
    let mut h = PointHistory::new(3);
    for i in 0..10 {
        h.push_if_moved(sample(i as f64 * 10.0, 0.0), 0.0);
    }
    assert_eq!(h.len(), 3);
    assert_eq!(h.capacity(), 3);

    let mut out = Vec::new();
    h.positions_into(&mut out);
    // Head first.
    assert_eq!(
        out,
        vec![
            Point::new(90.0, 0.0),
            Point::new(80.0, 0.0),
            Point::new(70.0, 0.0)
        ]
    );

    assert_eq!(h.retire_oldest().map(|s| s.position.x), Some(70.0));
    assert_eq!(h.len(), 2);
}

#[test]
fn segment_points_are_evenly_spaced() {
    let mut out = Vec::new();
    segment_points(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 5, &mut out).unwrap();
    assert_eq!(out.len(), 5);
    assert_eq!(out[2], Point::new(50.0, 0.0));
    assert_eq!(out[4], Point::new(100.0, 0.0));
    assert!(segment_points(Point::ORIGIN, Point::ORIGIN, 1, &mut out).is_err());
}

#[test]
fn arc_points_lie_on_the_circle() {
    let mut out = Vec::new();
    let c = Point::new(10.0, 10.0);
    arc_points(c, 0.0, std::f64::consts::PI, 5.0, 9, &mut out).unwrap();
    assert_eq!(out.len(), 9);
    for p in &out {
        assert!((p.distance(c) - 5.0).abs() < 1e-9);
    }
    assert!((out[0].x - 15.0).abs() < 1e-9);
    assert!((out[8].x - 5.0).abs() < 1e-9);
    assert!(arc_points(c, 0.0, 1.0, -1.0, 4, &mut out).is_err());
}

#[test]
fn frames_use_central_difference_and_perpendicular() {
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
    ];
    let f0 = resolve_frame(&pts, 0, Vec2::new(1.0, 0.0));
    assert_eq!(f0.tangent, Vec2::new(1.0, 0.0));
    assert_eq!(f0.normal, Vec2::new(0.0, 1.0));
    assert_eq!(f0.ratio, 0.0);

    let f1 = resolve_frame(&pts, 1, Vec2::new(1.0, 0.0));
    let s = std::f64::consts::FRAC_1_SQRT_2;
    assert!((f1.tangent.x - s).abs() < 1e-12 && (f1.tangent.y - s).abs() < 1e-12);
    assert_eq!(f1.ratio, 0.5);

    let f2 = resolve_frame(&pts, 2, Vec2::new(1.0, 0.0));
    assert_eq!(f2.tangent, Vec2::new(0.0, 1.0));
    assert_eq!(f2.ratio, 1.0);
}

#[test]
fn zero_length_steps_use_fallback_tangent() {
    let pts = [Point::new(3.0, 3.0), Point::new(3.0, 3.0)];
    let f = resolve_frame(&pts, 0, Vec2::new(0.0, -1.0));
    assert_eq!(f.tangent, Vec2::new(0.0, -1.0));
    assert_eq!(f.normal, Vec2::new(1.0, 0.0));
}
