use super::*;

fn session(style: StyleConfig) -> PathSession {
    PathSession::new(SessionId(1), OwnerId(7), style)
}

#[test]
fn idle_anchor_records_a_single_sample() {
    let mut s = session(StyleConfig::default());
    let mut appended = 0;
    for _ in 0..100 {
        if s.update(Point::new(40.0, 40.0), 0.0) {
            appended += 1;
        }
        assert!(s.tick());
    }
    assert_eq!(appended, 1);
    assert_eq!(s.history().len(), 1);
    assert_eq!(s.age_ticks(), 100);
}

#[test]
fn end_switches_to_fading_and_ignores_updates() {
    let mut s = session(StyleConfig::default().with_fade_ticks(5));
    s.update(Point::new(0.0, 0.0), 0.0);
    s.update(Point::new(10.0, 0.0), 0.0);
    s.end();
    assert_eq!(s.state(), SessionState::Fading { remaining: 5 });
    assert!(!s.update(Point::new(20.0, 0.0), 0.0));
    assert_eq!(s.history().len(), 2);

    s.end();
    assert_eq!(s.state(), SessionState::Fading { remaining: 5 });
}

#[test]
fn fading_trail_retracts_and_dies_when_points_run_out() {
    let mut s = session(StyleConfig::default().with_fade_ticks(50));
    for i in 0..3 {
        s.update(Point::new(10.0 * i as f64, 0.0), 0.0);
    }
    s.end();
    assert!(s.tick());
    assert_eq!(s.history().len(), 2);
    assert!(s.tick());
    assert!(!s.tick());
}

#[test]
fn fading_ends_no_later_than_the_fade_window() {
    let style = StyleConfig::default()
        .with_fade_ticks(4)
        .with_source(PathSource::Beam { length: 100.0 });
    let mut s = session(style);
    s.update(Point::new(0.0, 0.0), 0.0);
    s.end();
    let mut ticks = 0;
    while s.tick() {
        ticks += 1;
        assert!(ticks < 4);
    }
    assert_eq!(ticks, 3);
}

#[test]
fn history_points_are_newest_first() {
    let mut s = session(StyleConfig::default());
    s.update(Point::new(0.0, 0.0), 0.0);
    s.update(Point::new(5.0, 0.0), 0.0);
    s.update(Point::new(9.0, 3.0), 0.0);
    let mut out = Vec::new();
    s.control_points_into(&mut out).unwrap();
    assert_eq!(
        out,
        vec![Point::new(9.0, 3.0), Point::new(5.0, 0.0), Point::new(0.0, 0.0)]
    );
}

#[test]
fn beam_follows_heading_and_shrinks_while_fading() {
    let mut style = StyleConfig::default().with_source(PathSource::Beam { length: 100.0 });
    style.max_points = 5;
    style.fade_ticks = 4;
    let mut s = session(style);
    let mut out = Vec::new();

    s.control_points_into(&mut out).unwrap();
    assert!(out.is_empty());

    s.update(Point::new(10.0, 10.0), std::f64::consts::FRAC_PI_2);
    s.control_points_into(&mut out).unwrap();
    assert_eq!(out.len(), 5);
    assert_eq!(out[0], Point::new(10.0, 10.0));
    assert!((out[4].x - 10.0).abs() < 1e-9 && (out[4].y - 110.0).abs() < 1e-9);

    s.end();
    s.tick();
    s.control_points_into(&mut out).unwrap();
    assert!((out[4].y - 85.0).abs() < 1e-9);
}
