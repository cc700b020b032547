use chrono::{DateTime, Duration, TimeZone, Utc};
use rungraph_core::{EngineError, Segment, SpeedUnit, Track, TrackPoint};

// meter per grad lengdegrad ved ekvator (alle testpunkter ligger på lat 0)
const M_PER_DEG_LON: f64 = 111_319.458;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2019, 4, 7, 9, 0, 0).unwrap()
}

fn point(distance_m: f64, elevation_m: f64, at_s: i64) -> TrackPoint {
    TrackPoint::new(
        0.0,
        distance_m / M_PER_DEG_LON,
        elevation_m,
        t0() + Duration::seconds(at_s),
    )
}

/// Jevn track på ekvator: punkter med `spacing_m` mellomrom, `dt_s` sekunder
/// per steg, alt i ett segment.
fn make_uniform_track(spacing_m: f64, dt_s: i64, n: usize) -> Track {
    let points = (0..n)
        .map(|i| point(i as f64 * spacing_m, 0.0, i as i64 * dt_s))
        .collect();
    Track::new(vec![Segment::new(points)])
}

#[test]
fn test_two_point_track_totals() {
    // 1000 m på 300 s
    let mut track = make_uniform_track(1000.0, 300, 2);
    assert!((track.total_distance_m().unwrap() - 1000.0).abs() < 1e-6);
    assert!((track.total_time_s().unwrap() - 300.0).abs() < 1e-9);
    let kmh = track.average_speed(SpeedUnit::SpeedKmh).unwrap();
    assert!((kmh - 12.0).abs() < 1e-6);
    let pace = track.average_speed(SpeedUnit::Pace).unwrap();
    assert!((pace - 5.0).abs() < 1e-6);
}

#[test]
fn test_accumulated_distance_continuous_across_segments() {
    // to segmenter, men avstanden skal akkumulere som om tracken var hel
    let seg1 = Segment::new(vec![point(0.0, 0.0, 0), point(100.0, 0.0, 30)]);
    let seg2 = Segment::new(vec![point(200.0, 0.0, 60), point(300.0, 0.0, 90)]);
    let mut track = Track::new(vec![seg1, seg2]);
    track.compute_accumulated_distance().unwrap();

    let acc: Vec<f64> = track
        .segments
        .iter()
        .flat_map(|s| s.points.iter())
        .map(|p| p.accumulated_distance_m.unwrap())
        .collect();
    assert_eq!(acc.len(), 4);
    for (i, expected) in [0.0, 100.0, 200.0, 300.0].iter().enumerate() {
        assert!((acc[i] - expected).abs() < 1e-6, "punkt {}: {}", i, acc[i]);
    }
}

#[test]
fn test_accumulated_elevation_ignores_descent() {
    let seg1 = Segment::new(vec![point(0.0, 100.0, 0), point(100.0, 105.0, 30)]);
    let seg2 = Segment::new(vec![point(200.0, 103.0, 60), point(300.0, 110.0, 90)]);
    let mut track = Track::new(vec![seg1, seg2]);
    // +5, -2 (teller ikke), +7 => 12, også over segmentgrensen
    assert!((track.total_ascent_m().unwrap() - 12.0).abs() < 1e-9);
}

#[test]
fn test_first_point_speed_inherits_second() {
    let mut track = make_uniform_track(100.0, 30, 4);
    track.compute_speed().unwrap();
    let first = track.segments[0].points[0].speed_ms.unwrap();
    let second = track.segments[0].points[1].speed_ms.unwrap();
    assert_eq!(first, second);
    assert!((second - 100.0 / 30.0).abs() < 1e-6);
}

#[test]
fn test_speed_continuous_across_segments() {
    let seg1 = Segment::new(vec![point(0.0, 0.0, 0), point(100.0, 0.0, 30)]);
    let seg2 = Segment::new(vec![point(200.0, 0.0, 60), point(300.0, 0.0, 90)]);
    let mut track = Track::new(vec![seg1, seg2]);
    track.compute_speed().unwrap();
    // første punkt i segment 2 måles mot siste punkt i segment 1
    let boundary_speed = track.segments[1].points[0].speed_ms.unwrap();
    assert!((boundary_speed - 100.0 / 30.0).abs() < 1e-6);
}

#[test]
fn test_totals_are_lazy() {
    let mut track = make_uniform_track(100.0, 30, 3);
    assert!(track.segments[0].points[2].accumulated_distance_m.is_none());
    track.total_distance_m().unwrap();
    assert!(track.segments[0].points[2].accumulated_distance_m.is_some());
}

#[test]
fn test_validate_rejects_empty_track() {
    let mut track = Track::new(vec![]);
    assert!(matches!(
        track.total_distance_m(),
        Err(EngineError::EmptyTrack)
    ));
}

#[test]
fn test_validate_rejects_single_point_segment() {
    let seg1 = Segment::new(vec![point(0.0, 0.0, 0), point(100.0, 0.0, 30)]);
    let seg2 = Segment::new(vec![point(200.0, 0.0, 60)]);
    let mut track = Track::new(vec![seg1, seg2]);
    assert!(matches!(
        track.compute_speed(),
        Err(EngineError::ShortSegment { index: 1, points: 1 })
    ));
}

#[test]
fn test_produce_xy_returns_lon_lat_pairs() {
    let track = make_uniform_track(100.0, 30, 3);
    let xy = track.produce_xy();
    assert_eq!(xy.len(), 3);
    assert_eq!(xy[0], (0.0, 0.0));
    assert!((xy[2].0 - 200.0 / M_PER_DEG_LON).abs() < 1e-12);
}

#[test]
fn test_hide_within_radius_removes_circle() {
    // 6 punkter 0..500 m; sirkel rundt 250 m med radius 120 tar punktene
    // ved 200 og 300
    let track = make_uniform_track(100.0, 30, 6);
    let hidden = track.hide_within_radius(0.0, 250.0 / M_PER_DEG_LON, 120.0);
    assert_eq!(hidden.point_count(), 4);
    assert_eq!(hidden.segments.len(), 1);
}

#[test]
fn test_hide_within_radius_drops_short_segments() {
    let track = make_uniform_track(100.0, 30, 4);
    // stor radius: alle punkter forsvinner, ingen segmenter igjen
    let hidden = track.hide_within_radius(0.0, 0.0, 10_000.0);
    assert_eq!(hidden.segments.len(), 0);
}
