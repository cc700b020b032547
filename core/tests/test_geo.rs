use rungraph_core::GeoPoint;

#[test]
fn test_distance_one_degree_lon_at_equator() {
    let a = GeoPoint::new(0.0, 0.0, 0.0);
    let b = GeoPoint::new(0.0, 1.0, 0.0);
    // meter per grad lengdegrad ved ekvator: 111412.84 - 93.5 + 0.118
    let expected = 111_319.458;
    assert!((a.distance_m(&b) - expected).abs() < 1e-6);
}

#[test]
fn test_distance_latitude_step_at_mid_latitude() {
    let a = GeoPoint::new(45.0, 0.0, 0.0);
    let b = GeoPoint::new(45.001, 0.0, 0.0);
    // ~111.13 m per tusendels grad breddegrad rundt 45°
    let d = a.distance_m(&b);
    assert!((d - 111.1317).abs() < 0.01);
}

#[test]
fn test_distance_is_symmetric() {
    let a = GeoPoint::new(38.7, -9.1, 12.0);
    let b = GeoPoint::new(38.8, -9.2, 30.0);
    assert_eq!(a.distance_m(&b), b.distance_m(&a));
}

#[test]
fn test_distance_zero_for_same_point() {
    let a = GeoPoint::new(38.7, -9.1, 12.0);
    assert_eq!(a.distance_m(&a), 0.0);
}

#[test]
fn test_elevation_does_not_affect_distance() {
    let a = GeoPoint::new(0.0, 0.0, 0.0);
    let b = GeoPoint::new(0.0, 0.01, 500.0);
    let c = GeoPoint::new(0.0, 0.01, 0.0);
    assert_eq!(a.distance_m(&b), a.distance_m(&c));
}
