use rungraph_core::{analyze_laps_json, track_from_json, EngineError};
use serde_json::json;

const M_PER_DEG_LON: f64 = 111_319.458;

/// Jevn track som JSON: 26 punkter, 100 m og 30 s mellomrom, ett segment.
fn make_track_json() -> String {
    let points: Vec<_> = (0..26)
        .map(|i| {
            json!({
                "lat": 0.0,
                "lon": i as f64 * 100.0 / M_PER_DEG_LON,
                "ele": 0.0,
                "time": format!("2019-04-07T09:{:02}:{:02}Z", (i * 30) / 60, (i * 30) % 60),
            })
        })
        .collect();
    serde_json::to_string(&json!([points])).unwrap()
}

#[test]
fn smoke_auto_distance_report() {
    let cfg = json!({ "policy": "auto_distance", "split_value": 999.5 });
    let out = analyze_laps_json(&make_track_json(), Some(&cfg.to_string())).unwrap();

    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!((v["total_distance_m"].as_f64().unwrap() - 2500.0).abs() < 1e-3);
    assert_eq!(v["total_time"], "0:12:30");
    let laps = v["laps"].as_array().unwrap();
    assert_eq!(laps.len(), 3);
    assert_eq!(laps[0]["lap_number"], 1);
    assert_eq!(laps[0]["pace"], "5:00/km");
    assert!((laps[1]["starting_distance_m"].as_f64().unwrap() - 1000.0).abs() < 1e-3);
}

#[test]
fn smoke_default_cfg_uses_auto_distance() {
    // uten config: autorunder på 998.03 m
    let out = analyze_laps_json(&make_track_json(), None).unwrap();
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["laps"].as_array().unwrap().len(), 3);
}

#[test]
fn smoke_time_marker_report() {
    let cfg = json!({ "policy": "time_markers", "markers": [120.0, 480.0, 1000.0] });
    let out = analyze_laps_json(&make_track_json(), Some(&cfg.to_string())).unwrap();
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    let laps = v["laps"].as_array().unwrap();
    assert_eq!(laps.len(), 3);
    assert!((laps[0]["time_s"].as_f64().unwrap() - 120.0).abs() < 1e-9);
}

#[test]
fn test_tolerant_field_aliases_and_default_elevation() {
    // feltnavn fra en annen kilde + manglende høyde => 0
    let raw = json!([[
        { "latitude": 0.0, "longitude": 0.0, "timestamp": "2019-04-07T09:00:00Z" },
        { "latitude": 0.0, "longitude": 0.001, "elevation": 25.0,
          "timestamp": "2019-04-07T09:00:30Z" },
    ]])
    .to_string();
    let track = track_from_json(&raw).unwrap();
    assert_eq!(track.point_count(), 2);
    assert_eq!(track.segments[0].points[0].geo.elevation_m, 0.0);
    assert_eq!(track.segments[0].points[1].geo.elevation_m, 25.0);
}

#[test]
fn test_parse_error_names_json_path() {
    let raw = r#"[[{ "lat": "ikke et tall", "lon": 0.0, "time": "2019-04-07T09:00:00Z" }]]"#;
    match track_from_json(raw) {
        Err(EngineError::Parse(msg)) => assert!(msg.contains("lat"), "melding: {}", msg),
        other => panic!("forventet parsefeil, fikk {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_empty_track_json_is_rejected() {
    assert!(matches!(
        track_from_json("[]"),
        Err(EngineError::EmptyTrack)
    ));
}

#[test]
fn test_bad_marker_cfg_is_rejected() {
    let cfg = json!({ "policy": "distance_markers", "markers": [500.0, 400.0, 2600.0] });
    assert!(matches!(
        analyze_laps_json(&make_track_json(), Some(&cfg.to_string())),
        Err(EngineError::MarkersNotIncreasing { .. })
    ));
}
