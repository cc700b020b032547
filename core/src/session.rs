//! JSON-grensen mot parser- og driversiden: tolerant inngang for ferdig
//! parsede trackpunkter, og en JSON-inn/JSON-ut-analyse for runder.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::EngineError;
use crate::format;
use crate::laps::{LapExtractor, DEFAULT_DISTANCE_SPLIT_M, DEFAULT_TIME_SPLIT_S};
use crate::models::{Segment, TrackPoint};
use crate::track::{SpeedUnit, Track};
use crate::types::{LapSummary, SplitCfg, SplitPolicy, TrackReport};

/// Tolerant punktrepresentasjon. Høyde mangler ofte i kilden og behandles
/// da som 0.
#[derive(Debug, Deserialize)]
struct PointIn {
    #[serde(alias = "latitude")]
    lat: f64,
    #[serde(alias = "longitude")]
    lon: f64,
    #[serde(default, alias = "elevation", alias = "elevation_m")]
    ele: f64,
    #[serde(alias = "timestamp")]
    time: DateTime<Utc>,
}

/// Leser en track fra JSON: en liste av segmenter, hvert segment en liste
/// punkter. Feilmeldinger peker på JSON-stien som feilet.
pub fn track_from_json(track_json: &str) -> Result<Track, EngineError> {
    let de = &mut serde_json::Deserializer::from_str(track_json);
    let segments: Vec<Vec<PointIn>> = serde_path_to_error::deserialize(de).map_err(|e| {
        let path = e.path().to_string();
        EngineError::Parse(format!("{}: {}", path, e.into_inner()))
    })?;
    let segments = segments
        .into_iter()
        .map(|points| {
            Segment::new(
                points
                    .into_iter()
                    .map(|p| TrackPoint::new(p.lat, p.lon, p.ele, p.time))
                    .collect(),
            )
        })
        .collect();
    let track = Track::new(segments);
    track.validate()?;
    Ok(track)
}

/// JSON-inn/JSON-ut: bygger en `TrackReport` fra track-JSON og en valgfri
/// splittconfig. Uten config brukes distansebaserte autorunder med
/// standardintervall.
pub fn analyze_laps_json(
    track_json: &str,
    cfg_json: Option<&str>,
) -> Result<String, EngineError> {
    let cfg: SplitCfg = match cfg_json {
        None => SplitCfg::default(),
        Some(raw) => {
            let de = &mut serde_json::Deserializer::from_str(raw);
            serde_path_to_error::deserialize(de).map_err(|e| {
                let path = e.path().to_string();
                EngineError::Parse(format!("{}: {}", path, e.into_inner()))
            })?
        }
    };

    let mut track = track_from_json(track_json)?;
    let extractor = LapExtractor::new(&mut track)?;
    let laps = match cfg.policy {
        SplitPolicy::AutoDistance => {
            extractor.auto_laps_by_distance(cfg.split_value.unwrap_or(DEFAULT_DISTANCE_SPLIT_M))?
        }
        SplitPolicy::AutoTime => {
            extractor.auto_laps_by_time(cfg.split_value.unwrap_or(DEFAULT_TIME_SPLIT_S))?
        }
        SplitPolicy::DistanceMarkers => {
            extractor.laps_from_distance_markers(cfg.markers.as_deref().unwrap_or(&[]))?
        }
        SplitPolicy::TimeMarkers => {
            extractor.laps_from_time_markers(cfg.markers.as_deref().unwrap_or(&[]))?
        }
    };

    let mut summaries = Vec::with_capacity(laps.len());
    for mut lap in laps {
        let avg_pace = lap.average_speed(SpeedUnit::Pace)?;
        summaries.push(LapSummary {
            lap_number: lap.lap_number(),
            starting_distance_m: lap.starting_distance_m(),
            distance_m: lap.total_distance_m()?,
            time_s: lap.total_time_s()?,
            avg_pace_min_km: avg_pace,
            pace: format::pace_decimal_minutes_to_min_sec(avg_pace),
        });
    }

    let total_time_s = track.total_time_s()?;
    let report = TrackReport {
        total_distance_m: track.total_distance_m()?,
        total_time_s,
        total_time: format::seconds_to_hours_min_sec(total_time_s),
        total_ascent_m: track.total_ascent_m()?,
        laps: summaries,
    };
    serde_json::to_string(&report).map_err(|e| EngineError::Serialize(e.to_string()))
}
