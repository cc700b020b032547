use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// Trackpunkt: geodetisk punkt + tidsstempel + tre avledede felter.
///
/// De avledede feltene starter som `None` og fylles av passene i `Track`.
/// Et pass regner alltid om alle punktene når det kjøres; `None`-tilstanden
/// skiller "ikke beregnet" fra "beregnet".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub geo: GeoPoint,
    pub time: DateTime<Utc>,
    #[serde(default)]
    pub accumulated_distance_m: Option<f64>,
    #[serde(default)]
    pub accumulated_elevation_m: Option<f64>,
    #[serde(default)]
    pub speed_ms: Option<f64>, // m/s
}

impl TrackPoint {
    pub fn new(lat: f64, lon: f64, elevation_m: f64, time: DateTime<Utc>) -> Self {
        Self {
            geo: GeoPoint::new(lat, lon, elevation_m),
            time,
            accumulated_distance_m: None,
            accumulated_elevation_m: None,
            speed_ms: None,
        }
    }
}

/// Sammenhengende sekvens av trackpunkter. Segmenter er et GPX-artefakt fra
/// pause/resume; innsettingsrekkefølge = tidsrekkefølge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub points: Vec<TrackPoint>,
}

impl Segment {
    pub fn new(points: Vec<TrackPoint>) -> Self {
        Self { points }
    }
}
