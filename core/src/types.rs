use serde::{Deserialize, Serialize};

/// Sammendrag for én runde, klart for rapportering.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LapSummary {
    pub lap_number: u32,
    pub starting_distance_m: f64,
    pub distance_m: f64,
    pub time_s: f64,
    pub avg_pace_min_km: f64,
    /// Formatert som "M:SS/km".
    pub pace: String,
}

/// Rapport for en hel track: totaler pluss rundesammendrag.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrackReport {
    pub total_distance_m: f64,
    pub total_time_s: f64,
    /// Formatert som "H:MM:SS".
    pub total_time: String,
    pub total_ascent_m: f64,
    pub laps: Vec<LapSummary>,
}

/// Splittpolitikk for `analyze_laps_json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitPolicy {
    AutoDistance,
    AutoTime,
    DistanceMarkers,
    TimeMarkers,
}

/// Konfigurasjon for rundesplitting. `split_value` gjelder autopolitikkene
/// (meter hhv. sekunder, med standardverdier når den mangler); `markers`
/// gjelder markørpolitikkene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitCfg {
    pub policy: SplitPolicy,
    #[serde(default)]
    pub split_value: Option<f64>,
    #[serde(default)]
    pub markers: Option<Vec<f64>>,
}

impl Default for SplitCfg {
    fn default() -> Self {
        Self {
            policy: SplitPolicy::AutoDistance,
            split_value: None,
            markers: None,
        }
    }
}
