//! RunGraph-kjernen: avledede metrikker per trackpunkt (akkumulert distanse,
//! høydemeter, momentanfart), rundesplitting etter fire politikker, og
//! glattede/formaterte serier for rapportering og plotting.
//!
//! GPX-parsing og rendering ligger utenfor; inngangen er en ferdig bygget
//! `Track`, utgangen er (x, y)-serier, `Lap`-objekter og formaterte strenger.

pub mod cli;
pub mod error;
pub mod format;
pub mod geo;
pub mod laps;
pub mod metrics;
pub mod models;
pub mod session;
pub mod smoothing;
pub mod storage;
pub mod track;
pub mod types;

// Re-eksporter for de vanligste inngangene
pub use error::EngineError;
pub use format::{pace_decimal_minutes_to_min_sec, seconds_to_hours_min_sec};
pub use geo::GeoPoint;
pub use laps::{Lap, LapExtractor, MeasureAlong, DEFAULT_DISTANCE_SPLIT_M, DEFAULT_TIME_SPLIT_S};
pub use models::{Segment, TrackPoint};
pub use session::{analyze_laps_json, track_from_json};
pub use smoothing::filter_series;
pub use storage::{load_track, save_track};
pub use track::{
    SeriesArrangement, SeriesKind, SpeedUnit, Track, MAXIMUM_PACE_MIN_KM, MINIMUM_SPEED_MS,
};
pub use types::{LapSummary, SplitCfg, SplitPolicy, TrackReport};
