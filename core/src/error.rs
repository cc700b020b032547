use thiserror::Error;

/// Feiltyper for motoren. Hvert kontraktsbrudd feiler raskt ved inngangen
/// til operasjonen som først trenger invarianten; ingen delresultater
/// returneres ved feil.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("track har ingen segmenter")]
    EmptyTrack,

    #[error("segment {index} har {points} punkt(er), minst 2 kreves")]
    ShortSegment { index: usize, points: usize },

    #[error("total tid er 0 sekunder")]
    ZeroDuration,

    #[error("split-verdi må være positiv, fikk {value}")]
    NonPositiveSplit { value: f64 },

    #[error("marker-listen er tom")]
    EmptyMarkers,

    #[error("marker-listen er ikke strengt stigende ved indeks {index}")]
    MarkersNotIncreasing { index: usize },

    #[error("første marker må være > 0, fikk {value}")]
    NonPositiveMarker { value: f64 },

    #[error("siste marker ({last}) dekker ikke hele tracken ({required})")]
    MarkersEndShort { last: f64, required: f64 },

    #[error("to rundegrenser falt på samme punktindeks {index}")]
    DegenerateBoundary { index: usize },

    #[error("glattevindu må være minst 1")]
    InvalidWindow,

    #[error("glattevindu {n} er større enn serien ({len} punkter)")]
    WindowExceedsSeries { n: usize, len: usize },

    #[error("ugyldig track-JSON: {0}")]
    Parse(String),

    #[error("kunne ikke serialisere rapport: {0}")]
    Serialize(String),
}
