use once_cell::sync::Lazy;
use prometheus::{IntCounter, Registry};

/// Prosess-globale tellere for motoren. Registreres én gang i et eget
/// registry som kan eksponeres av et ytre driverlag.
pub struct Metrics {
    pub registry: Registry,
    pub distance_passes: IntCounter,
    pub elevation_passes: IntCounter,
    pub speed_passes: IntCounter,
    pub series_produced: IntCounter,
    pub laps_extracted: IntCounter,
}

impl Metrics {
    fn new() -> Self {
        let registry = Registry::new();
        let distance_passes = IntCounter::new(
            "rungraph_distance_passes_total",
            "antall kjørte distansepass",
        )
        .expect("gyldig tellernavn");
        let elevation_passes = IntCounter::new(
            "rungraph_elevation_passes_total",
            "antall kjørte høydepass",
        )
        .expect("gyldig tellernavn");
        let speed_passes =
            IntCounter::new("rungraph_speed_passes_total", "antall kjørte fartspass")
                .expect("gyldig tellernavn");
        let series_produced =
            IntCounter::new("rungraph_series_produced_total", "antall produserte serier")
                .expect("gyldig tellernavn");
        let laps_extracted =
            IntCounter::new("rungraph_laps_extracted_total", "antall ekstraherte runder")
                .expect("gyldig tellernavn");

        registry
            .register(Box::new(distance_passes.clone()))
            .expect("teller registrert én gang");
        registry
            .register(Box::new(elevation_passes.clone()))
            .expect("teller registrert én gang");
        registry
            .register(Box::new(speed_passes.clone()))
            .expect("teller registrert én gang");
        registry
            .register(Box::new(series_produced.clone()))
            .expect("teller registrert én gang");
        registry
            .register(Box::new(laps_extracted.clone()))
            .expect("teller registrert én gang");

        Self {
            registry,
            distance_passes,
            elevation_passes,
            speed_passes,
            series_produced,
            laps_extracted,
        }
    }
}

static METRICS: Lazy<Metrics> = Lazy::new(Metrics::new);

pub fn global() -> &'static Metrics {
    &METRICS
}

pub fn distance_passes_total() -> &'static IntCounter {
    &METRICS.distance_passes
}

pub fn elevation_passes_total() -> &'static IntCounter {
    &METRICS.elevation_passes
}

pub fn speed_passes_total() -> &'static IntCounter {
    &METRICS.speed_passes
}

pub fn series_produced_total() -> &'static IntCounter {
    &METRICS.series_produced
}

pub fn laps_extracted_total() -> &'static IntCounter {
    &METRICS.laps_extracted
}
