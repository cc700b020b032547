use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::geo::GeoPoint;
use crate::metrics;
use crate::models::{Segment, TrackPoint};

/// Maks tillatt pace (min/km) i serieproduksjon. Demper ustabilitet når
/// farten er 0 eller svært nær 0 (f.eks. GPS på pause).
pub const MAXIMUM_PACE_MIN_KM: f64 = 60.0;
/// ...som impliserer at minste tillatte fart er
pub const MINIMUM_SPEED_MS: f64 = 100.0 / (6.0 * MAXIMUM_PACE_MIN_KM);

/// X-akse for en serie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesArrangement {
    /// Sekunder siden trackens start.
    TimeSeries,
    /// Akkumulert distanse i meter.
    DistanceSeries,
}

/// Y-verdi for en serie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    /// Desimalpace i min/km, klippet til `MAXIMUM_PACE_MIN_KM`.
    Pace,
    /// Fart i km/t.
    SpeedKmh,
    /// Høyde i meter, rett fra punktene.
    Elevation,
}

/// Uttrykk for snittfart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedUnit {
    Pace,
    SpeedKmh,
}

/// Tidsintervall i sekunder mellom to tidsstempler (millisekundoppløsning).
pub(crate) fn elapsed_seconds(later: DateTime<Utc>, earlier: DateTime<Utc>) -> f64 {
    later.signed_duration_since(earlier).num_milliseconds() as f64 / 1000.0
}

/// Track: ordnet sekvens av segmenter. Eier punktene og alle passene som
/// beregner de avledede feltene.
///
/// Passene går gjennom punktene i segmentrekkefølge og bærer "siste punkt i
/// forrige segment" over segmentgrensene, slik at distanse/høyde/fart
/// akkumulerer kontinuerlig uavhengig av segmentering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub segments: Vec<Segment>,
}

impl Track {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Feiler raskt hvis tracken er tom eller et segment har under 2 punkter.
    /// Kalles ved inngangen til alle operasjoner som trenger invarianten.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.segments.is_empty() {
            return Err(EngineError::EmptyTrack);
        }
        for (index, segment) in self.segments.iter().enumerate() {
            if segment.points.len() < 2 {
                return Err(EngineError::ShortSegment {
                    index,
                    points: segment.points.len(),
                });
            }
        }
        Ok(())
    }

    pub fn point_count(&self) -> usize {
        self.segments.iter().map(|s| s.points.len()).sum()
    }

    pub fn start_time(&self) -> Result<DateTime<Utc>, EngineError> {
        self.segments
            .first()
            .and_then(|s| s.points.first())
            .map(|p| p.time)
            .ok_or(EngineError::EmptyTrack)
    }

    pub fn finish_time(&self) -> Result<DateTime<Utc>, EngineError> {
        self.segments
            .last()
            .and_then(|s| s.points.last())
            .map(|p| p.time)
            .ok_or(EngineError::EmptyTrack)
    }

    /// Total tid i sekunder, fra første til siste punkt.
    pub fn total_time_s(&self) -> Result<f64, EngineError> {
        Ok(elapsed_seconds(self.finish_time()?, self.start_time()?))
    }

    /// Akkumulert distanse (meter) for hvert punkt. Første punkt får 0;
    /// hvert senere punkt får forgjengerens verdi pluss geodetisk avstand
    /// til forgjengeren, også over segmentgrenser.
    pub fn compute_accumulated_distance(&mut self) -> Result<(), EngineError> {
        self.validate()?;
        let mut carry: Option<(GeoPoint, f64)> = None; // siste punkt i forrige segment
        for segment in &mut self.segments {
            for point in &mut segment.points {
                let acc = match carry {
                    None => 0.0,
                    Some((prev_geo, prev_acc)) => prev_acc + point.geo.distance_m(&prev_geo),
                };
                point.accumulated_distance_m = Some(acc);
                carry = Some((point.geo, acc));
            }
        }
        metrics::distance_passes_total().inc();
        debug!("distansepass fullført for {} punkter", self.point_count());
        Ok(())
    }

    /// Akkumulerte høydemeter (meter) for hvert punkt. Kun positive
    /// høydeendringer teller; nedoverbakke bidrar med 0.
    pub fn compute_accumulated_elevation(&mut self) -> Result<(), EngineError> {
        self.validate()?;
        let mut carry: Option<(f64, f64)> = None; // (høyde, akkumulert) for forrige punkt
        for segment in &mut self.segments {
            for point in &mut segment.points {
                let acc = match carry {
                    None => 0.0,
                    Some((prev_elev, prev_acc)) => {
                        prev_acc + (point.geo.elevation_m - prev_elev).max(0.0)
                    }
                };
                point.accumulated_elevation_m = Some(acc);
                carry = Some((point.geo.elevation_m, acc));
            }
        }
        metrics::elevation_passes_total().inc();
        debug!("høydepass fullført for {} punkter", self.point_count());
        Ok(())
    }

    /// Momentanfart (m/s) for hvert punkt, målt mot forgjengeren. Første
    /// punkt kan ikke måles og arver farten fra punkt to som et korrigerende
    /// sluttsteg.
    pub fn compute_speed(&mut self) -> Result<(), EngineError> {
        self.validate()?;
        let mut carry: Option<(GeoPoint, DateTime<Utc>)> = None;
        for segment in &mut self.segments {
            for point in &mut segment.points {
                point.speed_ms = match carry {
                    None => None, // settes etter passet
                    Some((prev_geo, prev_time)) => {
                        let dist = point.geo.distance_m(&prev_geo);
                        let dt = elapsed_seconds(point.time, prev_time);
                        Some(dist / dt)
                    }
                };
                carry = Some((point.geo, point.time));
            }
        }
        let second_speed = self.segments[0].points[1].speed_ms;
        self.segments[0].points[0].speed_ms = second_speed;
        metrics::speed_passes_total().inc();
        debug!("fartspass fullført for {} punkter", self.point_count());
        Ok(())
    }

    /// Total akkumulert distanse i meter. Kjører distansepasset lat, bare
    /// hvis siste punkt mangler verdi.
    pub fn total_distance_m(&mut self) -> Result<f64, EngineError> {
        self.validate()?;
        if self.last_point()?.accumulated_distance_m.is_none() {
            self.compute_accumulated_distance()?;
        }
        Ok(self.last_point()?.accumulated_distance_m.unwrap_or(0.0))
    }

    /// Totale positive høydemeter. Kjører høydepasset lat.
    pub fn total_ascent_m(&mut self) -> Result<f64, EngineError> {
        self.validate()?;
        if self.last_point()?.accumulated_elevation_m.is_none() {
            self.compute_accumulated_elevation()?;
        }
        Ok(self.last_point()?.accumulated_elevation_m.unwrap_or(0.0))
    }

    /// Snittfart over hele tracken, som pace (min/km) eller km/t.
    pub fn average_speed(&mut self, unit: SpeedUnit) -> Result<f64, EngineError> {
        let distance = self.total_distance_m()?;
        let time = self.total_time_s()?;
        if time <= 0.0 {
            return Err(EngineError::ZeroDuration);
        }
        let v_ms = distance / time;
        Ok(match unit {
            SpeedUnit::Pace => (1.0 / v_ms) * 100.0 / 6.0,
            SpeedUnit::SpeedKmh => v_ms * 3.6,
        })
    }

    /// Produserer en (x, y)-serie over alle punktene, i punktrekkefølge på
    /// tvers av segmenter. Kjører de passene serien trenger.
    pub fn produce_series(
        &mut self,
        arrange_as: SeriesArrangement,
        data_kind: SeriesKind,
    ) -> Result<Vec<(f64, f64)>, EngineError> {
        self.validate()?;
        if arrange_as == SeriesArrangement::DistanceSeries {
            self.compute_accumulated_distance()?;
        }
        if matches!(data_kind, SeriesKind::Pace | SeriesKind::SpeedKmh) {
            self.compute_speed()?;
        }
        let start = self.start_time()?;
        let mut result = Vec::with_capacity(self.point_count());
        for segment in &self.segments {
            for point in &segment.points {
                let x = match arrange_as {
                    SeriesArrangement::TimeSeries => elapsed_seconds(point.time, start),
                    SeriesArrangement::DistanceSeries => {
                        point.accumulated_distance_m.unwrap_or(0.0)
                    }
                };
                let y = match data_kind {
                    SeriesKind::Pace => {
                        let speed = point.speed_ms.unwrap_or(0.0);
                        if speed > MINIMUM_SPEED_MS {
                            (1.0 / speed) * 100.0 / 6.0
                        } else {
                            MAXIMUM_PACE_MIN_KM
                        }
                    }
                    SeriesKind::SpeedKmh => point.speed_ms.unwrap_or(0.0) * 3.6,
                    SeriesKind::Elevation => point.geo.elevation_m,
                };
                result.push((x, y));
            }
        }
        metrics::series_produced_total().inc();
        Ok(result)
    }

    /// (lon, lat)-par for alle punktene, for kartaktige plott.
    pub fn produce_xy(&self) -> Vec<(f64, f64)> {
        let mut result = Vec::with_capacity(self.point_count());
        for segment in &self.segments {
            for point in &segment.points {
                result.push((point.geo.lon, point.geo.lat));
            }
        }
        result
    }

    /// Flater tracken ut til én punktliste i trackrekkefølge. Distansepasset
    /// kjøres først, slik at akkumulert distanse alltid er satt på kopiene.
    pub fn serialized(&mut self) -> Result<Vec<TrackPoint>, EngineError> {
        self.compute_accumulated_distance()?;
        let mut result = Vec::with_capacity(self.point_count());
        for segment in &self.segments {
            result.extend(segment.points.iter().cloned());
        }
        Ok(result)
    }

    /// Ny track uten punktene innenfor en sirkel rundt (center_lat,
    /// center_lon), f.eks. rundt hjemmeadresse. Segmenter som ender opp med
    /// under 2 punkter beholdes ikke. Avledede felter nullstilles på kopiene
    /// siden de ikke lenger gjelder i den nye tracken.
    pub fn hide_within_radius(&self, center_lat: f64, center_lon: f64, radius_m: f64) -> Track {
        let center = GeoPoint::new(center_lat, center_lon, 0.0); // høyde irrelevant
        let mut segments = Vec::new();
        for segment in &self.segments {
            let mut kept = Vec::new();
            for point in &segment.points {
                if point.geo.distance_m(&center) > radius_m {
                    let mut copy = point.clone();
                    copy.accumulated_distance_m = None;
                    copy.accumulated_elevation_m = None;
                    copy.speed_ms = None;
                    kept.push(copy);
                }
            }
            if kept.len() > 1 {
                segments.push(Segment::new(kept));
            }
        }
        Track::new(segments)
    }

    fn last_point(&self) -> Result<&TrackPoint, EngineError> {
        self.segments
            .last()
            .and_then(|s| s.points.last())
            .ok_or(EngineError::EmptyTrack)
    }
}
