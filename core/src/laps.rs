use std::cmp::Reverse;

use log::info;
use ordered_float::OrderedFloat;

use crate::error::EngineError;
use crate::metrics;
use crate::models::{Segment, TrackPoint};
use crate::smoothing::filter_series;
use crate::track::{elapsed_seconds, SeriesArrangement, SeriesKind, SpeedUnit, Track};

/// Standard splittverdi for distansebaserte autorunder (meter).
pub const DEFAULT_DISTANCE_SPLIT_M: f64 = 998.03;
/// Standard splittverdi for tidsbaserte autorunder (sekunder).
pub const DEFAULT_TIME_SPLIT_S: f64 = 240.0;

/// Måleakse for posisjonen i fastest-/slowest-pace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureAlong {
    /// Akkumulert distanse fra rundens start.
    Distance,
    /// Forløpt tid siden rundens start.
    Time,
}

impl MeasureAlong {
    fn arrangement(self) -> SeriesArrangement {
        match self {
            MeasureAlong::Distance => SeriesArrangement::DistanceSeries,
            MeasureAlong::Time => SeriesArrangement::TimeSeries,
        }
    }
}

/// En runde: sammenhengende utsnitt av en referansetrack, behandlet som sin
/// egen track. Akkumulert distanse er nullstilt ved rundens første punkt;
/// `starting_distance_m` husker hva referansetracken viste der.
#[derive(Debug, Clone)]
pub struct Lap {
    lap_number: u32,
    starting_distance_m: f64,
    track: Track,
}

impl Lap {
    /// Bygger en runde av en punktliste (ett segment). Rundene lages normalt
    /// av `LapExtractor`, som nummererer dem fortløpende fra 1.
    pub fn new(lap_number: u32, starting_distance_m: f64, points: Vec<TrackPoint>) -> Self {
        Self {
            lap_number,
            starting_distance_m,
            track: Track::new(vec![Segment::new(points)]),
        }
    }

    /// Rundens posisjon i sekvensen av runder fra referansetracken.
    pub fn lap_number(&self) -> u32 {
        self.lap_number
    }

    /// Referansetrackens akkumulerte distanse ved rundens første punkt.
    pub fn starting_distance_m(&self) -> f64 {
        self.starting_distance_m
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn track_mut(&mut self) -> &mut Track {
        &mut self.track
    }

    pub fn total_distance_m(&mut self) -> Result<f64, EngineError> {
        self.track.total_distance_m()
    }

    pub fn total_time_s(&self) -> Result<f64, EngineError> {
        self.track.total_time_s()
    }

    pub fn total_ascent_m(&mut self) -> Result<f64, EngineError> {
        self.track.total_ascent_m()
    }

    pub fn average_speed(&mut self, unit: SpeedUnit) -> Result<f64, EngineError> {
        self.track.average_speed(unit)
    }

    pub fn produce_series(
        &mut self,
        arrange_as: SeriesArrangement,
        data_kind: SeriesKind,
    ) -> Result<Vec<(f64, f64)>, EngineError> {
        self.track.produce_series(arrange_as, data_kind)
    }

    /// (posisjon, pace) for raskeste pace i runden, dvs. minste pace-verdi.
    /// Serien glattes med `n_for_average` punkter først; ved likhet vinner
    /// siste forekomst.
    pub fn fastest_pace(
        &mut self,
        n_for_average: usize,
        measure_along: MeasureAlong,
    ) -> Result<(f64, f64), EngineError> {
        let series = self.smoothed_pace_series(n_for_average, measure_along)?;
        // max over Reverse(pace) = minste pace; max_by_key tar siste ved likhet
        series
            .iter()
            .copied()
            .max_by_key(|&(_, pace)| Reverse(OrderedFloat(pace)))
            .ok_or(EngineError::EmptyTrack)
    }

    /// (posisjon, pace) for tregeste pace i runden, dvs. største pace-verdi.
    /// Ved likhet vinner siste forekomst.
    pub fn slowest_pace(
        &mut self,
        n_for_average: usize,
        measure_along: MeasureAlong,
    ) -> Result<(f64, f64), EngineError> {
        let series = self.smoothed_pace_series(n_for_average, measure_along)?;
        series
            .iter()
            .copied()
            .max_by_key(|&(_, pace)| OrderedFloat(pace))
            .ok_or(EngineError::EmptyTrack)
    }

    fn smoothed_pace_series(
        &mut self,
        n_for_average: usize,
        measure_along: MeasureAlong,
    ) -> Result<Vec<(f64, f64)>, EngineError> {
        let series = self
            .track
            .produce_series(measure_along.arrangement(), SeriesKind::Pace)?;
        filter_series(&series, n_for_average)
    }
}

/// Bygger runder fra en referansetrack.
///
/// Referansetracken flates ut til én punktliste ved konstruksjon;
/// distansepasset kjøres da som en bieffekt, så akkumulert distanse er
/// alltid tilgjengelig på punktene. Alle fire politikkene reduserer til en
/// liste grenseindekser som `split` materialiserer til runder.
#[derive(Debug, Clone)]
pub struct LapExtractor {
    points: Vec<TrackPoint>,
}

impl LapExtractor {
    pub fn new(reference: &mut Track) -> Result<Self, EngineError> {
        Ok(Self {
            points: reference.serialized()?,
        })
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    fn acc(&self, index: usize) -> f64 {
        self.points[index].accumulated_distance_m.unwrap_or(0.0)
    }

    /// Autorunder med fast distanseintervall. Distansen akkumuleres fra
    /// rundens eget første punkt, ikke fra trackens start.
    pub fn auto_laps_by_distance(&self, auto_split_m: f64) -> Result<Vec<Lap>, EngineError> {
        if auto_split_m <= 0.0 {
            return Err(EngineError::NonPositiveSplit {
                value: auto_split_m,
            });
        }
        let n = self.points.len();
        let mut boundaries = vec![0usize];
        let mut index = 1;
        while index < n {
            let mut lap_distance = 0.0;
            let initial_acc = self.acc(index - 1);
            while lap_distance < auto_split_m && index < n {
                lap_distance = self.acc(index) - initial_acc;
                index += 1;
            }
            // index - 1 kompenserer for siste inkrement i den indre løkka
            boundaries.push(index - 1);
        }
        self.split(&boundaries)
    }

    /// Autorunder med fast tidsintervall. Tiden måles fra rundens eget
    /// første punkt, ikke fra trackens start.
    pub fn auto_laps_by_time(&self, auto_split_s: f64) -> Result<Vec<Lap>, EngineError> {
        if auto_split_s <= 0.0 {
            return Err(EngineError::NonPositiveSplit {
                value: auto_split_s,
            });
        }
        let n = self.points.len();
        let mut boundaries = vec![0usize];
        let mut index = 1;
        while index < n {
            let mut lap_time = 0.0;
            let initial_time = self.points[index - 1].time;
            while lap_time < auto_split_s && index < n {
                lap_time = elapsed_seconds(self.points[index].time, initial_time);
                index += 1;
            }
            boundaries.push(index - 1);
        }
        self.split(&boundaries)
    }

    /// Runder fra eksplisitte distansemarkører, målt som trackens totale
    /// akkumulerte distanse fra start (ikke rundelokal). Markørene må være
    /// strengt stigende, starte over 0 og dekke hele trackens distanse.
    pub fn laps_from_distance_markers(&self, markers: &[f64]) -> Result<Vec<Lap>, EngineError> {
        let total = self.acc(self.points.len() - 1);
        validate_markers(markers, total)?;
        let n = self.points.len();
        let mut boundaries = vec![0usize];
        let mut index = 1;
        let mut marker_index = 0;
        while index < n && marker_index < markers.len() {
            let next_split = markers[marker_index];
            let mut total_acc = self.acc(index - 1);
            while total_acc < next_split && index < n {
                total_acc = self.acc(index);
                index += 1;
            }
            boundaries.push(index - 1);
            marker_index += 1;
        }
        // en flat hale (ingen distanseøkning) kan la siste punkter stå igjen;
        // de foldes inn i siste runde i stedet for å droppes
        if *boundaries.last().unwrap_or(&0) != n - 1 {
            boundaries.push(n - 1);
        }
        self.split(&boundaries)
    }

    /// Runder fra eksplisitte tidsmarkører, målt som forløpt tid siden
    /// trackens start (ikke rundelokal). Samme markørkrav som for distanse.
    pub fn laps_from_time_markers(&self, markers: &[f64]) -> Result<Vec<Lap>, EngineError> {
        let start_time = self.points[0].time;
        let total = elapsed_seconds(
            self.points[self.points.len() - 1].time,
            start_time,
        );
        validate_markers(markers, total)?;
        let n = self.points.len();
        let mut boundaries = vec![0usize];
        let mut index = 1;
        let mut marker_index = 0;
        while index < n && marker_index < markers.len() {
            let next_split = markers[marker_index];
            let mut total_time = elapsed_seconds(self.points[index - 1].time, start_time);
            while total_time < next_split && index < n {
                total_time = elapsed_seconds(self.points[index].time, start_time);
                index += 1;
            }
            boundaries.push(index - 1);
            marker_index += 1;
        }
        if *boundaries.last().unwrap_or(&0) != n - 1 {
            boundaries.push(n - 1);
        }
        self.split(&boundaries)
    }

    /// Materialiserer runder fra grenseindekser. Runde i får dype kopier av
    /// punktene `[b(i-1) ..= b(i)]`, så nabolunder deler grensepunktet som
    /// uavhengige kopier. Akkumulert distanse nullstilles ved rundens første
    /// punkt, og referansetrackens verdi der registreres som startdistanse.
    fn split(&self, boundaries: &[usize]) -> Result<Vec<Lap>, EngineError> {
        debug_assert_eq!(boundaries.first(), Some(&0));
        debug_assert_eq!(boundaries.last(), Some(&(self.points.len() - 1)));
        let mut laps = Vec::with_capacity(boundaries.len().saturating_sub(1));
        for (i, pair) in boundaries.windows(2).enumerate() {
            let (from, to) = (pair[0], pair[1]);
            if to <= from {
                return Err(EngineError::DegenerateBoundary { index: to });
            }
            let mut points = self.points[from..=to].to_vec();
            let starting_distance = points[0].accumulated_distance_m.unwrap_or(0.0);
            for point in &mut points {
                point.accumulated_distance_m =
                    point.accumulated_distance_m.map(|d| d - starting_distance);
            }
            laps.push(Lap::new((i + 1) as u32, starting_distance, points));
        }
        metrics::laps_extracted_total().inc_by(laps.len() as u64);
        info!("ekstraherte {} runder fra {} punkter", laps.len(), self.points.len());
        Ok(laps)
    }
}

/// Felles markørvalidering: ikke tom, strengt stigende, første over 0,
/// siste dekker hele tracken (ellers ville punkter etter siste markør stått
/// uten runde).
fn validate_markers(markers: &[f64], required_total: f64) -> Result<(), EngineError> {
    let first = match markers.first() {
        None => return Err(EngineError::EmptyMarkers),
        Some(&m) => m,
    };
    if first <= 0.0 {
        return Err(EngineError::NonPositiveMarker { value: first });
    }
    for (index, pair) in markers.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(EngineError::MarkersNotIncreasing { index: index + 1 });
        }
    }
    let last = markers[markers.len() - 1];
    if last < required_total {
        return Err(EngineError::MarkersEndShort {
            last,
            required: required_total,
        });
    }
    Ok(())
}
