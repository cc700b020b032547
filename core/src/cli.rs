use anyhow::{Context, Result};

use crate::format::{pace_decimal_minutes_to_min_sec, seconds_to_hours_min_sec};
use crate::laps::Lap;
use crate::track::{SpeedUnit, Track};

/// Skriver et sammendrag for hele tracken.
pub fn print_track_summary(track: &mut Track) -> Result<()> {
    let distance = track
        .total_distance_m()
        .context("kunne ikke beregne totaldistanse")?;
    let time = track.total_time_s().context("kunne ikke beregne totaltid")?;
    let ascent = track
        .total_ascent_m()
        .context("kunne ikke beregne høydemeter")?;

    println!("--- Track Summary ---");
    println!("Total distanse: {:.1} m", distance);
    println!("Total tid:      {}", seconds_to_hours_min_sec(time));
    println!("Høydemeter:     {:.1} m", ascent);
    Ok(())
}

/// Skriver pace per runde, med nullutfylte rundenummer.
pub fn print_lap_report(laps: &mut [Lap]) -> Result<()> {
    // sifferbredde fra antall runder
    let width = (laps.len() as f64).log10().round().max(1.0) as usize;

    println!("--- Lap Report ---");
    for lap in laps.iter_mut() {
        let pace = lap
            .average_speed(SpeedUnit::Pace)
            .with_context(|| format!("kunne ikke beregne pace for runde {}", lap.lap_number()))?;
        println!(
            "{:0width$}  {}",
            lap.lap_number(),
            pace_decimal_minutes_to_min_sec(pace),
            width = width
        );
    }
    Ok(())
}
