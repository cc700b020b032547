use std::error::Error;

use crate::track::Track;

/// Leser inn en track fra disk (JSON).
pub fn load_track(path: &str) -> Result<Track, Box<dyn Error>> {
    let contents = std::fs::read_to_string(path)?;
    let track: Track = serde_json::from_str(&contents)?;
    println!(
        "📂 Track lastet fra {} ({} segmenter, {} punkter)",
        path,
        track.segments.len(),
        track.point_count()
    );
    Ok(track)
}

/// Lagrer en track til disk som JSON (pretty-print).
pub fn save_track(track: &Track, path: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(track)?;
    std::fs::write(path, json)?;
    println!("✅ Track lagret til {}", path);
    Ok(())
}
