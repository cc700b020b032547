use serde::{Deserialize, Serialize};

/// Geodetisk punkt: koordinatpar i desimalgrader pluss høyde i meter.
/// Uforanderlig etter konstruksjon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,         // grader, -90..90
    pub lon: f64,         // grader, -180..180
    pub elevation_m: f64, // meter
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64, elevation_m: f64) -> Self {
        Self { lat, lon, elevation_m }
    }

    /// Avstand i meter med ekvirektangulær tilnærming.
    ///
    /// Meter-per-grad-skalaene beregnes fra polynomekspansjoner i midlere
    /// breddegrad, deretter kombineres skalerte delta med euklidsk norm.
    /// Treffer under meteren for noen hundre meter til titalls kilometer på
    /// midlere breddegrader; ikke gyldig nær polene eller over antimeridianen.
    pub fn distance_m(&self, other: &GeoPoint) -> f64 {
        let lat_mid = ((self.lat + other.lat) / 2.0).to_radians();
        let m_per_deg_lat = 111_132.92 - 559.82 * (2.0 * lat_mid).cos()
            + 1.175 * (4.0 * lat_mid).cos()
            - 0.0023 * (6.0 * lat_mid).cos();
        let m_per_deg_lon = 111_412.84 * lat_mid.cos() - 93.5 * (3.0 * lat_mid).cos()
            + 0.118 * (5.0 * lat_mid).cos();
        let d_lat = (other.lat - self.lat) * m_per_deg_lat;
        let d_lon = (other.lon - self.lon) * m_per_deg_lon;
        (d_lat * d_lat + d_lon * d_lon).sqrt()
    }
}
