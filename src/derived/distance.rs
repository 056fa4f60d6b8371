use serde::{Deserialize, Serialize};

/// Earth radius used by the haversine approximation, in meters
pub const EARTH_RADIUS_M: f64 = 6_378_100.0;

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

fn hav(theta: f64) -> f64 {
    (theta / 2.0).sin().powi(2)
}

/// Great-circle distance in meters
pub fn haversine_m(from: Coordinates, to: Coordinates) -> f64 {
    let la1 = from.latitude.to_radians();
    let lo1 = from.longitude.to_radians();
    let la2 = to.latitude.to_radians();
    let lo2 = to.longitude.to_radians();

    let h = hav(la2 - la1) + la1.cos() * la2.cos() * hav(lo2 - lo1);

    2.0 * EARTH_RADIUS_M * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Great-circle distance rounded to whole kilometers
pub fn distance_km(from: Coordinates, to: Coordinates) -> u64 {
    (haversine_m(from, to) / 1000.0).round() as u64
}
