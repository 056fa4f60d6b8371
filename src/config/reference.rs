use serde::{Deserialize, Serialize};

use crate::derived::Coordinates;

/// Fixed reference values every query is measured against
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Country code reported when the IP cannot be located
    pub unknown_country_code: String,
    /// Exchange rate reported when no rate is available
    pub unavailable_rate: f64,
    /// Currency all rates are quoted against
    pub base_currency: String,
    /// Latitude distances are measured from
    pub base_latitude: f64,
    /// Longitude distances are measured from
    pub base_longitude: f64,
}

impl Default for Config {
    fn default() -> Self {
        // Buenos Aires
        Self {
            unknown_country_code: "XX".to_string(),
            unavailable_rate: 0.0,
            base_currency: "USD".to_string(),
            base_latitude: -34.603333,
            base_longitude: -58.381667,
        }
    }
}

impl Config {
    pub fn base_location(&self) -> Coordinates {
        Coordinates::new(self.base_latitude, self.base_longitude)
    }
}
