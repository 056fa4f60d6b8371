use serde::{Deserialize, Serialize};

/// Queries seen from one country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryStat {
    pub country_code: String,
    pub country_name: String,
    /// Kilometers to the base location
    pub distance: u64,
    pub queries: u64,
}

/// Increment produced by one enrichment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryDelta {
    pub country_code: String,
    pub country_name: String,
    pub distance: u64,
    pub count: u64,
}

impl CountryDelta {
    pub fn single(
        country_code: impl Into<String>,
        country_name: impl Into<String>,
        distance: u64,
    ) -> Self {
        Self {
            country_code: country_code.into(),
            country_name: country_name.into(),
            distance,
            count: 1,
        }
    }
}

impl From<CountryDelta> for CountryStat {
    fn from(delta: CountryDelta) -> Self {
        Self {
            country_code: delta.country_code,
            country_name: delta.country_name,
            distance: delta.distance,
            queries: delta.count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub furthest_distance: u64,
    pub closest_distance: u64,
    /// Query weighted mean distance, rounded to the nearest kilometer
    pub average_distance: u64,
}
