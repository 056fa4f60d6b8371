use serde::{Deserialize, Serialize};

use crate::{json_path::JsonPath, ConfigValidationError};

/// Where each field lives in the upstream JSON documents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// In the geolocation response
    pub country_code: String,
    /// In the country profile
    pub country_name: String,
    /// In the exchange rate response, `{base}` is the base currency
    pub currency_rate: String,
    pub currency_code: String,
    pub languages: String,
    pub timezones: String,
    pub latitude: String,
    pub longitude: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            country_code: "countryCode".to_string(),
            country_name: "translations.es".to_string(),
            currency_rate: "rates.{base}".to_string(),
            currency_code: "currencies.0.code".to_string(),
            languages: "languages.#.name".to_string(),
            timezones: "timezones".to_string(),
            latitude: "latlng.0".to_string(),
            longitude: "latlng.1".to_string(),
        }
    }
}

/// Parsed form of [`Config`], built once at startup
#[derive(Debug, Clone)]
pub struct ExtractionPaths {
    pub country_code: JsonPath,
    pub country_name: JsonPath,
    pub currency_rate: JsonPath,
    pub currency_code: JsonPath,
    pub languages: JsonPath,
    pub timezones: JsonPath,
    pub latitude: JsonPath,
    pub longitude: JsonPath,
}

impl Config {
    pub fn compile(&self, base_currency: &str) -> Result<ExtractionPaths, ConfigValidationError> {
        Ok(ExtractionPaths {
            country_code: JsonPath::parse(&self.country_code)?,
            country_name: JsonPath::parse(&self.country_name)?,
            currency_rate: JsonPath::parse(&self.currency_rate.replace("{base}", base_currency))?,
            currency_code: JsonPath::parse(&self.currency_code)?,
            languages: JsonPath::parse(&self.languages)?,
            timezones: JsonPath::parse(&self.timezones)?,
            latitude: JsonPath::parse(&self.latitude)?,
            longitude: JsonPath::parse(&self.longitude)?,
        })
    }
}
