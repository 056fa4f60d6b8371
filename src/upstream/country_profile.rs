use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::Fetch;
use crate::{
    config::{ExtractionPaths, UpstreamConfig},
    derived::Coordinates,
    UpstreamError, UpstreamService,
};

/// Country document as returned by the directory.
///
/// Every accessor tolerates absent fields and answers with an empty value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryProfile {
    doc: Value,
}

impl CountryProfile {
    pub fn new(doc: Value) -> Self {
        Self { doc }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        match &self.doc {
            Value::Null => true,
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }

    pub fn name(&self, paths: &ExtractionPaths) -> String {
        paths.country_name.select_str(&self.doc).unwrap_or_default()
    }

    pub fn languages(&self, paths: &ExtractionPaths) -> Vec<String> {
        paths.languages.select_strings(&self.doc)
    }

    /// Raw UTC offset strings such as `UTC-03:00`
    pub fn timezones(&self, paths: &ExtractionPaths) -> Vec<String> {
        paths.timezones.select_strings(&self.doc)
    }

    /// Both latitude and longitude, or nothing
    pub fn coordinates(&self, paths: &ExtractionPaths) -> Option<Coordinates> {
        let latitude = paths.latitude.select_f64(&self.doc)?;
        let longitude = paths.longitude.select_f64(&self.doc)?;
        Some(Coordinates::new(latitude, longitude))
    }

    /// First ISO 4217 code listed for the country
    pub fn currency_code(&self, paths: &ExtractionPaths) -> String {
        paths.currency_code.select_str(&self.doc).unwrap_or_default()
    }
}

pub struct CountryProfileFetcher<F> {
    fetcher: Arc<F>,
    upstream: Arc<UpstreamConfig>,
}

impl<F: Fetch> CountryProfileFetcher<F> {
    pub fn new(fetcher: Arc<F>, upstream: Arc<UpstreamConfig>) -> Self {
        Self { fetcher, upstream }
    }

    pub async fn fetch(&self, code: &str) -> Result<CountryProfile, UpstreamError> {
        let url = self.upstream.country_url_for(code);
        let body = self
            .fetcher
            .get(UpstreamService::CountryDirectory, &url)
            .await?;

        match serde_json::from_str::<Value>(&body) {
            Ok(doc) => {
                let profile = CountryProfile::new(doc);
                if profile.is_empty() {
                    debug!("Directory has no profile for {}", code);
                }
                Ok(profile)
            }
            Err(e) => {
                warn!("Unreadable country profile for {}: {}", code, e);
                Ok(CountryProfile::empty())
            }
        }
    }
}
