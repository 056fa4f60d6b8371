use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::Fetch;
use crate::{config::UpstreamConfig, json_path::JsonPath, UpstreamError, UpstreamService};

/// Maps an IP address to an ISO 3166-1 alpha-2 country code
pub struct GeoResolver<F> {
    fetcher: Arc<F>,
    upstream: Arc<UpstreamConfig>,
    path: JsonPath,
    unknown_code: String,
}

impl<F: Fetch> GeoResolver<F> {
    pub fn new(
        fetcher: Arc<F>,
        upstream: Arc<UpstreamConfig>,
        path: JsonPath,
        unknown_code: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            upstream,
            path,
            unknown_code: unknown_code.into(),
        }
    }

    /// Country code for `ip`, or the unknown sentinel when the answer carries none
    pub async fn resolve(&self, ip: &str) -> Result<String, UpstreamError> {
        let url = self.upstream.geolocation_url_for(ip);
        let body = self.fetcher.get(UpstreamService::Geolocation, &url).await?;

        let code = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|doc| self.path.select_str(&doc))
            .map(|code| code.trim().to_ascii_uppercase());

        match code {
            Some(code) if is_alpha2(&code) => Ok(code),
            Some(code) if !code.is_empty() => {
                warn!("Ignoring country code {:?} for {}", code, ip);
                Ok(self.unknown_code.clone())
            }
            _ => {
                debug!("No {} in geolocation answer for {}", self.path, ip);
                Ok(self.unknown_code.clone())
            }
        }
    }
}

fn is_alpha2(code: &str) -> bool {
    code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase())
}
