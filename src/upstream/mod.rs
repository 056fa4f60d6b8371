//! Clients for the three external lookup services.

mod country_profile;
mod currency_rate;
mod geo_resolver;
mod http_client;

use std::future::Future;

pub use country_profile::{CountryProfile, CountryProfileFetcher};
pub use currency_rate::CurrencyRateFetcher;
pub use geo_resolver::GeoResolver;
pub use http_client::HttpFetcher;

use crate::{UpstreamError, UpstreamService};

/// Retrieves the raw body behind a URL.
///
/// Implementations bound every call in time and report transport problems
/// as [`UpstreamError`]. Client errors (4xx) still return their body so the
/// caller can degrade to defaults.
pub trait Fetch: Send + Sync + 'static {
    fn get(
        &self,
        service: UpstreamService,
        url: &str,
    ) -> impl Future<Output = Result<String, UpstreamError>> + Send;
}

/// URL without its query string, for logs and errors
pub(crate) fn redact(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}
