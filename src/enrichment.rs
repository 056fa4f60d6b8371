use std::sync::Arc;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{debug, info, info_span, Instrument};

use crate::{
    config::{ExtractionPaths, ServiceConfig},
    derived::{distance_km, format_timestamp, localized_timestamps, Coordinates},
    generate_request_id,
    stats::{CountryDelta, StatsHandle},
    upstream::{CountryProfile, CountryProfileFetcher, CurrencyRateFetcher, Fetch, GeoResolver},
    ConfigValidationError, ServiceError,
};

/// Everything learned about one IP address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub from: String,
    pub when: String,
    pub country_code: String,
    pub country_name: String,
    pub languages: Vec<String>,
    pub timezones: Vec<String>,
    pub distance: u64,
    pub currency: String,
    pub ex_rate: f64,
}

pub struct EnrichmentPipeline<F> {
    geo: GeoResolver<F>,
    profiles: CountryProfileFetcher<F>,
    rates: CurrencyRateFetcher<F>,
    paths: ExtractionPaths,
    base_location: Coordinates,
    unknown_code: String,
    stats: StatsHandle,
}

impl<F: Fetch> EnrichmentPipeline<F> {
    pub fn new(
        config: &ServiceConfig,
        fetcher: Arc<F>,
        stats: StatsHandle,
    ) -> Result<Self, ConfigValidationError> {
        let reference = &config.reference;
        let paths = config.paths.compile(&reference.base_currency)?;
        let upstream = Arc::new(config.upstream.clone());

        Ok(Self {
            geo: GeoResolver::new(
                Arc::clone(&fetcher),
                Arc::clone(&upstream),
                paths.country_code.clone(),
                reference.unknown_country_code.clone(),
            ),
            profiles: CountryProfileFetcher::new(Arc::clone(&fetcher), Arc::clone(&upstream)),
            rates: CurrencyRateFetcher::new(
                fetcher,
                upstream,
                reference.base_currency.clone(),
                paths.currency_rate.clone(),
                reference.unavailable_rate,
            ),
            paths,
            base_location: reference.base_location(),
            unknown_code: reference.unknown_country_code.clone(),
            stats,
        })
    }

    pub fn stats(&self) -> &StatsHandle {
        &self.stats
    }

    /// Enrich `ip` as of now, in the local offset when it can be determined
    pub async fn enrich(&self, ip: &str) -> Result<QueryResult, ServiceError> {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        self.enrich_at(ip, now).await
    }

    /// Enrich `ip` and count it in the stats. Nothing is counted on failure.
    pub async fn enrich_at(
        &self,
        ip: &str,
        when: OffsetDateTime,
    ) -> Result<QueryResult, ServiceError> {
        let span = info_span!("enrich", request_id = generate_request_id(), ip);

        async move {
            let country_code = self.geo.resolve(ip).await?;

            let profile = if country_code == self.unknown_code {
                debug!("Unknown country, skipping profile lookup");
                CountryProfile::empty()
            } else {
                self.profiles.fetch(&country_code).await?
            };

            let country_name = profile.name(&self.paths);
            let languages = profile.languages(&self.paths);
            let timezones = localized_timestamps(when, &profile.timezones(&self.paths));
            let distance = profile
                .coordinates(&self.paths)
                .map_or(0, |location| distance_km(location, self.base_location));
            let currency = profile.currency_code(&self.paths);
            let ex_rate = self.rates.rate(&currency).await?;

            self.stats
                .record(CountryDelta::single(
                    country_code.clone(),
                    country_name.clone(),
                    distance,
                ))
                .await?;

            info!(
                "Resolved to {} ({}), {} km, {} rate {}",
                country_code, country_name, distance, currency, ex_rate
            );

            Ok::<_, ServiceError>(QueryResult {
                from: ip.to_string(),
                when: format_timestamp(when),
                country_code,
                country_name,
                languages,
                timezones,
                distance,
                currency,
                ex_rate,
            })
        }
        .instrument(span)
        .await
    }
}
