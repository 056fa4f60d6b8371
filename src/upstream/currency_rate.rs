use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::Fetch;
use crate::{config::UpstreamConfig, json_path::JsonPath, UpstreamError, UpstreamService};

/// Exchange rate of a currency against the configured base currency
pub struct CurrencyRateFetcher<F> {
    fetcher: Arc<F>,
    upstream: Arc<UpstreamConfig>,
    base_currency: String,
    path: JsonPath,
    unavailable_rate: f64,
}

impl<F: Fetch> CurrencyRateFetcher<F> {
    pub fn new(
        fetcher: Arc<F>,
        upstream: Arc<UpstreamConfig>,
        base_currency: impl Into<String>,
        path: JsonPath,
        unavailable_rate: f64,
    ) -> Self {
        Self {
            fetcher,
            upstream,
            base_currency: base_currency.into(),
            path,
            unavailable_rate,
        }
    }

    /// Rate for `code`; the unavailable sentinel when the code is empty or no rate is quoted
    pub async fn rate(&self, code: &str) -> Result<f64, UpstreamError> {
        if code.is_empty() {
            return Ok(self.unavailable_rate);
        }

        let url = self.upstream.currency_url_for(&self.base_currency, code);
        let body = self
            .fetcher
            .get(UpstreamService::CurrencyExchange, &url)
            .await?;

        let rate = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|doc| self.path.select_f64(&doc))
            .filter(|rate| rate.is_finite() && *rate >= 0.0);

        Ok(rate.unwrap_or_else(|| {
            debug!("No {} quoted for {}", self.path, code);
            self.unavailable_rate
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::mock::MockFetcher;

    const URL: &str = "http://data.fixer.io/api/latest?access_key=key&symbols=USD,ARS";

    fn rates(fetcher: Arc<MockFetcher>) -> CurrencyRateFetcher<MockFetcher> {
        let upstream = UpstreamConfig {
            currency_api_key: "key".to_string(),
            ..Default::default()
        };
        CurrencyRateFetcher::new(
            fetcher,
            Arc::new(upstream),
            "USD",
            JsonPath::parse("rates.USD").unwrap(),
            0.0,
        )
    }

    #[tokio::test]
    async fn test_extracts_rate() {
        let fetcher = Arc::new(MockFetcher::default().with_body(
            URL,
            r#"{"success":true,"base":"EUR","rates":{"USD":1.0832,"ARS":895.12}}"#,
        ));
        assert_eq!(rates(fetcher).rate("ARS").await.unwrap(), 1.0832);
    }

    #[tokio::test]
    async fn test_missing_rate_is_sentinel() {
        let fetcher = Arc::new(MockFetcher::default().with_body(
            URL,
            r#"{"success":false,"error":{"code":101,"type":"missing_access_key"}}"#,
        ));
        assert_eq!(rates(fetcher).rate("ARS").await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_empty_code_skips_fetch() {
        let fetcher = Arc::new(MockFetcher::default());
        assert_eq!(rates(Arc::clone(&fetcher)).rate("").await.unwrap(), 0.0);
        assert!(fetcher.calls().is_empty());
    }

    #[tokio::test]
    async fn test_outage_is_an_error() {
        let fetcher = Arc::new(MockFetcher::default().with_outage(URL));
        let err = rates(fetcher).rate("ARS").await.unwrap_err();
        assert_eq!(err.service(), UpstreamService::CurrencyExchange);
    }
}
