use std::time::Duration;

use serde::{Deserialize, Serialize};

/// External lookup services.
///
/// URL templates use `{ip}`, `{code}`, `{base}` and `{api_key}` placeholders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// IP geolocation endpoint, `{ip}` is required
    pub geolocation_url: String,
    /// Country directory endpoint, `{code}` is required
    pub country_url: String,
    /// Exchange rate endpoint, `{code}` is required
    pub currency_url: String,
    /// Access key substituted for `{api_key}`
    #[serde(default)]
    pub currency_api_key: String,
    /// Upper bound for a whole upstream request
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Upper bound for establishing the connection
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    pub user_agent: String,
}

const DEFAULT_CURRENCY_URL: &str =
    "http://data.fixer.io/api/latest?access_key={api_key}&symbols={base},{code}";

impl Default for Config {
    fn default() -> Self {
        Self {
            geolocation_url: "https://api.ip2country.info/ip?{ip}".to_string(),
            country_url: "https://restcountries.com/v2/alpha/{code}".to_string(),
            currency_url: DEFAULT_CURRENCY_URL.to_string(),
            currency_api_key: String::new(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    pub fn geolocation_url_for(&self, ip: &str) -> String {
        self.geolocation_url.replace("{ip}", ip)
    }

    pub fn country_url_for(&self, code: &str) -> String {
        self.country_url.replace("{code}", code)
    }

    pub fn currency_url_for(&self, base: &str, code: &str) -> String {
        self.currency_url
            .replace("{api_key}", &self.currency_api_key)
            .replace("{base}", base)
            .replace("{code}", code)
    }
}
