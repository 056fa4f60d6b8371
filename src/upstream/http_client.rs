use std::time::Duration;

use tracing::{debug, trace};

use super::{redact, Fetch};
use crate::{config::UpstreamConfig, InitializationError, UpstreamError, UpstreamService};

/// [`Fetch`] over a shared `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    request_timeout: Duration,
}

impl HttpFetcher {
    pub fn new(config: &UpstreamConfig) -> Result<Self, InitializationError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| InitializationError::http_client(e.to_string()))?;

        Ok(Self {
            client,
            request_timeout: config.request_timeout,
        })
    }

    fn classify(&self, service: UpstreamService, url: &str, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            UpstreamError::timeout(service, redact(url), self.request_timeout)
        } else {
            UpstreamError::transport(service, redact(url), err.without_url())
        }
    }
}

impl Fetch for HttpFetcher {
    async fn get(&self, service: UpstreamService, url: &str) -> Result<String, UpstreamError> {
        trace!("GET {} ({})", redact(url), service);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(service, url, e))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(UpstreamError::status(service, redact(url), status.as_u16()));
        }
        if !status.is_success() {
            debug!("{} answered {} for {}", service, status, redact(url));
        }

        response
            .text()
            .await
            .map_err(|e| self.classify(service, url, e))
    }
}
