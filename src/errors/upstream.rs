use std::time::Duration;

use thiserror::Error;

use super::UpstreamService;

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("{service} request to {url} failed: {source}")]
    Transport {
        service: UpstreamService,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} request to {url} timed out after {limit:?}")]
    Timeout {
        service: UpstreamService,
        url: String,
        limit: Duration,
    },

    #[error("{service} at {url} answered with status {status}")]
    Status {
        service: UpstreamService,
        url: String,
        status: u16,
    },
}

impl UpstreamError {
    pub fn transport(
        service: UpstreamService,
        url: impl Into<String>,
        source: reqwest::Error,
    ) -> Self {
        Self::Transport {
            service,
            url: url.into(),
            source,
        }
    }

    pub fn timeout(service: UpstreamService, url: impl Into<String>, limit: Duration) -> Self {
        Self::Timeout {
            service,
            url: url.into(),
            limit,
        }
    }

    pub fn status(service: UpstreamService, url: impl Into<String>, status: u16) -> Self {
        Self::Status {
            service,
            url: url.into(),
            status,
        }
    }

    pub fn service(&self) -> UpstreamService {
        match self {
            Self::Transport { service, .. }
            | Self::Timeout { service, .. }
            | Self::Status { service, .. } => *service,
        }
    }
}
