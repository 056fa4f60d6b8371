use thiserror::Error;

use super::{ConfigValidationError, InitializationError, StatsError, UpstreamError};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Stats error: {0}")]
    Stats(#[from] StatsError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigValidationError),

    #[error("Initialization error: {0}")]
    Init(#[from] InitializationError),

    #[error("Not an IP address: {0}")]
    InvalidAddress(String),

    #[error("Server error: {0}")]
    Server(#[source] std::io::Error),
}

impl ServiceError {
    /// Whether the failure came from a collaborator rather than this service
    pub fn is_upstream(&self) -> bool {
        matches!(self, ServiceError::Upstream(_))
    }
}

impl From<config::ConfigError> for ServiceError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(ConfigValidationError::config(err.to_string()))
    }
}
