use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigValidationError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid JSON path {path:?}: {details}")]
    JsonPath { path: String, details: String },
}

impl ConfigValidationError {
    pub fn config(details: impl Into<String>) -> Self {
        Self::Config(details.into())
    }

    pub fn json_path(path: impl Into<String>, details: impl Into<String>) -> Self {
        Self::JsonPath {
            path: path.into(),
            details: details.into(),
        }
    }
}
