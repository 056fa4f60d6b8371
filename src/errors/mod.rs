mod config;
mod init;
mod kinds;
mod offset;
mod service;
mod stats;
mod upstream;

pub use kinds::OffsetComponent;
pub use kinds::UpstreamService;

pub use config::ConfigValidationError;
pub use init::InitializationError;
pub use offset::OffsetParseError;
pub use service::ServiceError;
pub use stats::StatsError;
pub use upstream::UpstreamError;
