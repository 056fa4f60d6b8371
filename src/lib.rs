pub mod config;
pub mod derived;
pub mod enrichment;
pub mod errors;
pub mod http_api;
pub mod json_path;
pub mod logging;
pub mod service;
pub mod stats;
pub mod upstream;
pub mod utils;

pub use config::ServiceConfig;
pub use enrichment::{EnrichmentPipeline, QueryResult};
pub use errors::{
    ConfigValidationError, InitializationError, OffsetComponent, OffsetParseError, ServiceError,
    StatsError, UpstreamError, UpstreamService,
};
pub use logging::setup_logging;
pub use service::WhereIpService;
pub use utils::generate_request_id;
