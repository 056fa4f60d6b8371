mod http;
mod logging;
mod paths;
mod reference;
mod service;
mod stats;
mod upstream;

pub use http::Config as HttpConfig;
pub use logging::Config as LoggingConfig;
pub use paths::Config as PathsConfig;
pub use paths::ExtractionPaths;
pub use reference::Config as ReferenceConfig;
pub use service::Config as ServiceConfig;
pub use stats::Config as StatsConfig;
pub use upstream::Config as UpstreamConfig;
