mod offset_component;
mod upstream_service;

pub use offset_component::OffsetComponent;
pub use upstream_service::UpstreamService;
