use time::UtcOffset;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::time::OffsetTime, layer::Layered, layer::SubscriberExt, util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::{config::LoggingConfig, InitializationError};

const LOG_FILE_PREFIX: &str = "where-ip.log";

type BoxedLayer = Box<dyn Layer<Layered<EnvFilter, Registry>> + Send + Sync>;

/// Install the global subscriber.
///
/// The returned guard flushes the file appender and must outlive all logging.
pub fn setup_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>, InitializationError> {
    // Validate logging config before proceeding
    config
        .validate()
        .map_err(|e| InitializationError::logging(e.to_string()))?;

    let timer = OffsetTime::new(
        UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC),
        time::format_description::well_known::Rfc3339,
    );

    // RUST_LOG directives refine the configured base level
    let env_filter = EnvFilter::builder()
        .with_default_directive(config.get_level_filter().into())
        .from_env_lossy();

    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(config.thread_ids)
        .with_thread_names(config.thread_names)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_level(true)
        .with_timer(timer.clone());

    let console: BoxedLayer = if config.is_json() {
        Box::new(console.json())
    } else {
        Box::new(console)
    };

    let mut layers = vec![console];
    let mut guard = None;

    if let Some(dir) = &config.log_dir {
        let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
        let (writer, file_guard) = tracing_appender::non_blocking(appender);
        let file = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_timer(timer);
        let file: BoxedLayer = if config.is_json() {
            Box::new(file.json())
        } else {
            Box::new(file)
        };
        layers.push(file);
        guard = Some(file_guard);
    }

    Registry::default()
        .with(env_filter)
        .with(layers)
        .try_init()
        .map_err(|e| {
            InitializationError::logging(format!("Failed to initialize logging: {}", e))
        })?;

    Ok(guard)
}
