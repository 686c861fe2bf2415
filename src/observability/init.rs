//! Tracing initialization and subscriber setup.
//!
//! Wires the pipeline from `tracing` macros to the trace file:
//!
//! ```text
//! tracing spans → EnvFilter → OpenTelemetryLayer → TracerProvider → FileSpanExporter
//! ```

use super::file_writer::FileWriter;
use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "jobtrail";

/// Name of the trace file inside the data directory.
pub const TRACE_FILE_NAME: &str = "jobtrail-otlp.json";

/// Installs the global subscriber exporting spans to the trace file.
///
/// # Trace Level Resolution
///
/// 1. `RUST_LOG`, when set and valid
/// 2. `config.trace_level`
/// 3. `"info"` when the configured directive does not parse
///
/// # Initialization Behavior
///
/// Tracing is optional: if the data directory cannot be created or a
/// subscriber is already installed, this returns without doing anything.
///
/// # Example
///
/// ```rust
/// use jobtrail::observability::init_tracing;
/// use jobtrail::Config;
///
/// let config = Config {
///     trace_level: "debug".to_string(),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::paths::data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", SERVICE_NAME),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let writer = FileWriter::new(data_dir.join(TRACE_FILE_NAME));
    let provider = tracer::create_tracer_provider(writer, resource, SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(env_filter(&config.trace_level))
        .with(otel_layer)
        .try_init();
}

fn env_filter(configured: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
