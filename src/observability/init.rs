//! Tracing initialization and subscriber setup.

use super::file_writer::RotationPolicy;
use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "Stockroom";
const TRACE_FILE_NAME: &str = "stockroom-otlp.json";

/// Installs the global subscriber: an `EnvFilter` at the configured level
/// feeding an OpenTelemetry layer that exports to the trace file.
///
/// Traces go to `stockroom-otlp.json` under
/// [`get_data_dir`](crate::infrastructure::get_data_dir), which Zellij maps to
/// `~/.local/share/zellij/stockroom` on the host.
///
/// Tracing is optional: if the data directory cannot be created, the plugin
/// runs without a subscriber. Calling this twice leaves the first subscriber
/// in place.
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = tracer::create_tracer_provider(
        data_dir.join(TRACE_FILE_NAME),
        RotationPolicy::default(),
        resource,
    );

    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(&config.trace_level))
        .with(otel_layer)
        .try_init();
}
