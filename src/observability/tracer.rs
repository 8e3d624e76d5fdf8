//! Custom OpenTelemetry tracer provider with file-based span export.
//!
//! The plugin sandbox has no collector to talk to, so spans go to a rotating
//! JSON file on the host instead of over the network.

use super::file_writer::{FileWriter, RotationPolicy};
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// `SpanExporter` that appends OTLP JSON lines to a [`FileWriter`].
struct FileSpanExporter {
    writer: FileWriter,
    formatter: SpanFormatter,
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    const fn new(file_path: PathBuf, policy: RotationPolicy, resource: Resource) -> Self {
        Self {
            writer: FileWriter::new(file_path, policy),
            formatter: SpanFormatter::new(resource),
            is_shutdown: AtomicBool::new(false),
        }
    }
}

impl SpanExporter for FileSpanExporter {
    /// Writes the batch as one OTLP JSON line.
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        let result = self
            .formatter
            .format_batch(&batch)
            .map_err(|e| TraceError::from(e.to_string()))
            .and_then(|line| self.writer.write_line(&line).map_err(|e| TraceError::from(e.to_string())));

        Box::pin(std::future::ready(result))
    }

    /// Refuses further exports. The file is closed on drop.
    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    /// The resource is fixed at construction.
    fn set_resource(&mut self, res: &Resource) {
        let _ = res;
    }
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("writer", &self.writer)
            .field("formatter", &self.formatter)
            .field("is_shutdown", &self.is_shutdown)
            .finish()
    }
}

/// Builds a tracer provider that exports every finished span, unbatched,
/// into a rotating OTLP JSON file.
///
/// Spans are written synchronously as they end; the plugin runs on a single
/// WASM thread with no async runtime to drive a batch processor.
pub fn create_tracer_provider(file_path: PathBuf, policy: RotationPolicy, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(file_path, policy, resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Tracer, TracerProvider as _};
    use opentelemetry::KeyValue;

    #[test]
    fn finished_spans_land_in_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spans.json");
        let provider = create_tracer_provider(
            path.clone(),
            RotationPolicy::default(),
            Resource::new(vec![KeyValue::new("service.name", "Stockroom")]),
        );

        provider.tracer("test").in_span("apply_response", |_cx| {});

        let contents = std::fs::read_to_string(&path).unwrap();
        let doc: serde_json::Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        assert_eq!(
            doc["resourceSpans"][0]["scopeSpans"][0]["spans"][0]["name"],
            "apply_response"
        );
    }
}
