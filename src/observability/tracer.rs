//! Tracer provider exporting spans to a local OTLP JSON file.
//!
//! The list view runs without a collector, so spans are written to a rotating
//! file instead of being sent over the network.

use super::file_writer::FileWriter;
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::sync::atomic::{AtomicBool, Ordering};

/// Span exporter writing one OTLP JSON document per batch.
struct FileSpanExporter {
    writer: FileWriter,
    formatter: SpanFormatter,
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    const fn new(writer: FileWriter, formatter: SpanFormatter) -> Self {
        Self {
            writer,
            formatter,
            is_shutdown: AtomicBool::new(false),
        }
    }

    fn write_batch(&self, batch: &[SpanData]) -> ExportResult {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Err(TraceError::from("exporter is shut down"));
        }

        let document = self.formatter.format_batch(batch).to_string();
        self.writer
            .write_line(&document)
            .map_err(|e| TraceError::from(e.to_string()))
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        Box::pin(std::future::ready(self.write_batch(&batch)))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
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

/// Builds a provider whose spans end up in `writer`.
///
/// Spans are exported one by one as they close (simple exporter), so nothing
/// is lost when the process exits without a flush.
pub fn create_tracer_provider(
    writer: FileWriter,
    resource: Resource,
    scope: &'static str,
) -> TracerProvider {
    let exporter = FileSpanExporter::new(writer, SpanFormatter::new(resource.clone(), scope));

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
    use tempfile::TempDir;

    #[test]
    fn finished_spans_are_written_as_otlp_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jobtrail-otlp.json");
        let resource = Resource::new(vec![KeyValue::new("service.name", "jobtrail")]);

        let provider = create_tracer_provider(FileWriter::new(path.clone()), resource, "jobtrail");
        provider.tracer("jobtrail").in_span("derive_view", |_cx| {});
        drop(provider);

        let contents = std::fs::read_to_string(path).unwrap();
        let first = contents.lines().next().unwrap();
        let doc: serde_json::Value = serde_json::from_str(first).unwrap();
        let span = &doc["resourceSpans"][0]["scopeSpans"][0]["spans"][0];
        assert_eq!(span["name"], "derive_view");
        assert_eq!(span["spanId"].as_str().unwrap().len(), 16);
    }
}
