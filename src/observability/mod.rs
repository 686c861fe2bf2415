//! OpenTelemetry-based observability with file-based trace export.
//!
//! Spans emitted with `tracing` throughout the crate are exported in OTLP JSON
//! format to a local file for offline analysis.
//!
//! # Features
//!
//! - **File-Based Export**: Traces written to `<data dir>/jobtrail-otlp.json`
//! - **Automatic Rotation**: Files rotate at 10MB with 3-backup retention
//! - **OTLP Format**: Standard OpenTelemetry Protocol JSON format
//! - **Resource Metadata**: Service name and version
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - `init`: Tracing initialization and subscriber setup
//! - `tracer`: Tracer provider with file export
//! - `span_formatter`: OTLP JSON span serialization
//! - `file_writer`: Rotating file writer with size-based rotation

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use file_writer::RotationPolicy;
pub use init::{init_tracing, TRACE_FILE_NAME};
