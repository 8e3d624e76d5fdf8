//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! - **File-Based Export**: `~/.local/share/zellij/stockroom/stockroom-otlp.json`
//! - **Rotation**: at 10 MB, keeping `.1` (newest) to `.3`
//! - **OTLP Format**: one OTLP/JSON document per line
//! - **Propagation**: a request's span context rides in the request context and
//!   becomes the remote parent of the span that applies its response
//!
//! The level comes from the `trace_level` plugin option (default `"info"`)
//! and accepts any `EnvFilter` directive, e.g. `"stockroom=debug"`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`tracer`]: Tracer provider with the file exporter
//! - [`span_formatter`]: OTLP JSON serialization
//! - [`file_writer`]: Size-based rotating writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use file_writer::{FileWriter, RotationPolicy};
pub use init::init_tracing;
