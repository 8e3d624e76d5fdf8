//! Trace context propagation across the request/response boundary.
//!
//! A request leaves the plugin in one event and its result comes back in a
//! later, unrelated one. The OpenTelemetry ids of the issuing span ride along in
//! the request context map so the span that applies the response can be linked
//! to the span that sent it.

use std::collections::BTreeMap;

const TRACE_ID_KEY: &str = "trace_id";
const PARENT_SPAN_ID_KEY: &str = "parent_span_id";

/// Distributed tracing context captured when a request is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the issuing span, as a hex string.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` when the current span carries no valid OpenTelemetry
    /// context, for instance when tracing was never initialized.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Writes the ids into a request context map.
    pub fn write_to(&self, map: &mut BTreeMap<String, String>) {
        map.insert(TRACE_ID_KEY.to_string(), self.trace_id.clone());
        map.insert(PARENT_SPAN_ID_KEY.to_string(), self.parent_span_id.clone());
    }

    /// Reads the ids back from a response context map.
    #[must_use]
    pub fn read_from(map: &BTreeMap<String, String>) -> Option<Self> {
        Some(Self {
            trace_id: map.get(TRACE_ID_KEY)?.clone(),
            parent_span_id: map.get(PARENT_SPAN_ID_KEY)?.clone(),
        })
    }

    /// Attaches this context as the remote parent of spans created while the
    /// returned guard is alive.
    ///
    /// Returns `None` if either id is not valid hex.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }
}
