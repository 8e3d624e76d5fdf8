//! OTLP JSON span formatter.
//!
//! Each exported batch becomes one self-contained OTLP/JSON document
//! (`resourceSpans` → `scopeSpans` → `spans`) that OTLP collectors and trace
//! viewers can ingest line by line.

use std::time::{Duration, SystemTime};

use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde::Serialize;

const SCOPE_NAME: &str = "Stockroom";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportBatch {
    resource_spans: Vec<ResourceSpans>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResourceSpans {
    resource: OtlpResource,
    scope_spans: Vec<ScopeSpans>,
}

#[derive(Serialize)]
struct OtlpResource {
    attributes: Vec<Attribute>,
}

#[derive(Serialize)]
struct ScopeSpans {
    scope: Scope,
    spans: Vec<OtlpSpan>,
}

#[derive(Serialize)]
struct Scope {
    name: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OtlpSpan {
    trace_id: String,
    span_id: String,
    /// Empty for root spans.
    parent_span_id: String,
    name: String,
    kind: u8,
    start_time_unix_nano: String,
    end_time_unix_nano: String,
    attributes: Vec<Attribute>,
    events: Vec<OtlpEvent>,
    links: Vec<OtlpLink>,
    status: OtlpStatus,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OtlpEvent {
    time_unix_nano: String,
    name: String,
    attributes: Vec<Attribute>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OtlpLink {
    trace_id: String,
    span_id: String,
    attributes: Vec<Attribute>,
}

#[derive(Serialize)]
struct OtlpStatus {
    code: u8,
    message: String,
}

#[derive(Debug, Serialize, PartialEq)]
struct Attribute {
    key: String,
    value: AttributeValue,
}

/// OTLP `AnyValue`; 64-bit integers travel as strings.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
enum AttributeValue {
    BoolValue(bool),
    IntValue(String),
    DoubleValue(f64),
    StringValue(String),
}

impl From<&Value> for AttributeValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Bool(b) => Self::BoolValue(*b),
            Value::I64(i) => Self::IntValue(i.to_string()),
            Value::F64(f) => Self::DoubleValue(*f),
            Value::String(s) => Self::StringValue(s.to_string()),
            Value::Array(_) => Self::StringValue(format!("{value:?}")),
        }
    }
}

/// Formats span batches as OTLP JSON lines, stamped with one resource.
pub struct SpanFormatter {
    resource: Resource,
}

impl SpanFormatter {
    pub const fn new(resource: Resource) -> Self {
        Self { resource }
    }

    /// Serializes `batch` as a single-line OTLP JSON document.
    ///
    /// # Errors
    ///
    /// Returns the serializer error if a value cannot be represented in JSON.
    pub fn format_batch(&self, batch: &[SpanData]) -> serde_json::Result<String> {
        let resource = OtlpResource {
            attributes: self
                .resource
                .iter()
                .map(|(key, value)| Attribute {
                    key: key.to_string(),
                    value: value.into(),
                })
                .collect(),
        };

        let document = ExportBatch {
            resource_spans: vec![ResourceSpans {
                resource,
                scope_spans: vec![ScopeSpans {
                    scope: Scope { name: SCOPE_NAME },
                    spans: batch.iter().map(format_span).collect(),
                }],
            }],
        };

        serde_json::to_string(&document)
    }
}

fn format_span(span: &SpanData) -> OtlpSpan {
    let (code, message) = match &span.status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    };

    OtlpSpan {
        trace_id: format!("{:032x}", span.span_context.trace_id()),
        span_id: format!("{:016x}", span.span_context.span_id()),
        parent_span_id: if span.parent_span_id == SpanId::INVALID {
            String::new()
        } else {
            format!("{:016x}", span.parent_span_id)
        },
        name: span.name.to_string(),
        kind: span_kind_code(&span.span_kind),
        start_time_unix_nano: unix_nanos(span.start_time),
        end_time_unix_nano: unix_nanos(span.end_time),
        attributes: format_attributes(&span.attributes),
        events: span.events.iter().map(format_event).collect(),
        links: span.links.iter().map(format_link).collect(),
        status: OtlpStatus { code, message },
    }
}

fn format_event(event: &Event) -> OtlpEvent {
    OtlpEvent {
        time_unix_nano: unix_nanos(event.timestamp),
        name: event.name.to_string(),
        attributes: format_attributes(&event.attributes),
    }
}

fn format_link(link: &Link) -> OtlpLink {
    OtlpLink {
        trace_id: format!("{:032x}", link.span_context.trace_id()),
        span_id: format!("{:016x}", link.span_context.span_id()),
        attributes: format_attributes(&link.attributes),
    }
}

fn format_attributes(attributes: &[KeyValue]) -> Vec<Attribute> {
    attributes
        .iter()
        .map(|kv| Attribute {
            key: kv.key.to_string(),
            value: (&kv.value).into(),
        })
        .collect()
}

const fn span_kind_code(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos()
        .to_string()
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_values_use_otlp_tags() {
        let encoded = serde_json::to_value(Attribute {
            key: "seq".into(),
            value: (&Value::I64(42)).into(),
        })
        .unwrap();
        assert_eq!(encoded, serde_json::json!({"key": "seq", "value": {"intValue": "42"}}));

        let flag: AttributeValue = (&Value::Bool(true)).into();
        assert_eq!(serde_json::to_value(flag).unwrap(), serde_json::json!({"boolValue": true}));
    }

    #[test]
    fn empty_batch_carries_resource_and_scope() {
        let formatter = SpanFormatter::new(Resource::new(vec![KeyValue::new("service.name", "Stockroom")]));
        let line = formatter.format_batch(&[]).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&line).unwrap();

        let resource_spans = &doc["resourceSpans"][0];
        let attributes = resource_spans["resource"]["attributes"].as_array().unwrap();
        assert!(attributes.iter().any(|attr| attr["key"] == "service.name"
            && attr["value"]["stringValue"] == "Stockroom"));
        assert_eq!(resource_spans["scopeSpans"][0]["scope"]["name"], "Stockroom");
        assert_eq!(resource_spans["scopeSpans"][0]["spans"], serde_json::json!([]));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn nanos_before_epoch_clamp_to_zero() {
        assert_eq!(unix_nanos(SystemTime::UNIX_EPOCH), "0");
        assert_eq!(unix_nanos(SystemTime::UNIX_EPOCH + Duration::from_millis(1)), "1000000");
    }
}
