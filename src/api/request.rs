//! Outgoing request descriptors, their context, and stale-response tracking.
//!
//! The host performs the HTTP exchange; the plugin only describes it. Whatever
//! the plugin needs to interpret the eventual result travels in a string map
//! (the request context) that the host echoes back untouched.

use std::collections::{BTreeMap, HashMap};

use super::operation::{HttpMethod, Operation, RequestFamily};
use super::trace::TraceContext;
use crate::domain::error::{InventoryError, Result};

const OPERATION_KEY: &str = "operation";
const FAMILY_KEY: &str = "family";
const SEQ_KEY: &str = "seq";
const PRODUCT_ID_KEY: &str = "product_id";

/// Proof that a request was registered with the [`RequestTracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub family: RequestFamily,
    pub seq: u64,
}

/// Everything needed to interpret a response once it arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub operation: Operation,
    pub family: RequestFamily,
    pub seq: u64,
    /// Target id for fetch, update and delete.
    pub product_id: Option<i64>,
    pub trace: Option<TraceContext>,
}

impl RequestContext {
    /// Builds a context for `operation`, capturing the current trace span.
    #[must_use]
    pub fn new(operation: Operation, ticket: Ticket, product_id: Option<i64>) -> Self {
        Self {
            operation,
            family: ticket.family,
            seq: ticket.seq,
            product_id,
            trace: TraceContext::from_current(),
        }
    }

    /// Serializes the context into the map handed to the host.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(OPERATION_KEY.to_string(), self.operation.as_str().to_string());
        map.insert(FAMILY_KEY.to_string(), self.family.as_str().to_string());
        map.insert(SEQ_KEY.to_string(), self.seq.to_string());
        if let Some(id) = self.product_id {
            map.insert(PRODUCT_ID_KEY.to_string(), id.to_string());
        }
        if let Some(trace) = &self.trace {
            trace.write_to(&mut map);
        }
        map
    }

    /// Rebuilds a context from the map echoed back with a response.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::Context`] if a required key is missing or
    /// does not parse.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self> {
        let field = |key: &str| {
            map.get(key)
                .ok_or_else(|| InventoryError::Context(format!("missing {key}")))
        };

        let operation = field(OPERATION_KEY).and_then(|raw| {
            Operation::parse(raw).ok_or_else(|| InventoryError::Context(format!("unknown operation {raw:?}")))
        })?;
        let family = field(FAMILY_KEY).and_then(|raw| {
            RequestFamily::parse(raw).ok_or_else(|| InventoryError::Context(format!("unknown family {raw:?}")))
        })?;
        let seq = field(SEQ_KEY).and_then(|raw| {
            raw.parse::<u64>()
                .map_err(|e| InventoryError::Context(format!("bad seq {raw:?}: {e}")))
        })?;
        let product_id = map
            .get(PRODUCT_ID_KEY)
            .map(|raw| {
                raw.parse::<i64>()
                    .map_err(|e| InventoryError::Context(format!("bad product_id {raw:?}: {e}")))
            })
            .transpose()?;

        Ok(Self {
            operation,
            family,
            seq,
            product_id,
            trace: TraceContext::read_from(map),
        })
    }
}

/// A fully described HTTP exchange, ready to hand to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    pub context: RequestContext,
}

/// Issues sequence numbers and remembers the newest one per family.
///
/// Sequence numbers are global and strictly increasing, so comparing a
/// response's number with the newest issued in its family tells whether a
/// later request of the same family has superseded it.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    last_seq: u64,
    latest: HashMap<RequestFamily, u64>,
    in_flight: usize,
}

impl RequestTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new request in `family`.
    pub fn issue(&mut self, family: RequestFamily) -> Ticket {
        self.last_seq += 1;
        self.latest.insert(family, self.last_seq);
        self.in_flight += 1;
        Ticket {
            family,
            seq: self.last_seq,
        }
    }

    /// Records that a response for a previously issued request arrived.
    pub fn settle(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    /// Whether `seq` is the newest request issued in `family`.
    #[must_use]
    pub fn is_current(&self, family: RequestFamily, seq: u64) -> bool {
        self.latest.get(&family) == Some(&seq)
    }

    /// Number of requests issued but not yet answered.
    #[must_use]
    pub const fn in_flight(&self) -> usize {
        self.in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_map_round_trip() {
        let ctx = RequestContext {
            operation: Operation::Delete,
            family: RequestFamily::Delete,
            seq: 42,
            product_id: Some(3),
            trace: Some(TraceContext {
                trace_id: "0af7651916cd43dd8448eb211c80319c".into(),
                parent_span_id: "b7ad6b7169203331".into(),
            }),
        };
        assert_eq!(RequestContext::from_map(&ctx.to_map()).unwrap(), ctx);
    }

    #[test]
    fn context_without_id_or_trace() {
        let ctx = RequestContext {
            operation: Operation::ListAll,
            family: RequestFamily::Results,
            seq: 1,
            product_id: None,
            trace: None,
        };
        let map = ctx.to_map();
        assert!(!map.contains_key(PRODUCT_ID_KEY));
        assert_eq!(RequestContext::from_map(&map).unwrap(), ctx);
    }

    #[test]
    fn garbled_context_is_an_error() {
        let mut map = BTreeMap::new();
        assert!(matches!(RequestContext::from_map(&map), Err(InventoryError::Context(_))));

        map.insert(OPERATION_KEY.into(), "list_all".into());
        map.insert(FAMILY_KEY.into(), "results".into());
        map.insert(SEQ_KEY.into(), "seven".into());
        assert!(matches!(RequestContext::from_map(&map), Err(InventoryError::Context(_))));
    }

    #[test]
    fn newer_request_supersedes_older_in_same_family() {
        let mut tracker = RequestTracker::new();
        let list = tracker.issue(RequestFamily::Results);
        let fetch = tracker.issue(RequestFamily::Results);

        assert!(fetch.seq > list.seq);
        assert!(tracker.is_current(RequestFamily::Results, fetch.seq));
        assert!(!tracker.is_current(RequestFamily::Results, list.seq));
    }

    #[test]
    fn families_are_tracked_independently() {
        let mut tracker = RequestTracker::new();
        let create = tracker.issue(RequestFamily::Create);
        let _list = tracker.issue(RequestFamily::Results);

        assert!(tracker.is_current(RequestFamily::Create, create.seq));
        assert!(!tracker.is_current(RequestFamily::Update, create.seq));
    }

    #[test]
    fn in_flight_counts_unanswered_requests() {
        let mut tracker = RequestTracker::new();
        tracker.issue(RequestFamily::Results);
        tracker.issue(RequestFamily::Delete);
        assert_eq!(tracker.in_flight(), 2);

        tracker.settle();
        tracker.settle();
        tracker.settle();
        assert_eq!(tracker.in_flight(), 0);
    }
}
