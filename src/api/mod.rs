//! Inventory service client.
//!
//! The plugin runs inside Zellij's WASM sandbox, where HTTP is performed by the
//! host: the plugin describes a request, and the result arrives later as a
//! separate event. This module owns both halves of that exchange.
//!
//! # Architecture
//!
//! ```text
//! ApiClient ──► ApiRequest ──► host web_request
//!                                    │
//! ApiOutcome ◄── ApiResponse ◄── WebRequestResult
//! ```
//!
//! - `operation`: the six operations, request families and HTTP methods
//! - `request`: request descriptors, echoed context, sequence tracking
//! - `client`: URL, header and body construction
//! - `response`: status and body decoding into typed outcomes
//! - `trace`: OpenTelemetry context carried through the echoed context

pub mod client;
pub mod operation;
pub mod request;
pub mod response;
pub mod trace;

pub use client::ApiClient;
pub use operation::{HttpMethod, Operation, RequestFamily};
pub use request::{ApiRequest, RequestContext, RequestTracker, Ticket};
pub use response::{ApiOutcome, ApiResponse};
pub use trace::TraceContext;
