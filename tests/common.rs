//! Shared test utilities for http-enrich integration tests
//!
//! Provides error types and factory helpers for building transport errors
//! and events across test scenarios.

use http_enrich::{
    Body, ErrorEvent, MaxBodySize, RedactionPolicy, RequestOptions, StructuredException,
    TransportError, TransportErrorKind, TransportResponse,
};
use std::fmt;

/// Inner cause used by the chaining scenarios
#[derive(Debug)]
pub struct NetworkUnreachable;

impl fmt::Display for NetworkUnreachable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("network unreachable")
    }
}

impl std::error::Error for NetworkUnreachable {}

/// Stack trace text attached to the inner cause in chaining scenarios
pub const CAUSE_TRACE: &str = "at connect (socket.rs:42)\nat send_request (client.rs:108)";

/// Policy that lets everything through
pub fn permissive_policy() -> RedactionPolicy {
    RedactionPolicy::new(true, MaxBodySize::Always)
}

/// Transport error for the concrete GET /v1/items scenario
pub fn items_transport_error(body: Option<Body>) -> TransportError {
    let mut response = TransportResponse::new(500)
        .with_header("content-type", "application/json");
    if let Some(body) = body {
        response = response.with_body(body);
    }

    TransportError::new(
        TransportErrorKind::BadResponse,
        RequestOptions::new("GET", "https://api.example.com/v1/items")
            .with_header("accept", "application/json"),
    )
    .with_response(response)
}

/// Event whose throwable is the given transport error
pub fn event_with_transport(transport: TransportError) -> ErrorEvent {
    ErrorEvent::new().with_throwable(transport)
}

/// Event carrying a pre-existing transport exception entry rendered from the
/// error's full (uncleaned) textual form
pub fn event_with_transport_exception(transport: TransportError) -> ErrorEvent {
    let rendered = transport.to_string();
    ErrorEvent::new()
        .with_throwable(transport)
        .with_exception(StructuredException::new(TransportError::TYPE, rendered))
}
