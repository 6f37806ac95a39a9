//! HTTP Enrich - HTTP context enrichment for crash-reporting pipelines
//!
//! This crate provides an enrichment step that recognizes errors raised by
//! the HTTP transport layer and augments the captured error event with
//! request/response context and a rewritten exception chain (the inner cause
//! becomes its own chained exception, the transport exception keeps a clean
//! summary). Headers and body payloads are gated by a redaction policy.
//! Enrichment is synchronous, best-effort, and never drops or corrupts an
//! event.

// Core modules
pub mod error;
pub mod redaction;
pub mod transport;
pub mod types;

// Enrichment step internals
mod chain;
mod context;

// Pipeline and collaborator surface
pub mod factory;
pub mod hub;
pub mod processor;

// Re-export main types for convenience
pub use error::{EnrichError, Result};
pub use factory::{CauseExceptionFactory, ExceptionFactory};
pub use hub::{Hub, NoOpHub};
pub use processor::{EnrichmentPipeline, EventProcessor, HttpContextProcessor};
pub use redaction::{MaxBodySize, RedactionPolicy, DEFAULT_MAX_BODY_BYTES};
pub use transport::{
    Cause, RequestOptions, TransportError, TransportErrorKind, TransportResponse,
};
pub use types::{
    Body, Context, ErrorEvent, EventId, Hint, RequestSnapshot, ResponseSnapshot, SpanId,
    StructuredException, RESPONSE_CONTEXT_KEY,
};

/// Enrich a single event with HTTP context using the default exception
/// factory and the given redaction policy.
pub fn enrich_event(event: ErrorEvent, policy: RedactionPolicy) -> ErrorEvent {
    HttpContextProcessor::new(policy).enrich(event)
}
