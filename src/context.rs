//! Builds request/response snapshots from a transport error and merges them
//! into an event without overwriting context set by earlier processors.

use crate::redaction::RedactionPolicy;
use crate::transport::{RequestOptions, TransportError, TransportResponse};
use crate::types::{Context, ErrorEvent, RequestSnapshot, ResponseSnapshot, RESPONSE_CONTEXT_KEY};
use std::collections::HashMap;

/// Merge HTTP context derived from the transport error into the event.
///
/// The response context is only inserted when no `response` entry exists yet,
/// and `event.request` is only set when absent. An absent transport response
/// simply contributes no response context.
pub(crate) fn merge_http_context(
    event: &mut ErrorEvent,
    transport: &TransportError,
    policy: &RedactionPolicy,
) {
    if let Some(response) = &transport.response {
        if !event.contexts.contains_key(RESPONSE_CONTEXT_KEY) {
            event.contexts.insert(
                RESPONSE_CONTEXT_KEY.to_string(),
                Context::Response(response_snapshot(response, policy)),
            );
        }
    }

    if event.request.is_none() {
        event.request = Some(request_snapshot(&transport.request, policy));
    }
}

fn response_snapshot(response: &TransportResponse, policy: &RedactionPolicy) -> ResponseSnapshot {
    ResponseSnapshot {
        status_code: response.status_code,
        headers: policy
            .should_include_headers()
            .then(|| join_headers(&response.headers))
            .filter(|headers| !headers.is_empty()),
        body_size: response.body.as_ref().map(|body| body.size_in_bytes()),
        body: response
            .body
            .as_ref()
            .filter(|body| policy.should_include_body(body.size_in_bytes()))
            .cloned(),
    }
}

fn request_snapshot(request: &RequestOptions, policy: &RedactionPolicy) -> RequestSnapshot {
    RequestSnapshot {
        url: request.url.clone(),
        method: request.method.clone(),
        headers: policy
            .should_include_headers()
            .then(|| request.headers.clone())
            .filter(|headers| !headers.is_empty()),
        body: request
            .body
            .as_ref()
            .filter(|body| policy.should_include_body(body.size_in_bytes()))
            .cloned(),
    }
}

/// One "name: v1; v2" entry per header name
fn join_headers(headers: &HashMap<String, Vec<String>>) -> HashMap<String, String> {
    headers
        .iter()
        .map(|(name, values)| (name.clone(), values.join("; ")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redaction::MaxBodySize;
    use crate::transport::TransportErrorKind;
    use crate::types::Body;

    fn permissive_policy() -> RedactionPolicy {
        RedactionPolicy::new(true, MaxBodySize::Always)
    }

    fn transport_with_response() -> TransportError {
        TransportError::new(
            TransportErrorKind::BadResponse,
            RequestOptions::new("POST", "https://api.example.com/v1/orders")
                .with_header("content-type", "application/json")
                .with_body(Body::Text("{\"id\":1}".to_string())),
        )
        .with_response(
            TransportResponse::new(503)
                .with_header("retry-after", "1")
                .with_header("retry-after", "2")
                .with_body(Body::Text("unavailable".to_string())),
        )
    }

    #[test]
    fn test_merge_inserts_response_and_request() {
        let mut event = ErrorEvent::new();
        merge_http_context(&mut event, &transport_with_response(), &permissive_policy());

        let response = event.response_context().expect("response context");
        assert_eq!(response.status_code, 503);
        assert_eq!(response.body_size, Some(11));
        assert_eq!(
            response.headers.as_ref().unwrap()["retry-after"],
            "1; 2".to_string()
        );

        let request = event.request.as_ref().expect("request snapshot");
        assert_eq!(request.method, "POST");
        assert_eq!(request.url, "https://api.example.com/v1/orders");
        assert_eq!(request.body, Some(Body::Text("{\"id\":1}".to_string())));
    }

    #[test]
    fn test_merge_preserves_existing_response_context() {
        let mut event = ErrorEvent::new();
        let existing = Context::Other(serde_json::json!({"status_code": 404}));
        event
            .contexts
            .insert(RESPONSE_CONTEXT_KEY.to_string(), existing.clone());

        merge_http_context(&mut event, &transport_with_response(), &permissive_policy());
        assert_eq!(event.contexts[RESPONSE_CONTEXT_KEY], existing);
    }

    #[test]
    fn test_merge_preserves_existing_request() {
        let mut event = ErrorEvent::new();
        event.request = Some(RequestSnapshot {
            url: "https://earlier.example.com".to_string(),
            method: "PUT".to_string(),
            headers: None,
            body: None,
        });

        merge_http_context(&mut event, &transport_with_response(), &permissive_policy());
        assert_eq!(event.request.as_ref().unwrap().method, "PUT");
    }

    #[test]
    fn test_no_transport_response_means_no_response_context() {
        let transport = TransportError::new(
            TransportErrorKind::Timeout,
            RequestOptions::new("GET", "https://api.example.com/v1/items"),
        );
        let mut event = ErrorEvent::new();
        merge_http_context(&mut event, &transport, &permissive_policy());

        assert!(event.response_context().is_none());
        assert!(event.request.is_some());
    }

    #[test]
    fn test_redaction_strips_headers_and_bodies() {
        let policy = RedactionPolicy::new(false, MaxBodySize::Always);
        let mut event = ErrorEvent::new();
        merge_http_context(&mut event, &transport_with_response(), &policy);

        let response = event.response_context().expect("response context");
        assert!(response.headers.is_none());
        assert!(response.body.is_none());
        // size is metadata, not payload
        assert_eq!(response.body_size, Some(11));

        let request = event.request.as_ref().expect("request snapshot");
        assert!(request.headers.is_none());
        assert!(request.body.is_none());
    }

    #[test]
    fn test_body_over_threshold_is_dropped() {
        let policy = RedactionPolicy::new(true, MaxBodySize::Bytes(4));
        let mut event = ErrorEvent::new();
        merge_http_context(&mut event, &transport_with_response(), &policy);

        let response = event.response_context().expect("response context");
        assert!(response.body.is_none());
        assert_eq!(response.body_size, Some(11));
    }
}
