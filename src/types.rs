use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Context key under which the response snapshot is stored on an event
pub const RESPONSE_CONTEXT_KEY: &str = "response";

/// Identifier assigned to a captured event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The inert identifier returned by a disabled reporting client
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Identifier assigned to a tracing span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpanId(Uuid);

impl SpanId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The inert identifier returned by a disabled reporting client
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for SpanId {
    fn default() -> Self {
        Self::new()
    }
}

/// One entry in an event's exception list.
///
/// The list is ordered outermost-first before chain rewriting; a chained
/// inner cause is prepended so the innermost exception ends up first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredException {
    pub exception_type: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,
}

impl StructuredException {
    pub fn new<T: Into<String>, V: Into<String>>(exception_type: T, value: V) -> Self {
        Self {
            exception_type: exception_type.into(),
            value: value.into(),
            stack_trace: None,
        }
    }

    pub fn with_stack_trace<S: Into<String>>(mut self, stack_trace: S) -> Self {
        self.stack_trace = Some(stack_trace.into());
        self
    }
}

/// Request or response body payload.
///
/// Text payloads are measured in UTF-8 code units, raw payloads in bytes;
/// both normalize to a size-in-bytes comparison for the redaction policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Body {
    Text(String),
    Raw(Vec<u8>),
}

impl Body {
    pub fn size_in_bytes(&self) -> usize {
        match self {
            Body::Text(text) => text.len(),
            Body::Raw(bytes) => bytes.len(),
        }
    }
}

/// Read-only projection of the request that produced an event.
///
/// Built fresh on every enrichment; headers and body are absent whenever the
/// redaction policy withholds them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSnapshot {
    pub url: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
}

/// Read-only projection of the response attached to an event.
///
/// `body_size` is metadata and survives redaction; the header map and body
/// payload do not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSnapshot {
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
}

/// A named context entry on an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Context {
    Response(ResponseSnapshot),
    Other(serde_json::Value),
}

impl Context {
    /// The response snapshot, if this entry holds one
    pub fn as_response(&self) -> Option<&ResponseSnapshot> {
        match self {
            Context::Response(snapshot) => Some(snapshot),
            Context::Other(_) => None,
        }
    }
}

/// Auxiliary data handed to processors alongside an event.
///
/// This component accepts and ignores it; other pipeline steps may not.
#[derive(Debug, Clone, Default)]
pub struct Hint {
    extras: HashMap<String, serde_json::Value>,
}

impl Hint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K: Into<String>>(&mut self, key: K, value: serde_json::Value) {
        self.extras.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.extras.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.extras.is_empty()
    }
}

/// The error record being enriched before transmission to the backend.
///
/// `throwable` keeps the original error object around for processors that
/// inspect it; it never goes on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEvent {
    pub event_id: EventId,
    pub timestamp: DateTime<Utc>,
    #[serde(skip)]
    pub throwable: Option<Arc<dyn StdError + Send + Sync + 'static>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exceptions: Vec<StructuredException>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub contexts: HashMap<String, Context>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<RequestSnapshot>,
}

impl ErrorEvent {
    pub fn new() -> Self {
        Self {
            event_id: EventId::new(),
            timestamp: Utc::now(),
            throwable: None,
            exceptions: Vec::new(),
            contexts: HashMap::new(),
            request: None,
        }
    }

    /// Attach the original error object that produced this event
    pub fn with_throwable<E: StdError + Send + Sync + 'static>(mut self, error: E) -> Self {
        self.throwable = Some(Arc::new(error));
        self
    }

    /// Append an exception entry (outermost-first ordering)
    pub fn with_exception(mut self, exception: StructuredException) -> Self {
        self.exceptions.push(exception);
        self
    }

    /// The response context entry, if one has been attached
    pub fn response_context(&self) -> Option<&ResponseSnapshot> {
        self.contexts
            .get(RESPONSE_CONTEXT_KEY)
            .and_then(Context::as_response)
    }
}

impl Default for ErrorEvent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_sizes() {
        assert_eq!(Body::Text("abcd".to_string()).size_in_bytes(), 4);
        assert_eq!(Body::Raw(vec![0u8; 10]).size_in_bytes(), 10);
        // multi-byte characters count code units, not characters
        assert_eq!(Body::Text("é".to_string()).size_in_bytes(), 2);
    }

    #[test]
    fn test_nil_identifiers() {
        assert!(EventId::nil().is_nil());
        assert!(SpanId::nil().is_nil());
        assert!(!EventId::new().is_nil());
    }

    #[test]
    fn test_event_builders() {
        let event = ErrorEvent::new()
            .with_exception(StructuredException::new("IoError", "read failed"));

        assert_eq!(event.exceptions.len(), 1);
        assert_eq!(event.exceptions[0].exception_type, "IoError");
        assert!(event.response_context().is_none());
    }

    #[test]
    fn test_event_serialization_skips_throwable() {
        let event = ErrorEvent::new().with_throwable(std::io::Error::new(
            std::io::ErrorKind::Other,
            "boom",
        ));

        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("throwable").is_none());
        assert!(json.get("event_id").is_some());
    }
}
