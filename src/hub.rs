use crate::types::{Context, ErrorEvent, EventId, SpanId};
use std::error::Error as StdError;

/// Reporting client surface consumed by application code.
///
/// Callers hold a `Hub` regardless of whether reporting is active, so they
/// never branch on enablement.
pub trait Hub: Send + Sync {
    fn capture_event(&self, event: ErrorEvent) -> EventId;

    fn capture_error(&self, error: &(dyn StdError + Send + Sync + 'static)) -> EventId;

    fn capture_message(&self, message: &str) -> EventId;

    fn start_span(&self, operation: &str, description: &str) -> SpanId;

    /// The currently active span, if any
    fn current_span(&self) -> Option<SpanId>;

    fn set_context(&self, key: &str, context: Context);

    fn close(&self);
}

/// Client used when reporting is turned off: accepts every operation,
/// performs no work, returns inert identifiers, and never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpHub;

impl Hub for NoOpHub {
    fn capture_event(&self, _event: ErrorEvent) -> EventId {
        EventId::nil()
    }

    fn capture_error(&self, _error: &(dyn StdError + Send + Sync + 'static)) -> EventId {
        EventId::nil()
    }

    fn capture_message(&self, _message: &str) -> EventId {
        EventId::nil()
    }

    fn start_span(&self, _operation: &str, _description: &str) -> SpanId {
        SpanId::nil()
    }

    fn current_span(&self) -> Option<SpanId> {
        None
    }

    fn set_context(&self, _key: &str, _context: Context) {}

    fn close(&self) {}
}
