//! Rewrites an event's exception chain so the transport error's inner cause
//! becomes its own first-class chained exception.

use crate::factory::ExceptionFactory;
use crate::transport::TransportError;
use crate::types::ErrorEvent;

/// Splice the transport error's inner cause into the event's exception list.
///
/// No-op without a cause. Otherwise the cause becomes a structured exception
/// prepended to the list (innermost first), and the transport exception —
/// located by [`TransportError::TYPE`] — keeps its position but gets the
/// cleaned summary as its value, so the inner stack trace no longer appears
/// twice. A conversion failure is logged at debug severity and leaves the
/// event exactly as it was handed in.
pub(crate) fn rewrite_exception_chain(
    mut event: ErrorEvent,
    transport: &TransportError,
    factory: &dyn ExceptionFactory,
) -> ErrorEvent {
    let Some(cause) = transport.cause() else {
        return event;
    };

    let chained = match factory.build_exception(cause, transport.cause_stack_trace()) {
        Ok(exception) => exception,
        Err(error) => {
            tracing::debug!(
                %error,
                cause = cause.type_name(),
                stack_trace = transport.cause_stack_trace(),
                "could not convert inner cause, keeping exception chain as-is"
            );
            return event;
        }
    };

    if let Some(index) = event
        .exceptions
        .iter()
        .position(|exception| exception.exception_type == TransportError::TYPE)
    {
        let mut outer = event.exceptions.remove(index);
        outer.value = transport.summary();
        event.exceptions.insert(index, outer);
    }

    event.exceptions.insert(0, chained);
    event
}
