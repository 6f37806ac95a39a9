use crate::error::{EnrichError, Result};
use crate::transport::Cause;
use crate::types::StructuredException;

/// Collaborator that turns a raw inner cause into a structured exception.
///
/// Supplied by the surrounding reporting SDK; conversion may fail, and the
/// chain rewriter treats any failure as "leave the event alone".
pub trait ExceptionFactory: Send + Sync {
    fn build_exception(
        &self,
        cause: &Cause,
        stack_trace: Option<&str>,
    ) -> Result<StructuredException>;
}

/// Default factory: type identifier from the cause's recorded type name,
/// value from its Display rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct CauseExceptionFactory;

impl ExceptionFactory for CauseExceptionFactory {
    fn build_exception(
        &self,
        cause: &Cause,
        stack_trace: Option<&str>,
    ) -> Result<StructuredException> {
        if cause.type_name().is_empty() {
            return Err(EnrichError::conversion("cause has no type identifier"));
        }

        let mut exception = StructuredException::new(cause.type_name(), cause.inner().to_string());
        if let Some(stack_trace) = stack_trace {
            exception = exception.with_stack_trace(stack_trace);
        }
        Ok(exception)
    }
}
