use crate::chain::rewrite_exception_chain;
use crate::context::merge_http_context;
use crate::factory::{CauseExceptionFactory, ExceptionFactory};
use crate::redaction::RedactionPolicy;
use crate::transport::TransportError;
use crate::types::{ErrorEvent, Hint};
use std::sync::Arc;

/// A single enrichment step applied to events before transmission.
///
/// Steps run in a fixed, deterministic order; returning `None` drops the
/// event from the pipeline.
pub trait EventProcessor: Send + Sync {
    /// Step name, used for pipeline diagnostics
    fn name(&self) -> &str;

    fn process(&self, event: ErrorEvent, hint: Option<&Hint>) -> Option<ErrorEvent>;
}

/// Enrichment step that augments events originating from HTTP transport
/// errors with request/response context and a rewritten exception chain.
///
/// Events whose underlying error is not a [`TransportError`] pass through
/// untouched; this step never drops an event and never fails.
pub struct HttpContextProcessor {
    policy: RedactionPolicy,
    factory: Arc<dyn ExceptionFactory>,
}

impl HttpContextProcessor {
    pub fn new(policy: RedactionPolicy) -> Self {
        Self {
            policy,
            factory: Arc::new(CauseExceptionFactory),
        }
    }

    /// Replace the exception-construction collaborator
    pub fn with_factory(mut self, factory: Arc<dyn ExceptionFactory>) -> Self {
        self.factory = factory;
        self
    }

    /// Enrich a single event. Identity pass-through unless the event's
    /// throwable downcasts to a transport error.
    pub fn enrich(&self, mut event: ErrorEvent) -> ErrorEvent {
        let Some(throwable) = event.throwable.clone() else {
            return event;
        };
        let Some(transport) = throwable.downcast_ref::<TransportError>() else {
            return event;
        };

        merge_http_context(&mut event, transport, &self.policy);
        rewrite_exception_chain(event, transport, self.factory.as_ref())
    }
}

impl EventProcessor for HttpContextProcessor {
    fn name(&self) -> &str {
        "http-context"
    }

    fn process(&self, event: ErrorEvent, _hint: Option<&Hint>) -> Option<ErrorEvent> {
        Some(self.enrich(event))
    }
}

/// Ordered pipeline of named enrichment steps.
///
/// Steps run in registration order; a step returning `None` drops the event
/// and short-circuits the rest of the pipeline.
#[derive(Default)]
pub struct EnrichmentPipeline {
    processors: Vec<Box<dyn EventProcessor>>,
}

impl EnrichmentPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_processor(mut self, processor: Box<dyn EventProcessor>) -> Self {
        self.processors.push(processor);
        self
    }

    pub fn add_processor(&mut self, processor: Box<dyn EventProcessor>) {
        self.processors.push(processor);
    }

    /// Names of the registered steps, in execution order
    pub fn processor_names(&self) -> Vec<&str> {
        self.processors.iter().map(|p| p.name()).collect()
    }

    pub fn run(&self, event: ErrorEvent, hint: Option<&Hint>) -> Option<ErrorEvent> {
        let mut current = event;
        for processor in &self.processors {
            match processor.process(current, hint) {
                Some(next) => current = next,
                None => {
                    tracing::debug!(processor = processor.name(), "event dropped by processor");
                    return None;
                }
            }
        }
        Some(current)
    }
}
