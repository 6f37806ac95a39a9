use crate::types::Body;
use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Classification of an HTTP transport failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connection,
    BadResponse,
    Cancelled,
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransportErrorKind::Timeout => "timeout",
            TransportErrorKind::Connection => "connection",
            TransportErrorKind::BadResponse => "bad response",
            TransportErrorKind::Cancelled => "cancelled",
            TransportErrorKind::Other => "error",
        };
        f.write_str(label)
    }
}

/// Options of the request that produced a transport failure
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub url: String,
    pub method: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Body>,
}

impl RequestOptions {
    pub fn new<M: Into<String>, U: Into<String>>(method: M, url: U) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }
}

/// Response received before the transport layer gave up, when one exists.
///
/// Headers are multi-valued; the context merger joins repeated values per
/// header name.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status_code: u16,
    pub headers: HashMap<String, Vec<String>>,
    pub body: Option<Body>,
}

impl TransportResponse {
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.entry(name.into()).or_default().push(value.into());
        self
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }
}

/// Inner cause wrapped by a transport error.
///
/// The concrete type name is recorded at insertion, since it is erased from
/// the trait object and the chain rewriter needs an identifier string.
#[derive(Debug, Clone)]
pub struct Cause {
    type_name: String,
    inner: Arc<dyn StdError + Send + Sync + 'static>,
}

impl Cause {
    /// Wrap an error, deriving the type identifier from its Rust type name
    pub fn new<E: StdError + Send + Sync + 'static>(error: E) -> Self {
        Self {
            type_name: short_type_name(std::any::type_name::<E>()).to_string(),
            inner: Arc::new(error),
        }
    }

    /// Wrap an error under an explicit type identifier
    pub fn named<N: Into<String>, E: StdError + Send + Sync + 'static>(
        type_name: N,
        error: E,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            inner: Arc::new(error),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.inner.as_ref()
    }
}

fn short_type_name(full: &str) -> &str {
    full.rsplit("::").next().unwrap_or(full)
}

/// An error raised by the HTTP client layer, possibly wrapping a lower-level
/// cause such as a socket or parsing failure.
///
/// `Display` renders the full form including the inner cause and its stack
/// trace; [`TransportError::summary`] renders the cleaned form the chain
/// rewriter substitutes once the cause has become its own chained exception.
/// Enrichment works on this type read-only; the cleaned value is derived
/// rather than produced by clearing the cause in place.
#[derive(Debug, Clone)]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub request: RequestOptions,
    pub response: Option<TransportResponse>,
    cause: Option<Cause>,
    cause_stack_trace: Option<String>,
}

impl TransportError {
    /// Type identifier used for transport exceptions in event exception lists
    pub const TYPE: &'static str = "TransportError";

    pub fn new(kind: TransportErrorKind, request: RequestOptions) -> Self {
        Self {
            kind,
            request,
            response: None,
            cause: None,
            cause_stack_trace: None,
        }
    }

    pub fn with_response(mut self, response: TransportResponse) -> Self {
        self.response = Some(response);
        self
    }

    pub fn with_cause(mut self, cause: Cause) -> Self {
        self.cause = Some(cause);
        self
    }

    pub fn with_cause_stack_trace<S: Into<String>>(mut self, stack_trace: S) -> Self {
        self.cause_stack_trace = Some(stack_trace.into());
        self
    }

    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    pub fn cause_stack_trace(&self) -> Option<&str> {
        self.cause_stack_trace.as_deref()
    }

    /// Rendered form without the inner cause or its stack trace.
    ///
    /// This is what the transport exception's `value` becomes after the
    /// cause has been split out into its own chained exception.
    pub fn summary(&self) -> String {
        match &self.response {
            Some(response) => format!(
                "{} {} failed ({}): status {}",
                self.request.method, self.request.url, self.kind, response.status_code
            ),
            None => format!(
                "{} {} failed ({})",
                self.request.method, self.request.url, self.kind
            ),
        }
    }

    /// Build a transport error from a failed reqwest exchange.
    ///
    /// The reqwest error itself becomes the inner cause, so the chain
    /// rewriter can surface it as a first-class chained exception.
    pub fn from_reqwest(method: reqwest::Method, error: reqwest::Error) -> Self {
        let url = error.url().map(|u| u.to_string()).unwrap_or_default();
        let status = error.status();
        let kind = if error.is_timeout() {
            TransportErrorKind::Timeout
        } else if error.is_connect() {
            TransportErrorKind::Connection
        } else if status.is_some() {
            TransportErrorKind::BadResponse
        } else {
            TransportErrorKind::Other
        };

        let mut transport = Self::new(kind, RequestOptions::new(method.as_str(), url));
        if let Some(status) = status {
            transport = transport.with_response(TransportResponse::new(status.as_u16()));
        }
        transport.with_cause(Cause::named("reqwest::Error", error))
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())?;
        if let Some(cause) = &self.cause {
            write!(f, "\nCaused by: {}: {}", cause.type_name(), cause.inner())?;
            if let Some(stack_trace) = &self.cause_stack_trace {
                write!(f, "\n{stack_trace}")?;
            }
        }
        Ok(())
    }
}

impl StdError for TransportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_ref()
            .map(|cause| cause.inner() as &(dyn StdError + 'static))
    }
}
