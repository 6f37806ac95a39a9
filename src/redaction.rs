use serde::{Deserialize, Serialize};

/// Default upper bound for attached body payloads (8KB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 8_192;

/// Upper bound on body payloads attached to outgoing events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxBodySize {
    Never,
    Bytes(usize),
    Always,
}

impl MaxBodySize {
    /// Whether a payload of the given size may be attached
    pub fn allows(&self, size_in_bytes: usize) -> bool {
        match self {
            MaxBodySize::Never => false,
            MaxBodySize::Bytes(limit) => size_in_bytes <= *limit,
            MaxBodySize::Always => true,
        }
    }
}

impl Default for MaxBodySize {
    fn default() -> Self {
        MaxBodySize::Bytes(DEFAULT_MAX_BODY_BYTES)
    }
}

/// Read-only configuration gating personally identifiable data on events.
///
/// Shared by context building and chain rewriting so both apply the same
/// policy; it never changes during a single enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionPolicy {
    pub send_default_pii: bool,
    pub max_body_size: MaxBodySize,
}

impl RedactionPolicy {
    pub fn new(send_default_pii: bool, max_body_size: MaxBodySize) -> Self {
        Self {
            send_default_pii,
            max_body_size,
        }
    }

    /// Whether header maps may appear on outgoing events
    pub fn should_include_headers(&self) -> bool {
        self.send_default_pii
    }

    /// Whether a body payload of the given size may appear on outgoing events
    pub fn should_include_body(&self, size_in_bytes: usize) -> bool {
        self.send_default_pii && self.max_body_size.allows(size_in_bytes)
    }
}

impl Default for RedactionPolicy {
    fn default() -> Self {
        // privacy-safe default: nothing identifiable leaves the process
        Self {
            send_default_pii: false,
            max_body_size: MaxBodySize::default(),
        }
    }
}
