use thiserror::Error;

/// Result type alias for enrichment operations
pub type Result<T> = std::result::Result<T, EnrichError>;

/// Error types for the enrichment step.
///
/// None of these ever escape the pipeline: a failure inside enrichment is
/// recovered locally and only costs the event some added context.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("Exception conversion failed: {message}")]
    Conversion { message: String },

    #[error("General error: {message}")]
    General { message: String },
}

impl EnrichError {
    /// Create a new exception conversion error
    pub fn conversion<S: Into<String>>(message: S) -> Self {
        Self::Conversion {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }
}
