use thiserror::Error;

/// A failure raised by an engine adapter.
///
/// The orchestration layer treats these as opaque: a missing resource, a
/// decode failure, or an analysis fault all pass through unclassified. The
/// only obligations on this side of the boundary are to not mask the failure
/// and to release held resources when one occurs mid-stream.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct EngineError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
