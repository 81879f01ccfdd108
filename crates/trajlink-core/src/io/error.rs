use crate::engine::error::EngineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// The façade-layer error taxonomy.
///
/// Everything here is fail-fast: no variant is retried by this crate, and
/// the only recovery behavior anywhere is deterministic resource release on
/// abnormal exit from a stream.
#[derive(Debug, Error)]
pub enum Error {
    /// The caller supplied invalid arguments: a missing path, an unsupported
    /// access mode, a missing resource.
    #[error("Invalid usage: {0}")]
    Usage(String),

    /// An internal contract was violated, by this library or by an engine
    /// adapter. Indicates a programming error, not a runtime condition;
    /// callers should treat it as fatal rather than catch-and-retry.
    #[error("API contract violation: {0}")]
    Api(String),

    /// A recognized capability that has not been built yet, as opposed to a
    /// malformed request.
    #[error("Feature not available: {0}")]
    FeatureNotAvailable(&'static str),

    /// An opaque engine-layer failure, passed through unclassified.
    #[error(transparent)]
    Engine(#[from] EngineError),
}
