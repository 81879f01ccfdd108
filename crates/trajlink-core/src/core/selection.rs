use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque atom-selection expression.
///
/// Selection syntax and evaluation belong entirely to the engine; this layer
/// carries the expression untouched from the caller to
/// `FrameRunner::initialize` via the stream options snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection(String);

impl Selection {
    pub fn new(expression: impl Into<String>) -> Self {
        Self(expression.into())
    }

    pub fn expression(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Selection {
    fn from(expression: &str) -> Self {
        Self::new(expression)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
