//! # IO Module
//!
//! The caller-facing façade over the engine boundary: typed handles to
//! run-input and trajectory resources, and the pull-based frame stream that
//! drives iteration.
//!
//! - **Run input** ([`input`]) - `RunInputFile`, `SimulationInput`, and the
//!   scoped-acquisition read path for simulation parameters
//! - **Trajectories** ([`trajectory`]) - `TrajectoryFile`, owner of the
//!   engine's reusable caching module
//! - **Frame streaming** ([`stream`]) - `FrameStream`, the per-scan state
//!   machine owning the runner lifecycle
//! - **Errors** ([`error`]) - the façade error taxonomy

use std::fmt;
use std::str::FromStr;

pub mod error;
pub mod input;
pub mod stream;
pub mod trajectory;

/// File access mode for resource handles.
///
/// Only [`AccessMode::Read`] is supported; [`AccessMode::Write`] is a
/// reserved future value and every open request carrying it fails with a
/// usage error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    Read,
    Write,
}

impl AccessMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "r",
            Self::Write => "w",
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessMode {
    type Err = error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "r" => Ok(Self::Read),
            "w" => Ok(Self::Write),
            other => Err(error::Error::Usage(format!(
                "unknown file access mode '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_strings_round_trip() {
        assert_eq!(AccessMode::Read.to_string(), "r");
        assert_eq!("r".parse::<AccessMode>().unwrap(), AccessMode::Read);
        assert_eq!("w".parse::<AccessMode>().unwrap(), AccessMode::Write);
    }

    #[test]
    fn unknown_mode_strings_are_usage_errors() {
        assert!(matches!(
            "a".parse::<AccessMode>(),
            Err(error::Error::Usage(_))
        ));
    }
}
