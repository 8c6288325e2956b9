//! Crate-level error types.

use std::fmt;

/// Errors produced by the farmstead crate.
///
/// The orbit controller itself never fails; these cover the I/O edges
/// (options files, the viewer event loop).
#[derive(Debug)]
pub enum FarmsteadError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop or window failure.
    Viewer(String),
}

impl fmt::Display for FarmsteadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for FarmsteadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FarmsteadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
