//! Error types for the view query layer
//!
//! Only validation failures and unsupported capabilities are errors.
//! Permission denials and unresolvable ids are not: those calls return
//! an empty result instead.

use std::fmt;

/// Result type for view query operations
pub type Result<T> = std::result::Result<T, Error>;

/// View query errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A positional argument had the wrong type or was missing
    InvalidArgument {
        /// Script-visible function name (e.g. "TraceScreenRay")
        function: &'static str,
        /// 1-based argument position
        index: usize,
        /// Expected type description
        expected: &'static str,
    },

    /// The active backend does not provide the requested capability
    Unsupported(String),

    /// Configuration values are out of range
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument { function, index, expected } => write!(
                f,
                "Invalid argument: {}(): argument #{} expected {}",
                function, index, expected
            ),
            Error::Unsupported(msg) => write!(f, "Unsupported: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
