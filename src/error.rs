//! Error types for path/state translation.
//!
//! The public coordinator operations never fail: "not ready" and "nothing to
//! do" are logged and swallowed. Errors only surface from the translation
//! helpers ([`PathStateCodec`](crate::linking::PathStateCodec) and
//! [`build_link_action`](crate::link::build_link_action)), where the caller
//! decides how to degrade.
//!
//! # Examples
//!
//! ```
//! use stack_navigation::NavigationError;
//!
//! let err = NavigationError::UnknownPath { path: "/nope".into() };
//! assert_eq!(err.to_string(), "No screen matches path: /nope");
//! ```

use std::fmt;

/// Failure while translating between paths, states and actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// No configured screen matches the path.
    UnknownPath { path: String },

    /// The navigator state has no routes to act on.
    EmptyState,

    /// A required `:param` segment has no value.
    MissingParam { param: String, pattern: String },

    /// A path pattern could not be parsed.
    InvalidPattern { pattern: String, reason: String },
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::UnknownPath { path } => {
                write!(f, "No screen matches path: {}", path)
            }
            NavigationError::EmptyState => write!(f, "Navigation state has no routes"),
            NavigationError::MissingParam { param, pattern } => {
                write!(f, "Missing parameter '{}' for pattern '{}'", param, pattern)
            }
            NavigationError::InvalidPattern { pattern, reason } => {
                write!(f, "Invalid path pattern '{}': {}", pattern, reason)
            }
        }
    }
}

impl std::error::Error for NavigationError {}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_path_display() {
        let error = NavigationError::UnknownPath {
            path: "/missing".to_string(),
        };
        assert_eq!(error.to_string(), "No screen matches path: /missing");
    }

    #[test]
    fn test_missing_param_display() {
        let error = NavigationError::MissingParam {
            param: "reportID".to_string(),
            pattern: "r/:reportID".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Missing parameter 'reportID' for pattern 'r/:reportID'"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&NavigationError::EmptyState);
    }
}
