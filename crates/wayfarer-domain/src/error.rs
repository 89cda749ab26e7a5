//! Error types shared across crate boundaries

use thiserror::Error;

/// Errors raised by a persistence gateway
///
/// The underlying cause is preserved so callers can inspect it; the store
/// treats every variant as an opaque gateway failure.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Backend error with the original cause attached
    #[error("Backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The addressed record does not exist in the backend
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A record with the same identifier already exists
    #[error("Duplicate record: {0}")]
    Duplicate(String),

    /// Backend could not be reached
    #[error("Gateway unavailable: {0}")]
    Unavailable(String),

    /// The call did not finish within the caller's deadline
    #[error("Gateway call timed out after {0} ms")]
    Timeout(u64),
}

impl GatewayError {
    /// Wrap any error as a backend failure
    pub fn backend<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        GatewayError::Backend(Box::new(err))
    }
}

/// A single rule a draft failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Field the rule applies to, e.g. `title` or `activities[2].day`
    pub field: String,
    /// Human-readable description
    pub message: String,
}

impl Violation {
    /// Create a new violation
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Draft validation failure carrying every violated rule
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid itinerary: {}", summary(.violations))]
pub struct ValidationError {
    /// Every rule the draft failed, in field order
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// Whether the given field has at least one violation
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn summary(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError {
            violations: vec![
                Violation::new("title", "must be at least 3 characters"),
                Violation::new("categories", "select at least one category"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "Invalid itinerary: title: must be at least 3 characters; categories: select at least one category"
        );
        assert!(err.has_field("categories"));
        assert!(!err.has_field("description"));
    }

    #[test]
    fn test_backend_preserves_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = GatewayError::backend(io);
        let source = std::error::Error::source(&err).expect("source should be kept");
        assert_eq!(source.to_string(), "disk full");
    }
}
