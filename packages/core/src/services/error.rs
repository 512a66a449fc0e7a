//! Service Layer Error Types
//!
//! Only two conditions are fatal for the pipeline: an absent input and an
//! invalid configuration. Everything else degrades gracefully.

use crate::models::ValidationError;
use thiserror::Error;

/// Pipeline errors
#[derive(Error, Debug)]
pub enum TreeError {
    /// The markdown argument was absent
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Options failed validation
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Tree (de)serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A tree broke a structural invariant
    #[error("Tree validation failed: {0}")]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, TreeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TreeError::InvalidArgument("markdown is required".to_string());
        assert_eq!(err.to_string(), "Invalid argument: markdown is required");

        let err = TreeError::Configuration("bad threshold".to_string());
        assert_eq!(err.to_string(), "Invalid configuration: bad threshold");
    }

    #[test]
    fn test_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: TreeError = serde_err.into();
        assert!(matches!(err, TreeError::Serialization(_)));
    }

    #[test]
    fn test_error_from_validation() {
        let err: TreeError = ValidationError::DuplicateId("n1".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Tree validation failed: Duplicate node ID: n1"
        );
    }
}
