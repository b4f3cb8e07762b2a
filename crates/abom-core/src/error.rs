//! Error taxonomy for ABOM scoring.

/// Errors produced while decoding, validating, or scoring an ABOM document.
#[derive(Debug, thiserror::Error)]
pub enum AbomError {
    /// The body could not be parsed as JSON.
    #[error("{0}")]
    MalformedDocument(#[source] serde_json::Error),

    /// One of the mandatory top-level sections is absent or empty.
    #[error("Missing '{field}' field")]
    MissingSection { field: &'static str },

    #[error("invalid scoring configuration: {0}")]
    InvalidConfig(String),

    #[error("risk score is not finite: {0}")]
    NonFiniteScore(f64),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AbomError {
    /// Whether the error was caused by the caller's input rather than by the engine.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::MalformedDocument(_) | Self::MissingSection { .. })
    }
}

/// Result type for ABOM operations.
pub type Result<T> = std::result::Result<T, AbomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_section_message_names_field() {
        let err = AbomError::MissingSection {
            field: "persistence_layer",
        };
        assert_eq!(err.to_string(), "Missing 'persistence_layer' field");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_malformed_document_is_client_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = AbomError::MalformedDocument(parse_err);
        assert!(err.is_client_error());
        assert!(err.to_string().contains("expected"));
    }

    #[test]
    fn test_internal_errors_are_not_client_errors() {
        assert!(!AbomError::NonFiniteScore(f64::NAN).is_client_error());
        assert!(!AbomError::InvalidConfig("floor".into()).is_client_error());
    }
}
