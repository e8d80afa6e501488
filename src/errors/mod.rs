//! Error types for the logging facility.

use thiserror::Error;

/// Errors raised while constructing a logger handle.
///
/// Construction validates the configuration by encoding a probe record.
/// With the fixed field set this cannot fail in practice, but callers must
/// still handle the path.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The record encoder rejected the configured persistent fields.
    #[error("failed to encode log record: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Error returned when parsing an unrecognized level name.
///
/// Level names are matched exactly: lowercase, no surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized log level {value:?} (expected one of: debug, info, warn, error, panic, fatal)")]
pub struct ParseLevelError {
    /// The rejected input.
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_error_display() {
        let err = ParseLevelError {
            value: "verbose".to_string(),
        };

        let message = err.to_string();
        assert!(message.contains("\"verbose\""));
        assert!(message.contains("debug, info, warn, error, panic, fatal"));
    }

    #[test]
    fn test_build_error_wraps_encoder_error() {
        let encode_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();

        let err = BuildError::from(encode_err);
        assert!(err.to_string().starts_with("failed to encode log record:"));
    }
}
