//! Crate-level error type.
//!
//! Each pipeline stage keeps its own error enum (`DecodeError`, `EncodeError`);
//! `EditError` is what the public entry points return and wraps those causes
//! alongside the argument and catalog failures raised by the core itself.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;

/// Errors returned by the transformation entry points.
#[derive(Debug, Error)]
pub enum EditError {
    /// The image source could not be resolved into a pixel buffer.
    #[error("Failed to load source image: {0}")]
    Load(#[from] DecodeError),

    /// A geometry, angle, or color parameter was malformed.
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending parameter.
        name: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// The requested filter name is not in the catalog.
    #[error("Unknown filter: {0}")]
    UnknownFilter(String),

    /// The final buffer could not be serialized.
    #[error("Encoding failed: {0}")]
    Encoding(#[from] EncodeError),
}

impl EditError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        EditError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, EditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = EditError::invalid("rect.width", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "Invalid argument `rect.width`: must be greater than zero"
        );
    }

    #[test]
    fn test_unknown_filter_display() {
        let err = EditError::UnknownFilter("nonexistent".to_string());
        assert_eq!(err.to_string(), "Unknown filter: nonexistent");
    }

    #[test]
    fn test_wraps_stage_errors() {
        let err: EditError = DecodeError::InvalidFormat.into();
        assert!(matches!(err, EditError::Load(DecodeError::InvalidFormat)));

        let err: EditError = EncodeError::InvalidDimensions {
            width: 0,
            height: 4,
        }
        .into();
        assert!(matches!(err, EditError::Encoding(_)));
        assert!(err.to_string().contains("width (0)"));
    }
}
