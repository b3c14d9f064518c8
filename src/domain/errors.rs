// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the conversion engine.
//!
//! A strategy that merely does not apply never produces an error; it declines.
//! The variants here cover what is left: a request no strategy could satisfy,
//! a strategy whose underlying mechanism failed after it committed to the request,
//! and the registry/configuration failures of the surrounding plumbing.

use thiserror::Error;

/// A boxed, thread-safe error as raised by host-provided conversion code.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The main error type for conversion operations.
///
/// This enum is marked as `#[non_exhaustive]` to allow for future additions
/// without breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use convertex::domain::errors::ConvertError;
///
/// fn convert() -> Result<i32, ConvertError> {
///     Err(ConvertError::InvalidConversion {
///         source_type: "alloc::string::String".to_string(),
///         target_type: "i32".to_string(),
///         value: "\"abc\"".to_string(),
///     })
/// }
/// assert!(convert().unwrap_err().to_string().contains("i32"));
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// Every strategy in the chain declined the request.
    #[error("Cannot convert value {value} of type {source_type} to type {target_type}")]
    InvalidConversion {
        /// The runtime type of the value, or `null`
        source_type: String,
        /// The requested target type
        target_type: String,
        /// Best-effort string representation of the value
        value: String,
    },

    /// A strategy committed to a request and its underlying mechanism failed.
    #[error("Conversion strategy '{strategy}' failed: {message}")]
    HostFailure {
        /// The name of the strategy that raised the failure
        strategy: String,
        /// The error message
        message: String,
        /// The underlying error
        #[source]
        source: Option<BoxError>,
    },

    /// A strategy produced a value whose type differs from the requested one.
    #[error("Conversion produced a value of type {actual}, expected {expected}")]
    TypeMismatch {
        /// The requested type
        expected: String,
        /// The type actually produced
        actual: String,
    },

    /// A registry position referred to a strategy that is not registered.
    #[error("Conversion strategy not found: {name}")]
    StrategyNotFound {
        /// The strategy name that was looked up
        name: String,
    },

    /// Failed to parse converter options.
    #[error("Failed to parse converter options: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<BoxError>,
    },

    /// An I/O error occurred while reading converter options.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConvertError {
    /// Creates a `HostFailure` for the named strategy from an underlying error.
    pub fn host_failure(strategy: &str, err: BoxError) -> Self {
        ConvertError::HostFailure {
            strategy: strategy.to_string(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Returns `true` if this error means "not convertible" rather than a fault.
    pub fn is_invalid_conversion(&self) -> bool {
        matches!(self, ConvertError::InvalidConversion { .. })
    }
}

/// A specialized Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_conversion_error() {
        let error = ConvertError::InvalidConversion {
            source_type: "alloc::string::String".to_string(),
            target_type: "i32".to_string(),
            value: "\"abc\"".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Cannot convert value \"abc\" of type alloc::string::String to type i32"
        );
        assert!(error.is_invalid_conversion());
    }

    #[test]
    fn test_host_failure_error() {
        let source_error = "not a number".parse::<i32>().unwrap_err();
        let error = ConvertError::host_failure("constructor", Box::new(source_error));
        assert!(matches!(error, ConvertError::HostFailure { .. }));
        assert!(error.to_string().contains("constructor"));
        assert!(!error.is_invalid_conversion());
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_type_mismatch_error() {
        let error = ConvertError::TypeMismatch {
            expected: "i32".to_string(),
            actual: "i64".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Conversion produced a value of type i64, expected i32"
        );
    }

    #[test]
    fn test_strategy_not_found_error() {
        let error = ConvertError::StrategyNotFound {
            name: "custom".to_string(),
        };
        assert_eq!(error.to_string(), "Conversion strategy not found: custom");
    }

    #[test]
    fn test_parse_error() {
        let error = ConvertError::ParseError {
            message: "Invalid YAML".to_string(),
            source: None,
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse converter options: Invalid YAML"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = ConvertError::from(io_error);
        assert!(matches!(error, ConvertError::IoError(_)));
    }
}
