//! # Error Types
//!
//! Structured error types for pile_core. Every failure carries enough context
//! to point the caller at the offending field, so a malformed geometry document
//! can be corrected and rebuilt.
//!
//! ## Example
//!
//! ```rust
//! use pile_core::errors::{CalcError, CalcResult};
//!
//! fn validate_diameter(diameter: f64) -> CalcResult<()> {
//!     if diameter <= 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "diameter".to_string(),
//!             value: diameter.to_string(),
//!             reason: "Diameter must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for pile_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for geometry construction and evaluation.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (non-positive dimension, bad level, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing for the declared shape
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// The outer shape is not one of the supported kinds
    #[error("Unsupported outer shape: '{shape}' (expected 'round' or 'rectangle')")]
    UnsupportedShape { shape: String },

    /// Material not found in the standard material table
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create an UnsupportedShape error
    pub fn unsupported_shape(shape: impl Into<String>) -> Self {
        CalcError::UnsupportedShape {
            shape: shape.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::UnsupportedShape { .. } => "UNSUPPORTED_SHAPE",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::serialization(err.to_string())
    }
}

/// Reject a dimension that is not a finite, strictly positive number.
pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Dimension must be a positive number",
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("diameter", "-0.4", "Dimension must be a positive number");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::missing_field("diameter").error_code(), "MISSING_FIELD");
        assert_eq!(CalcError::unsupported_shape("hexagon").error_code(), "UNSUPPORTED_SHAPE");
        assert_eq!(CalcError::material_not_found("bamboo").error_code(), "MATERIAL_NOT_FOUND");
    }

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive("diameter", 0.4), Ok(0.4));
        assert!(require_positive("diameter", 0.0).is_err());
        assert!(require_positive("diameter", -1.0).is_err());
        assert!(require_positive("diameter", f64::NAN).is_err());
        assert!(require_positive("diameter", f64::INFINITY).is_err());
    }

    #[test]
    fn test_display_mentions_shape() {
        let msg = CalcError::unsupported_shape("hexagon").to_string();
        assert!(msg.contains("hexagon"));
    }
}
