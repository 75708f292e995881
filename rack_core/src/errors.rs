//! # Error Types
//!
//! Structured error types for rack_core. Every failure of a calculation run
//! is returned as one of these variants and propagated unchanged to the
//! caller; nothing is defaulted to zero or to the first table entry.
//!
//! ## Example
//!
//! ```rust
//! use rack_core::errors::{CalcError, CalcResult};
//!
//! fn validate_span(span_m: f64) -> CalcResult<()> {
//!     if span_m < 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "support_span_m".to_string(),
//!             value: span_m.to_string(),
//!             reason: "Span cannot be negative".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for rack_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// Variants carry enough context for an engineer (or a program) to see what
/// went wrong without re-running the calculation.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is non-physical (negative length, zero height, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Region or pressure zone is absent from the code tables
    #[error("Unknown region: '{region}' is not in the code tables")]
    UnknownRegion { region: String },

    /// No catalog profile satisfies the strength/deflection checks
    ///
    /// `best_candidate` is the profile with the lowest governing utilization,
    /// reported for diagnostics only. It did NOT pass.
    #[error(
        "No suitable {member} profile: best candidate {} (strength {strength_utilization:.3}, deflection {deflection_utilization:.3}, limit {threshold:.2})",
        best_candidate.as_deref().unwrap_or("<none>")
    )]
    NoSuitableProfile {
        member: String,
        best_candidate: Option<String>,
        strength_utilization: f64,
        deflection_utilization: f64,
        threshold: f64,
    },

    /// Code tables are malformed (unsorted breakpoints, missing data, ...)
    #[error("Invalid code table '{table}': {reason}")]
    TableError { table: String, reason: String },

    /// TOML/JSON serialization or deserialization error
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

    /// Create an UnknownRegion error
    pub fn unknown_region(region: impl Into<String>) -> Self {
        CalcError::UnknownRegion {
            region: region.into(),
        }
    }

    /// Create a TableError
    pub fn table_error(table: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::TableError {
            table: table.into(),
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
            CalcError::UnknownRegion { .. } => "UNKNOWN_REGION",
            CalcError::NoSuitableProfile { .. } => "NO_SUITABLE_PROFILE",
            CalcError::TableError { .. } => "TABLE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

/// Reject NaN, infinities and values below `min` (or at `min` when `strict`).
///
/// Shared by the parameter and table validators so every positivity check
/// reports the same way.
pub(crate) fn ensure_at_least(field: &str, value: f64, min: f64, strict: bool) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_input(field, value.to_string(), "Value must be a finite number"));
    }
    let ok = if strict { value > min } else { value >= min };
    if !ok {
        let reason = match (strict, min == 0.0) {
            (true, true) => "Value must be positive".to_string(),
            (false, true) => "Value cannot be negative".to_string(),
            (true, false) => format!("Value must be greater than {}", min),
            (false, false) => format!("Value must be at least {}", min),
        };
        return Err(CalcError::invalid_input(field, value.to_string(), reason));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("height_m", "-3", "Value must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::unknown_region("Atlantis").error_code(), "UNKNOWN_REGION");
        assert_eq!(CalcError::table_error("regions", "empty").error_code(), "TABLE_ERROR");
    }

    #[test]
    fn test_no_suitable_profile_message() {
        let error = CalcError::NoSuitableProfile {
            member: "beam".to_string(),
            best_candidate: Some("C140x50x20x3.0".to_string()),
            strength_utilization: 1.234,
            deflection_utilization: 0.5,
            threshold: 0.95,
        };
        let msg = error.to_string();
        assert!(msg.contains("C140x50x20x3.0"));
        assert!(msg.contains("1.234"));
    }

    #[test]
    fn test_ensure_at_least() {
        assert!(ensure_at_least("x", 1.0, 0.0, true).is_ok());
        assert!(ensure_at_least("x", 0.0, 0.0, false).is_ok());
        assert!(ensure_at_least("x", 0.0, 0.0, true).is_err());
        assert!(ensure_at_least("x", f64::NAN, 0.0, false).is_err());
    }
}
