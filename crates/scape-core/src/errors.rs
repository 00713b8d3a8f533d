//! Validation errors raised before any backend call.
//!
//! Transport and decode failures live in `scape-gateway` (`DataAccessError`);
//! page-level outcomes combine both in `scape-pages`.

use thiserror::Error;

/// A form failed validation and must not be submitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was empty or whitespace.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A report form was submitted before a location was picked on the map.
    #[error("No location selected: click the map to place the report")]
    MissingLocation,

    /// A URL field does not hold an absolute http(s) URL.
    #[error("Invalid URL for '{field}': {value}")]
    InvalidUrl { field: &'static str, value: String },

    /// An email field does not look like an address.
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// A numeric field is outside its allowed range.
    #[error("Value for '{field}' must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },

    /// An unknown category string was entered in a form.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}
