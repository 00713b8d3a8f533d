//! Gateway error types.

use thiserror::Error;

use scape_core::RecordId;

use crate::Collection;

/// Errors from any backend call. The gateway never retries; callers decide
/// whether to fall back to sample data.
#[derive(Debug, Error)]
pub enum DataAccessError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The referenced record does not exist.
    #[error("{collection} record {id} not found")]
    NotFound {
        collection: Collection,
        id: RecordId,
    },

    /// A backend row did not match the expected shape.
    #[error("Failed to decode {collection} row: {reason}")]
    Decode {
        collection: Collection,
        reason: String,
    },

    /// Failure inside a non-HTTP backend (e.g. the embedded database).
    #[error("Backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl DataAccessError {
    /// Wrap an arbitrary backend error.
    pub fn backend<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Backend(Box::new(error))
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// A row failed boundary validation. Converted to [`DataAccessError::Decode`]
/// once the collection is known.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct DecodeError(pub String);

impl DecodeError {
    #[must_use]
    pub fn into_access(self, collection: Collection) -> DataAccessError {
        DataAccessError::Decode {
            collection,
            reason: self.0,
        }
    }
}
