//! Submission error types for scape-pages.

use thiserror::Error;

use scape_core::errors::ValidationError;
use scape_gateway::DataAccessError;

/// Why a form submission or page action did not go through.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The form was rejected before any backend call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backend call failed. Missing records land here too.
    #[error("Request failed: {0}")]
    Network(#[from] DataAccessError),

    /// Submit was called with no form open.
    #[error("No form is open")]
    NoForm,
}

impl SubmitError {
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
