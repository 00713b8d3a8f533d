//! Map surface error types.

use thiserror::Error;

use crate::surface::OverlayHandle;

/// Errors reported by a [`crate::MapSurface`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// The handle does not name a live overlay.
    #[error("Unknown overlay {0}")]
    UnknownOverlay(OverlayHandle),

    /// The mapping library refused the operation.
    #[error("Map surface rejected the operation: {0}")]
    Rejected(String),
}
