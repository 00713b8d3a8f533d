//! The seam to the external mapping library.

use std::fmt;

use serde::{Deserialize, Serialize};

use scape_config::MapConfig;
use scape_core::RecordId;
use scape_core::geo::LatLng;

use crate::error::SurfaceError;

/// Opaque identifier of an overlay drawn on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OverlayHandle(pub u64);

impl fmt::Display for OverlayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A filled circle representing one report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleSpec {
    pub report_id: RecordId,
    pub center: LatLng,
    /// Radius in screen pixels.
    pub radius: u32,
    /// CSS hex color.
    pub fill: &'static str,
}

/// Camera position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct View {
    pub center: LatLng,
    pub zoom: u8,
}

impl View {
    /// Initial view from configuration. Falls back to the origin if the
    /// configured center is not a valid coordinate.
    #[must_use]
    pub fn initial(config: &MapConfig) -> Self {
        let center = LatLng::new(config.center_lat, config.center_lng)
            .unwrap_or(LatLng { lat: 0.0, lng: 0.0 });
        Self {
            center,
            zoom: config.zoom,
        }
    }
}

/// Operations the marker component needs from a mapping library.
///
/// Adding never fails; removal may, and callers treat it as best-effort.
pub trait MapSurface {
    fn add_circle(&mut self, spec: CircleSpec) -> OverlayHandle;

    /// Draw the temporary placement pin.
    fn add_pin(&mut self, at: LatLng) -> OverlayHandle;

    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the overlay cannot be removed.
    fn remove(&mut self, handle: OverlayHandle) -> Result<(), SurfaceError>;

    fn set_view(&mut self, view: View);
}
