//! # scape-map
//!
//! Keeps the overlays drawn on a map consistent with the report collection
//! and the current selection.
//!
//! The mapping library itself is an external collaborator reached through
//! the [`MapSurface`] trait. [`OverlayLayer`] is an in-memory surface that
//! retains what was drawn and can export it as `GeoJSON`.
//!
//! [`MarkerSync`] owns the overlays outright: every change to the reports
//! or the selection tears down all circles and redraws one per report with
//! a valid coordinate pair.

pub mod error;
pub mod layer;
pub mod palette;
pub mod selection;
pub mod surface;
pub mod sync;

pub use error::SurfaceError;
pub use layer::OverlayLayer;
pub use palette::Palette;
pub use selection::Selection;
pub use surface::{CircleSpec, MapSurface, OverlayHandle, View};
pub use sync::{MapClick, MarkerSync};
