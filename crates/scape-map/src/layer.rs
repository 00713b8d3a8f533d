//! In-memory retained map surface with `GeoJSON` export.

use std::collections::BTreeMap;

use serde::Serialize;

use scape_core::geo::LatLng;

use crate::error::SurfaceError;
use crate::surface::{CircleSpec, MapSurface, OverlayHandle, View};

/// One drawn overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Circle(CircleSpec),
    Pin(LatLng),
}

/// A [`MapSurface`] that records overlays in draw order.
///
/// Handles increase monotonically and are never reused, so iteration order
/// is draw order and the last entry is drawn on top.
#[derive(Debug, Clone)]
pub struct OverlayLayer {
    overlays: BTreeMap<OverlayHandle, Overlay>,
    next: u64,
    view: View,
}

impl OverlayLayer {
    #[must_use]
    pub const fn new(view: View) -> Self {
        Self {
            overlays: BTreeMap::new(),
            next: 1,
            view,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    #[must_use]
    pub const fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub fn get(&self, handle: OverlayHandle) -> Option<&Overlay> {
        self.overlays.get(&handle)
    }

    /// Report circles, bottom to top.
    pub fn circles(&self) -> impl Iterator<Item = (OverlayHandle, &CircleSpec)> {
        self.overlays.iter().filter_map(|(handle, overlay)| match overlay {
            Overlay::Circle(spec) => Some((*handle, spec)),
            Overlay::Pin(_) => None,
        })
    }

    pub fn pins(&self) -> impl Iterator<Item = LatLng> + '_ {
        self.overlays.values().filter_map(|overlay| match overlay {
            Overlay::Pin(at) => Some(*at),
            Overlay::Circle(_) => None,
        })
    }

    /// Export every overlay as a `GeoJSON` `FeatureCollection` in draw order.
    #[must_use]
    pub fn to_geojson(&self) -> serde_json::Value {
        let features = self
            .overlays
            .iter()
            .map(|(handle, overlay)| match overlay {
                Overlay::Circle(spec) => Feature::point(
                    spec.center,
                    FeatureProperties {
                        kind: "report",
                        handle: handle.0,
                        report_id: Some(spec.report_id),
                        radius: Some(spec.radius),
                        fill: Some(spec.fill),
                    },
                ),
                Overlay::Pin(at) => Feature::point(
                    *at,
                    FeatureProperties {
                        kind: "placement",
                        handle: handle.0,
                        report_id: None,
                        radius: None,
                        fill: None,
                    },
                ),
            })
            .collect();
        serde_json::to_value(FeatureCollection {
            kind: "FeatureCollection",
            features,
        })
        .unwrap_or(serde_json::Value::Null)
    }

    fn insert(&mut self, overlay: Overlay) -> OverlayHandle {
        let handle = OverlayHandle(self.next);
        self.next += 1;
        self.overlays.insert(handle, overlay);
        handle
    }
}

impl MapSurface for OverlayLayer {
    fn add_circle(&mut self, spec: CircleSpec) -> OverlayHandle {
        self.insert(Overlay::Circle(spec))
    }

    fn add_pin(&mut self, at: LatLng) -> OverlayHandle {
        self.insert(Overlay::Pin(at))
    }

    fn remove(&mut self, handle: OverlayHandle) -> Result<(), SurfaceError> {
        self.overlays
            .remove(&handle)
            .map(|_| ())
            .ok_or(SurfaceError::UnknownOverlay(handle))
    }

    fn set_view(&mut self, view: View) {
        self.view = view;
    }
}

// ── GeoJSON shapes ─────────────────────────────────────────────────

#[derive(Serialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: &'static str,
    features: Vec<Feature>,
}

#[derive(Serialize)]
struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
    geometry: Geometry,
    properties: FeatureProperties,
}

impl Feature {
    const fn point(at: LatLng, properties: FeatureProperties) -> Self {
        Self {
            kind: "Feature",
            geometry: Geometry {
                kind: "Point",
                coordinates: at.to_geojson_position(),
            },
            properties,
        }
    }
}

#[derive(Serialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: &'static str,
    coordinates: [f64; 2],
}

#[derive(Serialize)]
struct FeatureProperties {
    kind: &'static str,
    handle: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    report_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fill: Option<&'static str>,
}
