//! Map view configuration.

use serde::{Deserialize, Serialize};

/// Highest zoom level tile servers commonly serve.
pub const MAX_ZOOM: u8 = 22;

const fn default_center_lat() -> f64 {
    42.3736
}

const fn default_center_lng() -> f64 {
    -71.1097
}

const fn default_zoom() -> u8 {
    13
}

/// Zoom used when a marker click recenters the view.
const fn default_focus_zoom() -> u8 {
    16
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MapConfig {
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,

    #[serde(default = "default_center_lng")]
    pub center_lng: f64,

    /// Initial zoom level.
    #[serde(default = "default_zoom")]
    pub zoom: u8,

    #[serde(default = "default_focus_zoom")]
    pub focus_zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center_lat: default_center_lat(),
            center_lng: default_center_lng(),
            zoom: default_zoom(),
            focus_zoom: default_focus_zoom(),
        }
    }
}
