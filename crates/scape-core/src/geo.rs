//! Geographic coordinates.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A validated latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Build a pair, returning `None` unless both components are finite and in range.
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        valid.then_some(Self { lat, lng })
    }

    /// Build a pair from two optional components (the shape backend rows use).
    #[must_use]
    pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> Option<Self> {
        Self::new(lat?, lng?)
    }

    /// `[lng, lat]` ordering used by GeoJSON positions.
    #[must_use]
    pub const fn to_geojson_position(self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(41.3), Some(2.1), true)]
    #[case(Some(-90.0), Some(180.0), true)]
    #[case(None, Some(2.1), false)]
    #[case(Some(41.3), None, false)]
    #[case(Some(91.0), Some(0.0), false)]
    #[case(Some(0.0), Some(-180.5), false)]
    #[case(Some(f64::NAN), Some(0.0), false)]
    #[case(Some(0.0), Some(f64::INFINITY), false)]
    fn coordinate_pair_validity(
        #[case] lat: Option<f64>,
        #[case] lng: Option<f64>,
        #[case] valid: bool,
    ) {
        assert_eq!(LatLng::from_parts(lat, lng).is_some(), valid);
    }

    #[test]
    fn geojson_position_is_lng_first() {
        let point = LatLng::new(10.0, 20.0).unwrap();
        assert_eq!(point.to_geojson_position(), [20.0, 10.0]);
    }
}
