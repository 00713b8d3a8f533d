//! Overlay invariants of `MarkerSync` against arbitrary collections and
//! an unreliable surface.

use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use rstest::rstest;

use scape_config::MapConfig;
use scape_core::entities::Report;
use scape_core::enums::SmellCategory;
use scape_core::geo::LatLng;
use scape_core::samples::sample_reports;
use scape_map::{
    CircleSpec, MapSurface, MarkerSync, OverlayHandle, OverlayLayer, Palette, Selection,
    SurfaceError, View,
};

fn report(id: i64, lat: Option<f64>, lng: Option<f64>) -> Report {
    Report {
        id,
        title: format!("r{id}"),
        latitude: lat,
        longitude: lng,
        category: SmellCategory::Other,
        intensity: 5,
        ..sample_reports().remove(0)
    }
}

fn markers() -> MarkerSync<OverlayLayer> {
    MarkerSync::from_config(
        OverlayLayer::new(View::initial(&MapConfig::default())),
        &MapConfig::default(),
    )
}

#[rstest]
#[case::empty(vec![])]
#[case::all_valid(vec![report(1, Some(1.0), Some(1.0)), report(2, Some(-5.0), Some(170.0))])]
#[case::missing_parts(vec![report(1, None, Some(1.0)), report(2, Some(1.0), None), report(3, None, None)])]
#[case::out_of_range(vec![report(1, Some(91.0), Some(0.0)), report(2, Some(0.0), Some(-181.0))])]
#[case::non_finite(vec![report(1, Some(f64::NAN), Some(0.0)), report(2, Some(0.0), Some(f64::INFINITY))])]
#[case::mixed(vec![report(1, Some(42.0), Some(-71.0)), report(2, None, None), report(3, Some(90.0), Some(180.0))])]
fn overlay_count_matches_valid_reports(#[case] reports: Vec<Report>) {
    let expected = reports.iter().filter(|r| r.coordinates().is_some()).count();
    for selected in [None, Some(1), Some(3)] {
        let mut markers = markers();
        markers.set_reports(reports.clone());
        if let Some(id) = selected {
            markers.set_selection(Selection::of(id));
        }
        assert_eq!(markers.overlay_count(), expected);
        assert_eq!(markers.surface().circles().count(), expected);
    }
}

#[test]
fn identical_coordinates_stack_in_collection_order() {
    let mut markers = markers();
    markers.set_reports(vec![
        report(10, Some(42.0), Some(-71.0)),
        report(11, Some(42.0), Some(-71.0)),
    ]);

    let ids: Vec<_> = markers
        .surface()
        .circles()
        .map(|(_, circle)| circle.report_id)
        .collect();
    assert_eq!(ids, vec![10, 11], "last report is drawn on top");
}

#[test]
fn sample_collection_renders_only_located_reports() {
    let mut markers = markers();
    markers.set_reports(sample_reports());
    let drawn: HashSet<_> = markers
        .surface()
        .circles()
        .map(|(_, c)| c.report_id)
        .collect();
    let located: HashSet<_> = sample_reports()
        .into_iter()
        .filter(|r| r.coordinates().is_some())
        .map(|r| r.id)
        .collect();
    assert_eq!(drawn, located);
}

/// Surface that refuses to remove every other overlay.
struct FlakySurface {
    inner: OverlayLayer,
    attempts: usize,
    failures: usize,
}

impl MapSurface for FlakySurface {
    fn add_circle(&mut self, spec: CircleSpec) -> OverlayHandle {
        self.inner.add_circle(spec)
    }

    fn add_pin(&mut self, at: LatLng) -> OverlayHandle {
        self.inner.add_pin(at)
    }

    fn remove(&mut self, handle: OverlayHandle) -> Result<(), SurfaceError> {
        self.attempts += 1;
        if self.attempts % 2 == 1 {
            self.failures += 1;
            return Err(SurfaceError::Rejected("busy".into()));
        }
        self.inner.remove(handle)
    }

    fn set_view(&mut self, view: View) {
        self.inner.set_view(view);
    }
}

#[test]
fn removal_failure_does_not_abort_remaining_removals() {
    let surface = FlakySurface {
        inner: OverlayLayer::new(View::initial(&MapConfig::default())),
        attempts: 0,
        failures: 0,
    };
    let mut markers = MarkerSync::new(surface, Palette::default(), 16);
    markers.set_reports(vec![
        report(1, Some(1.0), Some(1.0)),
        report(2, Some(2.0), Some(2.0)),
        report(3, Some(3.0), Some(3.0)),
        report(4, Some(4.0), Some(4.0)),
    ]);
    markers.sync();

    let surface = markers.surface();
    assert_eq!(surface.attempts, 4, "every overlay removal was attempted");
    assert_eq!(surface.failures, 2);
    assert_eq!(markers.overlay_count(), 4);
}

/// Rejects every removal while the gate is closed.
struct GatedSurface {
    inner: OverlayLayer,
    closed: Rc<Cell<bool>>,
}

impl MapSurface for GatedSurface {
    fn add_circle(&mut self, spec: CircleSpec) -> OverlayHandle {
        self.inner.add_circle(spec)
    }

    fn add_pin(&mut self, at: LatLng) -> OverlayHandle {
        self.inner.add_pin(at)
    }

    fn remove(&mut self, handle: OverlayHandle) -> Result<(), SurfaceError> {
        if self.closed.get() {
            return Err(SurfaceError::Rejected("closed".into()));
        }
        self.inner.remove(handle)
    }

    fn set_view(&mut self, view: View) {
        self.inner.set_view(view);
    }
}

#[test]
fn failed_removals_are_retried_on_next_sync() {
    let closed = Rc::new(Cell::new(false));
    let surface = GatedSurface {
        inner: OverlayLayer::new(View::initial(&MapConfig::default())),
        closed: Rc::clone(&closed),
    };
    let mut markers = MarkerSync::new(surface, Palette::default(), 16);
    markers.set_reports(vec![
        report(1, Some(1.0), Some(1.0)),
        report(2, Some(2.0), Some(2.0)),
    ]);

    closed.set(true);
    markers.sync();
    assert_eq!(markers.overlay_count(), 2);
    assert_eq!(markers.stale_count(), 2);
    assert_eq!(markers.surface().inner.circles().count(), 4);

    closed.set(false);
    markers.sync();
    assert_eq!(markers.stale_count(), 0);
    assert_eq!(markers.surface().inner.circles().count(), 2);
}
