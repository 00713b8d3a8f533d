//! Reconciliation of report circles against a map surface.

use scape_config::MapConfig;
use scape_core::RecordId;
use scape_core::entities::Report;
use scape_core::geo::LatLng;

use crate::palette::{Palette, radius};
use crate::selection::Selection;
use crate::surface::{CircleSpec, MapSurface, OverlayHandle, View};

/// What a click on empty map did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapClick {
    /// Placement mode: the pending location moved here.
    Placed(LatLng),
    /// Normal mode: the selection was cleared.
    SelectionCleared,
}

/// Transient pin shown while a new report's location is being chosen.
#[derive(Debug, Default)]
struct Placement {
    pending: Option<LatLng>,
    pin: Option<OverlayHandle>,
}

/// Owns every overlay on `S` and keeps it in step with reports and selection.
///
/// Each report circle handle maps back to its report id, one circle per
/// report with a valid coordinate pair. Reports without coordinates are
/// kept (they still count for lists and charts) but never drawn.
pub struct MarkerSync<S: MapSurface> {
    surface: S,
    palette: Palette,
    focus_zoom: u8,
    reports: Vec<Report>,
    selection: Selection,
    overlays: Vec<(OverlayHandle, RecordId)>,
    /// Overlays whose removal failed; retried on every sync.
    stale: Vec<OverlayHandle>,
    placement: Option<Placement>,
}

impl<S: MapSurface> MarkerSync<S> {
    pub fn new(surface: S, palette: Palette, focus_zoom: u8) -> Self {
        Self {
            surface,
            palette,
            focus_zoom,
            reports: Vec::new(),
            selection: Selection::none(),
            overlays: Vec::new(),
            stale: Vec::new(),
            placement: None,
        }
    }

    /// Default palette, focus zoom and initial view from configuration.
    pub fn from_config(mut surface: S, config: &MapConfig) -> Self {
        surface.set_view(View::initial(config));
        Self::new(surface, Palette::default(), config.focus_zoom)
    }

    // ── State changes (each one resynchronizes) ────────────────────

    /// Replace the report collection. A selection naming a report that is
    /// gone is dropped.
    pub fn set_reports(&mut self, reports: Vec<Report>) {
        self.reports = reports;
        self.selection
            .retain_in(self.reports.iter().map(|report| report.id));
        self.sync();
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
        self.sync();
    }

    /// Remove every circle, then draw one per report with valid coordinates
    /// in collection order (later reports on top).
    ///
    /// Removal is best-effort: a failure is logged, the remaining overlays
    /// are still removed, and the failed handle is retried next time.
    pub fn sync(&mut self) {
        self.clear_circles();
        for report in &self.reports {
            let Some(center) = report.coordinates() else {
                continue;
            };
            let selected = self.selection.contains(report.id);
            let handle = self.surface.add_circle(CircleSpec {
                report_id: report.id,
                center,
                radius: radius(report.intensity, selected),
                fill: self.palette.fill(&report.category, selected),
            });
            self.overlays.push((handle, report.id));
        }
        tracing::debug!(
            overlays = self.overlays.len(),
            reports = self.reports.len(),
            "markers synchronized"
        );
    }

    // ── Click dispatch ─────────────────────────────────────────────

    /// A report circle was clicked: select it alone and recenter on it at
    /// the focus zoom. Returns the selected report id, or `None` if the
    /// handle is not one of ours.
    pub fn click_overlay(&mut self, handle: OverlayHandle) -> Option<RecordId> {
        let id = self
            .overlays
            .iter()
            .find(|(candidate, _)| *candidate == handle)
            .map(|(_, id)| *id)?;
        let center = self
            .reports
            .iter()
            .find(|report| report.id == id)
            .and_then(Report::coordinates)?;

        self.selection.select(id);
        self.surface.set_view(View {
            center,
            zoom: self.focus_zoom,
        });
        self.sync();
        Some(id)
    }

    /// Empty map was clicked.
    pub fn click_map(&mut self, at: LatLng) -> MapClick {
        if let Some(mut placement) = self.placement.take() {
            self.remove_pin(&mut placement);
            placement.pin = Some(self.surface.add_pin(at));
            placement.pending = Some(at);
            self.placement = Some(placement);
            return MapClick::Placed(at);
        }
        self.selection.clear();
        self.sync();
        MapClick::SelectionCleared
    }

    // ── Placement mode ─────────────────────────────────────────────

    /// Enter placement mode for a new report. Restarting discards any
    /// previous pending location.
    pub fn begin_placement(&mut self) {
        self.cancel_placement();
        self.placement = Some(Placement::default());
    }

    /// Leave placement mode, returning the chosen location.
    pub fn finish_placement(&mut self) -> Option<LatLng> {
        let mut placement = self.placement.take()?;
        self.remove_pin(&mut placement);
        placement.pending
    }

    /// Leave placement mode without a location.
    pub fn cancel_placement(&mut self) {
        if let Some(mut placement) = self.placement.take() {
            self.remove_pin(&mut placement);
        }
    }

    // ── Accessors ──────────────────────────────────────────────────

    #[must_use]
    pub const fn is_placing(&self) -> bool {
        self.placement.is_some()
    }

    #[must_use]
    pub fn pending_location(&self) -> Option<LatLng> {
        self.placement.as_ref().and_then(|p| p.pending)
    }

    #[must_use]
    pub const fn selection(&self) -> Selection {
        self.selection
    }

    #[must_use]
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// Overlays still on the surface because their removal failed.
    #[must_use]
    pub fn stale_count(&self) -> usize {
        self.stale.len()
    }

    /// Number of report circles currently drawn.
    #[must_use]
    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    /// Circle handle drawn for `id`, if the report is on the map.
    #[must_use]
    pub fn handle_for(&self, id: RecordId) -> Option<OverlayHandle> {
        self.overlays
            .iter()
            .find(|(_, report)| *report == id)
            .map(|(handle, _)| *handle)
    }

    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Remove every overlay this component drew and hand the surface back.
    pub fn into_surface(mut self) -> S {
        self.cancel_placement();
        self.clear_circles();
        self.surface
    }

    // ── Internals ──────────────────────────────────────────────────

    fn clear_circles(&mut self) {
        let retries = std::mem::take(&mut self.stale);
        for handle in retries {
            if let Err(error) = self.surface.remove(handle) {
                tracing::warn!(%handle, %error, "retried overlay removal failed");
                self.stale.push(handle);
            }
        }
        for (handle, id) in std::mem::take(&mut self.overlays) {
            if let Err(error) = self.surface.remove(handle) {
                tracing::warn!(%handle, report = id, %error, "failed to remove overlay");
                self.stale.push(handle);
            }
        }
    }

    fn remove_pin(&mut self, placement: &mut Placement) {
        if let Some(handle) = placement.pin.take() {
            if let Err(error) = self.surface.remove(handle) {
                tracing::warn!(%handle, %error, "failed to remove placement pin");
                self.stale.push(handle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{Overlay, OverlayLayer};
    use pretty_assertions::assert_eq;
    use scape_core::enums::SmellCategory;
    use scape_core::samples::sample_reports;

    fn report(id: RecordId, category: SmellCategory, intensity: u8, at: Option<(f64, f64)>) -> Report {
        Report {
            id,
            title: format!("report {id}"),
            description: String::new(),
            category,
            intensity,
            latitude: at.map(|(lat, _)| lat),
            longitude: at.map(|(_, lng)| lng),
            address: None,
            contributor: None,
            created_at: sample_reports()[0].created_at,
        }
    }

    fn sync() -> MarkerSync<OverlayLayer> {
        MarkerSync::from_config(
            OverlayLayer::new(View::initial(&MapConfig::default())),
            &MapConfig::default(),
        )
    }

    #[test]
    fn reports_without_coordinates_are_skipped() {
        let mut markers = sync();
        markers.set_reports(vec![
            report(1, SmellCategory::Nature, 7, Some((42.37, -71.11))),
            report(2, SmellCategory::Food, 9, None),
        ]);

        assert_eq!(markers.overlay_count(), 1);
        let circles: Vec<_> = markers.surface().circles().collect();
        assert_eq!(circles.len(), 1);
        assert_eq!(circles[0].1.report_id, 1);
        assert_eq!(circles[0].1.radius, 12);
        assert_eq!(circles[0].1.fill, Palette::default().nature);
    }

    #[test]
    fn resync_leaves_no_orphans() {
        let mut markers = sync();
        markers.set_reports(sample_reports());
        let before = markers.surface().len();
        markers.sync();
        markers.sync();
        assert_eq!(markers.surface().len(), before);

        markers.set_reports(Vec::new());
        assert!(markers.surface().is_empty());
    }

    #[test]
    fn clicking_a_circle_selects_and_recenters() {
        let mut markers = sync();
        markers.set_reports(vec![
            report(1, SmellCategory::Nature, 3, Some((42.0, -71.0))),
            report(2, SmellCategory::Urban, 3, Some((42.5, -71.5))),
        ]);

        let handle = markers.handle_for(2).unwrap();
        assert_eq!(markers.click_overlay(handle), Some(2));
        assert_eq!(markers.selection(), Selection::of(2));

        let view = markers.surface().view();
        assert_eq!(view.zoom, 16);
        assert_eq!(view.center, LatLng { lat: 42.5, lng: -71.5 });

        let highlighted: Vec<_> = markers
            .surface()
            .circles()
            .filter(|(_, c)| c.fill == Palette::default().highlight)
            .map(|(_, c)| (c.report_id, c.radius))
            .collect();
        assert_eq!(highlighted, vec![(2, 15)]);
    }

    #[test]
    fn stale_handle_click_is_ignored() {
        let mut markers = sync();
        markers.set_reports(vec![report(1, SmellCategory::Food, 3, Some((1.0, 1.0)))]);
        let stale = markers.handle_for(1).unwrap();
        markers.sync();
        assert_eq!(markers.click_overlay(stale), None);
        assert!(markers.selection().is_empty());
    }

    #[test]
    fn clicking_empty_map_clears_selection() {
        let mut markers = sync();
        markers.set_reports(vec![report(1, SmellCategory::Food, 3, Some((1.0, 1.0)))]);
        markers.set_selection(Selection::of(1));

        let click = markers.click_map(LatLng { lat: 0.0, lng: 0.0 });
        assert_eq!(click, MapClick::SelectionCleared);
        assert!(markers.selection().is_empty());
    }

    #[test]
    fn placement_keeps_exactly_one_pin() {
        let mut markers = sync();
        markers.set_reports(sample_reports());
        let circles = markers.overlay_count();

        markers.begin_placement();
        markers.click_map(LatLng { lat: 1.0, lng: 1.0 });
        let second = LatLng { lat: 2.0, lng: 2.0 };
        assert_eq!(markers.click_map(second), MapClick::Placed(second));

        assert_eq!(markers.surface().pins().collect::<Vec<_>>(), vec![second]);
        assert_eq!(markers.pending_location(), Some(second));
        assert_eq!(markers.surface().len(), circles + 1);

        assert_eq!(markers.finish_placement(), Some(second));
        assert!(!markers.is_placing());
        assert_eq!(markers.surface().pins().count(), 0);
    }

    #[test]
    fn cancel_placement_discards_pin_and_location() {
        let mut markers = sync();
        markers.begin_placement();
        markers.click_map(LatLng { lat: 3.0, lng: 3.0 });
        markers.cancel_placement();
        assert_eq!(markers.pending_location(), None);
        assert!(markers.surface().is_empty());
        assert_eq!(markers.finish_placement(), None);
    }

    #[test]
    fn removed_report_drops_selection() {
        let mut markers = sync();
        markers.set_reports(vec![report(1, SmellCategory::Food, 3, Some((1.0, 1.0)))]);
        markers.set_selection(Selection::of(1));
        markers.set_reports(vec![report(2, SmellCategory::Food, 3, Some((1.0, 1.0)))]);
        assert!(markers.selection().is_empty());
    }

    #[test]
    fn into_surface_removes_everything_it_drew() {
        let mut markers = sync();
        markers.set_reports(sample_reports());
        markers.begin_placement();
        markers.click_map(LatLng { lat: 3.0, lng: 3.0 });
        let layer = markers.into_surface();
        assert!(layer.is_empty());
        assert!(!matches!(layer.get(OverlayHandle(1)), Some(Overlay::Circle(_))));
    }
}
