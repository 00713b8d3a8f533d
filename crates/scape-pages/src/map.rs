//! Smell map page: report collection, markers, list filter, report form,
//! category chart and live updates.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::mpsc;

use scape_core::RecordId;
use scape_core::entities::{Report, ReportPatch};
use scape_core::enums::SmellCategory;
use scape_core::geo::LatLng;
use scape_core::samples::sample_reports;
use scape_core::validation::ReportForm;
use scape_gateway::ReportGateway;
use scape_gateway::realtime::{Subscription, subscribe_reports};
use scape_map::{MapClick, MapSurface, MarkerSync, OverlayHandle, Selection};

use crate::error::SubmitError;
use crate::form::{Editor, FormMode};
use crate::state::{LoadState, PageData};

/// Live report feed attached to the page.
struct Live {
    subscription: Subscription,
    deliveries: mpsc::UnboundedReceiver<Vec<Report>>,
}

pub struct MapPage<G, S: MapSurface> {
    gateway: Arc<G>,
    data: PageData<Report>,
    markers: MarkerSync<S>,
    editor: Option<Editor<ReportForm>>,
    live: Option<Live>,
}

impl<G, S> MapPage<G, S>
where
    G: ReportGateway + 'static,
    S: MapSurface,
{
    pub fn new(gateway: Arc<G>, markers: MarkerSync<S>) -> Self {
        Self {
            gateway,
            data: PageData::default(),
            markers,
            editor: None,
            live: None,
        }
    }

    // ── Loading ────────────────────────────────────────────────────

    /// Fetch every report. Falls back to the sample reports on failure.
    pub async fn load(&mut self) {
        let result = self.gateway.list_reports().await;
        self.data.resolve(result, "reports", sample_reports);
        self.markers.set_reports(self.data.items().to_vec());
    }

    /// Whole-collection delivery from the live feed or a manual re-fetch.
    /// The latest call wins.
    pub fn apply_collection(&mut self, reports: Vec<Report>) {
        self.data.replace(reports);
        self.markers.set_reports(self.data.items().to_vec());
    }

    #[must_use]
    pub const fn state(&self) -> &LoadState {
        self.data.state()
    }

    #[must_use]
    pub fn reports(&self) -> &[Report] {
        self.data.items()
    }

    #[must_use]
    pub const fn markers(&self) -> &MarkerSync<S> {
        &self.markers
    }

    // ── Selection and list view ────────────────────────────────────

    #[must_use]
    pub const fn selection(&self) -> Selection {
        self.markers.selection()
    }

    /// The list view: exactly the selected report, or every report.
    #[must_use]
    pub fn visible_reports(&self) -> Vec<&Report> {
        match self.selection().selected() {
            Some(id) => self.reports().iter().filter(|r| r.id == id).collect(),
            None => self.reports().iter().collect(),
        }
    }

    /// Select from the list (or clear with `None`).
    pub fn select(&mut self, id: Option<RecordId>) {
        let selection = id.map_or_else(Selection::none, Selection::of);
        self.markers.set_selection(selection);
    }

    pub fn click_overlay(&mut self, handle: OverlayHandle) -> Option<RecordId> {
        self.markers.click_overlay(handle)
    }

    /// Empty map clicked: places the pending location while a create form
    /// is picking one, otherwise clears the selection.
    pub fn click_map(&mut self, at: LatLng) -> MapClick {
        let click = self.markers.click_map(at);
        if let (MapClick::Placed(at), Some(editor)) = (click, self.editor.as_mut()) {
            editor.form.location = Some(at);
        }
        click
    }

    /// Report counts per category for the chart view. Reports without
    /// coordinates count too.
    #[must_use]
    pub fn category_breakdown(&self) -> Vec<(SmellCategory, usize)> {
        let mut counts: BTreeMap<SmellCategory, usize> = BTreeMap::new();
        for report in self.reports() {
            *counts.entry(report.category.clone()).or_default() += 1;
        }
        counts.into_iter().collect()
    }

    // ── Report form ────────────────────────────────────────────────

    /// Open a blank form and start picking a location on the map.
    pub fn open_create(&mut self) {
        self.editor = Some(Editor::create());
        self.markers.begin_placement();
    }

    /// Open the edit form for a report. Returns `false` if it is not loaded.
    pub fn open_edit(&mut self, id: RecordId) -> bool {
        let Some(report) = self.reports().iter().find(|r| r.id == id) else {
            return false;
        };
        self.editor = Some(Editor::edit(id, ReportForm::from(report)));
        self.markers.cancel_placement();
        true
    }

    /// Let the next map click move the location of the open form.
    pub fn pick_location(&mut self) {
        if self.editor.is_some() {
            self.markers.begin_placement();
        }
    }

    #[must_use]
    pub const fn editor(&self) -> Option<&Editor<ReportForm>> {
        self.editor.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut ReportForm> {
        self.editor.as_mut().map(|editor| &mut editor.form)
    }

    /// Close the form, discarding the placement pin.
    pub fn close_form(&mut self) {
        self.editor = None;
        self.markers.cancel_placement();
    }

    /// Validate and send the open form.
    ///
    /// Validation failures return before any backend call and leave the form
    /// open. On success the collection is re-fetched, and both the form and
    /// the selection are reset.
    ///
    /// # Errors
    ///
    /// [`SubmitError::Validation`] for an invalid form (including no
    /// location), [`SubmitError::Network`] if the backend call fails,
    /// [`SubmitError::NoForm`] if no form is open.
    pub async fn submit(&mut self) -> Result<Report, SubmitError> {
        let editor = self.editor.as_mut().ok_or(SubmitError::NoForm)?;
        if let Some(at) = self.markers.pending_location() {
            editor.form.location = Some(at);
        }
        let draft = editor.form.validate()?;
        let mode = editor.mode;

        let saved = match mode {
            FormMode::Create => self.gateway.add_report(&draft).await?,
            FormMode::Edit(id) => {
                self.gateway
                    .update_report(id, &ReportPatch::from(draft))
                    .await?
            }
        };
        tracing::debug!(id = saved.id, ?mode, "report saved");
        self.after_write().await;
        Ok(saved)
    }

    /// # Errors
    ///
    /// [`SubmitError::Network`] if the backend call fails.
    pub async fn delete(&mut self, id: RecordId) -> Result<(), SubmitError> {
        self.gateway.remove_report(id).await?;
        self.after_write().await;
        Ok(())
    }

    async fn after_write(&mut self) {
        self.close_form();
        self.markers.set_selection(Selection::none());
        self.load().await;
    }

    // ── Live updates ───────────────────────────────────────────────

    /// Attach the realtime feed. Deliveries queue up until
    /// [`Self::apply_pending`] or [`Self::next_delivery`] applies them.
    ///
    /// Must be called inside a tokio runtime.
    pub fn start_live(&mut self) {
        if self.live.is_some() {
            return;
        }
        let (tx, deliveries) = mpsc::unbounded_channel();
        let subscription = subscribe_reports(Arc::clone(&self.gateway), move |reports| {
            let _ = tx.send(reports);
        });
        self.live = Some(Live {
            subscription,
            deliveries,
        });
    }

    /// Apply the newest queued delivery, dropping older ones. Returns `true`
    /// if anything was applied.
    pub fn apply_pending(&mut self) -> bool {
        let Some(live) = self.live.as_mut() else {
            return false;
        };
        let mut latest = None;
        while let Ok(reports) = live.deliveries.try_recv() {
            latest = Some(reports);
        }
        match latest {
            Some(reports) => {
                self.apply_collection(reports);
                true
            }
            None => false,
        }
    }

    /// Wait for the next delivery and apply it. `None` once the feed has
    /// ended or was never started.
    pub async fn next_delivery(&mut self) -> Option<usize> {
        let reports = self.live.as_mut()?.deliveries.recv().await?;
        let count = reports.len();
        self.apply_collection(reports);
        Some(count)
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live
            .as_ref()
            .is_some_and(|live| live.subscription.is_active())
    }

    /// Release the live feed and every overlay, returning the surface.
    pub fn teardown(mut self) -> S {
        if let Some(live) = self.live.take() {
            live.subscription.unsubscribe();
        }
        self.markers.into_surface()
    }
}
