//! Scent library page: browse with filter and search, a detail panel, and
//! full create/edit/delete.

use std::sync::Arc;
use std::time::Instant;

use scape_config::UiConfig;
use scape_core::RecordId;
use scape_core::entities::{Scent, ScentPatch};
use scape_core::filter::categories_of;
use scape_core::samples::sample_scents;
use scape_core::validation::ScentForm;
use scape_gateway::LibraryGateway;

use crate::error::SubmitError;
use crate::form::{Editor, FormMode};
use crate::listing::Listing;
use crate::state::{LoadState, PageData};

pub struct LibraryPage<G> {
    gateway: Arc<G>,
    data: PageData<Scent>,
    listing: Listing,
    selected: Option<RecordId>,
    editor: Option<Editor<ScentForm>>,
}

impl<G: LibraryGateway> LibraryPage<G> {
    pub fn new(gateway: Arc<G>, config: &UiConfig) -> Self {
        Self {
            gateway,
            data: PageData::default(),
            listing: Listing::from_config(config),
            selected: None,
            editor: None,
        }
    }

    /// Fetch the library. Falls back to the sample scents on failure. The
    /// detail panel defaults to the first entry.
    pub async fn load(&mut self) {
        let result = self.gateway.list_scents().await;
        self.data.resolve(result, "scents", sample_scents);
        let still_present = self
            .selected
            .is_some_and(|id| self.scents().iter().any(|s| s.id == id));
        if !still_present {
            self.selected = self.scents().first().map(|s| s.id);
        }
    }

    #[must_use]
    pub const fn state(&self) -> &LoadState {
        self.data.state()
    }

    #[must_use]
    pub fn scents(&self) -> &[Scent] {
        self.data.items()
    }

    // ── Filtering ──────────────────────────────────────────────────

    pub const fn listing_mut(&mut self) -> &mut Listing {
        &mut self.listing
    }

    pub fn type_query(&mut self, text: impl Into<String>, now: Instant) {
        self.listing.type_query(text, now);
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.listing.tick(now)
    }

    #[must_use]
    pub fn visible(&self) -> Vec<Scent> {
        self.listing.apply(self.scents())
    }

    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        categories_of(self.scents())
    }

    // ── Detail panel ───────────────────────────────────────────────

    /// Show an entry. Returns `false` for an unknown id.
    pub fn select(&mut self, id: RecordId) -> bool {
        let known = self.scents().iter().any(|s| s.id == id);
        if known {
            self.selected = Some(id);
        }
        known
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Scent> {
        let id = self.selected?;
        self.scents().iter().find(|s| s.id == id)
    }

    // ── Create / edit form ─────────────────────────────────────────

    pub fn open_create(&mut self) {
        self.editor = Some(Editor::create());
    }

    /// Open the edit form for an entry. Returns `false` if it is not loaded.
    pub fn open_edit(&mut self, id: RecordId) -> bool {
        let Some(scent) = self.scents().iter().find(|s| s.id == id) else {
            return false;
        };
        self.editor = Some(Editor::edit(id, ScentForm::from(scent)));
        true
    }

    #[must_use]
    pub const fn editor(&self) -> Option<&Editor<ScentForm>> {
        self.editor.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut ScentForm> {
        self.editor.as_mut().map(|editor| &mut editor.form)
    }

    pub fn close_form(&mut self) {
        self.editor = None;
    }

    /// Validate and save the open form, then re-fetch and reset.
    ///
    /// # Errors
    ///
    /// [`SubmitError::Validation`] before any backend call,
    /// [`SubmitError::Network`] if the backend call fails,
    /// [`SubmitError::NoForm`] if no form is open.
    pub async fn submit(&mut self) -> Result<Scent, SubmitError> {
        let editor = self.editor.as_ref().ok_or(SubmitError::NoForm)?;
        let draft = editor.form.validate()?;
        let saved = match editor.mode {
            FormMode::Create => self.gateway.add_scent(&draft).await?,
            FormMode::Edit(id) => self.gateway.update_scent(id, &ScentPatch::from(draft)).await?,
        };
        self.after_write().await;
        Ok(saved)
    }

    /// # Errors
    ///
    /// [`SubmitError::Network`] if the backend call fails.
    pub async fn delete(&mut self, id: RecordId) -> Result<(), SubmitError> {
        self.gateway.remove_scent(id).await?;
        self.after_write().await;
        Ok(())
    }

    async fn after_write(&mut self) {
        self.editor = None;
        self.selected = None;
        self.load().await;
    }
}
