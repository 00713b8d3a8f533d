//! Articles page: list, category filter, debounced search, detail view with
//! read and like counters, submission form.

use std::sync::Arc;
use std::time::Instant;

use scape_config::UiConfig;
use scape_core::RecordId;
use scape_core::entities::Article;
use scape_core::filter::categories_of;
use scape_core::samples::sample_articles;
use scape_core::validation::ArticleForm;
use scape_gateway::ArticleGateway;

use crate::error::SubmitError;
use crate::listing::Listing;
use crate::state::{LoadState, PageData};

pub struct ArticlesPage<G> {
    gateway: Arc<G>,
    data: PageData<Article>,
    listing: Listing,
    detail: Option<RecordId>,
    form: Option<ArticleForm>,
}

impl<G: ArticleGateway> ArticlesPage<G> {
    pub fn new(gateway: Arc<G>, config: &UiConfig) -> Self {
        Self {
            gateway,
            data: PageData::default(),
            listing: Listing::from_config(config),
            detail: None,
            form: None,
        }
    }

    /// Fetch every article. Falls back to the sample articles on failure.
    pub async fn load(&mut self) {
        let result = self.gateway.list_articles().await;
        self.data.resolve(result, "articles", sample_articles);
    }

    #[must_use]
    pub const fn state(&self) -> &LoadState {
        self.data.state()
    }

    #[must_use]
    pub fn articles(&self) -> &[Article] {
        self.data.items()
    }

    // ── Filtering ──────────────────────────────────────────────────

    pub const fn listing_mut(&mut self) -> &mut Listing {
        &mut self.listing
    }

    #[must_use]
    pub const fn listing(&self) -> &Listing {
        &self.listing
    }

    /// Keystroke in the search box; see [`Listing::type_query`].
    pub fn type_query(&mut self, text: impl Into<String>, now: Instant) {
        self.listing.type_query(text, now);
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.listing.tick(now)
    }

    /// Articles passing the current category filter and query.
    #[must_use]
    pub fn visible(&self) -> Vec<Article> {
        self.listing.apply(self.articles())
    }

    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        categories_of(self.articles())
    }

    // ── Detail view ────────────────────────────────────────────────

    /// Open an article, counting the read. If the counter update fails the
    /// local copy is still shown. Returns `None` for an unknown id.
    pub async fn open_detail(&mut self, id: RecordId) -> Option<&Article> {
        if !self.articles().iter().any(|a| a.id == id) {
            return None;
        }
        match self.gateway.increment_reads(id).await {
            Ok(updated) => self.store(updated),
            Err(error) => tracing::warn!(id, %error, "could not record article read"),
        }
        self.detail = Some(id);
        self.detail()
    }

    #[must_use]
    pub fn detail(&self) -> Option<&Article> {
        let id = self.detail?;
        self.articles().iter().find(|a| a.id == id)
    }

    pub const fn close_detail(&mut self) {
        self.detail = None;
    }

    /// # Errors
    ///
    /// [`SubmitError::Network`] if the backend call fails.
    pub async fn like(&mut self, id: RecordId) -> Result<Article, SubmitError> {
        let updated = self.gateway.increment_likes(id).await?;
        self.store(updated.clone());
        Ok(updated)
    }

    fn store(&mut self, article: Article) {
        if let Some(slot) = self.data.items_mut().iter_mut().find(|a| a.id == article.id) {
            *slot = article;
        }
    }

    // ── Submission form ────────────────────────────────────────────

    pub fn open_form(&mut self) {
        self.form = Some(ArticleForm::default());
    }

    pub fn form_mut(&mut self) -> Option<&mut ArticleForm> {
        self.form.as_mut()
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Validate and publish the open form, then re-fetch and reset the page.
    ///
    /// # Errors
    ///
    /// [`SubmitError::Validation`] before any backend call,
    /// [`SubmitError::Network`] if the backend call fails,
    /// [`SubmitError::NoForm`] if no form is open.
    pub async fn submit(&mut self) -> Result<Article, SubmitError> {
        let draft = self.form.as_ref().ok_or(SubmitError::NoForm)?.validate()?;
        let created = self.gateway.add_article(&draft).await?;
        self.form = None;
        self.detail = None;
        self.load().await;
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::OfflineGateway;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn offline_page() -> (Arc<OfflineGateway>, ArticlesPage<OfflineGateway>) {
        let gateway = Arc::new(OfflineGateway::default());
        let page = ArticlesPage::new(Arc::clone(&gateway), &UiConfig::default());
        (gateway, page)
    }

    #[tokio::test]
    async fn offline_load_uses_samples() {
        let (_, mut page) = offline_page();
        page.load().await;
        assert_eq!(page.articles(), sample_articles().as_slice());
        assert!(page.state().banner().is_some());
    }

    #[tokio::test]
    async fn detail_still_opens_when_read_counter_fails() {
        let (_, mut page) = offline_page();
        page.load().await;
        let id = page.articles()[0].id;
        let reads = page.articles()[0].reads;

        let detail = page.open_detail(id).await.unwrap();
        assert_eq!(detail.reads, reads);
        assert!(page.open_detail(-1).await.is_none());
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_backend() {
        let (gateway, mut page) = offline_page();
        page.open_form();
        page.form_mut().unwrap().title = "No body".into();

        let err = page.submit().await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn search_waits_for_debounce() {
        let (_, mut page) = offline_page();
        page.load().await;
        let all = page.visible().len();
        let start = Instant::now();

        page.type_query("zzz-no-match", start);
        assert_eq!(page.visible().len(), all);
        assert!(!page.tick(start + Duration::from_millis(100)));
        assert!(page.tick(start + Duration::from_millis(300)));
        assert!(page.visible().is_empty());
    }
}
