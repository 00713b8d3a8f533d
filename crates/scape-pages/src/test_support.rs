//! Shared test utilities for the page controllers.

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::broadcast;

use scape_core::RecordId;
use scape_core::entities::{
    Article, ArticleDraft, ArticlePatch, Report, ReportDraft, ReportPatch, Scent, ScentDraft,
    ScentPatch,
};
use scape_core::enums::SmellCategory;
use scape_gateway::{
    ArticleGateway, CHANGE_CHANNEL_CAPACITY, ChangeEvent, DataAccessError, LibraryGateway,
    ReportGateway,
};

/// A backend that is always down. Counts every call it receives.
#[derive(Default)]
pub struct OfflineGateway {
    calls: AtomicUsize,
}

impl OfflineGateway {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T, DataAccessError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DataAccessError::Api {
            status: 503,
            message: "service unavailable".into(),
        })
    }
}

impl ReportGateway for OfflineGateway {
    async fn add_report(&self, _: &ReportDraft) -> Result<Report, DataAccessError> {
        self.fail()
    }
    async fn get_report(&self, _: RecordId) -> Result<Report, DataAccessError> {
        self.fail()
    }
    async fn list_reports(&self) -> Result<Vec<Report>, DataAccessError> {
        self.fail()
    }
    async fn reports_by_category(&self, _: &SmellCategory) -> Result<Vec<Report>, DataAccessError> {
        self.fail()
    }
    async fn search_reports(&self, _: &str) -> Result<Vec<Report>, DataAccessError> {
        self.fail()
    }
    async fn update_report(&self, _: RecordId, _: &ReportPatch) -> Result<Report, DataAccessError> {
        self.fail()
    }
    async fn remove_report(&self, _: RecordId) -> Result<(), DataAccessError> {
        self.fail()
    }
    fn watch_reports(&self) -> broadcast::Receiver<ChangeEvent> {
        broadcast::channel(CHANGE_CHANNEL_CAPACITY).1
    }
}

impl ArticleGateway for OfflineGateway {
    async fn add_article(&self, _: &ArticleDraft) -> Result<Article, DataAccessError> {
        self.fail()
    }
    async fn get_article(&self, _: RecordId) -> Result<Article, DataAccessError> {
        self.fail()
    }
    async fn list_articles(&self) -> Result<Vec<Article>, DataAccessError> {
        self.fail()
    }
    async fn articles_by_category(&self, _: &str) -> Result<Vec<Article>, DataAccessError> {
        self.fail()
    }
    async fn search_articles(&self, _: &str) -> Result<Vec<Article>, DataAccessError> {
        self.fail()
    }
    async fn update_article(&self, _: RecordId, _: &ArticlePatch) -> Result<Article, DataAccessError> {
        self.fail()
    }
    async fn remove_article(&self, _: RecordId) -> Result<(), DataAccessError> {
        self.fail()
    }
}

impl LibraryGateway for OfflineGateway {
    async fn add_scent(&self, _: &ScentDraft) -> Result<Scent, DataAccessError> {
        self.fail()
    }
    async fn get_scent(&self, _: RecordId) -> Result<Scent, DataAccessError> {
        self.fail()
    }
    async fn list_scents(&self) -> Result<Vec<Scent>, DataAccessError> {
        self.fail()
    }
    async fn scents_by_category(&self, _: &str) -> Result<Vec<Scent>, DataAccessError> {
        self.fail()
    }
    async fn search_scents(&self, _: &str) -> Result<Vec<Scent>, DataAccessError> {
        self.fail()
    }
    async fn update_scent(&self, _: RecordId, _: &ScentPatch) -> Result<Scent, DataAccessError> {
        self.fail()
    }
    async fn remove_scent(&self, _: RecordId) -> Result<(), DataAccessError> {
        self.fail()
    }
}
