//! # scape-gateway
//!
//! Remote data gateway for Smellscape.
//!
//! Three independent record collections (smell reports, articles, scent
//! library entries) are reached through one trait each. Every operation
//! returns a typed entity decoded and validated at this boundary, or a
//! [`DataAccessError`] carrying the cause. Nothing here retries.
//!
//! Implementations:
//! - [`rest::RestGateway`]: PostgREST-style hosted backend over `reqwest`
//! - `scape_db::LocalGateway`: embedded libSQL database (separate crate)
//!
//! [`realtime`] turns the report change feed into whole-collection deliveries.

pub mod error;
pub mod realtime;
pub mod rest;
pub mod rows;

pub use error::{DataAccessError, DecodeError};

use std::fmt;
use std::future::Future;

use tokio::sync::broadcast;

use scape_core::RecordId;
use scape_core::entities::{
    Article, ArticleDraft, ArticlePatch, Report, ReportDraft, ReportPatch, Scent, ScentDraft,
    ScentPatch,
};
use scape_core::enums::SmellCategory;

// ── Collections ────────────────────────────────────────────────────

/// The backend tables this application reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Reports,
    Articles,
    Library,
}

impl Collection {
    /// Backend table name.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Reports => "smells",
            Self::Articles => "articles",
            Self::Library => "smell_library",
        }
    }

    /// `getAll` ordering: newest first, except the library which is by name.
    #[must_use]
    pub const fn order(self) -> (&'static str, bool) {
        match self {
            Self::Reports | Self::Articles => ("created_at", true),
            Self::Library => ("name", false),
        }
    }

    /// Columns matched by free-text search.
    #[must_use]
    pub const fn search_columns(self) -> [&'static str; 2] {
        match self {
            Self::Reports => ["title", "description"],
            Self::Articles => ["title", "content"],
            Self::Library => ["name", "description"],
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

// ── Change events ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
    /// The source saw a change but cannot say which kind (polling feeds).
    Unknown,
}

/// A row in a collection changed. Listeners re-fetch; the event carries no row data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeEvent {
    pub collection: Collection,
    pub kind: ChangeKind,
    pub id: Option<RecordId>,
}

/// Capacity of every change broadcast channel. Lagging listeners only lose
/// intermediate events, which is harmless under whole-collection delivery.
pub const CHANGE_CHANNEL_CAPACITY: usize = 64;

// ── Gateways ───────────────────────────────────────────────────────

/// CRUD over the `smells` collection.
pub trait ReportGateway: Send + Sync {
    fn add_report(
        &self,
        draft: &ReportDraft,
    ) -> impl Future<Output = Result<Report, DataAccessError>> + Send;

    fn get_report(
        &self,
        id: RecordId,
    ) -> impl Future<Output = Result<Report, DataAccessError>> + Send;

    /// All reports, newest first.
    fn list_reports(&self) -> impl Future<Output = Result<Vec<Report>, DataAccessError>> + Send;

    fn reports_by_category(
        &self,
        category: &SmellCategory,
    ) -> impl Future<Output = Result<Vec<Report>, DataAccessError>> + Send;

    /// Case-insensitive substring match over title and description.
    fn search_reports(
        &self,
        term: &str,
    ) -> impl Future<Output = Result<Vec<Report>, DataAccessError>> + Send;

    fn update_report(
        &self,
        id: RecordId,
        patch: &ReportPatch,
    ) -> impl Future<Output = Result<Report, DataAccessError>> + Send;

    fn remove_report(&self, id: RecordId)
    -> impl Future<Output = Result<(), DataAccessError>> + Send;

    /// Register interest in report changes. Must be called inside a tokio runtime.
    fn watch_reports(&self) -> broadcast::Receiver<ChangeEvent>;
}

/// CRUD over the `articles` collection.
pub trait ArticleGateway: Send + Sync {
    fn add_article(
        &self,
        draft: &ArticleDraft,
    ) -> impl Future<Output = Result<Article, DataAccessError>> + Send;

    fn get_article(
        &self,
        id: RecordId,
    ) -> impl Future<Output = Result<Article, DataAccessError>> + Send;

    /// All articles, newest first.
    fn list_articles(&self) -> impl Future<Output = Result<Vec<Article>, DataAccessError>> + Send;

    fn articles_by_category(
        &self,
        category: &str,
    ) -> impl Future<Output = Result<Vec<Article>, DataAccessError>> + Send;

    /// Case-insensitive substring match over title and content.
    fn search_articles(
        &self,
        term: &str,
    ) -> impl Future<Output = Result<Vec<Article>, DataAccessError>> + Send;

    fn update_article(
        &self,
        id: RecordId,
        patch: &ArticlePatch,
    ) -> impl Future<Output = Result<Article, DataAccessError>> + Send;

    fn remove_article(
        &self,
        id: RecordId,
    ) -> impl Future<Output = Result<(), DataAccessError>> + Send;

    /// Bump the read counter (detail view opened).
    fn increment_reads(
        &self,
        id: RecordId,
    ) -> impl Future<Output = Result<Article, DataAccessError>> + Send {
        async move {
            let article = self.get_article(id).await?;
            let patch = ArticlePatch {
                reads: Some(article.reads.saturating_add(1)),
                ..ArticlePatch::default()
            };
            self.update_article(id, &patch).await
        }
    }

    fn increment_likes(
        &self,
        id: RecordId,
    ) -> impl Future<Output = Result<Article, DataAccessError>> + Send {
        async move {
            let article = self.get_article(id).await?;
            let patch = ArticlePatch {
                likes: Some(article.likes.saturating_add(1)),
                ..ArticlePatch::default()
            };
            self.update_article(id, &patch).await
        }
    }
}

/// CRUD over the `smell_library` collection.
pub trait LibraryGateway: Send + Sync {
    fn add_scent(
        &self,
        draft: &ScentDraft,
    ) -> impl Future<Output = Result<Scent, DataAccessError>> + Send;

    fn get_scent(&self, id: RecordId)
    -> impl Future<Output = Result<Scent, DataAccessError>> + Send;

    /// All library entries, by name.
    fn list_scents(&self) -> impl Future<Output = Result<Vec<Scent>, DataAccessError>> + Send;

    fn scents_by_category(
        &self,
        category: &str,
    ) -> impl Future<Output = Result<Vec<Scent>, DataAccessError>> + Send;

    /// Case-insensitive substring match over name and description.
    fn search_scents(
        &self,
        term: &str,
    ) -> impl Future<Output = Result<Vec<Scent>, DataAccessError>> + Send;

    fn update_scent(
        &self,
        id: RecordId,
        patch: &ScentPatch,
    ) -> impl Future<Output = Result<Scent, DataAccessError>> + Send;

    fn remove_scent(&self, id: RecordId)
    -> impl Future<Output = Result<(), DataAccessError>> + Send;
}

/// A backend serving all three collections.
pub trait Gateway: ReportGateway + ArticleGateway + LibraryGateway {}

impl<T> Gateway for T where T: ReportGateway + ArticleGateway + LibraryGateway {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_match_backend_schema() {
        assert_eq!(Collection::Reports.table(), "smells");
        assert_eq!(Collection::Articles.table(), "articles");
        assert_eq!(Collection::Library.table(), "smell_library");
    }

    #[test]
    fn library_orders_by_name_ascending() {
        assert_eq!(Collection::Library.order(), ("name", false));
        assert_eq!(Collection::Reports.order(), ("created_at", true));
    }
}
