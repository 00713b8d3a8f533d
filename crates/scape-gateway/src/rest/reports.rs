//! `smells` collection over REST.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

use scape_core::RecordId;
use scape_core::entities::{Report, ReportDraft, ReportPatch};
use scape_core::enums::SmellCategory;

use super::RestGateway;
use super::query::TableQuery;
use crate::rows::ReportRow;
use crate::{ChangeEvent, Collection, DataAccessError, ReportGateway};

const REPORTS: Collection = Collection::Reports;

/// Insert body: the draft plus the observation `timestamp` column.
#[derive(Serialize)]
struct ReportInsert<'a> {
    #[serde(flatten)]
    draft: &'a ReportDraft,
    timestamp: DateTime<Utc>,
}

impl ReportGateway for RestGateway {
    async fn add_report(&self, draft: &ReportDraft) -> Result<Report, DataAccessError> {
        let body = ReportInsert {
            draft,
            timestamp: Utc::now(),
        };
        self.insert::<_, ReportRow, Report>(REPORTS, &body).await
    }

    async fn get_report(&self, id: RecordId) -> Result<Report, DataAccessError> {
        self.select_one::<ReportRow, Report>(REPORTS, id).await
    }

    async fn list_reports(&self) -> Result<Vec<Report>, DataAccessError> {
        self.select::<ReportRow, Report>(REPORTS, TableQuery::new(REPORTS).ordered())
            .await
    }

    async fn reports_by_category(
        &self,
        category: &SmellCategory,
    ) -> Result<Vec<Report>, DataAccessError> {
        let query = TableQuery::new(REPORTS)
            .eq("category", category.as_str())
            .ordered();
        self.select::<ReportRow, Report>(REPORTS, query).await
    }

    async fn search_reports(&self, term: &str) -> Result<Vec<Report>, DataAccessError> {
        let query = TableQuery::new(REPORTS).search(term).ordered();
        self.select::<ReportRow, Report>(REPORTS, query).await
    }

    async fn update_report(
        &self,
        id: RecordId,
        patch: &ReportPatch,
    ) -> Result<Report, DataAccessError> {
        if patch.is_empty() {
            return self.get_report(id).await;
        }
        self.patch::<_, ReportRow, Report>(REPORTS, id, patch).await
    }

    async fn remove_report(&self, id: RecordId) -> Result<(), DataAccessError> {
        self.delete(REPORTS, id).await
    }

    fn watch_reports(&self) -> broadcast::Receiver<ChangeEvent> {
        self.report_feed.subscribe(&self.poll_target(REPORTS))
    }
}
