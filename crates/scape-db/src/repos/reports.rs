//! Report repository: CRUD, category filter, search, change announcements.

use libsql::Value;
use tokio::sync::broadcast;

use scape_core::RecordId;
use scape_core::entities::{Report, ReportDraft, ReportPatch};
use scape_core::enums::SmellCategory;
use scape_gateway::rows::ReportRow;
use scape_gateway::{ChangeEvent, ChangeKind, Collection, DataAccessError, ReportGateway};

use crate::LocalGateway;
use crate::error::DatabaseError;
use crate::helpers::{
    Assignments, decode, decode_one, get_opt_string, now_stamp, order_clause, retain_matching,
};

const REPORTS: Collection = Collection::Reports;

const COLUMNS: &str = "id, title, description, category, intensity, latitude, longitude, \
                       address, contributor, created_at";

fn row_to_report(row: &libsql::Row) -> Result<ReportRow, DatabaseError> {
    Ok(ReportRow {
        id: row.get::<i64>(0)?,
        title: get_opt_string(row, 1)?,
        description: row.get::<Option<String>>(2)?,
        category: get_opt_string(row, 3)?,
        intensity: row.get::<Option<i64>>(4)?,
        latitude: row.get::<Option<f64>>(5)?,
        longitude: row.get::<Option<f64>>(6)?,
        address: get_opt_string(row, 7)?,
        contributor: get_opt_string(row, 8)?,
        created_at: row.get::<String>(9)?,
    })
}

impl ReportGateway for LocalGateway {
    async fn add_report(&self, draft: &ReportDraft) -> Result<Report, DataAccessError> {
        let now = now_stamp();
        let sql = format!(
            "INSERT INTO smells (title, description, category, intensity, latitude, longitude,
                                 address, contributor, timestamp, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9, ?9)
             RETURNING {COLUMNS}"
        );
        let params: Vec<Value> = vec![
            draft.title.as_str().into(),
            draft.description.as_str().into(),
            draft.category.as_str().into(),
            i64::from(draft.intensity).into(),
            draft.latitude.into(),
            draft.longitude.into(),
            draft.address.as_deref().into(),
            draft.contributor.as_deref().into(),
            now.into(),
        ];
        let rows = self.fetch(&sql, params, row_to_report).await?;
        let report: Report = decode(REPORTS, rows)?
            .into_iter()
            .next()
            .ok_or_else(|| DataAccessError::Decode {
                collection: REPORTS,
                reason: "insert returned no row".into(),
            })?;
        self.announce(ChangeKind::Insert, report.id);
        Ok(report)
    }

    async fn get_report(&self, id: RecordId) -> Result<Report, DataAccessError> {
        let sql = format!("SELECT {COLUMNS} FROM smells WHERE id = ?1");
        let rows = self.fetch(&sql, vec![id.into()], row_to_report).await?;
        decode_one(REPORTS, id, rows)
    }

    async fn list_reports(&self) -> Result<Vec<Report>, DataAccessError> {
        let sql = format!("SELECT {COLUMNS} FROM smells {}", order_clause(REPORTS));
        let rows = self.fetch(&sql, Vec::new(), row_to_report).await?;
        decode(REPORTS, rows)
    }

    async fn reports_by_category(
        &self,
        category: &SmellCategory,
    ) -> Result<Vec<Report>, DataAccessError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM smells WHERE category = ?1 {}",
            order_clause(REPORTS)
        );
        let rows = self
            .fetch(&sql, vec![category.as_str().into()], row_to_report)
            .await?;
        decode(REPORTS, rows)
    }

    async fn search_reports(&self, term: &str) -> Result<Vec<Report>, DataAccessError> {
        Ok(retain_matching(self.list_reports().await?, term))
    }

    async fn update_report(
        &self,
        id: RecordId,
        patch: &ReportPatch,
    ) -> Result<Report, DataAccessError> {
        let mut sets = Assignments::default();
        sets.set_opt("title", patch.title.as_deref());
        sets.set_opt("description", patch.description.as_deref());
        sets.set_opt("category", patch.category.as_ref().map(SmellCategory::as_str));
        sets.set_opt("intensity", patch.intensity.map(i64::from));
        sets.set_opt("latitude", patch.latitude);
        sets.set_opt("longitude", patch.longitude);
        sets.set_opt("address", patch.address.as_deref());
        sets.set_opt("contributor", patch.contributor.as_deref());

        if sets.is_empty() {
            return self.get_report(id).await;
        }

        let (sql, params) = sets.into_update(REPORTS, id, COLUMNS);
        let rows = self.fetch(&sql, params, row_to_report).await?;
        let report = decode_one(REPORTS, id, rows)?;
        self.announce(ChangeKind::Update, id);
        Ok(report)
    }

    async fn remove_report(&self, id: RecordId) -> Result<(), DataAccessError> {
        self.delete_by_id(REPORTS, id).await?;
        self.announce(ChangeKind::Delete, id);
        Ok(())
    }

    fn watch_reports(&self) -> broadcast::Receiver<ChangeEvent> {
        self.report_changes.subscribe()
    }
}
