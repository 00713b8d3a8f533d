//! Backend row shapes and their validation into entities.
//!
//! Rows mirror the backend columns loosely (nullable where the backend may
//! return null). `TryFrom<Row>` is the single place where a row becomes a
//! typed entity; every gateway implementation goes through it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use scape_core::RecordId;
use scape_core::entities::{Article, Report, Scent};
use scape_core::enums::SmellCategory;

use crate::error::DecodeError;

/// Parse a timestamp column.
///
/// Handles RFC 3339 (`"2026-02-09T14:30:00+00:00"`), offset-less ISO
/// timestamps as returned for Postgres `timestamp` columns
/// (`"2026-02-09T14:30:00.123456"`, read as UTC), and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns [`DecodeError`] if the string matches neither format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DecodeError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| DecodeError(format!("invalid timestamp '{s}': {e}")))
}

fn count(field: &str, value: Option<i64>) -> Result<u32, DecodeError> {
    u32::try_from(value.unwrap_or(0))
        .map_err(|_| DecodeError(format!("{field} must be a non-negative count")))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

// ── smells ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportRow {
    pub id: RecordId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub intensity: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
    pub contributor: Option<String>,
    pub created_at: String,
}

impl TryFrom<ReportRow> for Report {
    type Error = DecodeError;

    fn try_from(row: ReportRow) -> Result<Self, Self::Error> {
        let title = non_empty(row.title)
            .ok_or_else(|| DecodeError(format!("report {} has no title", row.id)))?;
        let intensity = row
            .intensity
            .and_then(|v| u8::try_from(v).ok())
            .filter(|v| (1..=10).contains(v))
            .ok_or_else(|| {
                DecodeError(format!(
                    "report {} intensity {:?} outside 1..=10",
                    row.id, row.intensity
                ))
            })?;
        Ok(Self {
            id: row.id,
            title,
            description: row.description.unwrap_or_default(),
            category: row
                .category
                .map_or(SmellCategory::Other, SmellCategory::from),
            intensity,
            latitude: row.latitude,
            longitude: row.longitude,
            address: non_empty(row.address),
            contributor: non_empty(row.contributor),
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}

// ── articles ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleRow {
    pub id: RecordId,
    pub title: Option<String>,
    pub category: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
    pub reads: Option<i64>,
    pub likes: Option<i64>,
    pub created_at: String,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DecodeError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        let title = non_empty(row.title)
            .ok_or_else(|| DecodeError(format!("article {} has no title", row.id)))?;
        Ok(Self {
            id: row.id,
            title,
            category: row.category.unwrap_or_default(),
            content: row.content.unwrap_or_default(),
            excerpt: row.excerpt.unwrap_or_default(),
            author_name: row.author_name.unwrap_or_default(),
            author_email: non_empty(row.author_email),
            image: non_empty(row.image),
            thumbnail: non_empty(row.thumbnail),
            reads: count("reads", row.reads)?,
            likes: count("likes", row.likes)?,
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}

// ── smell_library ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScentRow {
    pub id: RecordId,
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
    pub created_at: String,
}

impl TryFrom<ScentRow> for Scent {
    type Error = DecodeError;

    fn try_from(row: ScentRow) -> Result<Self, Self::Error> {
        let name = non_empty(row.name)
            .ok_or_else(|| DecodeError(format!("library entry {} has no name", row.id)))?;
        Ok(Self {
            id: row.id,
            name,
            category: row.category.unwrap_or_default(),
            description: row.description.unwrap_or_default(),
            image: non_empty(row.image),
            thumbnail: non_empty(row.thumbnail),
            created_at: parse_datetime(&row.created_at)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn report_row() -> ReportRow {
        ReportRow {
            id: 7,
            title: Some("Low tide".into()),
            category: Some("nature".into()),
            intensity: Some(6),
            latitude: Some(42.0),
            longitude: Some(-71.0),
            created_at: "2025-04-01T12:00:00+00:00".into(),
            ..ReportRow::default()
        }
    }

    #[test]
    fn valid_row_becomes_report() {
        let report = Report::try_from(report_row()).unwrap();
        assert_eq!(report.intensity, 6);
        assert_eq!(report.category, SmellCategory::Nature);
        assert_eq!(report.description, "");
        assert!(report.coordinates().is_some());
    }

    #[test]
    fn out_of_range_intensity_is_a_decode_error() {
        let row = ReportRow {
            intensity: Some(42),
            ..report_row()
        };
        let err = Report::try_from(row).unwrap_err();
        assert!(err.0.contains("intensity"));
    }

    #[test]
    fn missing_category_defaults_to_other() {
        let row = ReportRow {
            category: None,
            ..report_row()
        };
        assert_eq!(Report::try_from(row).unwrap().category, SmellCategory::Other);
    }

    #[test]
    fn sqlite_timestamp_format_is_accepted() {
        let row = ReportRow {
            created_at: "2025-04-01 12:00:00".into(),
            ..report_row()
        };
        assert!(Report::try_from(row).is_ok());
    }

    #[test]
    fn offset_less_iso_timestamp_is_read_as_utc() {
        let parsed = parse_datetime("2025-04-01T12:00:00.123456").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-04-01T12:00:00.123456+00:00");
        let row = ReportRow {
            created_at: "2025-04-01T12:00:00".into(),
            ..report_row()
        };
        assert!(Report::try_from(row).is_ok());
        assert!(parse_datetime("yesterday").is_err());
    }

    #[test]
    fn negative_reads_are_rejected() {
        let row = ArticleRow {
            id: 1,
            title: Some("t".into()),
            reads: Some(-1),
            created_at: "2025-04-01T12:00:00Z".into(),
            ..ArticleRow::default()
        };
        assert!(Article::try_from(row).is_err());
    }

    #[test]
    fn blank_optional_strings_become_none() {
        let row = ScentRow {
            id: 3,
            name: Some("Vetiver".into()),
            image: Some("  ".into()),
            created_at: "2025-04-01T12:00:00Z".into(),
            ..ScentRow::default()
        };
        let scent = Scent::try_from(row).unwrap();
        assert!(scent.image.is_none());
    }
}
