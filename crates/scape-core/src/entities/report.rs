use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::RecordId;
use crate::enums::SmellCategory;
use crate::geo::LatLng;

/// A geo-tagged smell submission.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Report {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    #[schemars(with = "String")]
    pub category: SmellCategory,
    /// Perceived strength, 1 through 10.
    pub intensity: u8,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
    pub contributor: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Report {
    /// The report's position, if it carries a valid coordinate pair.
    #[must_use]
    pub fn coordinates(&self) -> Option<LatLng> {
        LatLng::from_parts(self.latitude, self.longitude)
    }
}

/// Validated payload for creating a report. A location is mandatory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportDraft {
    pub title: String,
    pub description: String,
    pub category: SmellCategory,
    pub intensity: u8,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributor: Option<String>,
}

/// Partial update for a report.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReportPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<SmellCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributor: Option<String>,
}

impl ReportPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.intensity.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.address.is_none()
            && self.contributor.is_none()
    }
}

impl From<ReportDraft> for ReportPatch {
    /// An edit form resubmits every field.
    fn from(draft: ReportDraft) -> Self {
        Self {
            title: Some(draft.title),
            description: Some(draft.description),
            category: Some(draft.category),
            intensity: Some(draft.intensity),
            latitude: Some(draft.latitude),
            longitude: Some(draft.longitude),
            address: draft.address,
            contributor: draft.contributor,
        }
    }
}
