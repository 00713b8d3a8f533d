use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::RecordId;

/// A blog article.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Article {
    pub id: RecordId,
    pub title: String,
    pub category: String,
    pub content: String,
    pub excerpt: String,
    pub author_name: String,
    pub author_email: Option<String>,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
    pub reads: u32,
    pub likes: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleDraft {
    pub title: String,
    pub category: String,
    pub content: String,
    pub excerpt: String,
    pub author_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticlePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reads: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<u32>,
}

impl ArticlePatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.category.is_none()
            && self.content.is_none()
            && self.excerpt.is_none()
            && self.image.is_none()
            && self.thumbnail.is_none()
            && self.reads.is_none()
            && self.likes.is_none()
    }
}
