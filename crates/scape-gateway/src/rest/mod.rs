//! PostgREST-style hosted backend.
//!
//! Every request carries the anon key as both the `apikey` header and a
//! bearer token. Writes ask for `Prefer: return=representation` so the
//! created or updated row comes back in the response body.

mod articles;
mod feed;
pub mod http;
mod library;
pub mod query;
mod reports;

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use scape_config::{BackendConfig, ConfigError, RealtimeConfig};
use scape_core::RecordId;

use crate::Collection;
use crate::error::{DataAccessError, DecodeError};
use self::feed::{PollTarget, PollingFeed};
use self::http::check_response;
use self::query::TableQuery;

const RETURN_REPRESENTATION: &str = "return=representation";

/// Gateway over the hosted REST API.
pub struct RestGateway {
    http: reqwest::Client,
    rest_root: String,
    key: String,
    poll_interval: Duration,
    report_feed: PollingFeed,
}

impl RestGateway {
    /// Build a gateway from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when the backend URL or key is
    /// missing, or [`ConfigError::InvalidValue`] if the HTTP client cannot be built.
    pub fn new(backend: &BackendConfig, realtime: &RealtimeConfig) -> Result<Self, ConfigError> {
        if !backend.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "backend".into(),
            });
        }
        let http = reqwest::Client::builder()
            .user_agent("smellscape/0.1")
            .timeout(Duration::from_secs(backend.timeout_secs))
            .build()
            .map_err(|error| ConfigError::InvalidValue {
                field: "backend".into(),
                reason: error.to_string(),
            })?;
        Ok(Self {
            http,
            rest_root: backend.rest_url(),
            key: backend.anon_key.clone(),
            poll_interval: Duration::from_millis(realtime.poll_interval_ms),
            report_feed: PollingFeed::new(),
        })
    }

    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }

    fn poll_target(&self, collection: Collection) -> PollTarget {
        PollTarget {
            http: self.http.clone(),
            rest_root: self.rest_root.clone(),
            key: self.key.clone(),
            collection,
            interval: self.poll_interval,
        }
    }

    /// GET rows and decode them into entities.
    async fn select<Row, E>(
        &self,
        collection: Collection,
        query: TableQuery,
    ) -> Result<Vec<E>, DataAccessError>
    where
        Row: DeserializeOwned,
        E: TryFrom<Row, Error = DecodeError>,
    {
        let url = query.url(&self.rest_root);
        tracing::debug!(%collection, %url, "select");
        let resp = check_response(self.request(Method::GET, &url).send().await?).await?;
        let body = resp.text().await?;
        decode_rows::<Row, E>(collection, &body)
    }

    async fn select_one<Row, E>(
        &self,
        collection: Collection,
        id: RecordId,
    ) -> Result<E, DataAccessError>
    where
        Row: DeserializeOwned,
        E: TryFrom<Row, Error = DecodeError>,
    {
        self.select::<Row, E>(collection, TableQuery::new(collection).id(id))
            .await?
            .into_iter()
            .next()
            .ok_or(DataAccessError::NotFound { collection, id })
    }

    async fn insert<B, Row, E>(&self, collection: Collection, body: &B) -> Result<E, DataAccessError>
    where
        B: Serialize + Sync,
        Row: DeserializeOwned,
        E: TryFrom<Row, Error = DecodeError>,
    {
        let url = format!("{}/{}", self.rest_root, collection.table());
        let resp = self
            .request(Method::POST, &url)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(body)
            .send()
            .await?;
        let body = check_response(resp).await?.text().await?;
        decode_rows::<Row, E>(collection, &body)?
            .into_iter()
            .next()
            .ok_or_else(|| DataAccessError::Decode {
                collection,
                reason: "insert returned no row".into(),
            })
    }

    async fn patch<B, Row, E>(
        &self,
        collection: Collection,
        id: RecordId,
        body: &B,
    ) -> Result<E, DataAccessError>
    where
        B: Serialize + Sync,
        Row: DeserializeOwned,
        E: TryFrom<Row, Error = DecodeError>,
    {
        let url = TableQuery::new(collection).id(id).url(&self.rest_root);
        let stamped = Stamped {
            body,
            updated_at: Utc::now(),
        };
        let resp = self
            .request(Method::PATCH, &url)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&stamped)
            .send()
            .await?;
        let body = check_response(resp).await?.text().await?;
        decode_rows::<Row, E>(collection, &body)?
            .into_iter()
            .next()
            .ok_or(DataAccessError::NotFound { collection, id })
    }

    async fn delete(&self, collection: Collection, id: RecordId) -> Result<(), DataAccessError> {
        let url = TableQuery::new(collection).id(id).url(&self.rest_root);
        let resp = self
            .request(Method::DELETE, &url)
            .header("Prefer", RETURN_REPRESENTATION)
            .send()
            .await?;
        let body = check_response(resp).await?.text().await?;
        let deleted: Vec<serde_json::Value> =
            serde_json::from_str(&body).map_err(|e| DataAccessError::Decode {
                collection,
                reason: e.to_string(),
            })?;
        if deleted.is_empty() {
            return Err(DataAccessError::NotFound { collection, id });
        }
        Ok(())
    }
}

/// Patch body with a fresh `updated_at`.
#[derive(Serialize)]
struct Stamped<'a, B: Serialize> {
    #[serde(flatten)]
    body: &'a B,
    updated_at: DateTime<Utc>,
}

fn decode_rows<Row, E>(collection: Collection, body: &str) -> Result<Vec<E>, DataAccessError>
where
    Row: DeserializeOwned,
    E: TryFrom<Row, Error = DecodeError>,
{
    let rows: Vec<Row> = serde_json::from_str(body).map_err(|e| DataAccessError::Decode {
        collection,
        reason: e.to_string(),
    })?;
    rows.into_iter()
        .map(|row| E::try_from(row).map_err(|e| e.into_access(collection)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::ReportRow;
    use scape_core::entities::Report;

    fn configured() -> BackendConfig {
        BackendConfig {
            url: "https://abcd.supabase.co".into(),
            anon_key: "anon".into(),
            ..BackendConfig::default()
        }
    }

    #[test]
    fn unconfigured_backend_is_rejected() {
        let result = RestGateway::new(&BackendConfig::default(), &RealtimeConfig::default());
        assert!(matches!(result, Err(ConfigError::NotConfigured { .. })));
    }

    #[test]
    fn configured_backend_builds() {
        let gateway = RestGateway::new(&configured(), &RealtimeConfig::default()).unwrap();
        assert_eq!(gateway.rest_root, "https://abcd.supabase.co/rest/v1");
        assert_eq!(gateway.poll_interval, Duration::from_millis(2000));
    }

    #[test]
    fn decode_rows_reports_malformed_json_as_decode_error() {
        let err = decode_rows::<ReportRow, Report>(Collection::Reports, "{not json").unwrap_err();
        assert!(matches!(err, DataAccessError::Decode { collection: Collection::Reports, .. }));
    }

    #[test]
    fn decode_rows_validates_each_row() {
        let body = r#"[
            {"id": 1, "title": "Rain", "category": "nature", "intensity": 3,
             "latitude": 1.0, "longitude": 2.0, "created_at": "2025-01-01T00:00:00Z"},
            {"id": 2, "title": "Bad", "category": "food", "intensity": 0,
             "created_at": "2025-01-01T00:00:00Z"}
        ]"#;
        let err = decode_rows::<ReportRow, Report>(Collection::Reports, body).unwrap_err();
        assert!(matches!(err, DataAccessError::Decode { .. }));
    }

    #[test]
    fn stamped_body_flattens_patch_fields() {
        let patch = scape_core::entities::ScentPatch {
            name: Some("Oud".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(Stamped {
            body: &patch,
            updated_at: Utc::now(),
        })
        .unwrap();
        assert_eq!(value["name"], "Oud");
        assert!(value.get("updated_at").is_some());
        assert!(value.get("category").is_none());
    }
}
