//! Row reading and statement-building helpers shared by the repos.

use chrono::{SecondsFormat, Utc};
use libsql::Value;

use scape_core::RecordId;
use scape_core::filter::Searchable;
use scape_gateway::{Collection, DataAccessError, DecodeError};

use crate::LocalGateway;
use crate::error::DatabaseError;

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
/// You must use `get::<Option<String>>()` for nullable columns.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Current time as a fixed-width RFC 3339 string, so stored timestamps sort
/// lexically in time order.
pub fn now_stamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Keep the entries matching a free-text term, preserving order.
///
/// Matching runs in Rust because `SQLite`'s `lower()` only folds ASCII.
pub fn retain_matching<E: Searchable>(mut items: Vec<E>, term: &str) -> Vec<E> {
    items.retain(|item| item.matches_term(term));
    items
}

/// `ORDER BY` clause matching the hosted backend's default ordering.
pub fn order_clause(collection: Collection) -> String {
    let (column, descending) = collection.order();
    if descending {
        format!("ORDER BY {column} DESC, id DESC")
    } else {
        format!("ORDER BY {column} ASC, id ASC")
    }
}

/// Decode fetched rows into entities at the gateway boundary.
pub fn decode<Row, E>(collection: Collection, rows: Vec<Row>) -> Result<Vec<E>, DataAccessError>
where
    E: TryFrom<Row, Error = DecodeError>,
{
    rows.into_iter()
        .map(|row| E::try_from(row).map_err(|e| e.into_access(collection)))
        .collect()
}

/// Decode the single row addressed by `id`, or report it missing.
pub fn decode_one<Row, E>(
    collection: Collection,
    id: RecordId,
    rows: Vec<Row>,
) -> Result<E, DataAccessError>
where
    E: TryFrom<Row, Error = DecodeError>,
{
    decode(collection, rows)?
        .into_iter()
        .next()
        .ok_or(DataAccessError::NotFound { collection, id })
}

/// `SET` list for a partial update, with positional parameters.
#[derive(Default)]
pub struct Assignments {
    sets: Vec<String>,
    params: Vec<Value>,
}

impl Assignments {
    pub fn set(&mut self, column: &str, value: impl Into<Value>) {
        self.params.push(value.into());
        self.sets.push(format!("{column} = ?{}", self.params.len()));
    }

    pub fn set_opt<V: Into<Value>>(&mut self, column: &str, value: Option<V>) {
        if let Some(value) = value {
            self.set(column, value);
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Finish as `UPDATE .. SET .. WHERE id = ? RETURNING ..`, stamping `updated_at`.
    pub fn into_update(
        mut self,
        collection: Collection,
        id: RecordId,
        returning: &str,
    ) -> (String, Vec<Value>) {
        self.set("updated_at", now_stamp());
        self.params.push(id.into());
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{} RETURNING {returning}",
            collection.table(),
            self.sets.join(", "),
            self.params.len()
        );
        (sql, self.params)
    }
}

impl LocalGateway {
    /// Run a row-returning statement and read every row.
    pub(crate) async fn fetch<Row>(
        &self,
        sql: &str,
        params: Vec<Value>,
        read: fn(&libsql::Row) -> Result<Row, DatabaseError>,
    ) -> Result<Vec<Row>, DatabaseError> {
        let mut rows = self
            .conn
            .query(sql, libsql::params_from_iter(params))
            .await?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().await? {
            out.push(read(&row)?);
        }
        Ok(out)
    }

    /// Delete by id, reporting a missing row as `NotFound`.
    pub(crate) async fn delete_by_id(
        &self,
        collection: Collection,
        id: RecordId,
    ) -> Result<(), DataAccessError> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", collection.table());
        let affected = self
            .conn
            .execute(&sql, libsql::params![id])
            .await
            .map_err(DatabaseError::from)?;
        if affected == 0 {
            return Err(DataAccessError::NotFound { collection, id });
        }
        Ok(())
    }
}
