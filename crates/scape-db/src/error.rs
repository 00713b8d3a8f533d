//! Database error types for scape-db.

use thiserror::Error;

use scape_gateway::DataAccessError;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}

impl From<DatabaseError> for DataAccessError {
    fn from(error: DatabaseError) -> Self {
        Self::backend(error)
    }
}
