//! # scape-db
//!
//! Embedded libSQL backend for Smellscape.
//!
//! [`LocalGateway`] serves the same three tables as the hosted backend
//! (`smells`, `articles`, `smell_library`) from a local database file, or
//! from `:memory:` in tests. It implements every gateway trait from
//! `scape-gateway`, and report writes are announced on a broadcast channel
//! so the realtime notifier works without polling. Writes made by other
//! processes on the same file are picked up by
//! [`LocalGateway::follow_external_writes`].

pub mod error;
mod follow;
mod helpers;
mod migrations;
mod repos;

use libsql::Builder;
use tokio::sync::broadcast;

use scape_core::RecordId;
use scape_gateway::{CHANGE_CHANNEL_CAPACITY, ChangeEvent, ChangeKind, Collection};

use error::DatabaseError;

/// Gateway over an embedded libSQL database.
pub struct LocalGateway {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    report_changes: broadcast::Sender<ChangeEvent>,
}

impl LocalGateway {
    /// Open a local database at the given path.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;
        let (report_changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);

        let gateway = Self {
            db,
            conn,
            report_changes,
        };
        gateway.run_migrations().await?;
        tracing::debug!(path, "local database ready");
        Ok(gateway)
    }

    /// Open a throwaway in-memory database.
    ///
    /// # Errors
    ///
    /// Same as [`Self::open_local`].
    pub async fn in_memory() -> Result<Self, DatabaseError> {
        Self::open_local(":memory:").await
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    fn announce(&self, kind: ChangeKind, id: RecordId) {
        // No listeners is fine.
        let _ = self.report_changes.send(ChangeEvent {
            collection: Collection::Reports,
            kind,
            id: Some(id),
        });
    }
}
