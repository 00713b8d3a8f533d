//! Change detection for writes made through other connections.
//!
//! Writes through a [`LocalGateway`] are announced directly. Another process
//! writing the same database file is only visible by looking, so the
//! follower re-reads a cheap fingerprint of the `smells` table on an
//! interval and announces [`ChangeKind::Unknown`] whenever it moves.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use scape_gateway::{ChangeEvent, ChangeKind, Collection};

use crate::LocalGateway;
use crate::error::DatabaseError;

impl LocalGateway {
    /// Start polling for outside writes to the reports table.
    ///
    /// The task runs until the returned handle is aborted. Must be called
    /// inside a tokio runtime.
    pub fn follow_external_writes(&self, interval: Duration) -> JoinHandle<()> {
        tracing::debug!(?interval, "following external report writes");
        tokio::spawn(follow(
            self.conn.clone(),
            self.report_changes.clone(),
            interval,
        ))
    }
}

async fn follow(
    conn: libsql::Connection,
    sender: broadcast::Sender<ChangeEvent>,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last: Option<String> = None;

    loop {
        ticker.tick().await;
        match fingerprint(&conn).await {
            Ok(current) => {
                if last.as_ref().is_some_and(|previous| *previous != current) {
                    let _ = sender.send(ChangeEvent {
                        collection: Collection::Reports,
                        kind: ChangeKind::Unknown,
                        id: None,
                    });
                }
                last = Some(current);
            }
            Err(error) => tracing::warn!(%error, "report fingerprint failed"),
        }
    }
}

/// Row count, id sum and newest `updated_at`: any insert, delete or update moves one.
async fn fingerprint(conn: &libsql::Connection) -> Result<String, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT count(*), coalesce(sum(id), 0), coalesce(max(updated_at), '') FROM smells",
            (),
        )
        .await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| DatabaseError::Query("fingerprint returned no row".into()))?;
    Ok(format!(
        "{}:{}:{}",
        row.get::<i64>(0)?,
        row.get::<i64>(1)?,
        row.get::<String>(2)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scape_core::entities::ReportDraft;
    use scape_core::enums::SmellCategory;
    use scape_gateway::ReportGateway;

    fn draft() -> ReportDraft {
        ReportDraft {
            title: "Diesel".into(),
            description: String::new(),
            category: SmellCategory::Urban,
            intensity: 6,
            latitude: 10.0,
            longitude: 20.0,
            address: None,
            contributor: None,
        }
    }

    #[tokio::test]
    async fn writes_from_another_gateway_are_announced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shared.db");
        let path = path.to_str().unwrap();

        let watcher = LocalGateway::open_local(path).await.unwrap();
        let writer = LocalGateway::open_local(path).await.unwrap();

        let mut changes = watcher.watch_reports();
        let follower = watcher.follow_external_writes(Duration::from_millis(20));
        // Let the first fingerprint land before writing.
        tokio::time::sleep(Duration::from_millis(60)).await;

        writer.add_report(&draft()).await.unwrap();

        let event = tokio::time::timeout(Duration::from_secs(5), changes.recv())
            .await
            .expect("change should be noticed")
            .unwrap();
        assert_eq!(event.kind, ChangeKind::Unknown);
        assert_eq!(event.collection, Collection::Reports);
        follower.abort();
    }
}
