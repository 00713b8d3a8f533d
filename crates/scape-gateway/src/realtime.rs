//! Realtime change notifier.
//!
//! Turns a gateway's report change feed into whole-collection deliveries:
//! every change triggers a fresh `list_reports()` and the callback receives
//! the complete, newest-first list. Listeners never see row-level diffs.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use scape_core::entities::Report;

use crate::ReportGateway;

/// Handle for a live report subscription. Dropping it also unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Stop delivering. Idempotent through ownership: the handle is consumed.
    pub fn unsubscribe(mut self) {
        self.stop();
    }

    /// Whether the delivery task is still running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Subscribe to report changes.
///
/// The change receiver is registered before this returns, so a write issued
/// right after subscribing is never missed. A failed refetch is logged and
/// skipped; the subscription stays alive for the next change.
///
/// Must be called inside a tokio runtime.
pub fn subscribe_reports<G, F>(gateway: Arc<G>, mut callback: F) -> Subscription
where
    G: ReportGateway + 'static,
    F: FnMut(Vec<Report>) + Send + 'static,
{
    let mut changes = gateway.watch_reports();
    let task = tokio::spawn(async move {
        loop {
            match changes.recv().await {
                Ok(event) => {
                    tracing::debug!(kind = ?event.kind, id = ?event.id, "report change");
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "report feed lagged, refetching");
                }
                Err(RecvError::Closed) => break,
            }
            match gateway.list_reports().await {
                Ok(reports) => callback(reports),
                Err(error) => tracing::warn!(%error, "refetch after report change failed"),
            }
        }
    });
    Subscription { task: Some(task) }
}
