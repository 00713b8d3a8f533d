//! Polling change feed for the hosted backend.
//!
//! The REST API has no push channel here, so a background task polls a cheap
//! fingerprint of the table (`id,updated_at`) and broadcasts a
//! [`ChangeKind::Unknown`] event whenever it differs from the previous poll.
//! The task starts with the first listener and exits once none remain.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::rest::http::check_response;
use crate::rest::query::TableQuery;
use crate::{CHANGE_CHANNEL_CAPACITY, ChangeEvent, ChangeKind, Collection, DataAccessError};

/// Everything the poller needs, cloned out of the gateway.
#[derive(Clone)]
pub(crate) struct PollTarget {
    pub http: reqwest::Client,
    pub rest_root: String,
    pub key: String,
    pub collection: Collection,
    pub interval: Duration,
}

pub(crate) struct PollingFeed {
    sender: broadcast::Sender<ChangeEvent>,
    poller: Mutex<Option<JoinHandle<()>>>,
}

impl PollingFeed {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            sender,
            poller: Mutex::new(None),
        }
    }

    /// Add a listener, starting the poller if it is not running.
    pub fn subscribe(&self, target: &PollTarget) -> broadcast::Receiver<ChangeEvent> {
        let receiver = self.sender.subscribe();
        let mut poller = self.poller.lock().unwrap_or_else(PoisonError::into_inner);
        if poller.as_ref().is_none_or(JoinHandle::is_finished) {
            tracing::debug!(collection = %target.collection, "starting change poller");
            *poller = Some(tokio::spawn(poll(target.clone(), self.sender.clone())));
        }
        receiver
    }
}

impl Drop for PollingFeed {
    fn drop(&mut self) {
        let poller = self.poller.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = poller.take() {
            handle.abort();
        }
    }
}

async fn poll(target: PollTarget, sender: broadcast::Sender<ChangeEvent>) {
    let mut ticker = tokio::time::interval(target.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last: Option<String> = None;

    loop {
        ticker.tick().await;
        if sender.receiver_count() == 0 {
            tracing::debug!(collection = %target.collection, "no change listeners left; poller exiting");
            break;
        }
        match fingerprint(&target).await {
            Ok(current) => {
                if last.as_ref().is_some_and(|previous| *previous != current) {
                    let _ = sender.send(ChangeEvent {
                        collection: target.collection,
                        kind: ChangeKind::Unknown,
                        id: None,
                    });
                }
                last = Some(current);
            }
            Err(error) => {
                tracing::warn!(collection = %target.collection, %error, "change poll failed");
            }
        }
    }
}

async fn fingerprint(target: &PollTarget) -> Result<String, DataAccessError> {
    let url = TableQuery::new(target.collection)
        .select("id,updated_at")
        .order_by("id")
        .url(&target.rest_root);
    let resp = target
        .http
        .get(&url)
        .header("apikey", &target.key)
        .bearer_auth(&target.key)
        .send()
        .await?;
    Ok(check_response(resp).await?.text().await?)
}
