//! Search input debouncing.

use std::time::{Duration, Instant};

/// Holds back query changes until the input has been quiet for `delay`.
///
/// Every keystroke goes through [`Debouncer::input`]; the host calls
/// [`Debouncer::poll`] from its event loop. The applied query only changes
/// once `delay` has passed since the last keystroke.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
    applied: String,
}

impl Debouncer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            applied: String::new(),
        }
    }

    /// Record a keystroke, restarting the quiet period.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some((text.into(), now));
    }

    /// Apply the pending text if the quiet period is over. Returns `true`
    /// when the applied query changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|(_, at)| now.saturating_duration_since(*at) >= self.delay);
        if due {
            self.flush()
        } else {
            false
        }
    }

    /// Apply the pending text immediately (e.g. on Enter).
    pub fn flush(&mut self) -> bool {
        match self.pending.take() {
            Some((text, _)) if text != self.applied => {
                self.applied = text;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn applied(&self) -> &str {
        &self.applied
    }

    /// When the pending text becomes due, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending
            .as_ref()
            .and_then(|(_, at)| at.checked_add(self.delay))
    }
}
