//! Debounced search plus category filter over a page's collection.

use std::time::{Duration, Instant};

use scape_config::UiConfig;
use scape_core::filter::{Searchable, ViewFilter};

use crate::debounce::Debouncer;

#[derive(Debug, Clone)]
pub struct Listing {
    filter: ViewFilter,
    search: Debouncer,
}

impl Listing {
    #[must_use]
    pub fn new(debounce: Duration) -> Self {
        Self {
            filter: ViewFilter::default(),
            search: Debouncer::new(debounce),
        }
    }

    #[must_use]
    pub fn from_config(config: &UiConfig) -> Self {
        Self::new(Duration::from_millis(config.search_debounce_ms))
    }

    /// A keystroke in the search box. The view does not change until the
    /// input has been quiet for the debounce delay.
    pub fn type_query(&mut self, text: impl Into<String>, now: Instant) {
        self.search.input(text, now);
    }

    /// Advance the debounce clock. Returns `true` if the view changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let changed = self.search.poll(now);
        if changed {
            self.filter.query = self.search.applied().to_string();
        }
        changed
    }

    /// Apply any pending query now.
    pub fn flush(&mut self) -> bool {
        let changed = self.search.flush();
        if changed {
            self.filter.query = self.search.applied().to_string();
        }
        changed
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Category filter takes effect immediately. `None` shows everything.
    pub fn set_category(&mut self, category: Option<String>) {
        self.filter.category = category;
    }

    #[must_use]
    pub const fn filter(&self) -> &ViewFilter {
        &self.filter
    }

    #[must_use]
    pub fn apply<T: Searchable + Clone>(&self, items: &[T]) -> Vec<T> {
        self.filter.apply(items)
    }
}

impl Default for Listing {
    fn default() -> Self {
        Self::from_config(&UiConfig::default())
    }
}
