//! Load state shared by every page.

use scape_gateway::DataAccessError;

/// Where a page's collection came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Loading,
    Loaded,
    /// The backend failed; the page shows fallback or stale data and a banner.
    Degraded { banner: String },
}

impl LoadState {
    #[must_use]
    pub fn banner(&self) -> Option<&str> {
        match self {
            Self::Degraded { banner } => Some(banner),
            Self::Loading | Self::Loaded => None,
        }
    }

    /// Loaded or degraded: either way there is something to render.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        !matches!(self, Self::Loading)
    }
}

/// A page's collection plus its [`LoadState`].
#[derive(Debug, Clone)]
pub struct PageData<T> {
    items: Vec<T>,
    state: LoadState,
}

impl<T> Default for PageData<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            state: LoadState::Loading,
        }
    }
}

impl<T> PageData<T> {
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub const fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn items_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }

    /// Apply the outcome of a full-collection fetch.
    ///
    /// On failure with nothing loaded yet, `fallback` is substituted. On a
    /// failed re-fetch the last loaded collection stays. Either way the page
    /// ends up degraded with a banner.
    pub fn resolve(
        &mut self,
        result: Result<Vec<T>, DataAccessError>,
        what: &str,
        fallback: fn() -> Vec<T>,
    ) {
        match result {
            Ok(items) => {
                self.items = items;
                self.state = LoadState::Loaded;
            }
            Err(error) => {
                tracing::warn!(%error, what, "fetch failed");
                let banner = if self.items.is_empty() {
                    self.items = fallback();
                    format!("Could not reach the server ({error}). Showing sample {what}.")
                } else {
                    format!("Could not reach the server ({error}). Showing the last loaded {what}.")
                };
                self.state = LoadState::Degraded { banner };
            }
        }
    }

    /// Replace the collection with a pushed delivery (last write wins).
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.state = LoadState::Loaded;
    }
}
