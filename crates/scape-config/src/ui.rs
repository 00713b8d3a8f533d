//! Page behavior settings.

use serde::{Deserialize, Serialize};

/// Upper bound for `search_debounce_ms` and `fade_ms`.
pub const MAX_UI_DELAY_MS: u64 = 10_000;

const fn default_search_debounce_ms() -> u64 {
    300
}

const fn default_fade_ms() -> u64 {
    250
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    /// Quiet period after the last keystroke before a search recomputes.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Duration of each half (out, in) of the page fade transition.
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            search_debounce_ms: default_search_debounce_ms(),
            fade_ms: default_fade_ms(),
        }
    }
}
