//! Hosted backend (PostgREST) configuration.

use serde::{Deserialize, Serialize};

/// Default HTTP timeout in seconds.
const fn default_timeout_secs() -> u64 {
    10
}

fn default_local_path() -> String {
    ".smellscape/smellscape.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Project URL (e.g., `https://abcd.supabase.co`). The REST root is `{url}/rest/v1`.
    #[serde(default)]
    pub url: String,

    /// Public anon key sent as both `apikey` and bearer token.
    #[serde(default)]
    pub anon_key: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Embedded database used when no hosted backend is configured.
    #[serde(default = "default_local_path")]
    pub local_path: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            timeout_secs: default_timeout_secs(),
            local_path: default_local_path(),
        }
    }
}

impl BackendConfig {
    /// Check if the hosted backend has the minimum required fields.
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.anon_key.is_empty()
    }

    /// REST root without a trailing slash.
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.url.trim_end_matches('/'))
    }
}
