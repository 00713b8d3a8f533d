use serde::Serialize;

use scape_core::RecordId;
use scape_pages::LoadState;

/// Compute effective limit with precedence: local arg -> global flag -> fallback.
#[must_use]
pub fn effective_limit(local: Option<u32>, global: Option<u32>, fallback: u32) -> u32 {
    local.or(global).unwrap_or(fallback)
}

/// Keep at most `limit` items.
pub fn apply_limit<T>(items: &mut Vec<T>, limit: u32) {
    items.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
}

/// Response body for delete commands.
pub fn deleted(id: RecordId) -> serde_json::Value {
    serde_json::json!({ "deleted": id })
}

/// Load state as printed by page-level commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageStatus {
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
}

impl From<&LoadState> for PageStatus {
    fn from(state: &LoadState) -> Self {
        let label = match state {
            LoadState::Loading => "loading",
            LoadState::Loaded => "loaded",
            LoadState::Degraded { .. } => "degraded",
        };
        Self {
            state: label,
            banner: state.banner().map(str::to_string),
        }
    }
}
