use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use scape_config::ScapeConfig;
use scape_db::LocalGateway;
use scape_gateway::rest::RestGateway;

/// The backend every command runs against.
pub enum Backend {
    /// Embedded libSQL database file.
    Local(Arc<LocalGateway>),
    /// Hosted PostgREST backend.
    Rest(Arc<RestGateway>),
}

impl Backend {
    /// `--local` wins, then a configured hosted backend, then the default
    /// local database from `backend.local_path`.
    pub async fn open(config: &ScapeConfig, local_override: Option<&str>) -> anyhow::Result<Self> {
        if let Some(path) = local_override {
            return Self::open_local(path).await;
        }
        if config.backend.is_configured() {
            let gateway = RestGateway::new(&config.backend, &config.realtime)?;
            tracing::debug!(url = %config.backend.rest_url(), "using hosted backend");
            return Ok(Self::Rest(Arc::new(gateway)));
        }
        Self::open_local(&config.backend.local_path).await
    }

    async fn open_local(path: &str) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let gateway = LocalGateway::open_local(path)
            .await
            .with_context(|| format!("failed to open local database at {path}"))?;
        tracing::debug!(path, "using local backend");
        Ok(Self::Local(Arc::new(gateway)))
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Local(_) => "local",
            Self::Rest(_) => "rest",
        }
    }
}

/// Warn when `SMELLSCAPE_BACKEND*` variables exist but the backend still
/// looks unconfigured (usually a single underscore instead of `__`).
pub fn warn_unconfigured(config: &ScapeConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &ScapeConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut warnings = Vec::new();
    let has_backend_vars = env
        .into_iter()
        .any(|(key, _)| key.starts_with("SMELLSCAPE_BACKEND"));
    if !config.backend.is_configured() && has_backend_vars {
        warnings.push(
            "Backend config appears default while SMELLSCAPE_BACKEND* env vars exist. Use double underscores (example: SMELLSCAPE_BACKEND__URL)."
                .to_string(),
        );
    }
    warnings
}
