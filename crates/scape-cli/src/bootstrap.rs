use anyhow::Context;

use scape_config::ScapeConfig;

/// Load `.env` from the working directory (if present), then the layered config.
pub fn load_config() -> anyhow::Result<ScapeConfig> {
    load_dotenv()?;
    ScapeConfig::load().context("failed to load smellscape configuration")
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }
    Ok(())
}
