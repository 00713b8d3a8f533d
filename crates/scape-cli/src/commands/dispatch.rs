use std::sync::Arc;
use std::time::Duration;

use scape_config::ScapeConfig;
use scape_gateway::Gateway;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::Backend;

/// Dispatch a parsed command against whichever backend was opened.
pub async fn dispatch(
    command: Commands,
    backend: Backend,
    config: &ScapeConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    tracing::debug!(backend = backend.label(), "dispatching");
    match backend {
        Backend::Local(gateway) => {
            // Another process may be writing the same file.
            let follower = matches!(command, Commands::Watch(_)).then(|| {
                gateway.follow_external_writes(Duration::from_millis(
                    config.realtime.poll_interval_ms,
                ))
            });
            let result = run(command, gateway, config, flags).await;
            if let Some(follower) = follower {
                follower.abort();
            }
            result
        }
        Backend::Rest(gateway) => run(command, gateway, config, flags).await,
    }
}

async fn run<G: Gateway + 'static>(
    command: Commands,
    gateway: Arc<G>,
    config: &ScapeConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Page(args) => commands::page::handle(&args, gateway, config, flags).await,
        Commands::Map(args) => commands::map::handle(&args, gateway, config, flags).await,
        Commands::Watch(args) => commands::watch::handle(&args, gateway, config, flags).await,
        Commands::Report { action } => commands::report::handle(&action, &*gateway, flags).await,
        Commands::Article { action } => {
            commands::article::handle(&action, &*gateway, flags).await
        }
        Commands::Library { action } => {
            commands::library::handle(&action, &*gateway, flags).await
        }
    }
}
