use std::sync::Arc;

use serde::Serialize;

use scape_config::ScapeConfig;
use scape_gateway::ReportGateway;
use scape_map::{MarkerSync, OverlayLayer, View};
use scape_pages::MapPage;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::WatchArgs;
use crate::commands::shared::PageStatus;
use crate::output::output;

/// One line per collection delivery; delivery 0 is the initial load.
#[derive(Debug, Serialize)]
struct WatchEvent {
    delivery: usize,
    #[serde(flatten)]
    status: PageStatus,
    reports: usize,
    overlays: usize,
}

impl WatchEvent {
    fn from_page<G: ReportGateway + 'static>(
        page: &MapPage<G, OverlayLayer>,
        delivery: usize,
    ) -> Self {
        Self {
            delivery,
            status: PageStatus::from(page.state()),
            reports: page.reports().len(),
            overlays: page.markers().overlay_count(),
        }
    }
}

/// Handle `scape watch`: load the map, then print every live delivery until
/// Ctrl-C, the feed closing, or `--max-deliveries`.
pub async fn handle<G: ReportGateway + 'static>(
    args: &WatchArgs,
    gateway: Arc<G>,
    config: &ScapeConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let surface = OverlayLayer::new(View::initial(&config.map));
    let mut page = MapPage::new(gateway, MarkerSync::from_config(surface, &config.map));
    page.load().await;
    output(&WatchEvent::from_page(&page, 0), flags.format)?;

    page.start_live();
    let mut delivered = 0usize;
    while args.max_deliveries.is_none_or(|max| delivered < max) {
        let delivery = tokio::select! {
            delivery = page.next_delivery() => delivery,
            _ = tokio::signal::ctrl_c() => None,
        };
        if delivery.is_none() {
            break;
        }
        delivered += 1;
        output(&WatchEvent::from_page(&page, delivered), flags.format)?;
    }

    tracing::debug!(delivered, "watch finished");
    page.teardown();
    Ok(())
}
