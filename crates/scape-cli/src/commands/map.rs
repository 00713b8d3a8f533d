use std::sync::Arc;

use anyhow::bail;
use serde::Serialize;

use scape_config::ScapeConfig;
use scape_core::RecordId;
use scape_core::entities::Report;
use scape_core::enums::SmellCategory;
use scape_gateway::ReportGateway;
use scape_map::{MarkerSync, OverlayLayer, View};
use scape_pages::MapPage;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::MapArgs;
use crate::commands::shared::PageStatus;
use crate::output::output;

#[derive(Debug, Serialize)]
struct CategoryCount {
    category: SmellCategory,
    count: usize,
}

#[derive(Debug, Serialize)]
struct MapResponse {
    #[serde(flatten)]
    status: PageStatus,
    selected: Option<RecordId>,
    view: View,
    overlays: usize,
    breakdown: Vec<CategoryCount>,
    reports: Vec<Report>,
}

/// Handle `scape map`.
pub async fn handle<G: ReportGateway + 'static>(
    args: &MapArgs,
    gateway: Arc<G>,
    config: &ScapeConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let surface = OverlayLayer::new(View::initial(&config.map));
    let mut page = MapPage::new(gateway, MarkerSync::from_config(surface, &config.map));
    page.load().await;

    if let Some(id) = args.select {
        select(&mut page, id)?;
    }

    let layer = page.markers().surface();
    if args.geojson {
        return output(&layer.to_geojson(), flags.format);
    }

    let response = MapResponse {
        status: PageStatus::from(page.state()),
        selected: page.selection().selected(),
        view: layer.view(),
        overlays: page.markers().overlay_count(),
        breakdown: page
            .category_breakdown()
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect(),
        reports: page.visible_reports().into_iter().cloned().collect(),
    };
    output(&response, flags.format)
}

/// Click the report's circle when it has one (recentering the view),
/// otherwise select it from the list.
fn select<G: ReportGateway + 'static>(
    page: &mut MapPage<G, OverlayLayer>,
    id: RecordId,
) -> anyhow::Result<()> {
    if let Some(handle) = page.markers().handle_for(id) {
        page.click_overlay(handle);
        return Ok(());
    }
    if !page.reports().iter().any(|report| report.id == id) {
        bail!("report {id} is not on the map");
    }
    page.select(Some(id));
    Ok(())
}
