use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

use scape_config::ScapeConfig;
use scape_core::filter::categories_of;
use scape_gateway::Gateway;
use scape_map::{MarkerSync, OverlayLayer, View};
use scape_pages::{ArticlesPage, HomePage, LibraryPage, Listing, MapPage, Route, Shell};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PageArgs;
use crate::commands::shared::PageStatus;
use crate::output::output;

#[derive(Debug, Serialize)]
struct PageResponse<T: Serialize> {
    route: String,
    title: &'static str,
    #[serde(flatten)]
    status: Option<PageStatus>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    categories: Vec<String>,
    items: Vec<T>,
}

/// Handle `scape page <path>`: route through the shell, then load and print
/// the page that ends up on screen.
pub async fn handle<G: Gateway + 'static>(
    args: &PageArgs,
    gateway: Arc<G>,
    config: &ScapeConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let route = settle(&args.path, config);
    let title = route.title();
    let path = route.path().to_string();

    match route {
        Route::Home => {
            let mut page = HomePage::new(gateway);
            page.load().await;
            let response = PageResponse {
                route: path,
                title,
                status: Some(PageStatus::from(page.state())),
                categories: Vec::new(),
                items: page.featured().to_vec(),
            };
            output(&response, flags.format)
        }
        Route::Map => {
            let surface = OverlayLayer::new(View::initial(&config.map));
            let mut page = MapPage::new(gateway, MarkerSync::from_config(surface, &config.map));
            page.load().await;
            let response = PageResponse {
                route: path,
                title,
                status: Some(PageStatus::from(page.state())),
                categories: categories_of(page.reports()),
                items: page.reports().to_vec(),
            };
            let result = output(&response, flags.format);
            page.teardown();
            result
        }
        Route::Articles => {
            let mut page = ArticlesPage::new(gateway, &config.ui);
            page.load().await;
            narrow(page.listing_mut(), args);
            let response = PageResponse {
                route: path,
                title,
                status: Some(PageStatus::from(page.state())),
                categories: page.categories(),
                items: page.visible(),
            };
            output(&response, flags.format)
        }
        Route::Library => {
            let mut page = LibraryPage::new(gateway, &config.ui);
            page.load().await;
            narrow(page.listing_mut(), args);
            let response = PageResponse {
                route: path,
                title,
                status: Some(PageStatus::from(page.state())),
                categories: page.categories(),
                items: page.visible(),
            };
            output(&response, flags.format)
        }
        Route::NotFound(_) => {
            let response: PageResponse<()> = PageResponse {
                route: path,
                title,
                status: None,
                categories: Vec::new(),
                items: Vec::new(),
            };
            output(&response, flags.format)
        }
    }
}

/// Navigate from the landing page and run the fade to completion.
fn settle(path: &str, config: &ScapeConfig) -> Route {
    let mut shell = Shell::from_config(&config.ui);
    let now = Instant::now();
    shell.navigate(path, now);
    let fade = Duration::from_millis(config.ui.fade_ms);
    shell.tick(now.checked_add(fade.saturating_mul(2)).unwrap_or(now));
    shell.current().clone()
}

/// Apply `--category` and `--search` without waiting out the debounce.
fn narrow(listing: &mut Listing, args: &PageArgs) {
    listing.set_category(args.category.clone());
    if let Some(term) = &args.search {
        listing.type_query(term.clone(), Instant::now());
        listing.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn settle_lands_on_requested_route() {
        let config = ScapeConfig::default();
        assert_eq!(settle("/2", &config), Route::Articles);
        assert_eq!(settle("/", &config), Route::Home);
        assert_eq!(
            settle("/nowhere", &config),
            Route::NotFound("/nowhere".into())
        );
    }

    #[test]
    fn settle_tolerates_unvalidated_fade() {
        let mut config = ScapeConfig::default();
        config.ui.fade_ms = u64::MAX;
        assert_eq!(settle("/3/", &config), Route::Home);
    }

    #[test]
    fn narrow_applies_search_immediately() {
        let args = PageArgs {
            path: "/2/".into(),
            search: Some("rain".into()),
            category: Some("science".into()),
        };
        let mut listing = Listing::default();
        narrow(&mut listing, &args);
        assert_eq!(listing.filter().query, "rain");
        assert_eq!(listing.filter().category.as_deref(), Some("science"));
    }
}
