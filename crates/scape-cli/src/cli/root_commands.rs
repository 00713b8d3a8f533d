use clap::{Args, Subcommand};

use scape_core::RecordId;

use crate::cli::subcommands::{ArticleCommands, LibraryCommands, ReportCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Navigate to a page and print what it shows.
    Page(PageArgs),
    /// Smell map: reports, overlays and category breakdown.
    Map(MapArgs),
    /// Follow live report changes until interrupted.
    Watch(WatchArgs),
    /// Smell reports.
    Report {
        #[command(subcommand)]
        action: ReportCommands,
    },
    /// Articles.
    Article {
        #[command(subcommand)]
        action: ArticleCommands,
    },
    /// Scent library.
    Library {
        #[command(subcommand)]
        action: LibraryCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct PageArgs {
    /// Route path: `/`, `/home`, `/1/`, `/2/` or `/3/`
    #[arg(default_value = "/")]
    pub path: String,
    /// Free-text filter (articles and library pages)
    #[arg(long)]
    pub search: Option<String>,
    /// Category filter (articles and library pages)
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct MapArgs {
    /// Select a report, as if its circle was clicked
    #[arg(long)]
    pub select: Option<RecordId>,
    /// Print only the overlay layer as GeoJSON
    #[arg(long)]
    pub geojson: bool,
}

#[derive(Clone, Debug, Args)]
pub struct WatchArgs {
    /// Stop after this many deliveries
    #[arg(long)]
    pub max_deliveries: Option<usize>,
}
