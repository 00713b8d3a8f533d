use clap::Subcommand;

use scape_core::RecordId;

/// Smell report commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ReportCommands {
    /// Submit a report.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "other")]
        category: String,
        #[arg(long, default_value_t = 5)]
        intensity: i64,
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        lng: Option<f64>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        contributor: Option<String>,
    },
    /// Edit a report. Unset flags keep their stored value.
    Update {
        id: RecordId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        intensity: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        lng: Option<f64>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        contributor: Option<String>,
    },
    /// List reports, newest first.
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a report by ID.
    Get { id: RecordId },
    /// Delete a report.
    Delete { id: RecordId },
}
