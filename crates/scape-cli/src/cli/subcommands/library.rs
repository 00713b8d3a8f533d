use clap::Subcommand;

use scape_core::RecordId;

/// Scent library commands.
#[derive(Clone, Debug, Subcommand)]
pub enum LibraryCommands {
    /// Add a scent.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        image: Option<String>,
    },
    /// Edit a scent. Unset flags keep their stored value.
    Update {
        id: RecordId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image: Option<String>,
    },
    /// List scents by name.
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get a scent by ID.
    Get { id: RecordId },
    /// Delete a scent.
    Delete { id: RecordId },
}
