use clap::Subcommand;

use scape_core::RecordId;

/// Article commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ArticleCommands {
    /// Publish an article.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        excerpt: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        image: Option<String>,
    },
    /// Edit an article.
    Update {
        id: RecordId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        excerpt: Option<String>,
        #[arg(long)]
        image: Option<String>,
    },
    /// List articles, newest first.
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get an article by ID.
    Get { id: RecordId },
    /// Open an article (counts a read).
    Read { id: RecordId },
    /// Like an article.
    Like { id: RecordId },
    /// Delete an article.
    Delete { id: RecordId },
}
