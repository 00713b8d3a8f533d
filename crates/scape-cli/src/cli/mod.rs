use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{ColorMode, GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `scape` binary.
#[derive(Debug, Parser)]
#[command(name = "scape", version, about = "Smellscape - map and share smells")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Table colors: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Use this local database file instead of the configured backend
    #[arg(long, global = true, value_name = "PATH")]
    pub local: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            color: self.color,
            local: self.local.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::subcommands::{ArticleCommands, ReportCommands};
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "scape", "--format", "table", "--limit", "10", "--verbose", "watch",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Watch(_)));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["scape", "map", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Map(_)));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["scape", "--format", "xml", "watch"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn page_takes_a_path() {
        let cli = Cli::try_parse_from(["scape", "page", "/2/", "--search", "rain"])
            .expect("cli should parse");
        let Commands::Page(args) = cli.command else {
            panic!("expected page command");
        };
        assert_eq!(args.path, "/2/");
        assert_eq!(args.search.as_deref(), Some("rain"));
    }

    #[test]
    fn map_select_parses_record_id() {
        let cli = Cli::try_parse_from(["scape", "map", "--select", "42"]).expect("cli should parse");
        let Commands::Map(args) = cli.command else {
            panic!("expected map command");
        };
        assert_eq!(args.select, Some(42));
    }

    #[test]
    fn report_create_requires_title() {
        let parsed = Cli::try_parse_from(["scape", "report", "create", "--lat", "1", "--lng", "2"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn report_create_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "scape", "report", "create", "--title", "Tide", "--lat", "-33.9", "--lng", "-70.6",
        ])
        .expect("cli should parse");
        let Commands::Report {
            action: ReportCommands::Create { lat, lng, intensity, .. },
        } = cli.command
        else {
            panic!("expected report create");
        };
        assert_eq!(lat, Some(-33.9));
        assert_eq!(lng, Some(-70.6));
        assert_eq!(intensity, 5);
    }

    #[test]
    fn article_like_takes_id() {
        let cli = Cli::try_parse_from(["scape", "article", "like", "7"]).expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Article {
                action: ArticleCommands::Like { id: 7 }
            }
        ));
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["scape", "--local", "/tmp/scape.db", "watch"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.local.as_deref(), Some("/tmp/scape.db"));
    }
}
