use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `acre` binary.
#[derive(Debug, Parser)]
#[command(name = "acre", version, about = "acre - farm and wildlife registry")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max history entries to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Username recorded as the author of writes (defaults to general.default_user)
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Database path (overrides database.path)
    #[arg(long, global = true)]
    pub db: Option<String>,
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
            user: self.user.clone(),
            db: self.db.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::subcommands::{FarmCommands, TaxonCommands};
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "acre", "--format", "table", "--user", "ranger", "--db", ":memory:", "farm", "list",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.user.as_deref(), Some("ranger"));
        assert_eq!(cli.db.as_deref(), Some(":memory:"));
        assert!(matches!(
            cli.command,
            Commands::Farm {
                action: FarmCommands::List { .. }
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["acre", "history", "--format", "raw", "--quiet", "--limit", "5"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert_eq!(cli.limit, Some(5));
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["acre", "--format", "xml", "history"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn nullable_flag_without_value_clears() {
        let cli = Cli::try_parse_from(["acre", "taxon", "update", "4", "--parent"])
            .expect("cli should parse");
        let Commands::Taxon {
            action: TaxonCommands::Update { id, parent, .. },
        } = cli.command
        else {
            panic!("expected taxon update");
        };
        assert_eq!(id, 4);
        assert_eq!(parent, Some(None));

        let cli = Cli::try_parse_from(["acre", "taxon", "update", "4", "--parent", "2"])
            .expect("cli should parse");
        let Commands::Taxon {
            action: TaxonCommands::Update { parent, .. },
        } = cli.command
        else {
            panic!("expected taxon update");
        };
        assert_eq!(parent, Some(Some(2)));
    }

    #[test]
    fn report_only_is_bounded() {
        assert!(Cli::try_parse_from(["acre", "report", "--only", "12"]).is_ok());
        assert!(Cli::try_parse_from(["acre", "report", "--only", "13"]).is_err());
    }
}
