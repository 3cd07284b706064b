use clap::Subcommand;

/// Commands for name-only lookups: provinces, property types, taxon ranks.
#[derive(Clone, Debug, Subcommand)]
pub enum NamedCommands {
    Create {
        #[arg(long)]
        name: Option<String>,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
    },
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    Get {
        id: i64,
    },
    Delete {
        id: i64,
    },
}
