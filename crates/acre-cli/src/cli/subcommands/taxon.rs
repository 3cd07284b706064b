use clap::Subcommand;

/// Taxon commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TaxonCommands {
    /// Create a taxon.
    Create {
        #[arg(long)]
        scientific_name: Option<String>,
        #[arg(long)]
        common_name: Option<String>,
        /// Taxon rank id
        #[arg(long)]
        rank: Option<i64>,
        /// Parent taxon id
        #[arg(long)]
        parent: Option<i64>,
    },
    /// Update a taxon. A bare --common-name, --rank or --parent clears it.
    Update {
        id: i64,
        #[arg(long)]
        scientific_name: Option<String>,
        #[arg(long)]
        common_name: Option<Option<String>>,
        #[arg(long)]
        rank: Option<Option<i64>>,
        #[arg(long)]
        parent: Option<Option<i64>>,
    },
    /// List taxa.
    List {
        /// Substring of the scientific or common name
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        rank: Option<i64>,
        #[arg(long)]
        parent: Option<i64>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Get a taxon by id.
    Get { id: i64 },
    /// Delete a taxon. Children lose their parent.
    Delete { id: i64 },
}
