use clap::Subcommand;

/// Organisation commands.
#[derive(Clone, Debug, Subcommand)]
pub enum OrganisationCommands {
    /// Create an organisation.
    Create {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        short_code: Option<String>,
        #[arg(long)]
        province: Option<i64>,
    },
    /// Update an organisation. A bare --province clears it.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        short_code: Option<String>,
        #[arg(long)]
        province: Option<Option<i64>>,
    },
    /// List organisations.
    List {
        /// Substring of the name or short code
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        province: Option<i64>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Get an organisation by id.
    Get { id: i64 },
    /// Delete an organisation.
    Delete { id: i64 },
}
