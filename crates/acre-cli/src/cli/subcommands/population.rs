use clap::Subcommand;

/// Annual population commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PopulationCommands {
    /// Record an annual population count.
    Create {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        total: Option<i64>,
        #[arg(long)]
        adult_male: Option<i64>,
        #[arg(long)]
        adult_female: Option<i64>,
        #[arg(long)]
        area_available_to_species: Option<f64>,
        /// Id of the user who made the count
        #[arg(long)]
        recorded_by: Option<i64>,
        #[arg(long)]
        taxon: Option<i64>,
        #[arg(long)]
        property: Option<i64>,
    },
    /// Update a count. A bare --recorded-by clears the counting user.
    Update {
        id: i64,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        total: Option<i64>,
        #[arg(long)]
        adult_male: Option<i64>,
        #[arg(long)]
        adult_female: Option<i64>,
        #[arg(long)]
        area_available_to_species: Option<f64>,
        #[arg(long)]
        recorded_by: Option<Option<i64>>,
        #[arg(long)]
        taxon: Option<i64>,
        #[arg(long)]
        property: Option<i64>,
    },
    /// List counts.
    List {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        taxon: Option<i64>,
        #[arg(long)]
        property: Option<i64>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Get a count by id.
    Get { id: i64 },
    /// Delete a count.
    Delete { id: i64 },
}
