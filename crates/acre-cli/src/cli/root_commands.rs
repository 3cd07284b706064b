use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    FarmCommands, FieldCommands, IrrigationCommands, NamedCommands, OrganisationCommands,
    PopulationCommands, PropertyCommands, TaxonCommands, UserCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Farms.
    Farm {
        #[command(subcommand)]
        action: FarmCommands,
    },
    /// Fields within a farm.
    Field {
        #[command(subcommand)]
        action: FieldCommands,
    },
    /// Irrigation points within a field.
    Irrigation {
        #[command(subcommand)]
        action: IrrigationCommands,
    },
    /// Users who record and edit data.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Provinces.
    Province {
        #[command(subcommand)]
        action: NamedCommands,
    },
    /// Organisations.
    Organisation {
        #[command(subcommand)]
        action: OrganisationCommands,
    },
    /// Property types.
    PropertyType {
        #[command(subcommand)]
        action: NamedCommands,
    },
    /// Properties.
    Property {
        #[command(subcommand)]
        action: PropertyCommands,
    },
    /// Taxon ranks.
    TaxonRank {
        #[command(subcommand)]
        action: NamedCommands,
    },
    /// Taxa.
    Taxon {
        #[command(subcommand)]
        action: TaxonCommands,
    },
    /// Annual population counts.
    Population {
        #[command(subcommand)]
        action: PopulationCommands,
    },
    /// Change history, newest first.
    History(HistoryArgs),
    /// Wildlife aggregate report.
    Report(ReportArgs),
    /// Run the HTTP API.
    Serve(ServeArgs),
}

#[derive(Clone, Debug, Args)]
pub struct HistoryArgs {
    /// Entity type (farm, irrigation_point, annual_population, ...)
    #[arg(long)]
    pub entity_type: Option<String>,
    #[arg(long)]
    pub entity_id: Option<i64>,
    /// created, updated or deleted
    #[arg(long)]
    pub action: Option<String>,
    /// Username of the author
    #[arg(long)]
    pub by: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ReportArgs {
    /// Run a single query by number (1-12)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=12))]
    pub only: Option<u8>,
    /// Property type names for query 1 (repeatable)
    #[arg(long = "property-type")]
    pub property_types: Vec<String>,
    /// Scientific name for the sex totals query
    #[arg(long)]
    pub scientific_name: Option<String>,
    /// Year for the sex totals query
    #[arg(long)]
    pub year: Option<i32>,
    /// Property name for the species count query
    #[arg(long)]
    pub property_name: Option<String>,
    /// Taxon whose parent and children are listed
    #[arg(long)]
    pub family_taxon: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Address to bind (overrides server.bind)
    #[arg(long)]
    pub bind: Option<String>,
}
