use acre_core::geo::Point;
use clap::Subcommand;

use crate::commands::shared::parse::parse_point;

/// Farm commands.
#[derive(Clone, Debug, Subcommand)]
pub enum FarmCommands {
    /// Create a farm.
    Create {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        owner_name: Option<String>,
        /// Area, must be positive
        #[arg(long)]
        area: Option<f64>,
        /// LON,LAT
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        location: Option<Point>,
    },
    /// Update a farm. Omitted fields keep their stored values.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        owner_name: Option<String>,
        #[arg(long)]
        area: Option<f64>,
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        location: Option<Point>,
    },
    /// List farms.
    List {
        /// Substring of the name or owner name
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Get a farm by id.
    Get { id: i64 },
    /// Delete a farm with its fields and irrigation points.
    Delete { id: i64 },
}
