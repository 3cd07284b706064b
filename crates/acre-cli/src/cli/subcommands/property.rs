use acre_core::geo::Point;
use clap::Subcommand;

use crate::commands::shared::parse::parse_point;

/// Property commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PropertyCommands {
    /// Create a property.
    Create {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        short_code: Option<String>,
        #[arg(long)]
        province: Option<i64>,
        #[arg(long)]
        property_type: Option<i64>,
        #[arg(long)]
        organisation: Option<i64>,
        /// LON,LAT
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        centroid: Option<Point>,
    },
    /// Update a property. A bare --centroid clears it.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        short_code: Option<String>,
        #[arg(long)]
        province: Option<i64>,
        #[arg(long)]
        property_type: Option<i64>,
        #[arg(long)]
        organisation: Option<i64>,
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        centroid: Option<Option<Point>>,
    },
    /// List properties.
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        province: Option<i64>,
        #[arg(long)]
        property_type: Option<i64>,
        #[arg(long)]
        organisation: Option<i64>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Get a property by id.
    Get { id: i64 },
    /// Delete a property and its population counts.
    Delete { id: i64 },
}
