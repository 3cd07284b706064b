use acre_core::geo::Polygon;
use chrono::NaiveDate;
use clap::Subcommand;

use crate::commands::shared::parse::parse_polygon;

/// Field commands.
#[derive(Clone, Debug, Subcommand)]
pub enum FieldCommands {
    /// Create a field.
    Create {
        #[arg(long)]
        farm: Option<i64>,
        #[arg(long)]
        name: Option<String>,
        /// wheat, corn, rice or barley
        #[arg(long)]
        crop_type: Option<String>,
        /// Exterior ring as "LON,LAT;LON,LAT;..." (closed automatically)
        #[arg(long, value_parser = parse_polygon, allow_hyphen_values = true)]
        boundary: Option<Polygon>,
        #[arg(long)]
        area: Option<f64>,
        /// YYYY-MM-DD
        #[arg(long)]
        planted_on: Option<NaiveDate>,
    },
    /// Update a field. A bare --planted-on clears the date.
    Update {
        id: i64,
        #[arg(long)]
        farm: Option<i64>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        crop_type: Option<String>,
        #[arg(long, value_parser = parse_polygon, allow_hyphen_values = true)]
        boundary: Option<Polygon>,
        #[arg(long)]
        area: Option<f64>,
        #[arg(long)]
        planted_on: Option<Option<NaiveDate>>,
    },
    /// List fields.
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        crop_type: Option<String>,
        #[arg(long)]
        farm: Option<i64>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Get a field by id.
    Get { id: i64 },
    /// Delete a field with its irrigation points.
    Delete { id: i64 },
}
