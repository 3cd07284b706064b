use acre_core::geo::Point;
use chrono::NaiveDate;
use clap::Subcommand;

use crate::commands::shared::parse::parse_point;

/// Irrigation point commands.
#[derive(Clone, Debug, Subcommand)]
pub enum IrrigationCommands {
    /// Create an irrigation point.
    Create {
        #[arg(long)]
        field: Option<i64>,
        /// Unique point identifier, e.g. IP-7
        #[arg(long)]
        point_id: Option<String>,
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        location: Option<Point>,
        #[arg(long)]
        water_source: Option<String>,
        #[arg(long)]
        installed_on: Option<NaiveDate>,
    },
    /// Update an irrigation point. A bare --installed-on clears the date.
    Update {
        id: i64,
        #[arg(long)]
        field: Option<i64>,
        #[arg(long)]
        point_id: Option<String>,
        #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
        location: Option<Point>,
        #[arg(long)]
        water_source: Option<String>,
        #[arg(long)]
        installed_on: Option<Option<NaiveDate>>,
    },
    /// List irrigation points.
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        field: Option<i64>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Get an irrigation point by id.
    Get { id: i64 },
    /// Delete an irrigation point.
    Delete { id: i64 },
}
