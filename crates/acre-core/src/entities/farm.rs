use std::fmt;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::AuditStamp;
use crate::geo::Point;

/// The main farm record.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Farm {
    pub id: i64,
    pub name: String,
    pub owner_name: String,
    /// Total area of the farm in hectares.
    pub area: f64,
    pub location: Point,
    pub created_on: NaiveDate,
    #[serde(flatten)]
    pub stamp: AuditStamp,
}

impl fmt::Display for Farm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.owner_name)
    }
}
