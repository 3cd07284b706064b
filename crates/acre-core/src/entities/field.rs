use std::fmt;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::AuditStamp;
use crate::enums::CropType;
use crate::geo::Polygon;

/// A crop field within a farm. Deleted together with its farm.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Field {
    pub id: i64,
    pub farm_id: i64,
    pub name: String,
    pub crop_type: CropType,
    pub boundary: Polygon,
    /// Area of this field in hectares.
    pub area: f64,
    pub planted_on: Option<NaiveDate>,
    #[serde(flatten)]
    pub stamp: AuditStamp,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.crop_type)
    }
}
