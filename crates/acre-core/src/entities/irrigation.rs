use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{AuditStamp, Field};
use crate::geo::Point;

/// Irrigation infrastructure installed in a field.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct IrrigationPoint {
    pub id: i64,
    pub field_id: i64,
    pub point_id: String,
    pub location: Point,
    /// Water source (well, canal, etc.).
    pub water_source: String,
    pub installed_on: Option<NaiveDate>,
    #[serde(flatten)]
    pub stamp: AuditStamp,
}

impl IrrigationPoint {
    /// Display label, e.g. `"IP-7 (North Block)"`.
    #[must_use]
    pub fn label(&self, field: &Field) -> String {
        format!("{} ({})", self.point_id, field.name)
    }
}
