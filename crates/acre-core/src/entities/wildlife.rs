use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::AuditStamp;
use crate::geo::Point;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Province {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub stamp: AuditStamp,
}

/// An organisation that manages one or more properties.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Organisation {
    pub id: i64,
    pub name: String,
    pub short_code: String,
    pub province_id: Option<i64>,
    #[serde(flatten)]
    pub stamp: AuditStamp,
}

/// Property ownership category, e.g. Private or Community.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PropertyType {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub stamp: AuditStamp,
}

/// A piece of land where populations are counted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Property {
    pub id: i64,
    pub name: String,
    pub short_code: String,
    pub province_id: i64,
    pub property_type_id: i64,
    pub organisation_id: i64,
    pub centroid: Option<Point>,
    #[serde(flatten)]
    pub stamp: AuditStamp,
}

/// One year's count of a taxon on a property.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AnnualPopulation {
    pub id: i64,
    pub year: i32,
    pub total: i64,
    pub adult_male: i64,
    pub adult_female: i64,
    pub area_available_to_species: f64,
    /// The user who recorded the count.
    pub user_id: Option<i64>,
    pub taxon_id: i64,
    pub property_id: i64,
    #[serde(flatten)]
    pub stamp: AuditStamp,
}
