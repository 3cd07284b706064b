use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::AuditStamp;

/// Taxonomic rank, e.g. Genus or Species.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaxonRank {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub stamp: AuditStamp,
}

/// A node in the taxonomy. `parent_id` points at the enclosing taxon.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Taxon {
    pub id: i64,
    pub scientific_name: String,
    pub common_name: Option<String>,
    pub taxon_rank_id: Option<i64>,
    pub parent_id: Option<i64>,
    #[serde(flatten)]
    pub stamp: AuditStamp,
}

impl fmt::Display for Taxon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.scientific_name)
    }
}
