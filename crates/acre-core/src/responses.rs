//! Response types returned as JSON by the HTTP API and the `acre` CLI.
//!
//! List operations return a [`Page`], writes return a [`WriteResponse`], and
//! the wildlife report returns a [`WildlifeReport`] (or a single
//! [`ReportSection`] when one query is requested).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default number of records per list page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// One page of a list operation. Pages are numbered from 1.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub num_pages: u32,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, page: u32, page_size: u32, total: u64) -> Self {
        let num_pages = num_pages(total, page_size);
        Self {
            items,
            page,
            page_size,
            total,
            num_pages,
            has_next: page < num_pages,
            has_previous: page > 1,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total: self.total,
            num_pages: self.num_pages,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

/// Number of pages needed for `total` rows. An empty list still has one page.
#[must_use]
pub fn num_pages(total: u64, page_size: u32) -> u32 {
    if total == 0 || page_size == 0 {
        return 1;
    }
    u32::try_from(total.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX)
}

/// Response from a create or update.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WriteResponse<T> {
    pub message: String,
    pub record: T,
}

/// Response from a delete.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DeleteResponse {
    pub message: String,
    pub id: i64,
}

// ---------------------------------------------------------------------------
// Wildlife report
// ---------------------------------------------------------------------------

/// Inputs of the parameterised report queries.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(default)]
pub struct ReportParams {
    /// Property type names for the properties-by-type query.
    pub property_types: Vec<String>,
    /// Scientific name for the sex totals query, matched case-insensitively.
    pub scientific_name: String,
    pub year: i32,
    /// Property name for the distinct species count.
    pub property_name: String,
    /// Scientific name for the parent and children query, matched exactly.
    pub family_taxon: String,
}

impl Default for ReportParams {
    fn default() -> Self {
        Self {
            property_types: vec!["Private".to_string(), "Community".to_string()],
            scientific_name: "Acinonyx jubatus".to_string(),
            year: 2021,
            property_name: "Zakki Property".to_string(),
            family_taxon: "Acinonyx jubatus".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PropertyWithType {
    pub property: String,
    pub property_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProvinceCounts {
    pub province: String,
    pub organisations: i64,
    pub properties: i64,
}

/// Summed adult counts. Both sums are `None` when no record matched.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SexTotals {
    pub males: Option<i64>,
    pub females: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SpeciesCount {
    pub property: String,
    pub species: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct OrganisationArea {
    pub organisation: String,
    pub total_area: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PropertyTotal {
    pub property: String,
    pub total_animals: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProvinceMales {
    pub province: String,
    pub total_males: i64,
}

/// A taxon with its parent and direct children.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TaxonFamily {
    pub scientific_name: String,
    pub parent: Option<String>,
    pub children: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserRecordCount {
    pub username: String,
    pub record_count: i64,
}

/// Every report query, numbered as in the full report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReportQuery {
    PropertiesByType,
    ProvincesWithActivity,
    ProvinceCounts,
    SexTotals,
    SpeciesOnProperty,
    TopOrganisationByArea,
    TopPropertyBySpecies,
    TopPropertyByTotal,
    TopProvinceByMales,
    TaxonFamily,
    LeafTaxa,
    TopUserByRecords,
}

impl ReportQuery {
    pub const ALL: [Self; 12] = [
        Self::PropertiesByType,
        Self::ProvincesWithActivity,
        Self::ProvinceCounts,
        Self::SexTotals,
        Self::SpeciesOnProperty,
        Self::TopOrganisationByArea,
        Self::TopPropertyBySpecies,
        Self::TopPropertyByTotal,
        Self::TopProvinceByMales,
        Self::TaxonFamily,
        Self::LeafTaxa,
        Self::TopUserByRecords,
    ];

    /// 1-based position in the full report.
    #[must_use]
    pub fn number(self) -> u8 {
        Self::ALL
            .iter()
            .position(|query| *query == self)
            .and_then(|index| u8::try_from(index + 1).ok())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn from_number(number: u8) -> Option<Self> {
        let index = usize::from(number).checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::PropertiesByType => "Properties by type",
            Self::ProvincesWithActivity => "Provinces with organisations or properties",
            Self::ProvinceCounts => "Organisation and property count per province",
            Self::SexTotals => "Annual population sex totals",
            Self::SpeciesOnProperty => "Distinct species count for property",
            Self::TopOrganisationByArea => "Organisation with largest total area",
            Self::TopPropertyBySpecies => "Property with most varying species",
            Self::TopPropertyByTotal => "Property with highest total animal count",
            Self::TopProvinceByMales => "Province with highest adult male count",
            Self::TaxonFamily => "Taxon parent and child taxa",
            Self::LeafTaxa => "Taxa without children",
            Self::TopUserByRecords => "Top user by annual population records",
        }
    }
}

/// The result of a single report query.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(tag = "query", content = "result", rename_all = "snake_case")]
pub enum ReportSection {
    PropertiesByType(Vec<PropertyWithType>),
    ProvincesWithActivity(Vec<String>),
    ProvinceCounts(Vec<ProvinceCounts>),
    SexTotals(SexTotals),
    SpeciesOnProperty(SpeciesCount),
    TopOrganisationByArea(Option<OrganisationArea>),
    TopPropertyBySpecies(Option<SpeciesCount>),
    TopPropertyByTotal(Option<PropertyTotal>),
    TopProvinceByMales(Option<ProvinceMales>),
    TaxonFamily(Option<TaxonFamily>),
    LeafTaxa(Vec<String>),
    TopUserByRecords(Option<UserRecordCount>),
}

impl ReportSection {
    #[must_use]
    pub const fn query(&self) -> ReportQuery {
        match self {
            Self::PropertiesByType(_) => ReportQuery::PropertiesByType,
            Self::ProvincesWithActivity(_) => ReportQuery::ProvincesWithActivity,
            Self::ProvinceCounts(_) => ReportQuery::ProvinceCounts,
            Self::SexTotals(_) => ReportQuery::SexTotals,
            Self::SpeciesOnProperty(_) => ReportQuery::SpeciesOnProperty,
            Self::TopOrganisationByArea(_) => ReportQuery::TopOrganisationByArea,
            Self::TopPropertyBySpecies(_) => ReportQuery::TopPropertyBySpecies,
            Self::TopPropertyByTotal(_) => ReportQuery::TopPropertyByTotal,
            Self::TopProvinceByMales(_) => ReportQuery::TopProvinceByMales,
            Self::TaxonFamily(_) => ReportQuery::TaxonFamily,
            Self::LeafTaxa(_) => ReportQuery::LeafTaxa,
            Self::TopUserByRecords(_) => ReportQuery::TopUserByRecords,
        }
    }
}

/// Response from the full wildlife report.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct WildlifeReport {
    pub params: ReportParams,
    pub properties_by_type: Vec<PropertyWithType>,
    pub provinces_with_activity: Vec<String>,
    pub province_counts: Vec<ProvinceCounts>,
    pub sex_totals: SexTotals,
    pub species_on_property: SpeciesCount,
    pub top_organisation_by_area: Option<OrganisationArea>,
    pub top_property_by_species: Option<SpeciesCount>,
    pub top_property_by_total: Option<PropertyTotal>,
    pub top_province_by_males: Option<ProvinceMales>,
    pub taxon_family: Option<TaxonFamily>,
    pub leaf_taxa: Vec<String>,
    pub top_user_by_records: Option<UserRecordCount>,
}

impl WildlifeReport {
    /// The report split into its twelve sections, in query order.
    #[must_use]
    pub fn sections(&self) -> Vec<ReportSection> {
        vec![
            ReportSection::PropertiesByType(self.properties_by_type.clone()),
            ReportSection::ProvincesWithActivity(self.provinces_with_activity.clone()),
            ReportSection::ProvinceCounts(self.province_counts.clone()),
            ReportSection::SexTotals(self.sex_totals.clone()),
            ReportSection::SpeciesOnProperty(self.species_on_property.clone()),
            ReportSection::TopOrganisationByArea(self.top_organisation_by_area.clone()),
            ReportSection::TopPropertyBySpecies(self.top_property_by_species.clone()),
            ReportSection::TopPropertyByTotal(self.top_property_by_total.clone()),
            ReportSection::TopProvinceByMales(self.top_province_by_males.clone()),
            ReportSection::TaxonFamily(self.taxon_family.clone()),
            ReportSection::LeafTaxa(self.leaf_taxa.clone()),
            ReportSection::TopUserByRecords(self.top_user_by_records.clone()),
        ]
    }
}
