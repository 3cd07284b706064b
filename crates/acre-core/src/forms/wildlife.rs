//! Wildlife registry forms.

use serde::{Deserialize, Serialize};

use super::{Cleaner, FormErrors, double_option};
use crate::entities::{AnnualPopulation, Organisation, Property, Taxon};
use crate::geo::Point;

const NAME_MAX: usize = 200;
const SHORT_CODE_MAX: usize = 50;
const TAXON_NAME_MAX: usize = 255;

// ---------------------------------------------------------------------------
// Name-only lookups: province, property type, taxon rank
// ---------------------------------------------------------------------------

/// Form for records whose only field is a unique `name`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct NamedForm {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NamedInput {
    pub name: String,
}

impl NamedForm {
    #[must_use]
    pub fn overlay(self, name: &str) -> Self {
        Self {
            name: self.name.or_else(|| Some(name.to_string())),
        }
    }

    /// # Errors
    ///
    /// Returns `FormErrors` for a missing or overlong name.
    pub fn clean(&self) -> Result<NamedInput, FormErrors> {
        let mut c = Cleaner::new();
        let name = c.text("name", self.name.as_deref(), NAME_MAX);
        c.finish()?;
        name.map(|name| NamedInput { name })
            .ok_or_else(Cleaner::incomplete)
    }
}

// ---------------------------------------------------------------------------
// Organisation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct OrganisationForm {
    pub name: Option<String>,
    pub short_code: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub province: Option<Option<i64>>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OrganisationInput {
    pub name: String,
    pub short_code: String,
    pub province_id: Option<i64>,
}

impl OrganisationForm {
    #[must_use]
    pub fn overlay(self, organisation: &Organisation) -> Self {
        Self {
            name: self.name.or_else(|| Some(organisation.name.clone())),
            short_code: self
                .short_code
                .or_else(|| Some(organisation.short_code.clone())),
            province: self.province.or(Some(organisation.province_id)),
        }
    }

    /// # Errors
    ///
    /// Returns `FormErrors` listing every invalid field.
    pub fn clean(&self) -> Result<OrganisationInput, FormErrors> {
        let mut c = Cleaner::new();
        let name = c.text("name", self.name.as_deref(), NAME_MAX);
        let short_code = c.text("short_code", self.short_code.as_deref(), SHORT_CODE_MAX);
        c.finish()?;

        let (Some(name), Some(short_code)) = (name, short_code) else {
            return Err(Cleaner::incomplete());
        };
        Ok(OrganisationInput {
            name,
            short_code,
            province_id: self.province.flatten(),
        })
    }
}

// ---------------------------------------------------------------------------
// Property
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct PropertyForm {
    pub name: Option<String>,
    pub short_code: Option<String>,
    pub province: Option<i64>,
    pub property_type: Option<i64>,
    pub organisation: Option<i64>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub centroid: Option<Option<Point>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PropertyInput {
    pub name: String,
    pub short_code: String,
    pub province_id: i64,
    pub property_type_id: i64,
    pub organisation_id: i64,
    pub centroid: Option<Point>,
}

impl PropertyForm {
    #[must_use]
    pub fn overlay(self, property: &Property) -> Self {
        Self {
            name: self.name.or_else(|| Some(property.name.clone())),
            short_code: self
                .short_code
                .or_else(|| Some(property.short_code.clone())),
            province: self.province.or(Some(property.province_id)),
            property_type: self.property_type.or(Some(property.property_type_id)),
            organisation: self.organisation.or(Some(property.organisation_id)),
            centroid: self.centroid.or_else(|| Some(property.centroid.clone())),
        }
    }

    /// # Errors
    ///
    /// Returns `FormErrors` listing every invalid field.
    pub fn clean(&self) -> Result<PropertyInput, FormErrors> {
        let mut c = Cleaner::new();
        let name = c.text("name", self.name.as_deref(), NAME_MAX);
        let short_code = c.text("short_code", self.short_code.as_deref(), SHORT_CODE_MAX);
        let province_id = c.required("province", self.province.as_ref());
        let property_type_id = c.required("property_type", self.property_type.as_ref());
        let organisation_id = c.required("organisation", self.organisation.as_ref());
        let centroid = match self.centroid.clone().flatten() {
            Some(point) => c.geometry("centroid", Some(&point), Point::validate),
            None => None,
        };
        c.finish()?;

        let (Some(name), Some(short_code), Some(province_id), Some(property_type_id), Some(organisation_id)) =
            (name, short_code, province_id, property_type_id, organisation_id)
        else {
            return Err(Cleaner::incomplete());
        };
        Ok(PropertyInput {
            name,
            short_code,
            province_id,
            property_type_id,
            organisation_id,
            centroid,
        })
    }
}

// ---------------------------------------------------------------------------
// Taxon
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct TaxonForm {
    pub scientific_name: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub common_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub taxon_rank: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub parent: Option<Option<i64>>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TaxonInput {
    pub scientific_name: String,
    pub common_name: Option<String>,
    pub taxon_rank_id: Option<i64>,
    pub parent_id: Option<i64>,
}

impl TaxonForm {
    #[must_use]
    pub fn overlay(self, taxon: &Taxon) -> Self {
        Self {
            scientific_name: self
                .scientific_name
                .or_else(|| Some(taxon.scientific_name.clone())),
            common_name: self.common_name.or_else(|| Some(taxon.common_name.clone())),
            taxon_rank: self.taxon_rank.or(Some(taxon.taxon_rank_id)),
            parent: self.parent.or(Some(taxon.parent_id)),
        }
    }

    /// # Errors
    ///
    /// Returns `FormErrors` listing every invalid field.
    pub fn clean(&self) -> Result<TaxonInput, FormErrors> {
        let mut c = Cleaner::new();
        let scientific_name =
            c.text("scientific_name", self.scientific_name.as_deref(), TAXON_NAME_MAX);
        let common_name = c.optional_text(
            "common_name",
            self.common_name.as_ref().and_then(Option::as_deref),
            TAXON_NAME_MAX,
        );
        c.finish()?;

        let (Some(scientific_name), Ok(common_name)) = (scientific_name, common_name) else {
            return Err(Cleaner::incomplete());
        };
        Ok(TaxonInput {
            scientific_name,
            common_name,
            taxon_rank_id: self.taxon_rank.flatten(),
            parent_id: self.parent.flatten(),
        })
    }
}

// ---------------------------------------------------------------------------
// AnnualPopulation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct AnnualPopulationForm {
    pub year: Option<i32>,
    pub total: Option<i64>,
    pub adult_male: Option<i64>,
    pub adult_female: Option<i64>,
    pub area_available_to_species: Option<f64>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub user: Option<Option<i64>>,
    pub taxon: Option<i64>,
    pub property: Option<i64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnnualPopulationInput {
    pub year: i32,
    pub total: i64,
    pub adult_male: i64,
    pub adult_female: i64,
    pub area_available_to_species: f64,
    pub user_id: Option<i64>,
    pub taxon_id: i64,
    pub property_id: i64,
}

impl AnnualPopulationForm {
    #[must_use]
    pub fn overlay(self, population: &AnnualPopulation) -> Self {
        Self {
            year: self.year.or(Some(population.year)),
            total: self.total.or(Some(population.total)),
            adult_male: self.adult_male.or(Some(population.adult_male)),
            adult_female: self.adult_female.or(Some(population.adult_female)),
            area_available_to_species: self
                .area_available_to_species
                .or(Some(population.area_available_to_species)),
            user: self.user.or(Some(population.user_id)),
            taxon: self.taxon.or(Some(population.taxon_id)),
            property: self.property.or(Some(population.property_id)),
        }
    }

    /// # Errors
    ///
    /// Returns `FormErrors` listing every invalid field.
    pub fn clean(&self) -> Result<AnnualPopulationInput, FormErrors> {
        let mut c = Cleaner::new();
        let year = c.required("year", self.year.as_ref());
        let total = c.non_negative("total", self.total);
        let adult_male = c.non_negative("adult_male", self.adult_male);
        let adult_female = c.non_negative("adult_female", self.adult_female);
        let area = match self.area_available_to_species {
            None => {
                c.error("area_available_to_species", super::REQUIRED);
                None
            }
            Some(area) if !area.is_finite() || area < 0.0 => {
                c.error(
                    "area_available_to_species",
                    "Ensure this value is greater than or equal to 0.",
                );
                None
            }
            Some(area) => Some(area),
        };
        let taxon_id = c.required("taxon", self.taxon.as_ref());
        let property_id = c.required("property", self.property.as_ref());
        c.finish()?;

        let (
            Some(year),
            Some(total),
            Some(adult_male),
            Some(adult_female),
            Some(area_available_to_species),
            Some(taxon_id),
            Some(property_id),
        ) = (year, total, adult_male, adult_female, area, taxon_id, property_id)
        else {
            return Err(Cleaner::incomplete());
        };
        Ok(AnnualPopulationInput {
            year,
            total,
            adult_male,
            adult_female,
            area_available_to_species,
            user_id: self.user.flatten(),
            taxon_id,
            property_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::REQUIRED;
    use pretty_assertions::assert_eq;

    fn population_form() -> AnnualPopulationForm {
        AnnualPopulationForm {
            year: Some(2021),
            total: Some(20),
            adult_male: Some(8),
            adult_female: Some(12),
            area_available_to_species: Some(100.0),
            user: Some(Some(1)),
            taxon: Some(2),
            property: Some(3),
        }
    }

    #[test]
    fn population_form_cleans() {
        let input = population_form().clean().unwrap();
        assert_eq!(input.total, 20);
        assert_eq!(input.user_id, Some(1));
    }

    #[test]
    fn negative_counts_are_rejected() {
        let form = AnnualPopulationForm {
            adult_male: Some(-1),
            area_available_to_species: Some(-5.0),
            ..population_form()
        };
        let errors = form.clean().unwrap_err();
        assert_eq!(
            errors.get("adult_male"),
            ["Ensure this value is greater than or equal to 0."]
        );
        assert_eq!(errors.get("area_available_to_species").len(), 1);
    }

    #[test]
    fn taxon_common_name_blank_becomes_none() {
        let form = TaxonForm {
            scientific_name: Some("Acinonyx jubatus".into()),
            common_name: Some(Some("   ".into())),
            ..TaxonForm::default()
        };
        let input = form.clean().unwrap();
        assert_eq!(input.common_name, None);
    }

    #[test]
    fn taxon_overlay_can_clear_parent() {
        let taxon = Taxon {
            id: 2,
            scientific_name: "Acinonyx jubatus".into(),
            common_name: Some("Cheetah".into()),
            taxon_rank_id: Some(1),
            parent_id: Some(1),
            stamp: crate::entities::AuditStamp {
                last_update: chrono::Utc::now(),
                last_update_by: None,
            },
        };
        let patch: TaxonForm = serde_json::from_str(r#"{"parent": null}"#).unwrap();
        let input = patch.overlay(&taxon).clean().unwrap();
        assert_eq!(input.parent_id, None);
        assert_eq!(input.common_name.as_deref(), Some("Cheetah"));
        assert_eq!(input.taxon_rank_id, Some(1));
    }

    #[test]
    fn property_requires_all_relations() {
        let form = PropertyForm {
            name: Some("Zakki Property".into()),
            short_code: Some("ZP01".into()),
            ..PropertyForm::default()
        };
        let errors = form.clean().unwrap_err();
        assert_eq!(errors.get("province"), [REQUIRED]);
        assert_eq!(errors.get("property_type"), [REQUIRED]);
        assert_eq!(errors.get("organisation"), [REQUIRED]);
        assert!(errors.get("centroid").is_empty());
    }

    #[test]
    fn named_form_requires_name() {
        let errors = NamedForm::default().clean().unwrap_err();
        assert_eq!(errors.get("name"), [REQUIRED]);
    }
}
