//! Farm registry forms.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Cleaner, FormErrors, double_option};
use crate::entities::{Farm, Field, IrrigationPoint};
use crate::enums::CropType;
use crate::geo::{Point, Polygon};

const NAME_MAX: usize = 100;
const POINT_ID_MAX: usize = 50;
const WATER_SOURCE_MAX: usize = 100;

// ---------------------------------------------------------------------------
// Farm
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct FarmForm {
    pub name: Option<String>,
    pub owner_name: Option<String>,
    pub area: Option<f64>,
    pub location: Option<Point>,
}

/// Validated farm fields, ready to be written.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FarmInput {
    pub name: String,
    pub owner_name: String,
    pub area: f64,
    pub location: Point,
}

impl FarmForm {
    #[must_use]
    pub fn overlay(self, farm: &Farm) -> Self {
        Self {
            name: self.name.or_else(|| Some(farm.name.clone())),
            owner_name: self.owner_name.or_else(|| Some(farm.owner_name.clone())),
            area: self.area.or(Some(farm.area)),
            location: self.location.or_else(|| Some(farm.location.clone())),
        }
    }

    /// # Errors
    ///
    /// Returns `FormErrors` listing every invalid field.
    pub fn clean(&self) -> Result<FarmInput, FormErrors> {
        let mut c = Cleaner::new();
        let name = c.text("name", self.name.as_deref(), NAME_MAX);
        let owner_name = c.text("owner_name", self.owner_name.as_deref(), NAME_MAX);
        let area = c.positive("area", self.area, "Area must be greater than 0.");
        let location = c.geometry("location", self.location.as_ref(), Point::validate);
        c.finish()?;

        let (Some(name), Some(owner_name), Some(area), Some(location)) =
            (name, owner_name, area, location)
        else {
            return Err(Cleaner::incomplete());
        };
        Ok(FarmInput {
            name,
            owner_name,
            area,
            location,
        })
    }
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct FieldForm {
    pub farm: Option<i64>,
    pub name: Option<String>,
    pub crop_type: Option<String>,
    pub boundary: Option<Polygon>,
    pub area: Option<f64>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub planted_on: Option<Option<NaiveDate>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldInput {
    pub farm_id: i64,
    pub name: String,
    pub crop_type: CropType,
    pub boundary: Polygon,
    pub area: f64,
    pub planted_on: Option<NaiveDate>,
}

impl FieldForm {
    #[must_use]
    pub fn overlay(self, field: &Field) -> Self {
        Self {
            farm: self.farm.or(Some(field.farm_id)),
            name: self.name.or_else(|| Some(field.name.clone())),
            crop_type: self
                .crop_type
                .or_else(|| Some(field.crop_type.as_str().to_string())),
            boundary: self.boundary.or_else(|| Some(field.boundary.clone())),
            area: self.area.or(Some(field.area)),
            planted_on: self.planted_on.or(Some(field.planted_on)),
        }
    }

    /// # Errors
    ///
    /// Returns `FormErrors` listing every invalid field.
    pub fn clean(&self) -> Result<FieldInput, FormErrors> {
        let mut c = Cleaner::new();
        let farm_id = c.required("farm", self.farm.as_ref());
        let name = c.text("name", self.name.as_deref(), NAME_MAX);
        let crop_type = match self.crop_type.as_deref().map(str::trim) {
            None | Some("") => {
                c.error("crop_type", super::REQUIRED);
                None
            }
            Some(raw) => CropType::from_choice(raw).or_else(|| {
                c.error(
                    "crop_type",
                    format!("Select a valid choice. {raw} is not one of the available choices."),
                );
                None
            }),
        };
        let boundary = c.geometry("boundary", self.boundary.as_ref(), Polygon::validate);
        let area = c.positive("area", self.area, "Field area must be greater than 0.");
        c.finish()?;

        let (Some(farm_id), Some(name), Some(crop_type), Some(boundary), Some(area)) =
            (farm_id, name, crop_type, boundary, area)
        else {
            return Err(Cleaner::incomplete());
        };
        Ok(FieldInput {
            farm_id,
            name,
            crop_type,
            boundary,
            area,
            planted_on: self.planted_on.flatten(),
        })
    }
}

// ---------------------------------------------------------------------------
// IrrigationPoint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct IrrigationPointForm {
    pub field: Option<i64>,
    pub point_id: Option<String>,
    pub location: Option<Point>,
    pub water_source: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub installed_on: Option<Option<NaiveDate>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IrrigationPointInput {
    pub field_id: i64,
    pub point_id: String,
    pub location: Point,
    pub water_source: String,
    pub installed_on: Option<NaiveDate>,
}

impl IrrigationPointForm {
    #[must_use]
    pub fn overlay(self, point: &IrrigationPoint) -> Self {
        Self {
            field: self.field.or(Some(point.field_id)),
            point_id: self.point_id.or_else(|| Some(point.point_id.clone())),
            location: self.location.or_else(|| Some(point.location.clone())),
            water_source: self
                .water_source
                .or_else(|| Some(point.water_source.clone())),
            installed_on: self.installed_on.or(Some(point.installed_on)),
        }
    }

    /// # Errors
    ///
    /// Returns `FormErrors` listing every invalid field.
    pub fn clean(&self) -> Result<IrrigationPointInput, FormErrors> {
        let mut c = Cleaner::new();
        let field_id = c.required("field", self.field.as_ref());
        let point_id = c.text("point_id", self.point_id.as_deref(), POINT_ID_MAX);
        let location = c.geometry("location", self.location.as_ref(), Point::validate);
        let water_source = c.text("water_source", self.water_source.as_deref(), WATER_SOURCE_MAX);
        c.finish()?;

        let (Some(field_id), Some(point_id), Some(location), Some(water_source)) =
            (field_id, point_id, location, water_source)
        else {
            return Err(Cleaner::incomplete());
        };
        Ok(IrrigationPointInput {
            field_id,
            point_id,
            location,
            water_source,
            installed_on: self.installed_on.flatten(),
        })
    }
}
