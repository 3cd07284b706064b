//! Choice enums, entity types, and audit actions for acre.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`,
//! and `as_str()` returns the exact value stored in SQL.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// CropType
// ---------------------------------------------------------------------------

/// Crop grown on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CropType {
    Wheat,
    Corn,
    Rice,
    Barley,
}

impl CropType {
    pub const ALL: [Self; 4] = [Self::Wheat, Self::Corn, Self::Rice, Self::Barley];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wheat => "wheat",
            Self::Corn => "corn",
            Self::Rice => "rice",
            Self::Barley => "barley",
        }
    }

    /// Human-readable label shown next to the stored value.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Wheat => "Wheat",
            Self::Corn => "Corn",
            Self::Rice => "Rice",
            Self::Barley => "Barley",
        }
    }

    /// Resolve a submitted choice value. Only stored values are accepted.
    #[must_use]
    pub fn from_choice(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|crop| crop.as_str() == value)
    }
}

impl fmt::Display for CropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Type of write recorded in the change history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Every record kind stored by acre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    User,
    Farm,
    Field,
    IrrigationPoint,
    Province,
    Organisation,
    PropertyType,
    Property,
    TaxonRank,
    Taxon,
    AnnualPopulation,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Farm => "farm",
            Self::Field => "field",
            Self::IrrigationPoint => "irrigation_point",
            Self::Province => "province",
            Self::Organisation => "organisation",
            Self::PropertyType => "property_type",
            Self::Property => "property",
            Self::TaxonRank => "taxon_rank",
            Self::Taxon => "taxon",
            Self::AnnualPopulation => "annual_population",
        }
    }

    /// Capitalised name used in user-facing messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Farm => "Farm",
            Self::Field => "Field",
            Self::IrrigationPoint => "Irrigation point",
            Self::Province => "Province",
            Self::Organisation => "Organisation",
            Self::PropertyType => "Property type",
            Self::Property => "Property",
            Self::TaxonRank => "Taxon rank",
            Self::Taxon => "Taxon",
            Self::AnnualPopulation => "Annual population",
        }
    }

    /// Message returned after a successful write.
    #[must_use]
    pub fn success_message(self, action: AuditAction) -> String {
        format!("{} {} successfully.", self.label(), action.as_str())
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(crop_barley, CropType, CropType::Barley, "barley");
    test_serde_roundtrip!(action_deleted, AuditAction, AuditAction::Deleted, "deleted");
    test_serde_roundtrip!(
        entity_irrigation_point,
        EntityType,
        EntityType::IrrigationPoint,
        "irrigation_point"
    );
    test_serde_roundtrip!(
        entity_annual_population,
        EntityType,
        EntityType::AnnualPopulation,
        "annual_population"
    );

    #[test]
    fn as_str_matches_serde() {
        for crop in CropType::ALL {
            let json = serde_json::to_string(&crop).unwrap();
            assert_eq!(json, format!("\"{}\"", crop.as_str()));
        }
    }

    #[test]
    fn from_choice_rejects_labels() {
        assert_eq!(CropType::from_choice("corn"), Some(CropType::Corn));
        assert_eq!(CropType::from_choice("Corn"), None);
        assert_eq!(CropType::from_choice("soy"), None);
    }

    #[test]
    fn success_messages_read_naturally() {
        assert_eq!(
            EntityType::Farm.success_message(AuditAction::Created),
            "Farm created successfully."
        );
        assert_eq!(
            EntityType::IrrigationPoint.success_message(AuditAction::Deleted),
            "Irrigation point deleted successfully."
        );
    }
}
