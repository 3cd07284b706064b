//! Serde roundtrip and JsonSchema validation tests for entity and response types.

use chrono::{NaiveDate, Utc};
use schemars::schema_for;
use acre_core::entities::*;
use acre_core::enums::*;
use acre_core::forms::FormErrors;
use acre_core::geo::{Point, Polygon};
use acre_core::responses::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn stamp(by: Option<i64>) -> AuditStamp {
    AuditStamp {
        last_update: Utc::now(),
        last_update_by: by,
    }
}

roundtrip_and_validate!(
    user_roundtrip,
    User,
    User {
        id: 1,
        username: "user1".into(),
        created_at: Utc::now(),
        stamp: stamp(None),
    }
);

roundtrip_and_validate!(
    farm_roundtrip,
    Farm,
    Farm {
        id: 3,
        name: "Oak Ridge".into(),
        owner_name: "M. Dlamini".into(),
        area: 120.5,
        location: Point::new(29.45, -23.9),
        created_on: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        stamp: stamp(Some(1)),
    }
);

roundtrip_and_validate!(
    field_roundtrip,
    Field,
    Field {
        id: 7,
        farm_id: 3,
        name: "North block".into(),
        crop_type: CropType::Corn,
        boundary: Polygon::from_exterior(vec![
            [29.0, -23.0],
            [29.1, -23.0],
            [29.1, -23.1],
            [29.0, -23.1],
        ]),
        area: 12.0,
        planted_on: NaiveDate::from_ymd_opt(2024, 9, 15),
        stamp: stamp(Some(1)),
    }
);

roundtrip_and_validate!(
    irrigation_point_roundtrip,
    IrrigationPoint,
    IrrigationPoint {
        id: 2,
        field_id: 7,
        point_id: "IP-001".into(),
        location: Point::new(29.05, -23.05),
        water_source: "borehole".into(),
        installed_on: None,
        stamp: stamp(None),
    }
);

roundtrip_and_validate!(
    organisation_roundtrip,
    Organisation,
    Organisation {
        id: 1,
        name: "Zakki Org".into(),
        short_code: "ZORG".into(),
        province_id: Some(1),
        stamp: stamp(Some(1)),
    }
);

roundtrip_and_validate!(
    property_roundtrip,
    Property,
    Property {
        id: 1,
        name: "Zakki Property".into(),
        short_code: "ZP01".into(),
        province_id: 1,
        property_type_id: 1,
        organisation_id: 1,
        centroid: None,
        stamp: stamp(Some(1)),
    }
);

roundtrip_and_validate!(
    taxon_roundtrip,
    Taxon,
    Taxon {
        id: 2,
        scientific_name: "Acinonyx jubatus".into(),
        common_name: Some("Cheetah".into()),
        taxon_rank_id: Some(1),
        parent_id: Some(1),
        stamp: stamp(None),
    }
);

roundtrip_and_validate!(
    annual_population_roundtrip,
    AnnualPopulation,
    AnnualPopulation {
        id: 1,
        year: 2021,
        total: 20,
        adult_male: 8,
        adult_female: 12,
        area_available_to_species: 100.0,
        user_id: Some(1),
        taxon_id: 2,
        property_id: 1,
        stamp: stamp(Some(1)),
    }
);

roundtrip_and_validate!(
    audit_entry_roundtrip,
    AuditEntry,
    AuditEntry {
        id: 9,
        entity_type: EntityType::Farm,
        entity_id: 3,
        action: AuditAction::Updated,
        user_id: Some(1),
        detail: Some(serde_json::json!({"area": 12.0})),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    form_errors_roundtrip,
    FormErrors,
    FormErrors::single("area", "Area must be greater than 0.")
);

roundtrip_and_validate!(
    province_page_roundtrip,
    Page<Province>,
    Page::new(
        vec![Province {
            id: 1,
            name: "Limpopo".into(),
            stamp: stamp(None),
        }],
        1,
        10,
        1,
    )
);

roundtrip_and_validate!(
    delete_response_roundtrip,
    DeleteResponse,
    DeleteResponse {
        message: EntityType::Farm.success_message(AuditAction::Deleted),
        id: 3,
    }
);

roundtrip_and_validate!(
    report_section_roundtrip,
    ReportSection,
    ReportSection::TopProvinceByMales(Some(ProvinceMales {
        province: "Limpopo".into(),
        total_males: 10,
    }))
);

roundtrip_and_validate!(
    wildlife_report_roundtrip,
    WildlifeReport,
    WildlifeReport {
        params: ReportParams::default(),
        properties_by_type: vec![PropertyWithType {
            property: "Zakki Property".into(),
            property_type: "Private".into(),
        }],
        provinces_with_activity: vec!["Limpopo".into()],
        province_counts: vec![ProvinceCounts {
            province: "Limpopo".into(),
            organisations: 1,
            properties: 1,
        }],
        sex_totals: SexTotals {
            males: Some(10),
            females: Some(15),
        },
        species_on_property: SpeciesCount {
            property: "Zakki Property".into(),
            species: 1,
        },
        top_organisation_by_area: Some(OrganisationArea {
            organisation: "Zakki Org".into(),
            total_area: 150.0,
        }),
        top_property_by_species: Some(SpeciesCount {
            property: "Zakki Property".into(),
            species: 1,
        }),
        top_property_by_total: Some(PropertyTotal {
            property: "Zakki Property".into(),
            total_animals: 25,
        }),
        top_province_by_males: None,
        taxon_family: Some(TaxonFamily {
            scientific_name: "Acinonyx jubatus".into(),
            parent: Some("Acinonyx".into()),
            children: vec![],
        }),
        leaf_taxa: vec!["Acinonyx jubatus".into()],
        top_user_by_records: Some(UserRecordCount {
            username: "user1".into(),
            record_count: 1,
        }),
    }
);
