//! Property repository.

use chrono::Utc;
use serde::Deserialize;

use acre_core::entities::Property;
use acre_core::enums::{AuditAction, EntityType};
use acre_core::forms::{FormErrors, PropertyForm, PropertyInput};
use acre_core::geo::Point;
use acre_core::responses::Page;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, map_write_error, parse_geometry, read_stamp, to_json_text};
use crate::repos::list::{Conditions, ListSql};
use crate::service::{AcreService, detail_of};

const COLUMNS: &str = "id, name, short_code, province_id, property_type_id, organisation_id, centroid, last_update, last_update_by";

/// List filters for properties.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PropertyFilter {
    /// Substring of the name or short code.
    pub search: Option<String>,
    pub province: Option<i64>,
    pub property_type: Option<i64>,
    pub organisation: Option<i64>,
}

fn row_to_property(row: &libsql::Row) -> Result<Property, DatabaseError> {
    Ok(Property {
        id: row.get::<i64>(0)?,
        name: row.get::<String>(1)?,
        short_code: row.get::<String>(2)?,
        province_id: row.get::<i64>(3)?,
        property_type_id: row.get::<i64>(4)?,
        organisation_id: row.get::<i64>(5)?,
        centroid: get_opt_string(row, 6)?
            .map(|s| parse_geometry::<Point>(&s))
            .transpose()?,
        stamp: read_stamp(row, 7)?,
    })
}

fn centroid_text(input: &PropertyInput) -> Result<Option<String>, DatabaseError> {
    input.centroid.as_ref().map(to_json_text).transpose()
}

impl AcreService {
    async fn check_property_references(&self, input: &PropertyInput) -> Result<(), DatabaseError> {
        let mut errors = FormErrors::new();
        self.check_reference(&mut errors, "province", EntityType::Province, Some(input.province_id))
            .await?;
        self.check_reference(
            &mut errors,
            "property_type",
            EntityType::PropertyType,
            Some(input.property_type_id),
        )
        .await?;
        self.check_reference(
            &mut errors,
            "organisation",
            EntityType::Organisation,
            Some(input.organisation_id),
        )
        .await?;
        Ok(errors.into_result()?)
    }

    pub async fn create_property(
        &self,
        form: &PropertyForm,
        acting_user: Option<i64>,
    ) -> Result<Property, DatabaseError> {
        self.write(async move {
            let input = form.clean()?;
            self.check_property_references(&input).await?;
            let now = Utc::now();

            let id = self
                .insert_returning_id(
                    EntityType::Property,
                    "INSERT INTO properties (name, short_code, province_id, property_type_id, organisation_id, centroid, last_update, last_update_by)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) RETURNING id",
                    libsql::params![
                        input.name.as_str(),
                        input.short_code.as_str(),
                        input.province_id,
                        input.property_type_id,
                        input.organisation_id,
                        centroid_text(&input)?,
                        now.to_rfc3339(),
                        acting_user
                    ],
                )
                .await?;

            self.record_write(
                EntityType::Property,
                id,
                AuditAction::Created,
                acting_user,
                Some(detail_of(&input)?),
                now,
            )
            .await?;
            self.get_property(id).await
        })
        .await
    }

    pub async fn get_property(&self, id: i64) -> Result<Property, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {COLUMNS} FROM properties WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NotFound {
            entity: EntityType::Property,
            id,
        })?;
        row_to_property(&row)
    }

    pub async fn update_property(
        &self,
        id: i64,
        form: PropertyForm,
        acting_user: Option<i64>,
    ) -> Result<Property, DatabaseError> {
        self.write(async move {
            let existing = self.get_property(id).await?;
            let input = form.overlay(&existing).clean()?;
            self.check_property_references(&input).await?;
            let now = Utc::now();

            self.db()
                .conn()
                .execute(
                    "UPDATE properties SET name = ?1, short_code = ?2, province_id = ?3, property_type_id = ?4,
                     organisation_id = ?5, centroid = ?6, last_update = ?7, last_update_by = ?8 WHERE id = ?9",
                    libsql::params![
                        input.name.as_str(),
                        input.short_code.as_str(),
                        input.province_id,
                        input.property_type_id,
                        input.organisation_id,
                        centroid_text(&input)?,
                        now.to_rfc3339(),
                        acting_user,
                        id
                    ],
                )
                .await
                .map_err(|e| map_write_error(e, EntityType::Property))?;

            self.record_write(
                EntityType::Property,
                id,
                AuditAction::Updated,
                acting_user,
                Some(detail_of(&input)?),
                now,
            )
            .await?;
            self.get_property(id).await
        })
        .await
    }

    /// Delete a property with its annual populations.
    pub async fn delete_property(&self, id: i64, acting_user: Option<i64>) -> Result<(), DatabaseError> {
        self.delete_row(EntityType::Property, id, acting_user).await
    }

    pub async fn list_properties(
        &self,
        filter: &PropertyFilter,
        page: u32,
    ) -> Result<Page<Property>, DatabaseError> {
        let mut conditions = Conditions::new();
        conditions
            .search(&["name", "short_code"], filter.search.as_deref())
            .eq("province_id", filter.province)
            .eq("property_type_id", filter.property_type)
            .eq("organisation_id", filter.organisation);
        self.paginate(
            &ListSql {
                columns: COLUMNS,
                table: "properties",
                order_by: "name, id",
            },
            &conditions,
            page,
            row_to_property,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed_wildlife, test_service};
    use acre_core::forms::INVALID_REFERENCE;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn centroid_is_optional_and_roundtrips() {
        let svc = test_service().await;
        let fixture = seed_wildlife(&svc).await;
        assert_eq!(fixture.property.centroid, None);

        let updated = svc
            .update_property(
                fixture.property.id,
                PropertyForm {
                    centroid: Some(Some(Point::new(30.1, -23.4))),
                    ..PropertyForm::default()
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(updated.centroid, Some(Point::new(30.1, -23.4)));
        assert_eq!(updated.name, "Zakki Property");
    }

    #[tokio::test]
    async fn every_missing_reference_is_reported() {
        let svc = test_service().await;
        let form = PropertyForm {
            name: Some("Ghost".into()),
            short_code: Some("GH".into()),
            province: Some(1),
            property_type: Some(2),
            organisation: Some(3),
            centroid: None,
        };
        let err = svc.create_property(&form, None).await.unwrap_err();
        let DatabaseError::Form(errors) = err else {
            panic!("expected form error, got {err:?}");
        };
        for field in ["province", "property_type", "organisation"] {
            assert_eq!(errors.get(field), [INVALID_REFERENCE], "{field}");
        }
    }

    #[tokio::test]
    async fn deleting_property_removes_populations() {
        let svc = test_service().await;
        let fixture = seed_wildlife(&svc).await;
        svc.delete_property(fixture.property.id, None).await.unwrap();
        for population in &fixture.populations {
            assert!(svc.get_annual_population(population.id).await.is_err());
        }
    }

    #[tokio::test]
    async fn filter_by_type() {
        let svc = test_service().await;
        let fixture = seed_wildlife(&svc).await;
        let community = svc
            .list_properties(
                &PropertyFilter {
                    property_type: Some(fixture.type_community.id),
                    ..Default::default()
                },
                1,
            )
            .await
            .unwrap();
        assert_eq!(community.total, 0);

        let private = svc
            .list_properties(
                &PropertyFilter {
                    property_type: Some(fixture.type_private.id),
                    search: Some("zp01".into()),
                    ..Default::default()
                },
                1,
            )
            .await
            .unwrap();
        assert_eq!(private.total, 1);
    }
}
