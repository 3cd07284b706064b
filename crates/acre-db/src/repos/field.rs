//! Field repository.

use chrono::Utc;
use serde::Deserialize;

use acre_core::entities::Field;
use acre_core::enums::{AuditAction, CropType, EntityType};
use acre_core::forms::{FieldForm, FieldInput, FormErrors};
use acre_core::responses::Page;

use crate::error::DatabaseError;
use crate::helpers::{
    format_date, get_opt_string, map_write_error, parse_enum, parse_geometry, parse_optional_date,
    read_stamp, to_json_text,
};
use crate::repos::list::{Conditions, ListSql};
use crate::service::{AcreService, detail_of};

const COLUMNS: &str =
    "id, farm_id, name, crop_type, boundary, area, planted_on, last_update, last_update_by";

/// List filters for fields.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FieldFilter {
    /// Substring of the field name.
    pub search: Option<String>,
    pub crop_type: Option<CropType>,
    pub farm: Option<i64>,
}

fn row_to_field(row: &libsql::Row) -> Result<Field, DatabaseError> {
    Ok(Field {
        id: row.get::<i64>(0)?,
        farm_id: row.get::<i64>(1)?,
        name: row.get::<String>(2)?,
        crop_type: parse_enum(&row.get::<String>(3)?)?,
        boundary: parse_geometry(&row.get::<String>(4)?)?,
        area: row.get::<f64>(5)?,
        planted_on: parse_optional_date(get_opt_string(row, 6)?.as_deref())?,
        stamp: read_stamp(row, 7)?,
    })
}

impl AcreService {
    async fn check_field_references(&self, input: &FieldInput) -> Result<(), DatabaseError> {
        let mut errors = FormErrors::new();
        self.check_reference(&mut errors, "farm", EntityType::Farm, Some(input.farm_id))
            .await?;
        Ok(errors.into_result()?)
    }

    pub async fn create_field(
        &self,
        form: &FieldForm,
        acting_user: Option<i64>,
    ) -> Result<Field, DatabaseError> {
        self.write(async move {
            let input = form.clean()?;
            self.check_field_references(&input).await?;
            let now = Utc::now();

            let id = self
                .insert_returning_id(
                    EntityType::Field,
                    "INSERT INTO fields (farm_id, name, crop_type, boundary, area, planted_on, last_update, last_update_by)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) RETURNING id",
                    libsql::params![
                        input.farm_id,
                        input.name.as_str(),
                        input.crop_type.as_str(),
                        to_json_text(&input.boundary)?,
                        input.area,
                        input.planted_on.map(format_date),
                        now.to_rfc3339(),
                        acting_user
                    ],
                )
                .await?;

            self.record_write(
                EntityType::Field,
                id,
                AuditAction::Created,
                acting_user,
                Some(detail_of(&input)?),
                now,
            )
            .await?;
            self.get_field(id).await
        })
        .await
    }

    pub async fn get_field(&self, id: i64) -> Result<Field, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {COLUMNS} FROM fields WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NotFound {
            entity: EntityType::Field,
            id,
        })?;
        row_to_field(&row)
    }

    pub async fn update_field(
        &self,
        id: i64,
        form: FieldForm,
        acting_user: Option<i64>,
    ) -> Result<Field, DatabaseError> {
        self.write(async move {
            let existing = self.get_field(id).await?;
            let input = form.overlay(&existing).clean()?;
            self.check_field_references(&input).await?;
            let now = Utc::now();

            self.db()
                .conn()
                .execute(
                    "UPDATE fields SET farm_id = ?1, name = ?2, crop_type = ?3, boundary = ?4, area = ?5,
                     planted_on = ?6, last_update = ?7, last_update_by = ?8 WHERE id = ?9",
                    libsql::params![
                        input.farm_id,
                        input.name.as_str(),
                        input.crop_type.as_str(),
                        to_json_text(&input.boundary)?,
                        input.area,
                        input.planted_on.map(format_date),
                        now.to_rfc3339(),
                        acting_user,
                        id
                    ],
                )
                .await
                .map_err(|e| map_write_error(e, EntityType::Field))?;

            self.record_write(
                EntityType::Field,
                id,
                AuditAction::Updated,
                acting_user,
                Some(detail_of(&input)?),
                now,
            )
            .await?;
            self.get_field(id).await
        })
        .await
    }

    /// Delete a field with its irrigation points.
    pub async fn delete_field(&self, id: i64, acting_user: Option<i64>) -> Result<(), DatabaseError> {
        self.delete_row(EntityType::Field, id, acting_user).await
    }

    pub async fn list_fields(&self, filter: &FieldFilter, page: u32) -> Result<Page<Field>, DatabaseError> {
        let mut conditions = Conditions::new();
        conditions
            .search(&["name"], filter.search.as_deref())
            .eq("crop_type", filter.crop_type.map(CropType::as_str))
            .eq("farm_id", filter.farm);
        self.paginate(
            &ListSql {
                columns: COLUMNS,
                table: "fields",
                order_by: "id",
            },
            &conditions,
            page,
            row_to_field,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{create_farm, create_field, field_form, test_service};
    use acre_core::forms::INVALID_REFERENCE;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_field_roundtrips_geometry_and_dates() {
        let svc = test_service().await;
        let farm = create_farm(&svc, "Oak Ridge").await;
        let form = FieldForm {
            planted_on: Some(NaiveDate::from_ymd_opt(2024, 9, 1)),
            ..field_form(farm.id, "North", "wheat")
        };
        let field = svc.create_field(&form, None).await.unwrap();
        assert_eq!(field.crop_type, CropType::Wheat);
        assert_eq!(field.boundary, form.boundary.clone().unwrap());
        assert_eq!(field.planted_on, NaiveDate::from_ymd_opt(2024, 9, 1));
    }

    #[tokio::test]
    async fn unknown_farm_is_a_field_error() {
        let svc = test_service().await;
        let err = svc
            .create_field(&field_form(77, "North", "rice"), None)
            .await
            .unwrap_err();
        let DatabaseError::Form(errors) = err else {
            panic!("expected form error, got {err:?}");
        };
        assert_eq!(errors.get("farm"), [INVALID_REFERENCE]);
    }

    #[tokio::test]
    async fn update_can_clear_planted_on() {
        let svc = test_service().await;
        let farm = create_farm(&svc, "Oak Ridge").await;
        let form = FieldForm {
            planted_on: Some(NaiveDate::from_ymd_opt(2024, 9, 1)),
            ..field_form(farm.id, "North", "wheat")
        };
        let field = svc.create_field(&form, None).await.unwrap();
        let patch: FieldForm = serde_json::from_str(r#"{"planted_on": null}"#).unwrap();
        let updated = svc.update_field(field.id, patch, None).await.unwrap();
        assert_eq!(updated.planted_on, None);
        assert_eq!(updated.name, "North");
    }

    #[tokio::test]
    async fn deleting_farm_cascades_to_fields() {
        let svc = test_service().await;
        let farm = create_farm(&svc, "Oak Ridge").await;
        let field = create_field(&svc, farm.id, "North").await;
        svc.delete_farm(farm.id, None).await.unwrap();
        assert!(matches!(
            svc.get_field(field.id).await,
            Err(DatabaseError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn list_fields_filters_by_crop_and_farm() {
        let svc = test_service().await;
        let oak = create_farm(&svc, "Oak Ridge").await;
        let pine = create_farm(&svc, "Pine Hill").await;
        svc.create_field(&field_form(oak.id, "North", "wheat"), None)
            .await
            .unwrap();
        svc.create_field(&field_form(oak.id, "South", "corn"), None)
            .await
            .unwrap();
        svc.create_field(&field_form(pine.id, "East", "wheat"), None)
            .await
            .unwrap();

        let wheat = svc
            .list_fields(
                &FieldFilter {
                    crop_type: Some(CropType::Wheat),
                    ..Default::default()
                },
                1,
            )
            .await
            .unwrap();
        assert_eq!(wheat.total, 2);

        let oak_wheat = svc
            .list_fields(
                &FieldFilter {
                    crop_type: Some(CropType::Wheat),
                    farm: Some(oak.id),
                    ..Default::default()
                },
                1,
            )
            .await
            .unwrap();
        assert_eq!(oak_wheat.items.len(), 1);
        assert_eq!(oak_wheat.items[0].name, "North");
    }
}
