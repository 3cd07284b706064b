//! Irrigation point repository.

use chrono::Utc;
use serde::Deserialize;

use acre_core::entities::IrrigationPoint;
use acre_core::enums::{AuditAction, EntityType};
use acre_core::forms::{FormErrors, IrrigationPointForm, IrrigationPointInput};
use acre_core::responses::Page;

use crate::error::DatabaseError;
use crate::helpers::{
    format_date, get_opt_string, map_write_error, parse_geometry, parse_optional_date, read_stamp,
    to_json_text,
};
use crate::repos::list::{Conditions, ListSql};
use crate::service::{AcreService, detail_of};

const COLUMNS: &str =
    "id, field_id, point_id, location, water_source, installed_on, last_update, last_update_by";

/// List filters for irrigation points.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct IrrigationPointFilter {
    /// Substring of the point id.
    pub search: Option<String>,
    pub field: Option<i64>,
}

fn row_to_point(row: &libsql::Row) -> Result<IrrigationPoint, DatabaseError> {
    Ok(IrrigationPoint {
        id: row.get::<i64>(0)?,
        field_id: row.get::<i64>(1)?,
        point_id: row.get::<String>(2)?,
        location: parse_geometry(&row.get::<String>(3)?)?,
        water_source: row.get::<String>(4)?,
        installed_on: parse_optional_date(get_opt_string(row, 5)?.as_deref())?,
        stamp: read_stamp(row, 6)?,
    })
}

impl AcreService {
    async fn check_point_references(&self, input: &IrrigationPointInput) -> Result<(), DatabaseError> {
        let mut errors = FormErrors::new();
        self.check_reference(&mut errors, "field", EntityType::Field, Some(input.field_id))
            .await?;
        Ok(errors.into_result()?)
    }

    pub async fn create_irrigation_point(
        &self,
        form: &IrrigationPointForm,
        acting_user: Option<i64>,
    ) -> Result<IrrigationPoint, DatabaseError> {
        self.write(async move {
            let input = form.clean()?;
            self.check_point_references(&input).await?;
            let now = Utc::now();

            let id = self
                .insert_returning_id(
                    EntityType::IrrigationPoint,
                    "INSERT INTO irrigation_points (field_id, point_id, location, water_source, installed_on, last_update, last_update_by)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING id",
                    libsql::params![
                        input.field_id,
                        input.point_id.as_str(),
                        to_json_text(&input.location)?,
                        input.water_source.as_str(),
                        input.installed_on.map(format_date),
                        now.to_rfc3339(),
                        acting_user
                    ],
                )
                .await?;

            self.record_write(
                EntityType::IrrigationPoint,
                id,
                AuditAction::Created,
                acting_user,
                Some(detail_of(&input)?),
                now,
            )
            .await?;
            self.get_irrigation_point(id).await
        })
        .await
    }

    pub async fn get_irrigation_point(&self, id: i64) -> Result<IrrigationPoint, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {COLUMNS} FROM irrigation_points WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NotFound {
            entity: EntityType::IrrigationPoint,
            id,
        })?;
        row_to_point(&row)
    }

    pub async fn update_irrigation_point(
        &self,
        id: i64,
        form: IrrigationPointForm,
        acting_user: Option<i64>,
    ) -> Result<IrrigationPoint, DatabaseError> {
        self.write(async move {
            let existing = self.get_irrigation_point(id).await?;
            let input = form.overlay(&existing).clean()?;
            self.check_point_references(&input).await?;
            let now = Utc::now();

            self.db()
                .conn()
                .execute(
                    "UPDATE irrigation_points SET field_id = ?1, point_id = ?2, location = ?3, water_source = ?4,
                     installed_on = ?5, last_update = ?6, last_update_by = ?7 WHERE id = ?8",
                    libsql::params![
                        input.field_id,
                        input.point_id.as_str(),
                        to_json_text(&input.location)?,
                        input.water_source.as_str(),
                        input.installed_on.map(format_date),
                        now.to_rfc3339(),
                        acting_user,
                        id
                    ],
                )
                .await
                .map_err(|e| map_write_error(e, EntityType::IrrigationPoint))?;

            self.record_write(
                EntityType::IrrigationPoint,
                id,
                AuditAction::Updated,
                acting_user,
                Some(detail_of(&input)?),
                now,
            )
            .await?;
            self.get_irrigation_point(id).await
        })
        .await
    }

    pub async fn delete_irrigation_point(
        &self,
        id: i64,
        acting_user: Option<i64>,
    ) -> Result<(), DatabaseError> {
        self.delete_row(EntityType::IrrigationPoint, id, acting_user)
            .await
    }

    pub async fn list_irrigation_points(
        &self,
        filter: &IrrigationPointFilter,
        page: u32,
    ) -> Result<Page<IrrigationPoint>, DatabaseError> {
        let mut conditions = Conditions::new();
        conditions
            .search(&["point_id"], filter.search.as_deref())
            .eq("field_id", filter.field);
        self.paginate(
            &ListSql {
                columns: COLUMNS,
                table: "irrigation_points",
                order_by: "id",
            },
            &conditions,
            page,
            row_to_point,
        )
        .await
    }
}
