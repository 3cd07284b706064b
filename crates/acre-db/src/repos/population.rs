//! Annual population repository.

use chrono::Utc;
use serde::Deserialize;

use acre_core::entities::AnnualPopulation;
use acre_core::enums::{AuditAction, EntityType};
use acre_core::forms::{AnnualPopulationForm, AnnualPopulationInput, FormErrors};
use acre_core::responses::Page;

use crate::error::DatabaseError;
use crate::helpers::{map_write_error, read_stamp};
use crate::repos::list::{Conditions, ListSql};
use crate::service::{AcreService, detail_of};

const COLUMNS: &str = "id, year, total, adult_male, adult_female, area_available_to_species, \
                       user_id, taxon_id, property_id, last_update, last_update_by";

/// List filters for annual populations.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PopulationFilter {
    pub year: Option<i32>,
    pub taxon: Option<i64>,
    pub property: Option<i64>,
}

fn row_to_population(row: &libsql::Row) -> Result<AnnualPopulation, DatabaseError> {
    Ok(AnnualPopulation {
        id: row.get::<i64>(0)?,
        year: row.get::<i32>(1)?,
        total: row.get::<i64>(2)?,
        adult_male: row.get::<i64>(3)?,
        adult_female: row.get::<i64>(4)?,
        area_available_to_species: row.get::<f64>(5)?,
        user_id: row.get::<Option<i64>>(6)?,
        taxon_id: row.get::<i64>(7)?,
        property_id: row.get::<i64>(8)?,
        stamp: read_stamp(row, 9)?,
    })
}

impl AcreService {
    async fn check_population_references(
        &self,
        input: &AnnualPopulationInput,
    ) -> Result<(), DatabaseError> {
        let mut errors = FormErrors::new();
        self.check_reference(&mut errors, "user", EntityType::User, input.user_id)
            .await?;
        self.check_reference(&mut errors, "taxon", EntityType::Taxon, Some(input.taxon_id))
            .await?;
        self.check_reference(&mut errors, "property", EntityType::Property, Some(input.property_id))
            .await?;
        Ok(errors.into_result()?)
    }

    pub async fn create_annual_population(
        &self,
        form: &AnnualPopulationForm,
        acting_user: Option<i64>,
    ) -> Result<AnnualPopulation, DatabaseError> {
        self.write(async move {
            let input = form.clean()?;
            self.check_population_references(&input).await?;
            let now = Utc::now();

            let id = self
                .insert_returning_id(
                    EntityType::AnnualPopulation,
                    "INSERT INTO annual_populations (year, total, adult_male, adult_female, area_available_to_species,
                     user_id, taxon_id, property_id, last_update, last_update_by)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10) RETURNING id",
                    libsql::params![
                        input.year,
                        input.total,
                        input.adult_male,
                        input.adult_female,
                        input.area_available_to_species,
                        input.user_id,
                        input.taxon_id,
                        input.property_id,
                        now.to_rfc3339(),
                        acting_user
                    ],
                )
                .await?;

            self.record_write(
                EntityType::AnnualPopulation,
                id,
                AuditAction::Created,
                acting_user,
                Some(detail_of(&input)?),
                now,
            )
            .await?;
            self.get_annual_population(id).await
        })
        .await
    }

    pub async fn get_annual_population(&self, id: i64) -> Result<AnnualPopulation, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {COLUMNS} FROM annual_populations WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NotFound {
            entity: EntityType::AnnualPopulation,
            id,
        })?;
        row_to_population(&row)
    }

    pub async fn update_annual_population(
        &self,
        id: i64,
        form: AnnualPopulationForm,
        acting_user: Option<i64>,
    ) -> Result<AnnualPopulation, DatabaseError> {
        self.write(async move {
            let existing = self.get_annual_population(id).await?;
            let input = form.overlay(&existing).clean()?;
            self.check_population_references(&input).await?;
            let now = Utc::now();

            self.db()
                .conn()
                .execute(
                    "UPDATE annual_populations SET year = ?1, total = ?2, adult_male = ?3, adult_female = ?4,
                     area_available_to_species = ?5, user_id = ?6, taxon_id = ?7, property_id = ?8,
                     last_update = ?9, last_update_by = ?10 WHERE id = ?11",
                    libsql::params![
                        input.year,
                        input.total,
                        input.adult_male,
                        input.adult_female,
                        input.area_available_to_species,
                        input.user_id,
                        input.taxon_id,
                        input.property_id,
                        now.to_rfc3339(),
                        acting_user,
                        id
                    ],
                )
                .await
                .map_err(|e| map_write_error(e, EntityType::AnnualPopulation))?;

            self.record_write(
                EntityType::AnnualPopulation,
                id,
                AuditAction::Updated,
                acting_user,
                Some(detail_of(&input)?),
                now,
            )
            .await?;
            self.get_annual_population(id).await
        })
        .await
    }

    pub async fn delete_annual_population(
        &self,
        id: i64,
        acting_user: Option<i64>,
    ) -> Result<(), DatabaseError> {
        self.delete_row(EntityType::AnnualPopulation, id, acting_user)
            .await
    }

    pub async fn list_annual_populations(
        &self,
        filter: &PopulationFilter,
        page: u32,
    ) -> Result<Page<AnnualPopulation>, DatabaseError> {
        let mut conditions = Conditions::new();
        conditions
            .eq("year", filter.year)
            .eq("taxon_id", filter.taxon)
            .eq("property_id", filter.property);
        self.paginate(
            &ListSql {
                columns: COLUMNS,
                table: "annual_populations",
                order_by: "year, id",
            },
            &conditions,
            page,
            row_to_population,
        )
        .await
    }
}
