//! Shared storage for lookup tables whose only field is a unique `name`:
//! provinces, property types, and taxon ranks.

use chrono::Utc;
use serde::Deserialize;

use acre_core::entities::AuditStamp;
use acre_core::enums::{AuditAction, EntityType};
use acre_core::forms::NamedForm;
use acre_core::responses::Page;

use crate::error::DatabaseError;
use crate::helpers::{entity_type_to_table, map_write_error, read_stamp};
use crate::repos::list::{Conditions, ListSql};
use crate::service::{AcreService, detail_of};

const COLUMNS: &str = "id, name, last_update, last_update_by";

/// List filters for name-only lookup tables.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct NameFilter {
    /// Substring of the name.
    pub search: Option<String>,
}

pub(crate) struct NamedRow {
    pub id: i64,
    pub name: String,
    pub stamp: AuditStamp,
}

fn row_to_named(row: &libsql::Row) -> Result<NamedRow, DatabaseError> {
    Ok(NamedRow {
        id: row.get::<i64>(0)?,
        name: row.get::<String>(1)?,
        stamp: read_stamp(row, 2)?,
    })
}

impl AcreService {
    pub(crate) async fn create_named(
        &self,
        entity: EntityType,
        form: &NamedForm,
        acting_user: Option<i64>,
    ) -> Result<NamedRow, DatabaseError> {
        self.write(async move {
            let input = form.clean()?;
            let now = Utc::now();
            let table = entity_type_to_table(entity);

            let id = self
                .insert_returning_id(
                    entity,
                    &format!(
                        "INSERT INTO {table} (name, last_update, last_update_by)
                         VALUES (?1, ?2, ?3) RETURNING id"
                    ),
                    libsql::params![input.name.as_str(), now.to_rfc3339(), acting_user],
                )
                .await?;

            self.record_write(
                entity,
                id,
                AuditAction::Created,
                acting_user,
                Some(detail_of(&input)?),
                now,
            )
            .await?;
            self.get_named(entity, id).await
        })
        .await
    }

    pub(crate) async fn get_named(&self, entity: EntityType, id: i64) -> Result<NamedRow, DatabaseError> {
        let table = entity_type_to_table(entity);
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {COLUMNS} FROM {table} WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or(DatabaseError::NotFound { entity, id })?;
        row_to_named(&row)
    }

    pub(crate) async fn update_named(
        &self,
        entity: EntityType,
        id: i64,
        form: NamedForm,
        acting_user: Option<i64>,
    ) -> Result<NamedRow, DatabaseError> {
        self.write(async move {
            let existing = self.get_named(entity, id).await?;
            let input = form.overlay(&existing.name).clean()?;
            let now = Utc::now();
            let table = entity_type_to_table(entity);

            self.db()
                .conn()
                .execute(
                    &format!("UPDATE {table} SET name = ?1, last_update = ?2, last_update_by = ?3 WHERE id = ?4"),
                    libsql::params![input.name.as_str(), now.to_rfc3339(), acting_user, id],
                )
                .await
                .map_err(|e| map_write_error(e, entity))?;

            self.record_write(
                entity,
                id,
                AuditAction::Updated,
                acting_user,
                Some(detail_of(&input)?),
                now,
            )
            .await?;
            self.get_named(entity, id).await
        })
        .await
    }

    pub(crate) async fn list_named(
        &self,
        entity: EntityType,
        filter: &NameFilter,
        page: u32,
    ) -> Result<Page<NamedRow>, DatabaseError> {
        let mut conditions = Conditions::new();
        conditions.search(&["name"], filter.search.as_deref());
        self.paginate(
            &ListSql {
                columns: COLUMNS,
                table: entity_type_to_table(entity),
                order_by: "name, id",
            },
            &conditions,
            page,
            row_to_named,
        )
        .await
    }
}
