//! Service layer orchestrating database writes with audit.
//!
//! `AcreService` wraps `AcreDb` and the list page size. All repo methods are
//! implemented as `impl AcreService` blocks in `repos/`.

use std::future::Future;

use chrono::{DateTime, Utc};
use libsql::params::IntoParams;
use serde::Serialize;
use tokio::sync::Mutex;

use acre_core::enums::{AuditAction, EntityType};
use acre_core::forms::{FormErrors, INVALID_REFERENCE};
use acre_core::responses::DEFAULT_PAGE_SIZE;

use crate::AcreDb;
use crate::error::DatabaseError;
use crate::helpers::{entity_type_to_table, map_delete_error, map_write_error};
use crate::repos::audit::NewAuditEntry;

/// Orchestrates database writes with the change history.
///
/// Every write method follows this protocol:
/// 1. Take the write lock and begin a transaction
/// 2. Overlay (updates) and clean the submitted form
/// 3. Check that every referenced row exists
/// 4. Execute SQL, stamping `last_update` and `last_update_by`
/// 5. Append an audit entry with the written fields
/// 6. Commit, or roll back on any error
pub struct AcreService {
    db: AcreDb,
    page_size: u32,
    write_lock: Mutex<()>,
}

impl AcreService {
    /// Open a local database and wrap it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str, page_size: u32) -> Result<Self, DatabaseError> {
        let db = AcreDb::open_local(db_path).await?;
        Ok(Self::from_db(db).with_page_size(page_size))
    }

    #[must_use]
    pub fn from_db(db: AcreDb) -> Self {
        Self {
            db,
            page_size: DEFAULT_PAGE_SIZE,
            write_lock: Mutex::new(()),
        }
    }

    /// Set the list page size. Zero falls back to the default.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        self
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &AcreDb {
        &self.db
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Run `work` in a transaction, one write at a time.
    ///
    /// Commits if `work` succeeds and rolls back otherwise. A dropped future
    /// rolls back when the transaction handle drops.
    pub(crate) async fn write<T>(
        &self,
        work: impl Future<Output = Result<T, DatabaseError>>,
    ) -> Result<T, DatabaseError> {
        let _guard = self.write_lock.lock().await;
        let tx = self.db.conn().transaction().await?;
        match work.await {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::warn!(error = %rollback, "rollback failed");
                }
                Err(err)
            }
        }
    }

    /// Run an `INSERT … RETURNING id` and read the new id.
    pub(crate) async fn insert_returning_id(
        &self,
        entity: EntityType,
        sql: &str,
        params: impl IntoParams,
    ) -> Result<i64, DatabaseError> {
        let mut rows = self
            .db
            .conn()
            .query(sql, params)
            .await
            .map_err(|e| map_write_error(e, entity))?;
        let row = rows
            .next()
            .await
            .map_err(|e| map_write_error(e, entity))?
            .ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)?)
    }

    /// Record a write in the change history.
    pub(crate) async fn record_write(
        &self,
        entity_type: EntityType,
        entity_id: i64,
        action: AuditAction,
        user_id: Option<i64>,
        detail: Option<serde_json::Value>,
        at: DateTime<Utc>,
    ) -> Result<(), DatabaseError> {
        self.append_audit(&NewAuditEntry {
            entity_type,
            entity_id,
            action,
            user_id,
            detail,
            created_at: at,
        })
        .await?;
        tracing::info!(
            entity = entity_type.as_str(),
            id = entity_id,
            action = action.as_str(),
            user = ?user_id,
            "write recorded"
        );
        Ok(())
    }

    /// Whether a row with `id` exists in the table for `entity`.
    pub(crate) async fn exists(&self, entity: EntityType, id: i64) -> Result<bool, DatabaseError> {
        let table = entity_type_to_table(entity);
        let count = self
            .db
            .query_count(
                &format!("SELECT COUNT(*) FROM {table} WHERE id = ?1"),
                vec![id.into()],
            )
            .await?;
        Ok(count > 0)
    }

    /// Add an invalid-reference error on `field` if the referenced row is missing.
    pub(crate) async fn check_reference(
        &self,
        errors: &mut FormErrors,
        field: &str,
        entity: EntityType,
        id: Option<i64>,
    ) -> Result<(), DatabaseError> {
        if let Some(id) = id {
            if !self.exists(entity, id).await? {
                errors.add(field, INVALID_REFERENCE);
            }
        }
        Ok(())
    }

    /// Delete a row by id and record the deletion, plus one entry per row
    /// removed by `ON DELETE CASCADE`.
    ///
    /// Returns `NotFound` if the row is absent and `Conflict` if other rows
    /// still reference it.
    pub(crate) async fn delete_row(
        &self,
        entity: EntityType,
        id: i64,
        user_id: Option<i64>,
    ) -> Result<(), DatabaseError> {
        self.write(async move {
            let cascaded = self.cascaded_rows(entity, id).await?;
            let table = entity_type_to_table(entity);
            let affected = self
                .db
                .conn()
                .execute(&format!("DELETE FROM {table} WHERE id = ?1"), [id])
                .await
                .map_err(|e| map_delete_error(e, entity, id))?;
            if affected == 0 {
                return Err(DatabaseError::NotFound { entity, id });
            }

            let now = Utc::now();
            self.record_write(entity, id, AuditAction::Deleted, user_id, None, now)
                .await?;
            for (child, child_id) in cascaded {
                self.record_write(child, child_id, AuditAction::Deleted, user_id, None, now)
                    .await?;
            }
            Ok(())
        })
        .await
    }

    /// Rows that `ON DELETE CASCADE` removes along with `entity` `id`.
    async fn cascaded_rows(
        &self,
        entity: EntityType,
        id: i64,
    ) -> Result<Vec<(EntityType, i64)>, DatabaseError> {
        let queries: &[(EntityType, &str)] = match entity {
            EntityType::Farm => &[
                (EntityType::Field, "SELECT id FROM fields WHERE farm_id = ?1 ORDER BY id"),
                (
                    EntityType::IrrigationPoint,
                    "SELECT ip.id FROM irrigation_points ip
                     JOIN fields f ON f.id = ip.field_id
                     WHERE f.farm_id = ?1 ORDER BY ip.id",
                ),
            ],
            EntityType::Field => &[(
                EntityType::IrrigationPoint,
                "SELECT id FROM irrigation_points WHERE field_id = ?1 ORDER BY id",
            )],
            EntityType::Taxon => &[(
                EntityType::AnnualPopulation,
                "SELECT id FROM annual_populations WHERE taxon_id = ?1 ORDER BY id",
            )],
            EntityType::Property => &[(
                EntityType::AnnualPopulation,
                "SELECT id FROM annual_populations WHERE property_id = ?1 ORDER BY id",
            )],
            _ => &[],
        };

        let mut cascaded = Vec::new();
        for (child, sql) in queries {
            let mut rows = self.db.conn().query(sql, [id]).await?;
            while let Some(row) = rows.next().await? {
                cascaded.push((*child, row.get::<i64>(0)?));
            }
        }
        Ok(cascaded)
    }
}

/// Serialize a cleaned input as an audit detail.
pub(crate) fn detail_of<T: Serialize>(input: &T) -> Result<serde_json::Value, DatabaseError> {
    serde_json::to_value(input).map_err(|e| DatabaseError::Other(e.into()))
}
