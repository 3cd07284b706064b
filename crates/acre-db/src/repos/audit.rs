//! Change history repository.
//!
//! Append-only entries recording every create, update, and delete, with
//! dynamic filtering.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use acre_core::entities::AuditEntry;
use acre_core::enums::{AuditAction, EntityType};

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_optional_json};
use crate::repos::list::Conditions;
use crate::service::AcreService;

/// Default number of history entries returned.
pub const DEFAULT_HISTORY_LIMIT: u32 = 100;

/// An audit entry before it has an id.
#[derive(Debug, Clone)]
pub struct NewAuditEntry {
    pub entity_type: EntityType,
    pub entity_id: i64,
    pub action: AuditAction,
    pub user_id: Option<i64>,
    pub detail: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Filter criteria for history queries.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct AuditFilter {
    pub entity_type: Option<EntityType>,
    pub entity_id: Option<i64>,
    pub action: Option<AuditAction>,
    pub user_id: Option<i64>,
    pub limit: Option<u32>,
}

fn row_to_audit(row: &libsql::Row) -> Result<AuditEntry, DatabaseError> {
    Ok(AuditEntry {
        id: row.get::<i64>(0)?,
        entity_type: parse_enum(&row.get::<String>(1)?)?,
        entity_id: row.get::<i64>(2)?,
        action: parse_enum(&row.get::<String>(3)?)?,
        user_id: row.get::<Option<i64>>(4)?,
        detail: parse_optional_json(get_opt_string(row, 5)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl AcreService {
    /// Append an audit entry. Called by every write method.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn append_audit(&self, entry: &NewAuditEntry) -> Result<i64, DatabaseError> {
        let detail = entry.detail.as_ref().map(ToString::to_string);
        let mut rows = self
            .db()
            .conn()
            .query(
                "INSERT INTO audit_trail (entity_type, entity_id, action, user_id, detail, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING id",
                libsql::params![
                    entry.entity_type.as_str(),
                    entry.entity_id,
                    entry.action.as_str(),
                    entry.user_id,
                    detail,
                    entry.created_at.to_rfc3339()
                ],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)?)
    }

    /// Query history entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn query_audit(&self, filter: &AuditFilter) -> Result<Vec<AuditEntry>, DatabaseError> {
        let mut conditions = Conditions::new();
        conditions
            .eq("entity_type", filter.entity_type.map(EntityType::as_str))
            .eq("entity_id", filter.entity_id)
            .eq("action", filter.action.map(AuditAction::as_str))
            .eq("user_id", filter.user_id);
        let where_clause = conditions.where_sql();

        let limit = filter.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);
        let sql = format!(
            "SELECT id, entity_type, entity_id, action, user_id, detail, created_at
             FROM audit_trail {where_clause}
             ORDER BY created_at DESC, id DESC LIMIT {limit}"
        );

        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(conditions.params()))
            .await?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_audit(&row)?);
        }
        Ok(entries)
    }
}
