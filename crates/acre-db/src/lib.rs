//! # acre-db
//!
//! libSQL storage for the acre farm and wildlife registries.
//!
//! Holds every relational record (users, farms, fields, irrigation points,
//! provinces, organisations, properties, taxa, annual populations) plus the
//! change history, and runs the wildlife aggregate reports.
//!
//! All writes go through [`service::AcreService`], which validates forms,
//! stamps `last_update`/`last_update_by`, and appends an audit entry.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle.
///
/// Wraps a libSQL database and a single connection with foreign keys enabled.
pub struct AcreDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl AcreDb {
    /// Open a local database at `path` (a file or `:memory:`).
    ///
    /// Creates the schema on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or the
    /// schema cannot be applied.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Per-connection in SQLite.
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let acre_db = Self { db, conn };
        acre_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(acre_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Run a query expected to return a single `COUNT(*)`-style integer.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn query_count(
        &self,
        sql: &str,
        params: Vec<libsql::Value>,
    ) -> Result<i64, DatabaseError> {
        let mut rows = self
            .conn
            .query(sql, libsql::params_from_iter(params))
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)?)
    }
}
