//! Schema runner.
//!
//! Embeds the schema at compile time and executes it on database open.
//! All statements use `IF NOT EXISTS`, so re-running is a no-op.

use crate::AcreDb;
use crate::error::DatabaseError;

/// Users, farm registry, wildlife registry, and change history.
const MIGRATION_001: &str = include_str!("../schema/001_initial.sql");

impl AcreDb {
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
        Ok(())
    }
}
