use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Last-write metadata carried by every record.
///
/// `last_update` is refreshed on every write; `last_update_by` is the acting
/// user, or `None` for anonymous writes and after that user is deleted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditStamp {
    pub last_update: DateTime<Utc>,
    pub last_update_by: Option<i64>,
}
