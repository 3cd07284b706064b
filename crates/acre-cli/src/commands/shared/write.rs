use acre_core::enums::{AuditAction, EntityType};
use acre_core::responses::{DeleteResponse, WriteResponse};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Print a created or updated record with its confirmation message.
pub fn written<T: Serialize>(
    entity: EntityType,
    action: AuditAction,
    record: T,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    output(
        &WriteResponse {
            message: entity.success_message(action),
            record,
        },
        flags.format,
    )
}

pub fn deleted(entity: EntityType, id: i64, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(
        &DeleteResponse {
            message: entity.success_message(AuditAction::Deleted),
            id,
        },
        flags.format,
    )
}
