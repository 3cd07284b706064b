use anyhow::anyhow;

use acre_core::enums::{AuditAction, EntityType};
use acre_db::repos::audit::AuditFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::HistoryArgs;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `acre history`.
pub async fn handle(args: &HistoryArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let user_id = match &args.by {
        Some(username) => Some(
            ctx.service
                .find_user_by_username(username)
                .await?
                .ok_or_else(|| anyhow!("unknown user '{username}'"))?
                .id,
        ),
        None => None,
    };

    let filter = AuditFilter {
        entity_type: args
            .entity_type
            .as_deref()
            .map(|raw| parse_enum::<EntityType>(raw, "entity type"))
            .transpose()?,
        entity_id: args.entity_id,
        action: args
            .action
            .as_deref()
            .map(|raw| parse_enum::<AuditAction>(raw, "action"))
            .transpose()?,
        user_id,
        limit: flags.limit,
    };

    output(&ctx.service.query_audit(&filter).await?, flags.format)
}
