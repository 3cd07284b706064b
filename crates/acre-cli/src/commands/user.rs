use acre_core::enums::{AuditAction, EntityType};
use acre_core::forms::UserForm;
use acre_db::repos::user::UserFilter;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::commands::shared::write::{deleted, written};
use crate::context::AppContext;
use crate::output::output;

/// Handle `acre user`.
pub async fn handle(action: UserCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        UserCommands::Create { username } => {
            let user = ctx
                .service
                .create_user(&UserForm { username }, ctx.acting_user().await?)
                .await?;
            written(EntityType::User, AuditAction::Created, user, flags)
        }
        UserCommands::Update { id, username } => {
            let user = ctx
                .service
                .update_user(id, UserForm { username }, ctx.acting_user().await?)
                .await?;
            written(EntityType::User, AuditAction::Updated, user, flags)
        }
        UserCommands::List { search, page } => {
            let users = ctx.service.list_users(&UserFilter { search }, page).await?;
            output(&users, flags.format)
        }
        UserCommands::Get { id } => output(&ctx.service.get_user(id).await?, flags.format),
        UserCommands::Delete { id } => {
            ctx.service.delete_user(id, ctx.acting_user().await?).await?;
            deleted(EntityType::User, id, flags)
        }
    }
}
