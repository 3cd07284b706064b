use acre_core::enums::{AuditAction, EntityType};
use acre_core::forms::FarmForm;
use acre_db::repos::farm::FarmFilter;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::FarmCommands;
use crate::commands::shared::write::{deleted, written};
use crate::context::AppContext;
use crate::output::output;

/// Handle `acre farm`.
pub async fn handle(action: FarmCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        FarmCommands::Create {
            name,
            owner_name,
            area,
            location,
        } => {
            let form = FarmForm {
                name,
                owner_name,
                area,
                location,
            };
            let farm = ctx.service.create_farm(&form, ctx.acting_user().await?).await?;
            written(EntityType::Farm, AuditAction::Created, farm, flags)
        }
        FarmCommands::Update {
            id,
            name,
            owner_name,
            area,
            location,
        } => {
            let form = FarmForm {
                name,
                owner_name,
                area,
                location,
            };
            let farm = ctx
                .service
                .update_farm(id, form, ctx.acting_user().await?)
                .await?;
            written(EntityType::Farm, AuditAction::Updated, farm, flags)
        }
        FarmCommands::List { search, page } => {
            let farms = ctx.service.list_farms(&FarmFilter { search }, page).await?;
            output(&farms, flags.format)
        }
        FarmCommands::Get { id } => output(&ctx.service.get_farm(id).await?, flags.format),
        FarmCommands::Delete { id } => {
            ctx.service.delete_farm(id, ctx.acting_user().await?).await?;
            deleted(EntityType::Farm, id, flags)
        }
    }
}
