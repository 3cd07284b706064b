use acre_core::enums::{AuditAction, EntityType};
use acre_core::forms::IrrigationPointForm;
use acre_db::repos::irrigation::IrrigationPointFilter;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::IrrigationCommands;
use crate::commands::shared::write::{deleted, written};
use crate::context::AppContext;
use crate::output::output;

/// Handle `acre irrigation`.
pub async fn handle(
    action: IrrigationCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        IrrigationCommands::Create {
            field,
            point_id,
            location,
            water_source,
            installed_on,
        } => {
            let form = IrrigationPointForm {
                field,
                point_id,
                location,
                water_source,
                installed_on: Some(installed_on),
            };
            let point = ctx
                .service
                .create_irrigation_point(&form, ctx.acting_user().await?)
                .await?;
            written(EntityType::IrrigationPoint, AuditAction::Created, point, flags)
        }
        IrrigationCommands::Update {
            id,
            field,
            point_id,
            location,
            water_source,
            installed_on,
        } => {
            let form = IrrigationPointForm {
                field,
                point_id,
                location,
                water_source,
                installed_on,
            };
            let point = ctx
                .service
                .update_irrigation_point(id, form, ctx.acting_user().await?)
                .await?;
            written(EntityType::IrrigationPoint, AuditAction::Updated, point, flags)
        }
        IrrigationCommands::List {
            search,
            field,
            page,
        } => {
            let filter = IrrigationPointFilter { search, field };
            let points = ctx.service.list_irrigation_points(&filter, page).await?;
            output(&points, flags.format)
        }
        IrrigationCommands::Get { id } => {
            output(&ctx.service.get_irrigation_point(id).await?, flags.format)
        }
        IrrigationCommands::Delete { id } => {
            ctx.service
                .delete_irrigation_point(id, ctx.acting_user().await?)
                .await?;
            deleted(EntityType::IrrigationPoint, id, flags)
        }
    }
}
