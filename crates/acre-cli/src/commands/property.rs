use acre_core::enums::{AuditAction, EntityType};
use acre_core::forms::PropertyForm;
use acre_db::repos::property::PropertyFilter;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PropertyCommands;
use crate::commands::shared::write::{deleted, written};
use crate::context::AppContext;
use crate::output::output;

/// Handle `acre property`.
pub async fn handle(
    action: PropertyCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        PropertyCommands::Create {
            name,
            short_code,
            province,
            property_type,
            organisation,
            centroid,
        } => {
            let form = PropertyForm {
                name,
                short_code,
                province,
                property_type,
                organisation,
                centroid: Some(centroid),
            };
            let property = ctx
                .service
                .create_property(&form, ctx.acting_user().await?)
                .await?;
            written(EntityType::Property, AuditAction::Created, property, flags)
        }
        PropertyCommands::Update {
            id,
            name,
            short_code,
            province,
            property_type,
            organisation,
            centroid,
        } => {
            let form = PropertyForm {
                name,
                short_code,
                province,
                property_type,
                organisation,
                centroid,
            };
            let property = ctx
                .service
                .update_property(id, form, ctx.acting_user().await?)
                .await?;
            written(EntityType::Property, AuditAction::Updated, property, flags)
        }
        PropertyCommands::List {
            search,
            province,
            property_type,
            organisation,
            page,
        } => {
            let filter = PropertyFilter {
                search,
                province,
                property_type,
                organisation,
            };
            output(&ctx.service.list_properties(&filter, page).await?, flags.format)
        }
        PropertyCommands::Get { id } => output(&ctx.service.get_property(id).await?, flags.format),
        PropertyCommands::Delete { id } => {
            ctx.service.delete_property(id, ctx.acting_user().await?).await?;
            deleted(EntityType::Property, id, flags)
        }
    }
}
