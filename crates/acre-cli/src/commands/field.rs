use acre_core::enums::{AuditAction, CropType, EntityType};
use acre_core::forms::FieldForm;
use acre_db::repos::field::FieldFilter;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::FieldCommands;
use crate::commands::shared::parse::parse_enum;
use crate::commands::shared::write::{deleted, written};
use crate::context::AppContext;
use crate::output::output;

/// Handle `acre field`.
pub async fn handle(action: FieldCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        FieldCommands::Create {
            farm,
            name,
            crop_type,
            boundary,
            area,
            planted_on,
        } => {
            let form = FieldForm {
                farm,
                name,
                crop_type,
                boundary,
                area,
                planted_on: Some(planted_on),
            };
            let field = ctx.service.create_field(&form, ctx.acting_user().await?).await?;
            written(EntityType::Field, AuditAction::Created, field, flags)
        }
        FieldCommands::Update {
            id,
            farm,
            name,
            crop_type,
            boundary,
            area,
            planted_on,
        } => {
            let form = FieldForm {
                farm,
                name,
                crop_type,
                boundary,
                area,
                planted_on,
            };
            let field = ctx
                .service
                .update_field(id, form, ctx.acting_user().await?)
                .await?;
            written(EntityType::Field, AuditAction::Updated, field, flags)
        }
        FieldCommands::List {
            search,
            crop_type,
            farm,
            page,
        } => {
            let crop_type = crop_type
                .as_deref()
                .map(|raw| parse_enum::<CropType>(raw, "crop type"))
                .transpose()?;
            let filter = FieldFilter {
                search,
                crop_type,
                farm,
            };
            output(&ctx.service.list_fields(&filter, page).await?, flags.format)
        }
        FieldCommands::Get { id } => output(&ctx.service.get_field(id).await?, flags.format),
        FieldCommands::Delete { id } => {
            ctx.service.delete_field(id, ctx.acting_user().await?).await?;
            deleted(EntityType::Field, id, flags)
        }
    }
}
