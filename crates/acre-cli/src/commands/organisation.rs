use acre_core::enums::{AuditAction, EntityType};
use acre_core::forms::OrganisationForm;
use acre_db::repos::organisation::OrganisationFilter;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::OrganisationCommands;
use crate::commands::shared::write::{deleted, written};
use crate::context::AppContext;
use crate::output::output;

/// Handle `acre organisation`.
pub async fn handle(
    action: OrganisationCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        OrganisationCommands::Create {
            name,
            short_code,
            province,
        } => {
            let form = OrganisationForm {
                name,
                short_code,
                province: Some(province),
            };
            let organisation = ctx
                .service
                .create_organisation(&form, ctx.acting_user().await?)
                .await?;
            written(EntityType::Organisation, AuditAction::Created, organisation, flags)
        }
        OrganisationCommands::Update {
            id,
            name,
            short_code,
            province,
        } => {
            let form = OrganisationForm {
                name,
                short_code,
                province,
            };
            let organisation = ctx
                .service
                .update_organisation(id, form, ctx.acting_user().await?)
                .await?;
            written(EntityType::Organisation, AuditAction::Updated, organisation, flags)
        }
        OrganisationCommands::List {
            search,
            province,
            page,
        } => {
            let filter = OrganisationFilter { search, province };
            output(&ctx.service.list_organisations(&filter, page).await?, flags.format)
        }
        OrganisationCommands::Get { id } => {
            output(&ctx.service.get_organisation(id).await?, flags.format)
        }
        OrganisationCommands::Delete { id } => {
            ctx.service
                .delete_organisation(id, ctx.acting_user().await?)
                .await?;
            deleted(EntityType::Organisation, id, flags)
        }
    }
}
