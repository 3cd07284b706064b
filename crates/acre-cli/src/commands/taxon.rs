use acre_core::enums::{AuditAction, EntityType};
use acre_core::forms::TaxonForm;
use acre_db::repos::taxon::TaxonFilter;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TaxonCommands;
use crate::commands::shared::write::{deleted, written};
use crate::context::AppContext;
use crate::output::output;

/// Handle `acre taxon`.
pub async fn handle(action: TaxonCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        TaxonCommands::Create {
            scientific_name,
            common_name,
            rank,
            parent,
        } => {
            let form = TaxonForm {
                scientific_name,
                common_name: Some(common_name),
                taxon_rank: Some(rank),
                parent: Some(parent),
            };
            let taxon = ctx.service.create_taxon(&form, ctx.acting_user().await?).await?;
            written(EntityType::Taxon, AuditAction::Created, taxon, flags)
        }
        TaxonCommands::Update {
            id,
            scientific_name,
            common_name,
            rank,
            parent,
        } => {
            let form = TaxonForm {
                scientific_name,
                common_name,
                taxon_rank: rank,
                parent,
            };
            let taxon = ctx
                .service
                .update_taxon(id, form, ctx.acting_user().await?)
                .await?;
            written(EntityType::Taxon, AuditAction::Updated, taxon, flags)
        }
        TaxonCommands::List {
            search,
            rank,
            parent,
            page,
        } => {
            let filter = TaxonFilter {
                search,
                rank,
                parent,
            };
            output(&ctx.service.list_taxa(&filter, page).await?, flags.format)
        }
        TaxonCommands::Get { id } => output(&ctx.service.get_taxon(id).await?, flags.format),
        TaxonCommands::Delete { id } => {
            ctx.service.delete_taxon(id, ctx.acting_user().await?).await?;
            deleted(EntityType::Taxon, id, flags)
        }
    }
}
