//! Provinces, property types and taxon ranks share one command shape.

use acre_core::enums::{AuditAction, EntityType};
use acre_core::forms::NamedForm;
use acre_db::repos::named::NameFilter;
use acre_db::service::AcreService;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::NamedCommands;
use crate::commands::shared::write::{deleted, written};
use crate::context::AppContext;
use crate::output::output;

/// Handle `acre province`, `acre property-type` and `acre taxon-rank`.
pub async fn handle(
    entity: EntityType,
    action: NamedCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let service = ctx.service.as_ref();
    match action {
        NamedCommands::Create { name } => {
            let form = NamedForm { name };
            let acting_user = ctx.acting_user().await?;
            let record = match entity {
                EntityType::Province => to_value(service.create_province(&form, acting_user).await?),
                EntityType::PropertyType => {
                    to_value(service.create_property_type(&form, acting_user).await?)
                }
                _ => to_value(service.create_taxon_rank(&form, acting_user).await?),
            }?;
            written(entity, AuditAction::Created, record, flags)
        }
        NamedCommands::Update { id, name } => {
            let form = NamedForm { name };
            let acting_user = ctx.acting_user().await?;
            let record = match entity {
                EntityType::Province => {
                    to_value(service.update_province(id, form, acting_user).await?)
                }
                EntityType::PropertyType => {
                    to_value(service.update_property_type(id, form, acting_user).await?)
                }
                _ => to_value(service.update_taxon_rank(id, form, acting_user).await?),
            }?;
            written(entity, AuditAction::Updated, record, flags)
        }
        NamedCommands::List { search, page } => {
            let filter = NameFilter { search };
            let page = list(service, entity, &filter, page).await?;
            output(&page, flags.format)
        }
        NamedCommands::Get { id } => {
            let record = match entity {
                EntityType::Province => to_value(service.get_province(id).await?),
                EntityType::PropertyType => to_value(service.get_property_type(id).await?),
                _ => to_value(service.get_taxon_rank(id).await?),
            }?;
            output(&record, flags.format)
        }
        NamedCommands::Delete { id } => {
            let acting_user = ctx.acting_user().await?;
            match entity {
                EntityType::Province => service.delete_province(id, acting_user).await?,
                EntityType::PropertyType => service.delete_property_type(id, acting_user).await?,
                _ => service.delete_taxon_rank(id, acting_user).await?,
            }
            deleted(entity, id, flags)
        }
    }
}

async fn list(
    service: &AcreService,
    entity: EntityType,
    filter: &NameFilter,
    page: u32,
) -> anyhow::Result<Value> {
    match entity {
        EntityType::Province => to_value(service.list_provinces(filter, page).await?),
        EntityType::PropertyType => to_value(service.list_property_types(filter, page).await?),
        _ => to_value(service.list_taxon_ranks(filter, page).await?),
    }
}

fn to_value<T: serde::Serialize>(record: T) -> anyhow::Result<Value> {
    Ok(serde_json::to_value(record)?)
}
