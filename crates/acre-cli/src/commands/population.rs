use acre_core::enums::{AuditAction, EntityType};
use acre_core::forms::AnnualPopulationForm;
use acre_db::repos::population::PopulationFilter;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PopulationCommands;
use crate::commands::shared::write::{deleted, written};
use crate::context::AppContext;
use crate::output::output;

/// Handle `acre population`.
pub async fn handle(
    action: PopulationCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        PopulationCommands::Create {
            year,
            total,
            adult_male,
            adult_female,
            area_available_to_species,
            recorded_by,
            taxon,
            property,
        } => {
            let form = AnnualPopulationForm {
                year,
                total,
                adult_male,
                adult_female,
                area_available_to_species,
                user: Some(recorded_by),
                taxon,
                property,
            };
            let population = ctx
                .service
                .create_annual_population(&form, ctx.acting_user().await?)
                .await?;
            written(EntityType::AnnualPopulation, AuditAction::Created, population, flags)
        }
        PopulationCommands::Update {
            id,
            year,
            total,
            adult_male,
            adult_female,
            area_available_to_species,
            recorded_by,
            taxon,
            property,
        } => {
            let form = AnnualPopulationForm {
                year,
                total,
                adult_male,
                adult_female,
                area_available_to_species,
                user: recorded_by,
                taxon,
                property,
            };
            let population = ctx
                .service
                .update_annual_population(id, form, ctx.acting_user().await?)
                .await?;
            written(EntityType::AnnualPopulation, AuditAction::Updated, population, flags)
        }
        PopulationCommands::List {
            year,
            taxon,
            property,
            page,
        } => {
            let filter = PopulationFilter {
                year,
                taxon,
                property,
            };
            let populations = ctx.service.list_annual_populations(&filter, page).await?;
            output(&populations, flags.format)
        }
        PopulationCommands::Get { id } => {
            output(&ctx.service.get_annual_population(id).await?, flags.format)
        }
        PopulationCommands::Delete { id } => {
            ctx.service
                .delete_annual_population(id, ctx.acting_user().await?)
                .await?;
            deleted(EntityType::AnnualPopulation, id, flags)
        }
    }
}
