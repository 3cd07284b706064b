use acre_core::enums::EntityType;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Farm { action } => commands::farm::handle(action, ctx, flags).await,
        Commands::Field { action } => commands::field::handle(action, ctx, flags).await,
        Commands::Irrigation { action } => commands::irrigation::handle(action, ctx, flags).await,
        Commands::User { action } => commands::user::handle(action, ctx, flags).await,
        Commands::Province { action } => {
            commands::named::handle(EntityType::Province, action, ctx, flags).await
        }
        Commands::Organisation { action } => {
            commands::organisation::handle(action, ctx, flags).await
        }
        Commands::PropertyType { action } => {
            commands::named::handle(EntityType::PropertyType, action, ctx, flags).await
        }
        Commands::Property { action } => commands::property::handle(action, ctx, flags).await,
        Commands::TaxonRank { action } => {
            commands::named::handle(EntityType::TaxonRank, action, ctx, flags).await
        }
        Commands::Taxon { action } => commands::taxon::handle(action, ctx, flags).await,
        Commands::Population { action } => commands::population::handle(action, ctx, flags).await,
        Commands::History(args) => commands::history::handle(&args, ctx, flags).await,
        Commands::Report(args) => commands::report::handle(&args, ctx, flags).await,
        Commands::Serve(args) => commands::serve::handle(&args, ctx).await,
    }
}
