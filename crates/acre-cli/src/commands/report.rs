use anyhow::anyhow;

use acre_core::responses::{ReportParams, ReportQuery};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReportArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `acre report`.
pub async fn handle(args: &ReportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let params = report_params(args);
    match args.only {
        Some(number) => {
            let query = ReportQuery::from_number(number)
                .ok_or_else(|| anyhow!("report query must be between 1 and 12, got {number}"))?;
            output(&ctx.service.run_report_query(query, &params).await?, flags.format)
        }
        None => output(&ctx.service.wildlife_report(&params).await?, flags.format),
    }
}

/// Overlay the given arguments on the default report parameters.
fn report_params(args: &ReportArgs) -> ReportParams {
    let mut params = ReportParams::default();
    if !args.property_types.is_empty() {
        params.property_types.clone_from(&args.property_types);
    }
    if let Some(name) = &args.scientific_name {
        params.scientific_name.clone_from(name);
    }
    if let Some(year) = args.year {
        params.year = year;
    }
    if let Some(name) = &args.property_name {
        params.property_name.clone_from(name);
    }
    if let Some(name) = &args.family_taxon {
        params.family_taxon.clone_from(name);
    }
    params
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::cli::{Cli, Commands};

    fn parse_report(args: &[&str]) -> ReportArgs {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        match cli.command {
            Commands::Report(args) => args,
            other => panic!("expected report, got {other:?}"),
        }
    }

    #[test]
    fn no_arguments_use_defaults() {
        let params = report_params(&parse_report(&["acre", "report"]));
        assert_eq!(params, ReportParams::default());
    }

    #[test]
    fn arguments_override_defaults() {
        let params = report_params(&parse_report(&[
            "acre",
            "report",
            "--property-type",
            "Communal",
            "--property-type",
            "State",
            "--year",
            "2022",
            "--family-taxon",
            "Panthera",
        ]));
        assert_eq!(params.property_types, vec!["Communal", "State"]);
        assert_eq!(params.year, 2022);
        assert_eq!(params.family_taxon, "Panthera");
        assert_eq!(params.scientific_name, ReportParams::default().scientific_name);
    }
}
