use crate::render::{self, IndicatorDetailView, QuarterDetailView};
use clap::{Args, Parser, Subcommand, ValueEnum};
use devtrack::catalog::{number_indicators, Catalog};
use devtrack::config::{AppConfig, ReportConfig};
use devtrack::error::AppError;
use devtrack::import::{CatalogLoader, EntryImporter};
use devtrack::progress::{
    calculate_annual_progress, calculate_quarter_progress, classify_health, indicator_unit,
    monthly_breakdown, Entry, QuarterId,
};
use devtrack::report::ProgressReport;
use devtrack::telemetry;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "devtrack",
    about = "Compute development indicator progress against quarterly and annual targets",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Catalog-wide progress report for one quarter
    Report(ReportArgs),
    /// Quarterly, month-by-month and annual progress for a single indicator
    Indicator(IndicatorArgs),
    /// Print display numbers for top-level indicators
    Numbering(NumberingArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Indicator catalog (JSON). Falls back to DEVTRACK_CATALOG.
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Submitted entries (CSV, or JSON by extension). Falls back to DEVTRACK_ENTRIES.
    #[arg(long)]
    entries: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Args, Debug)]
struct ReportArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Reporting quarter (q1..q4)
    #[arg(long, value_parser = parse_quarter)]
    quarter: QuarterId,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Evaluate indicators on the current thread only
    #[arg(long)]
    sequential: bool,
}

#[derive(Args, Debug)]
struct IndicatorArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Indicator id from the catalog
    #[arg(long)]
    id: String,
    /// Limit the output to one quarter (defaults to all four)
    #[arg(long, value_parser = parse_quarter)]
    quarter: Option<QuarterId>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct NumberingArgs {
    /// Indicator catalog (JSON). Falls back to DEVTRACK_CATALOG.
    #[arg(long)]
    catalog: Option<PathBuf>,
}

fn parse_quarter(raw: &str) -> Result<QuarterId, String> {
    raw.parse::<QuarterId>().map_err(|err| err.to_string())
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Report(args) => run_report(args, &config.report),
        Command::Indicator(args) => run_indicator(args, &config.report),
        Command::Numbering(args) => run_numbering(args, &config.report),
    }
}

fn load_catalog(path: Option<PathBuf>, config: &ReportConfig) -> Result<Catalog, AppError> {
    let path = path
        .or_else(|| config.catalog_path.clone())
        .ok_or(AppError::MissingInput("catalog path"))?;
    Ok(CatalogLoader::from_path(path)?)
}

fn load_inputs(input: InputArgs, config: &ReportConfig) -> Result<(Catalog, Vec<Entry>), AppError> {
    let catalog = load_catalog(input.catalog, config)?;
    let entries_path = input
        .entries
        .or_else(|| config.entries_path.clone())
        .ok_or(AppError::MissingInput("entries path"))?;
    let entries = EntryImporter::from_path(&entries_path)?;

    info!(
        indicators = catalog.len(),
        entries = entries.len(),
        path = %entries_path.display(),
        "inputs loaded"
    );
    Ok((catalog, entries))
}

fn run_report(args: ReportArgs, config: &ReportConfig) -> Result<(), AppError> {
    let ReportArgs {
        input,
        quarter,
        format,
        sequential,
    } = args;

    let (catalog, entries) = load_inputs(input, config)?;
    let parallel = config.parallel && !sequential;
    let report = ProgressReport::build(&catalog, &entries, quarter, parallel);
    info!(%quarter, rows = report.rows.len(), parallel, "progress report built");

    let summary = report.summary();
    match format {
        OutputFormat::Text => render::render_report(&summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    Ok(())
}

fn run_indicator(args: IndicatorArgs, config: &ReportConfig) -> Result<(), AppError> {
    let IndicatorArgs {
        input,
        id,
        quarter,
        format,
    } = args;

    let (catalog, entries) = load_inputs(input, config)?;
    let context = catalog
        .get(&id)
        .ok_or_else(|| AppError::UnknownIndicator(id.clone()))?;
    let indicator = context.indicator;

    let quarters = match quarter {
        Some(quarter) => vec![quarter],
        None => QuarterId::ordered().to_vec(),
    };

    let quarters = quarters
        .into_iter()
        .map(|quarter| {
            let progress = calculate_quarter_progress(
                &catalog,
                indicator,
                &entries,
                quarter,
                &quarter.months(),
            );
            QuarterDetailView {
                health: classify_health(progress.performance),
                months: monthly_breakdown(&catalog, indicator, &entries, quarter),
                progress,
            }
        })
        .collect();

    let view = IndicatorDetailView {
        number: number_indicators(&catalog).get(&indicator.id).copied(),
        indicator_id: indicator.id.clone(),
        name: indicator.name.clone(),
        pillar: context.pillar.name.clone(),
        output: context.output.name.clone(),
        measurement_type: indicator.measurement_type.to_string(),
        unit: indicator_unit(indicator),
        annual_target: indicator.targets.annual,
        annual_progress: calculate_annual_progress(&catalog, indicator, &entries),
        quarters,
    };

    match format {
        OutputFormat::Text => render::render_indicator(&view),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
    }
    Ok(())
}

fn run_numbering(args: NumberingArgs, config: &ReportConfig) -> Result<(), AppError> {
    let catalog = load_catalog(args.catalog, config)?;
    let numbers = number_indicators(&catalog);

    for context in catalog.top_level_indicators() {
        if let Some(number) = numbers.get(&context.indicator.id) {
            println!(
                "{number:>3}. {} ({}) | {} / {}",
                context.indicator.name, context.indicator.id, context.pillar.name, context.output.name
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_report_command() {
        let cli = Cli::try_parse_from([
            "devtrack",
            "report",
            "--catalog",
            "catalog.json",
            "--entries",
            "entries.csv",
            "--quarter",
            "Q3",
            "--format",
            "json",
        ])
        .expect("arguments parse");

        match cli.command {
            Command::Report(args) => {
                assert_eq!(args.quarter, QuarterId::Q3);
                assert_eq!(args.format, OutputFormat::Json);
                assert!(!args.sequential);
                assert_eq!(args.input.catalog, Some(PathBuf::from("catalog.json")));
            }
            other => panic!("expected report command, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_quarter() {
        let result = Cli::try_parse_from(["devtrack", "report", "--quarter", "q7"]);
        assert!(result.is_err());
    }

    #[test]
    fn missing_catalog_is_reported() {
        let config = ReportConfig {
            catalog_path: None,
            entries_path: None,
            parallel: true,
        };
        match load_catalog(None, &config) {
            Err(AppError::MissingInput(what)) => assert_eq!(what, "catalog path"),
            other => panic!("expected missing input, got {other:?}"),
        }
    }
}
