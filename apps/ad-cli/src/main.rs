use ad_app::{
    AppError, AppResult, Dashboard, DashboardConfig, aggregate_to_csv, chart_to_json, load_config,
    load_dataset,
};
use ad_core::{CompartmentChoice, PolymerType};
use ad_pipeline::{CompartmentScope, PolymerMatching};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "ad-cli")]
#[command(about = "Additives dashboard CLI - filter and summarize plastic additive data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a dataset file loads
    Validate {
        /// Path to the dataset (.csv or .json)
        dataset_path: PathBuf,
    },
    /// Show row counts per compartment
    Info {
        /// Path to the dataset (.csv or .json)
        dataset_path: PathBuf,
    },
    /// Print the dashboard metrics for a filter selection
    Summary {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Export a chart specification as JSON
    Chart {
        /// Which concentration chart to build
        #[arg(value_enum)]
        target: ChartTarget,
        #[command(flatten)]
        session: SessionArgs,
        /// Output JSON file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export the per-additive summary behind a chart as CSV
    Aggregate {
        /// Which concentration chart's summary to export
        #[arg(value_enum)]
        target: ChartTarget,
        #[command(flatten)]
        session: SessionArgs,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ChartTarget {
    /// Concentrations measured in plastic
    Plastic,
    /// Concentrations in the selected compartment
    Compartment,
}

impl From<ChartTarget> for CompartmentScope {
    fn from(target: ChartTarget) -> Self {
        match target {
            ChartTarget::Plastic => CompartmentScope::Plastic,
            ChartTarget::Compartment => CompartmentScope::NonPlastic,
        }
    }
}

#[derive(Args)]
struct SessionArgs {
    /// Dataset path (defaults to the one named in the config)
    #[arg(short, long)]
    dataset: Option<PathBuf>,
    /// Dashboard config YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Compartment compared against Plastic (Sediment, Seawater, Biota)
    #[arg(long)]
    compartment: Option<CompartmentChoice>,
    /// Polymer type to include; repeat for several
    #[arg(long = "polymer")]
    polymers: Vec<PolymerType>,
    /// Select no polymer types (same rows as selecting all of them)
    #[arg(long, conflicts_with = "polymers")]
    no_polymers: bool,
    /// Match polymer abbreviations as whole tokens instead of substrings
    #[arg(long)]
    token_match: bool,
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { dataset_path } => cmd_validate(&dataset_path),
        Commands::Info { dataset_path } => cmd_info(&dataset_path),
        Commands::Summary { session } => cmd_summary(&session),
        Commands::Chart {
            target,
            session,
            output,
        } => cmd_chart(target, &session, output.as_deref()),
        Commands::Aggregate {
            target,
            session,
            output,
        } => cmd_aggregate(target, &session, output.as_deref()),
    }
}

fn cmd_validate(dataset_path: &Path) -> AppResult<()> {
    println!("Validating dataset: {}", dataset_path.display());
    let dataset = load_dataset(dataset_path)?;
    println!("✓ Dataset is valid ({} rows)", dataset.info.row_count);
    if dataset.info.unrecognized_compartments > 0 {
        println!(
            "  {} rows have an unrecognized compartment and will never be shown",
            dataset.info.unrecognized_compartments
        );
    }
    Ok(())
}

fn cmd_info(dataset_path: &Path) -> AppResult<()> {
    let dataset = load_dataset(dataset_path)?;
    let info = &dataset.info;

    println!("Dataset: {}", dataset_path.display());
    println!("  Format: {:?}", info.format);
    println!("  Rows: {}", info.row_count);
    println!("  Loaded at: {}", info.loaded_at.to_rfc3339());
    println!("\nRows per compartment:");
    for (compartment, count) in &info.compartment_counts {
        println!("  {:<12} {}", compartment, count);
    }
    Ok(())
}

/// Build a dashboard session from config + flags. Flags win over config.
fn open_session(args: &SessionArgs) -> AppResult<Dashboard> {
    let (mut config, config_dir) = match &args.config {
        Some(path) => (load_config(path)?, path.parent().map(Path::to_path_buf)),
        None => (DashboardConfig::default(), None),
    };

    if let Some(compartment) = args.compartment {
        config.defaults.compartment = compartment;
    }
    if args.no_polymers {
        config.defaults.polymers.clear();
    } else if !args.polymers.is_empty() {
        config.defaults.polymers = args.polymers.clone();
    }
    if args.token_match {
        config.polymer_matching = PolymerMatching::Token;
    }

    let dataset_path = match &args.dataset {
        Some(path) => path.clone(),
        None => config.dataset_path(config_dir.as_deref()).ok_or_else(|| {
            AppError::InvalidInput(
                "No dataset given; pass --dataset or set `dataset` in the config".to_string(),
            )
        })?,
    };

    info!(
        dataset = %dataset_path.display(),
        compartment = %config.defaults.compartment,
        polymers = config.defaults.polymers.len(),
        "opening dashboard session"
    );
    let dataset = load_dataset(&dataset_path)?;
    Dashboard::new(dataset.table, &config)
}

fn cmd_summary(args: &SessionArgs) -> AppResult<()> {
    let mut dashboard = open_session(args)?;
    let view = dashboard.view()?;
    let polymers = dashboard.polymers()?;

    println!("{}", dashboard.title());
    println!("  Compartment: Plastic + {}", view.compartment);
    if polymers.is_empty() {
        println!("  Polymer types: (none selected, matching every row)");
    } else {
        let names: Vec<_> = polymers.iter().map(|p| p.abbrev()).collect();
        println!("  Polymer types: {}", names.join(", "));
    }
    println!("  Matching: {:?}", dashboard.matching()?);
    println!("  Filtered rows: {}", dashboard.filtered()?.len());
    println!();
    println!("  Number of additives:  {}", view.metrics.additive_count);
    println!("  Number of references: {}", view.metrics.reference_count);
    println!();
    for chart in [&view.plastic_chart, &view.compartment_chart] {
        let title = chart.title.as_deref().unwrap_or("Chart");
        match chart.y_axis.range {
            Some([lo, hi]) => println!(
                "  {}: {} bars, y axis {} to {}",
                title,
                chart.bars.len(),
                lo,
                hi
            ),
            None => println!("  {}: no data", title),
        }
    }
    Ok(())
}

fn write_or_print(content: &str, output: Option<&Path>, what: &str) -> AppResult<()> {
    if let Some(path) = output {
        std::fs::write(path, content)?;
        println!("✓ Exported {} to {}", what, path.display());
    } else {
        print!("{}", content);
        if !content.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}

fn cmd_chart(target: ChartTarget, args: &SessionArgs, output: Option<&Path>) -> AppResult<()> {
    let mut dashboard = open_session(args)?;
    let chart = dashboard.chart(target.into())?;
    let json = chart_to_json(&chart)?;
    write_or_print(&json, output, "chart specification")
}

fn cmd_aggregate(
    target: ChartTarget,
    args: &SessionArgs,
    output: Option<&Path>,
) -> AppResult<()> {
    let mut dashboard = open_session(args)?;
    let summary = dashboard.summary(target.into())?;
    let csv = aggregate_to_csv(&summary)?;
    write_or_print(&csv, output, "summary")
}
