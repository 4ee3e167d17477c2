use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use customsduty::{
    dataset::assemble,
    export::{export_dataset, ExportFormat, RunManifest, MANIFEST_NAME},
    report::{self, render, ComparativeReport, CountryReport, GlobalAnalysis},
    series::{country_seed, RngNoise},
    ReferenceData, SeriesGenerator, DEFAULT_REFERENCE,
};
use std::{path::PathBuf, time::Instant};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

const FOCUS_COUNTRIES: [&str; 5] = ["China", "Canada", "Mexico", "Germany", "Japan"];

/// Synthetic U.S. customs duty dataset generator, 2002-2025.
#[derive(Parser)]
#[command(name = "customsduty", version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the dataset, export it and print the reports (default)
    Generate(GenerateArgs),

    /// Write the built-in reference data as YAML
    DumpReference {
        #[arg(short, long, default_value = "reference.yaml")]
        out: PathBuf,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Output directory for exports and the run manifest
    #[arg(short, long, default_value = "output")]
    out_dir: PathBuf,

    /// Base seed; drawn at random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// YAML reference file replacing the built-in tables
    #[arg(short, long)]
    reference: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,

    /// Country to print a focused report for (repeatable)
    #[arg(long = "report", default_values = FOCUS_COUNTRIES)]
    report: Vec<String>,

    /// Comma-separated countries for the comparative report
    #[arg(long, value_delimiter = ',', default_values = FOCUS_COUNTRIES)]
    compare: Vec<String>,

    /// Length of the final ranking
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// Skip printing reports
    #[arg(long)]
    quiet_reports: bool,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Generate(cli.generate)) {
        Commands::Generate(args) => generate(args),
        Commands::DumpReference { out } => {
            DEFAULT_REFERENCE.write_yaml(&out)?;
            info!(path = %out.display(), "wrote reference data");
            Ok(())
        }
    }
}

fn generate(args: GenerateArgs) -> Result<()> {
    let start = Instant::now();

    let loaded;
    let reference: &ReferenceData = match &args.reference {
        Some(path) => {
            loaded = ReferenceData::from_path(path)?;
            &loaded
        }
        None => &*DEFAULT_REFERENCE,
    };
    let problems = reference.validate();
    if !problems.is_empty() {
        warn!(
            count = problems.len(),
            "reference data has problems; affected countries will be skipped"
        );
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, "generating");

    let generator = SeriesGenerator::new(reference);
    let assembly = assemble(&generator, |idx| RngNoise::seeded(country_seed(seed, idx)));

    let violations = assembly.dataset.validate();
    for v in &violations {
        warn!("dataset check: {}", v);
    }

    let artifacts = export_dataset(&assembly.dataset, &args.out_dir, args.format)?;
    let manifest_path = args.out_dir.join(MANIFEST_NAME);
    RunManifest::new(&assembly, seed, violations.len(), artifacts).write(&manifest_path)?;
    info!(
        path = %manifest_path.display(),
        rows = assembly.dataset.len(),
        skipped = assembly.skipped.len(),
        "run complete in {:?}",
        start.elapsed()
    );

    if args.quiet_reports {
        return Ok(());
    }

    let dataset = &assembly.dataset;
    let Some(analysis) = GlobalAnalysis::build(dataset, 10) else {
        warn!("dataset is empty; no reports");
        return Ok(());
    };
    render::print_global(&analysis);

    for country in &args.report {
        match CountryReport::build(dataset, country, &reference.policy_events) {
            Ok(r) => render::print_country(&r),
            Err(e) => warn!("skipping report: {}", e),
        }
    }

    render::print_comparative(&ComparativeReport::build(dataset, &args.compare));

    println!("\nFinal ranking by duties collected, {}", analysis.latest_year);
    render::ranking_table(&report::top_by_duties(
        dataset.in_year(analysis.latest_year),
        args.top,
    ))
    .printstd();

    Ok(())
}
