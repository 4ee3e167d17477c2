use customsduty::{
    export::read_dataset,
    report::{render, GlobalAnalysis},
};
use std::{env, path::Path, process::exit};

fn main() {
    // Expect exactly one argument: a CSV or Parquet export.
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <EXPORT_FILE>", args[0]);
        exit(1);
    }
    if let Err(e) = inspect(Path::new(&args[1])) {
        eprintln!("Error: {:#}", e);
        exit(1);
    }
}

/// Load the export and print its shape, column summaries and invariant check.
fn inspect(path: &Path) -> anyhow::Result<()> {
    let dataset = read_dataset(path)?;

    println!("=== Export: {} ===", path.display());
    println!("Rows:      {}", dataset.len());
    println!("Countries: {}", dataset.countries().join(", "));
    if let Some(year) = dataset.latest_year() {
        println!("Latest:    {}", year);
    }
    println!();

    if let Some(analysis) = GlobalAnalysis::build(&dataset, 0) {
        render::descriptive_table(&analysis.descriptive).printstd();
    }

    let violations = dataset.validate();
    println!();
    if violations.is_empty() {
        println!("All checks passed");
    } else {
        println!("{} violations:", violations.len());
        for v in &violations {
            println!("- {}", v);
        }
    }
    Ok(())
}
