use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

use sheetdiff::{BatchRunner, DetectionConfig, RegionDetector, SheetOutcome, discover_candidates};

#[derive(Parser)]
#[command(name = "sheetdiff")]
#[command(about = "Detect handwritten answer regions by diffing filled sheets against a blank template")]
struct Cli {
    /// Path to the blank template image
    #[arg(value_name = "TEMPLATE")]
    reference: PathBuf,

    /// Directory of scanned, filled sheets (jpg/jpeg/png)
    #[arg(value_name = "SHEETS")]
    candidates: PathBuf,

    /// Directory for per-sheet analysis records
    #[arg(short, long, default_value = "analysis_results")]
    out_dir: PathBuf,

    /// JSON file overriding the detection defaults
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write annotated previews with numbered boxes to this directory
    #[arg(long, value_name = "DIR")]
    annotate_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();

    let config = match &args.config {
        Some(path) => DetectionConfig::from_json_file(path)?,
        None => DetectionConfig::default(),
    };

    let detector = RegionDetector::from_reference_path(&args.reference, config)?;
    let (width, height) = detector.reference_dimensions();
    if args.verbose {
        println!("Template loaded: {width}x{height}");
    }

    let candidates = discover_candidates(&args.candidates)?;
    if candidates.is_empty() {
        anyhow::bail!("no candidate images found in {}", args.candidates.display());
    }
    println!("Found {} sheets to process.", candidates.len());

    let mut runner = BatchRunner::new(detector, args.out_dir);
    if let Some(dir) = args.annotate_dir {
        runner = runner.with_annotate_dir(dir);
    }

    let summary = runner.run(&candidates)?;

    println!("\n=== Batch Summary ===");
    println!("Processed: {}", summary.processed());
    println!("Skipped:   {}", summary.skipped());
    println!("Empty:     {}", summary.empty());

    for outcome in &summary.outcomes {
        match outcome {
            SheetOutcome::Processed {
                source,
                region_count,
            } => println!("  {source} -> {region_count} regions"),
            SheetOutcome::Skipped { source, reason } => {
                println!("  {source} -> skipped ({reason})")
            }
        }
    }

    Ok(())
}
