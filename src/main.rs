//! CLI entry point for the predictive maintenance preprocessing pipeline.

use anyhow::{anyhow, Result};
use clap::Parser;
use pm_preprocessing::{
    loader, EncodingPolicy, Pipeline, PipelineConfig, PipelineReport, DEFAULT_OUTPUT_DIR,
    DEFAULT_OUTPUT_NAME, DEFAULT_SOURCE_URL,
};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Predictive Maintenance Dataset Preprocessing",
    long_about = "Preprocesses the AI4I-style predictive maintenance dataset for model training.\n\n\
                  EXAMPLES:\n  \
                  # Process the default remote dataset\n  \
                  pm-preprocessing\n\n  \
                  # Process a local file into a custom directory\n  \
                  pm-preprocessing -s data/ai4i2020.csv -o results/\n\n  \
                  # Machine-readable report\n  \
                  pm-preprocessing --json | jq .rows_after"
)]
struct Args {
    /// CSV source: a local path or an HTTP(S) URL
    #[arg(short, long, default_value = DEFAULT_SOURCE_URL)]
    source: String,

    /// Output directory for the processed dataset
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output: String,

    /// Output file name (without extension)
    #[arg(long, default_value = DEFAULT_OUTPUT_NAME)]
    output_name: String,

    /// IQR fence multiplier for outlier clamping
    #[arg(long, default_value = "1.5")]
    iqr_multiplier: f64,

    /// Encode unknown product type values as null instead of failing
    #[arg(long)]
    lenient_encoding: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all progress logs; only outputs the final JSON report.
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    info!("Loading dataset from: {}", args.source);
    let data = match loader::load(&args.source) {
        Ok(df) => df,
        Err(e) => {
            // A source that cannot be loaded is reported and ends the run
            // without writing any output.
            error!("Failed to load dataset: {}", e);
            return Ok(());
        }
    };
    info!("Dataset loaded successfully: {:?}", data.shape());

    let encoding_policy = if args.lenient_encoding {
        EncodingPolicy::AllowMissing
    } else {
        EncodingPolicy::Strict
    };

    let config = PipelineConfig::builder()
        .output_dir(&args.output)
        .output_name(&args.output_name)
        .iqr_multiplier(args.iqr_multiplier)
        .encoding_policy(encoding_policy)
        .build()?;

    let mut builder = Pipeline::builder().config(config);

    if !args.quiet && !args.json {
        builder = builder.on_progress(|update| {
            info!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        });
    }

    let pipeline = builder.build()?;

    let original_shape = data.shape();
    match pipeline.process(data) {
        Ok(report) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_summary(&report, &args.source, original_shape);
            }
            Ok(())
        }
        Err(e) if e.is_abort() => {
            error!("Pipeline aborted: {}", e);
            Ok(())
        }
        Err(e) => {
            error!("Pipeline failed: {}", e);
            Err(anyhow!("Pipeline failed: {}", e))
        }
    }
}

/// Print a human-readable summary of the preprocessing results.
///
/// This is the default output when `--json` is not specified.
fn print_summary(report: &PipelineReport, source: &str, original_shape: (usize, usize)) {
    println!();
    println!("{}", "=".repeat(80));
    println!("PREPROCESSING COMPLETE");
    println!("{}", "=".repeat(80));
    println!();

    println!(
        "Input:  {} ({} rows x {} columns)",
        source, original_shape.0, original_shape.1
    );
    if let Some(ref path) = report.output_path {
        println!(
            "Output: {} ({} rows x {} columns)",
            path.display(),
            report.rows_after,
            report.columns_after
        );
    }
    println!();

    println!(
        "Rows removed:    {} ({:.1}%)",
        report.rows_removed,
        report.rows_removed_percentage()
    );
    println!(
        "Columns removed: {}",
        report.columns_before.saturating_sub(report.columns_after)
    );
    println!();

    if !report.clamp_bounds.is_empty() {
        println!("OUTLIER BOUNDS");
        println!("{}", "-".repeat(40));
        for bounds in &report.clamp_bounds {
            println!(
                "  {:<26} [{:.4}, {:.4}] ({} clamped)",
                bounds.column, bounds.lower, bounds.upper, bounds.values_clamped
            );
        }
        println!();
    }

    println!("PROCESSING STEPS");
    println!("{}", "-".repeat(40));
    for (i, step) in report.processing_steps.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
    println!();

    println!("Completed in {} ms at {}", report.duration_ms, report.generated_at);
    println!("{}", "=".repeat(80));
}
