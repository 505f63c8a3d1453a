//! DrawLab CLI — analyze a PAWS record and export its drawdown catalog.
//!
//! `drawlab <input.csv>` reads a single-column storage record, runs the
//! drawdown analysis, and writes `<basename>_output.csv` beside the input
//! (override with `--output`). Optional extras: a TOML options file, an
//! SVG chart of the record with episode overlays, and a JSON run summary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use drawlab_chart::{render_svg, ChartStyle};
use drawlab_runner::{
    export_catalog_csv, export_summary_json, load_readings, run_analysis, AnalysisConfig,
    RunSummary,
};

#[derive(Parser)]
#[command(
    name = "drawlab",
    about = "Plant-available water storage drawdown analyzer"
)]
struct Cli {
    /// Input CSV with a single column of storage readings.
    input: PathBuf,

    /// Output CSV path. Defaults to `<input basename>_output.csv`.
    #[arg(long)]
    output: Option<PathBuf>,

    /// TOML options file with [filter] and [chart] tables.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minimum magnitude for the chart and summary filter
    /// (overrides the options file).
    #[arg(long)]
    threshold: Option<f64>,

    /// Render an SVG chart of the record with drawdown overlays.
    #[arg(long)]
    chart: Option<PathBuf>,

    /// Also write a JSON run summary next to the output CSV.
    #[arg(long, default_value_t = false)]
    summary: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(threshold) = cli.threshold {
        config.filter.threshold = threshold;
    }

    let readings = load_readings(&cli.input)?;
    log::info!(
        "loaded {} readings from {}",
        readings.len(),
        cli.input.display()
    );

    let run = run_analysis(readings);
    let summary = RunSummary::from_run(&run);

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input));
    let csv = export_catalog_csv(&run.catalog)?;
    std::fs::write(&output, csv)
        .with_context(|| format!("failed to write {}", output.display()))?;

    if cli.summary {
        let path = output.with_extension("json");
        std::fs::write(&path, export_summary_json(&summary)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Summary saved to: {}", path.display());
    }

    if let Some(chart_path) = &cli.chart {
        let filter = config.filter.resolve(&run.series);
        let style = ChartStyle {
            show_peaks: config.chart.show_peaks,
            show_valleys: config.chart.show_valleys,
            offset: config.chart.offset,
            ..ChartStyle::default()
        };
        let svg = render_svg(&run.series, &run.catalog, &filter, &style)?;
        std::fs::write(chart_path, svg)
            .with_context(|| format!("failed to write {}", chart_path.display()))?;
        println!("Chart saved to: {}", chart_path.display());
    }

    print_summary(&summary, &config.filter.resolve(&run.series), &run);
    println!("Catalog saved to: {}", output.display());

    Ok(())
}

/// `<basename>_output.csv` beside the input file.
fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}_output.csv"))
}

fn print_summary(
    summary: &RunSummary,
    filter: &drawlab_core::CatalogFilter,
    run: &drawlab_runner::AnalysisRun,
) {
    println!();
    println!("=== Drawdown Analysis ===");
    println!("Readings:       {}", summary.reading_count);
    if summary.peak_count > 0 {
        println!(
            "Peaks:          {} (1 synthetic anchor)",
            summary.peak_count
        );
    } else {
        println!("Peaks:          0");
    }
    println!("Valleys:        {}", summary.valley_count);
    println!("Drawdowns:      {}", summary.drawdown_count);
    println!(
        "  filling:      {}  draining: {}",
        summary.filling_count, summary.draining_count
    );
    println!("Max magnitude:  {:.2}", summary.max_magnitude);
    if filter.threshold > 0.0 {
        println!(
            "Above {:.2}:     {}",
            filter.threshold,
            run.catalog.filtered(filter).len()
        );
    }
    println!("Dataset:        {}", &summary.dataset_hash[..12]);
    println!();
}
