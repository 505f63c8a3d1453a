//! Analysis orchestration — preprocess, locate extrema, evaluate peaks in
//! parallel, and summarize the run.

use drawlab_core::{analyze_peak, DrawdownCatalog, DrawdownKind, Extrema, Series};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Version stamp for persisted run summaries. Unknown newer versions are
/// rejected on load.
pub const SCHEMA_VERSION: u32 = 1;

/// Everything produced by one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub series: Series,
    pub extrema: Extrema,
    pub catalog: DrawdownCatalog,
    /// BLAKE3 fingerprint of the preprocessed record.
    pub dataset_hash: String,
}

/// Run the full pipeline over raw readings.
///
/// Per-peak evaluation is pure and independent, so peaks are analyzed on
/// the rayon pool; the indexed collect re-sequences results into
/// peak-index order, making the outcome identical to the sequential
/// [`DrawdownCatalog::analyze`].
pub fn run_analysis(readings: Vec<f64>) -> AnalysisRun {
    let series = Series::from_raw(readings);
    let dataset_hash = dataset_hash(&series);
    let extrema = Extrema::locate(&series);
    log::info!(
        "located {} peaks and {} valleys over {} readings",
        extrema.peaks.len(),
        extrema.valleys.len(),
        series.len()
    );

    let entries: Vec<_> = (1..extrema.analyzable_peaks())
        .into_par_iter()
        .map(|i| analyze_peak(&series, &extrema, i))
        .collect();
    let catalog = DrawdownCatalog::from_entries(entries);
    log::debug!("resolved {} drawdown episodes", catalog.len());

    AnalysisRun {
        series,
        extrema,
        catalog,
        dataset_hash,
    }
}

/// Serializable digest of a run for the JSON artifact and the CLI block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub schema_version: u32,
    pub reading_count: usize,
    /// Includes the synthetic anchor peak.
    pub peak_count: usize,
    pub valley_count: usize,
    pub drawdown_count: usize,
    pub filling_count: usize,
    pub draining_count: usize,
    pub max_magnitude: f64,
    pub dataset_hash: String,
}

impl RunSummary {
    pub fn from_run(run: &AnalysisRun) -> Self {
        let filling_count = run
            .catalog
            .iter()
            .filter(|d| d.kind == DrawdownKind::Filling)
            .count();
        let max_magnitude = run
            .catalog
            .iter()
            .map(|d| d.magnitude)
            .max_by(f64::total_cmp)
            .unwrap_or(0.0);
        Self {
            schema_version: SCHEMA_VERSION,
            reading_count: run.series.len(),
            peak_count: run.extrema.peaks.len(),
            valley_count: run.extrema.valleys.len(),
            drawdown_count: run.catalog.len(),
            filling_count,
            draining_count: run.catalog.len() - filling_count,
            max_magnitude,
            dataset_hash: run.dataset_hash.clone(),
        }
    }
}

fn dataset_hash(series: &Series) -> String {
    let mut hasher = blake3::Hasher::new();
    for v in series.values() {
        hasher.update(&v.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}
