//! Export — catalog CSV and run-summary JSON.
//!
//! The catalog CSV has a fixed column order, one row per drawdown; the
//! `data` column packs the covered series slice as a semicolon-delimited
//! number list so the field stays machine-splittable inside the CSV. The
//! JSON summary carries a `schema_version` field and unknown newer
//! versions are rejected on load.

use anyhow::{bail, Context, Result};
use drawlab_core::DrawdownCatalog;

use crate::runner::{RunSummary, SCHEMA_VERSION};

/// Fixed catalog schema.
pub const CSV_COLUMNS: [&str; 13] = [
    "i",
    "peak_loc",
    "peak_val",
    "start_loc",
    "start_val",
    "end_loc",
    "end_val",
    "filling",
    "draining",
    "duration",
    "magnitude",
    "data",
    "type",
];

/// Serialize the catalog to CSV, one row per drawdown in index order.
pub fn export_catalog_csv(catalog: &DrawdownCatalog) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(CSV_COLUMNS)?;

    for d in catalog.iter() {
        wtr.write_record([
            d.index.to_string(),
            d.peak_loc.to_string(),
            fmt_value(d.peak_val),
            d.start_loc.to_string(),
            fmt_value(d.start_val),
            d.end_loc.to_string(),
            fmt_value(d.end_val),
            fmt_value(d.filling),
            fmt_value(d.draining),
            d.duration.to_string(),
            fmt_value(d.magnitude),
            fmt_data(&d.data),
            d.kind.as_str().to_string(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Serialize a `RunSummary` to pretty JSON.
pub fn export_summary_json(summary: &RunSummary) -> Result<String> {
    serde_json::to_string_pretty(summary).context("failed to serialize RunSummary to JSON")
}

/// Deserialize a `RunSummary` from JSON, rejecting unknown schema versions.
pub fn import_summary_json(json: &str) -> Result<RunSummary> {
    let summary: RunSummary =
        serde_json::from_str(json).context("failed to deserialize RunSummary from JSON")?;
    if summary.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            summary.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(summary)
}

fn fmt_value(v: f64) -> String {
    format!("{v}")
}

fn fmt_data(data: &[f64]) -> String {
    data.iter()
        .map(|v| format!("{v}"))
        .collect::<Vec<_>>()
        .join(";")
}
