//! DrawLab Runner — orchestration around the analysis core.
//!
//! This crate builds on `drawlab-core` to provide:
//! - Record loading from single-column CSV files
//! - The analysis run itself, with parallel per-peak evaluation
//! - Catalog CSV and run-summary JSON export
//! - TOML options for filtering and charting

pub mod config;
pub mod data_loader;
pub mod export;
pub mod runner;

pub use config::{AnalysisConfig, ChartConfig, ConfigError, FilterConfig};
pub use data_loader::{load_readings, LoadError};
pub use export::{
    export_catalog_csv, export_summary_json, import_summary_json, CSV_COLUMNS,
};
pub use runner::{run_analysis, AnalysisRun, RunSummary, SCHEMA_VERSION};
