//! Serializable analysis options.
//!
//! An optional TOML file tunes the read-side of a run — which episodes the
//! chart and summary keep, and how the chart draws them. Every field has a
//! default, so a missing file, an empty file, and any subset of tables all
//! work. CLI flags override loaded values at the call site.

use std::path::Path;

use drawlab_core::{CatalogFilter, Series};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the options layer.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse '{path}' as TOML")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Options for one analysis run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub filter: FilterConfig,
    pub chart: ChartConfig,
}

/// Window/threshold selection applied to the finished catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Inclusive lower bound on episode start locations.
    pub min_loc: usize,
    /// Inclusive upper bound on episode end locations; the whole record
    /// when absent.
    pub max_loc: Option<usize>,
    /// Minimum magnitude to keep.
    pub threshold: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_loc: 0,
            max_loc: None,
            threshold: 0.0,
        }
    }
}

impl FilterConfig {
    /// Concrete filter for a given record.
    pub fn resolve(&self, series: &Series) -> CatalogFilter {
        CatalogFilter {
            min_loc: self.min_loc,
            max_loc: self.max_loc.unwrap_or(series.len()),
            threshold: self.threshold,
        }
    }
}

/// Display options for the rendered chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Mark peak locations.
    pub show_peaks: bool,
    /// Mark valley locations.
    pub show_valleys: bool,
    /// Vertical offset of the episode rails above the peak value.
    pub offset: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            show_peaks: true,
            show_valleys: true,
            offset: 10.0,
        }
    }
}

impl AnalysisConfig {
    /// Load options from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })
    }

    /// Parse options from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}
