//! DrawLab Core — storage series, extrema location, and drawdown analysis.
//!
//! This crate contains the analytical heart of the toolkit:
//! - `Series`: an immutable storage record with a synthetic leading sentinel
//! - `Extrema`: peak and valley locations from a second-difference pass
//! - Boundary resolution: start/end search around each true peak
//! - Classification: filling vs draining episodes with forced limb symmetry
//! - `DrawdownCatalog`: ordered, filterable collection of finished episodes
//!
//! Everything here is pure computation over immutable values. Per-peak
//! analysis has no cross-peak dependencies, so callers may evaluate peaks
//! in parallel as long as results are re-sequenced into index order.

pub mod boundary;
pub mod catalog;
pub mod classify;
pub mod drawdown;
pub mod extrema;
pub mod series;

pub use boundary::Boundaries;
pub use catalog::{CatalogFilter, DrawdownCatalog};
pub use classify::analyze_peak;
pub use drawdown::{Drawdown, DrawdownKind};
pub use extrema::{Extrema, ExtremaSet};
pub use series::{Series, SENTINEL};
