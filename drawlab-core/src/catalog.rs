//! Drawdown catalog — ordered results for export and display filtering.

use crate::classify::analyze_peak;
use crate::drawdown::Drawdown;
use crate::extrema::Extrema;
use crate::series::Series;

/// Window/threshold query used by the visualization layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogFilter {
    /// Inclusive lower bound on episode start locations.
    pub min_loc: usize,
    /// Inclusive upper bound on episode end locations.
    pub max_loc: usize,
    /// Minimum magnitude to keep.
    pub threshold: f64,
}

impl CatalogFilter {
    /// The whole record with no magnitude floor.
    pub fn for_series(series: &Series) -> Self {
        Self {
            min_loc: 0,
            max_loc: series.len(),
            threshold: 0.0,
        }
    }

    pub fn matches(&self, d: &Drawdown) -> bool {
        d.spans_within(self.min_loc, self.max_loc) && d.magnitude >= self.threshold
    }
}

/// Episodes in peak-index order. Append-only during construction,
/// read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawdownCatalog {
    entries: Vec<Drawdown>,
}

impl DrawdownCatalog {
    /// Analyze every true peak in index order.
    pub fn analyze(series: &Series, extrema: &Extrema) -> Self {
        let entries = (1..extrema.analyzable_peaks())
            .map(|i| analyze_peak(series, extrema, i))
            .collect();
        Self { entries }
    }

    /// Assemble from per-peak results computed elsewhere (e.g. in
    /// parallel). Entries must already be in peak-index order.
    pub fn from_entries(entries: Vec<Drawdown>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].index < w[1].index));
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Drawdown] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Drawdown> {
        self.entries.iter()
    }

    /// Episodes whose span lies inside the window and whose magnitude
    /// meets the threshold, in index order.
    pub fn filtered(&self, filter: &CatalogFilter) -> Vec<&Drawdown> {
        self.entries.iter().filter(|d| filter.matches(d)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(raw: &[f64]) -> (Series, DrawdownCatalog) {
        let series = Series::from_raw(raw.to_vec());
        let extrema = Extrema::locate(&series);
        let catalog = DrawdownCatalog::analyze(&series, &extrema);
        (series, catalog)
    }

    #[test]
    fn worked_record_yields_one_episode() {
        let (_, c) = catalog(&[0.0, 10.0, 2.0, 10.0, 0.0]);
        assert_eq!(c.len(), 1);
        assert_eq!(c.entries()[0].index, 1);
    }

    #[test]
    fn single_reading_yields_an_empty_catalog() {
        let (_, c) = catalog(&[9.99]);
        assert!(c.is_empty());
    }

    #[test]
    fn entries_stay_in_peak_index_order() {
        let (_, c) = catalog(&[2.0, 7.0, 3.0, 5.0, 1.0, 8.0, 4.0, 6.0, 0.0]);
        assert!(c.entries().windows(2).all(|w| w[0].index < w[1].index));
    }

    #[test]
    fn filter_by_window_and_threshold() {
        let (series, c) = catalog(&[5.0, 1.0, 4.0, 2.0, 3.0, 0.0, 6.0]);
        assert_eq!(c.len(), 2);

        let all = CatalogFilter::for_series(&series);
        assert_eq!(c.filtered(&all).len(), 2);

        // Magnitudes are 3 (loc 3 peak) and 1 (loc 5 peak).
        let deep = CatalogFilter {
            threshold: 2.0,
            ..CatalogFilter::for_series(&series)
        };
        let kept = c.filtered(&deep);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].index, 1);

        let narrow = CatalogFilter {
            min_loc: 3,
            max_loc: series.len(),
            threshold: 0.0,
        };
        let kept = c.filtered(&narrow);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].index, 2);
    }
}
