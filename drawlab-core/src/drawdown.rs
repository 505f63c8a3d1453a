//! Drawdown record — one storage-depletion episode around a true peak.

use serde::{Deserialize, Serialize};

/// Which limb limited the episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawdownKind {
    /// The rise to the peak was the smaller limb.
    Filling,
    /// The depletion after the peak was the smaller limb.
    Draining,
}

impl DrawdownKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Filling => "filling",
            Self::Draining => "draining",
        }
    }
}

/// A finished episode: peak, resolved boundaries, limb depths, and the
/// covered slice of the record.
///
/// `filling` and `draining` keep their pre-classification values. The
/// forced terminal value (`end_val` for filling episodes, `start_val` for
/// draining ones) approximates the limiting depth and need not equal the
/// series reading at the recomputed boundary location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawdown {
    /// Peak sequence index; index 0 is the synthetic anchor, so real
    /// episodes start at 1.
    #[serde(rename = "i")]
    pub index: usize,
    pub peak_loc: usize,
    pub peak_val: f64,
    pub start_loc: usize,
    pub start_val: f64,
    pub end_loc: usize,
    pub end_val: f64,
    /// Peak value minus start value (ascending limb).
    pub filling: f64,
    /// Peak value minus end value (descending limb).
    pub draining: f64,
    /// The limiting depth: min(filling, draining).
    pub magnitude: f64,
    /// end_loc − start_loc, after classification adjusted the boundary.
    pub duration: usize,
    /// Series slice from start_loc to end_loc, both inclusive.
    pub data: Vec<f64>,
    #[serde(rename = "type")]
    pub kind: DrawdownKind,
}

impl Drawdown {
    /// Whether the episode's span and depth satisfy a window/threshold
    /// query (see [`crate::catalog::CatalogFilter`]).
    pub fn spans_within(&self, min_loc: usize, max_loc: usize) -> bool {
        self.start_loc >= min_loc && self.end_loc <= max_loc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Drawdown {
        Drawdown {
            index: 1,
            peak_loc: 2,
            peak_val: 10.0,
            start_loc: 1,
            start_val: 2.0,
            end_loc: 3,
            end_val: 2.0,
            filling: 10.0,
            draining: 8.0,
            magnitude: 8.0,
            duration: 2,
            data: vec![0.0, 10.0, 2.0],
            kind: DrawdownKind::Draining,
        }
    }

    #[test]
    fn serialization_roundtrip() {
        let d = sample();
        let json = serde_json::to_string(&d).unwrap();
        let back: Drawdown = serde_json::from_str(&json).unwrap();
        assert_eq!(d, back);
    }

    #[test]
    fn serialized_names_match_the_export_schema() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"i\":1"));
        assert!(json.contains("\"type\":\"draining\""));
        assert!(!json.contains("\"index\""));
        assert!(!json.contains("\"kind\""));
    }

    #[test]
    fn kind_names() {
        assert_eq!(DrawdownKind::Filling.as_str(), "filling");
        assert_eq!(DrawdownKind::Draining.as_str(), "draining");
    }

    #[test]
    fn spans_within_window() {
        let d = sample();
        assert!(d.spans_within(0, 5));
        assert!(d.spans_within(1, 3));
        assert!(!d.spans_within(2, 5));
        assert!(!d.spans_within(0, 2));
    }
}
