//! Boundary resolution — start/end search around a true peak.
//!
//! For peak index i the start is found by scanning left and the end by
//! scanning right, each in two steps:
//! 1. find the nearest neighboring peak at least as large ("≥", not ">"),
//!    and take the lowest valley between it and this peak;
//! 2. refine with exact zero crossings in the intervening window (the
//!    rightmost zero on the left side, the leftmost on the right side).
//!
//! Open boundaries fall back deterministically: location 0 on the left,
//! and on the right the last location, improved to the lowest remaining
//! valley when that valley sits strictly closer to the peak.
//!
//! Everything here is a pure function of the series and the precomputed
//! extrema; per-peak calls are independent of each other.

use crate::extrema::Extrema;
use crate::series::Series;

/// Provisional start/end boundaries for one episode, before
/// classification adjusts them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundaries {
    pub start_loc: usize,
    pub start_val: f64,
    pub end_loc: usize,
    pub end_val: f64,
}

/// Resolve both boundaries of the episode around true peak `i`.
///
/// `i` must lie in `1..extrema.analyzable_peaks()`.
pub fn resolve(series: &Series, extrema: &Extrema, i: usize) -> Boundaries {
    let (start_loc, start_val) = resolve_start(series, extrema, i);
    let (end_loc, end_val) = resolve_end(series, extrema, i);
    Boundaries {
        start_loc,
        start_val,
        end_loc,
        end_val,
    }
}

/// Left scan: rightmost earlier peak with value ≥ this peak, lowest valley
/// after it, then the rightmost exact zero before the peak wins.
pub fn resolve_start(series: &Series, extrema: &Extrema, i: usize) -> (usize, f64) {
    debug_assert!(i >= 1 && i < extrema.analyzable_peaks());
    let s = series.values();
    let peaks = &extrema.peaks;
    let valleys = &extrema.valleys;
    let peak_loc = peaks.loc(i);
    let peak_val = peaks.val(i);

    let mut start_loc = 0;
    if let Some(j) = peaks.vals()[..i].iter().rposition(|&v| v >= peak_val) {
        // Lowest trough between that peak and this one; ties keep the
        // earliest, matching the argmin the search is defined by.
        let hi = i.min(valleys.len());
        if j < hi {
            let k = j + argmin(&valleys.vals()[j..hi]);
            start_loc = valleys.loc(k);
        }
    }

    // A zero crossing strictly between the provisional start and the peak
    // overrides the valley estimate; the rightmost one is the closest.
    if let Some(zero) = (start_loc + 1..peak_loc).rev().find(|&t| s[t] == 0.0) {
        start_loc = zero;
    }

    (start_loc, s[start_loc])
}

/// Right scan, mirror of the start search: leftmost later peak with value
/// ≥ this peak, lowest valley before it, then zero-crossing refinement.
pub fn resolve_end(series: &Series, extrema: &Extrema, i: usize) -> (usize, f64) {
    debug_assert!(i >= 1 && i < extrema.analyzable_peaks());
    let s = series.values();
    let peaks = &extrema.peaks;
    let valleys = &extrema.valleys;
    let peak_loc = peaks.loc(i);
    let peak_val = peaks.val(i);

    let mut end_loc = s.len() - 1;
    if let Some(offset) = peaks.vals()[i + 1..].iter().position(|&v| v >= peak_val) {
        let k = i + 1 + offset;
        let hi = k.min(valleys.len());
        if i < hi {
            let v = i + argmin(&valleys.vals()[i..hi]);
            end_loc = valleys.loc(v);
        }
    }

    if let Some(zero) = (peak_loc + 1..end_loc).find(|&t| s[t] == 0.0) {
        // Any zero in the window is strictly closer than the provisional end.
        end_loc = zero;
    } else {
        // No zero: adopt the lowest valley from here up to the provisional
        // end bound, but only when it sits strictly closer to the peak.
        let hi = end_loc.min(valleys.len());
        if i < hi {
            let v = i + argmin(&valleys.vals()[i..hi]);
            let candidate = valleys.loc(v);
            if candidate < end_loc {
                end_loc = candidate;
            }
        }
    }

    (end_loc, s[end_loc])
}

/// Index of the smallest value; the first occurrence wins ties.
fn argmin(vals: &[f64]) -> usize {
    let mut best = 0;
    for (idx, &v) in vals.iter().enumerate().skip(1) {
        if v < vals[best] {
            best = idx;
        }
    }
    best
}
