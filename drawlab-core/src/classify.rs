//! Episode classification — filling vs draining, with forced limb symmetry.
//!
//! The smaller limb limits the episode. Its terminal value is mirrored
//! onto the other side and the affected boundary is recomputed as the
//! nearest location past the peak where the series dips to that depth.
//! The mirrored value is an approximation of the limiting depth: it is
//! deliberately NOT re-read from the series at the recomputed location.

use crate::boundary::{self, Boundaries};
use crate::drawdown::{Drawdown, DrawdownKind};
use crate::extrema::Extrema;
use crate::series::Series;

/// Analyze a single true peak (index `i` in `1..analyzable_peaks()`) into
/// a finished drawdown record.
pub fn analyze_peak(series: &Series, extrema: &Extrema, i: usize) -> Drawdown {
    let peak_loc = extrema.peaks.loc(i);
    let peak_val = extrema.peaks.val(i);
    let Boundaries {
        mut start_loc,
        mut start_val,
        mut end_loc,
        mut end_val,
    } = boundary::resolve(series, extrema, i);

    let filling = peak_val - start_val;
    let draining = peak_val - end_val;
    let magnitude = filling.min(draining);

    let s = series.values();
    let kind = if magnitude == filling {
        // The rise was the limiting limb: mirror its depth onto the right
        // side and stop at the first location past the peak that reaches it.
        end_val = start_val;
        if let Some(loc) = (peak_loc + 1..s.len()).find(|&t| s[t] <= end_val) {
            end_loc = loc;
        }
        DrawdownKind::Filling
    } else {
        // The depletion was the limiting limb: mirror onto the left side
        // and back up to the last location before the peak at that depth.
        start_val = end_val;
        if let Some(loc) = (0..peak_loc).rev().find(|&t| s[t] <= start_val) {
            start_loc = loc;
        }
        DrawdownKind::Draining
    };

    Drawdown {
        index: i,
        peak_loc,
        peak_val,
        start_loc,
        start_val,
        end_loc,
        end_val,
        filling,
        draining,
        magnitude,
        duration: end_loc - start_loc,
        data: series.window(start_loc, end_loc),
        kind,
    }
}
