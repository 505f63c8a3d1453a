//! DrawLab Chart — SVG rendering of a storage record with drawdown
//! overlays.
//!
//! A pure read-side consumer of the finished catalog: the series line for
//! the requested window, peak/valley markers recomputed over that window,
//! and for each episode passing the filter a horizontal rail above the
//! peak with dashed drop lines to the start and end values and a
//! magnitude label.

use drawlab_core::{CatalogFilter, DrawdownCatalog, Series};
use plotters::element::DashedPathElement;
use plotters::prelude::*;
use thiserror::Error;

/// Errors from chart rendering.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("window [{min_loc}, {max_loc}) selects no readings")]
    EmptyWindow { min_loc: usize, max_loc: usize },

    #[error("chart rendering failed: {0}")]
    Backend(String),
}

/// Display options for the rendered chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    /// Mark peak locations with red triangles.
    pub show_peaks: bool,
    /// Mark valley locations with green triangles.
    pub show_valleys: bool,
    /// Vertical offset of the episode rails above the peak value.
    pub offset: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            show_peaks: true,
            show_valleys: true,
            offset: 10.0,
            width: 1024,
            height: 640,
        }
    }
}

/// Render the windowed record and its filtered episodes to an SVG string.
pub fn render_svg(
    series: &Series,
    catalog: &DrawdownCatalog,
    filter: &CatalogFilter,
    style: &ChartStyle,
) -> Result<String, ChartError> {
    let lo = filter.min_loc;
    let hi = filter.max_loc.min(series.len());
    if lo >= hi {
        return Err(ChartError::EmptyWindow {
            min_loc: lo,
            max_loc: hi,
        });
    }
    let data = &series.values()[lo..hi];

    let min_v = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max_v = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut y_lo = min_v - 1.2 * style.offset;
    let mut y_hi = max_v + 1.4 * style.offset;
    if y_lo >= y_hi {
        y_lo = min_v - 1.0;
        y_hi = max_v + 1.0;
    }
    let x_hi = (data.len() - 1).max(1) as f64;

    let mut svg = String::new();
    {
        let root =
            SVGBackend::with_string(&mut svg, (style.width, style.height)).into_drawing_area();
        root.fill(&WHITE).map_err(backend_err)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(12)
            .x_label_area_size(28)
            .y_label_area_size(42)
            .build_cartesian_2d(0.0..x_hi, y_lo..y_hi)
            .map_err(backend_err)?;
        chart.configure_mesh().draw().map_err(backend_err)?;

        chart
            .draw_series(LineSeries::new(
                data.iter().enumerate().map(|(x, &v)| (x as f64, v)),
                &BLUE,
            ))
            .map_err(backend_err)?;

        // Markers are re-derived over the window, so a zoomed chart marks
        // exactly what it shows.
        let (peak_marks, valley_marks) = window_reversals(data);
        if style.show_peaks {
            chart
                .draw_series(
                    peak_marks
                        .iter()
                        .map(|&x| TriangleMarker::new((x as f64, data[x]), 5, RED.filled())),
                )
                .map_err(backend_err)?;
        }
        if style.show_valleys {
            chart
                .draw_series(
                    valley_marks
                        .iter()
                        .map(|&x| TriangleMarker::new((x as f64, data[x]), 5, GREEN.filled())),
                )
                .map_err(backend_err)?;
        }

        for d in catalog.filtered(filter) {
            let x0 = (d.start_loc - lo) as f64;
            let x1 = x0 + d.duration as f64;
            let rail = d.peak_val + style.offset;

            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![(x0, rail), (x1, rail)],
                    YELLOW.mix(0.5).stroke_width(7),
                )))
                .map_err(backend_err)?;
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![(x0, rail), (x1, rail)],
                    BLACK.stroke_width(1),
                )))
                .map_err(backend_err)?;
            chart
                .draw_series(std::iter::once(DashedPathElement::new(
                    vec![(x0, rail), (x0, d.start_val)],
                    4,
                    3,
                    BLACK.stroke_width(1),
                )))
                .map_err(backend_err)?;
            chart
                .draw_series(std::iter::once(DashedPathElement::new(
                    vec![(x1, rail), (x1, d.end_val)],
                    4,
                    3,
                    BLACK.stroke_width(1),
                )))
                .map_err(backend_err)?;
            chart
                .draw_series(std::iter::once(Text::new(
                    format!("{:.1}", d.magnitude),
                    ((x0 + x1) / 2.0, d.peak_val + style.offset * 1.1),
                    ("sans-serif", 13).into_font(),
                )))
                .map_err(backend_err)?;
        }

        root.present().map_err(backend_err)?;
    }

    Ok(svg)
}

/// Peak/valley marker positions within a window, from the same
/// second-difference reversal rule the analysis uses (no sentinel, no
/// synthetic anchor).
fn window_reversals(data: &[f64]) -> (Vec<usize>, Vec<usize>) {
    let mut peaks = Vec::new();
    let mut valleys = Vec::new();
    if data.len() < 3 {
        return (peaks, valleys);
    }
    let sign: Vec<i8> = data
        .windows(2)
        .map(|w| if w[1] - w[0] > 0.0 { 1 } else { 0 })
        .collect();
    for t in 0..sign.len() - 1 {
        match sign[t + 1] - sign[t] {
            -1 => peaks.push(t + 1),
            1 => valleys.push(t + 1),
            _ => {}
        }
    }
    (peaks, valleys)
}

fn backend_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Backend(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use drawlab_core::{DrawdownCatalog, Extrema};

    fn worked_run() -> (Series, DrawdownCatalog) {
        let series = Series::from_raw(vec![0.0, 10.0, 2.0, 10.0, 0.0]);
        let extrema = Extrema::locate(&series);
        let catalog = DrawdownCatalog::analyze(&series, &extrema);
        (series, catalog)
    }

    #[test]
    fn renders_the_worked_record() {
        let (series, catalog) = worked_run();
        let filter = CatalogFilter::for_series(&series);
        let svg = render_svg(&series, &catalog, &filter, &ChartStyle::default()).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
    }

    #[test]
    fn renders_without_markers() {
        let (series, catalog) = worked_run();
        let filter = CatalogFilter::for_series(&series);
        let style = ChartStyle {
            show_peaks: false,
            show_valleys: false,
            ..ChartStyle::default()
        };
        assert!(render_svg(&series, &catalog, &filter, &style).is_ok());
    }

    #[test]
    fn empty_window_is_an_error() {
        let (series, catalog) = worked_run();
        let filter = CatalogFilter {
            min_loc: 4,
            max_loc: 4,
            threshold: 0.0,
        };
        let err = render_svg(&series, &catalog, &filter, &ChartStyle::default()).unwrap_err();
        assert!(matches!(err, ChartError::EmptyWindow { .. }));
    }

    #[test]
    fn window_reversal_marks_match_the_record_shape() {
        // Raw window without a sentinel: peak at 2, valley at 3, peak at 4.
        let (peaks, valleys) = window_reversals(&[0.0, 10.0, 2.0, 10.0, 0.0]);
        assert_eq!(peaks, vec![1, 3]);
        assert_eq!(valleys, vec![2]);
    }
}
