//! PNG renderers. Each one maps a dataset (or the raw table) onto exactly
//! one image file through the `plotters` bitmap backend.

use std::ops::Range;

use plotters::style::RGBColor;

pub mod combined;
pub mod dashboard;
pub mod growth;
pub mod ratio;
pub mod table;

pub use combined::render_combined;
pub use dashboard::render_dashboard;
pub use growth::{render_moves_growth, render_moves_vs_theory, render_time_growth};
pub use ratio::render_performance_diff;
pub use table::render_table;

pub(crate) const FONT: &str = "sans-serif";

/// Matplotlib's default cycle colors, used for the two primary metrics.
pub const MOVES_COLOR: RGBColor = RGBColor(0x1f, 0x77, 0xb4);
pub const TIME_COLOR: RGBColor = RGBColor(0xff, 0x7f, 0x0e);

/// Axis range spanning `values` with a little air on both sides. Degenerate
/// input (empty, single value) still yields a non-empty range.
pub(crate) fn padded_range(values: impl IntoIterator<Item = f64>, pad: f64) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() {
        return 0.0..1.0;
    }
    if hi - lo < f64::EPSILON {
        return (lo - 1.0)..(hi + 1.0);
    }
    (lo - pad)..(hi + pad)
}

/// `0..max*1.1`, falling back to `0..1` when everything is zero.
pub(crate) fn zero_based_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let max = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(0.0f64, f64::max);
    if max <= 0.0 { 0.0..1.0 } else { 0.0..max * 1.1 }
}

/// Integer label for an `n` axis that plotters treats as continuous.
pub(crate) fn n_label(v: &f64) -> String {
    format!("{:.0}", v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_range_handles_single_value() {
        assert_eq!(padded_range([3.0], 0.5), 2.0..4.0);
        assert_eq!(padded_range(std::iter::empty::<f64>(), 0.5), 0.0..1.0);
        assert_eq!(padded_range([1.0, 5.0], 0.5), 0.5..5.5);
    }

    #[test]
    fn zero_based_range_never_collapses() {
        assert_eq!(zero_based_range([0.0, 0.0]), 0.0..1.0);
        let r = zero_based_range([2.0, 10.0]);
        assert_eq!(r.start, 0.0);
        assert!((r.end - 11.0).abs() < 1e-9);
    }
}
