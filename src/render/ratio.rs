use std::path::Path;

use plotters::prelude::*;
use tracing::debug;

use super::FONT;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::metrics::{RatioBucket, baseline_ratios, tick_subset};

const CARD_BACKGROUND: RGBColor = RGBColor(0xf5, 0xf3, 0xff);

/// Bar per record of `time_ms / baseline` on a log axis, colored by
/// [`RatioBucket`]. Only every `tick_step`-th `n` gets an axis label.
///
/// The baseline is validated before the output file is created, so an
/// [`Error::InvalidBaseline`](crate::error::Error::InvalidBaseline) leaves
/// nothing on disk.
pub fn render_performance_diff(
    dataset: &Dataset,
    out_path: &Path,
    size: (u32, u32),
    tick_step: u32,
) -> Result<()> {
    let ratios = baseline_ratios(dataset)?;
    let ticks = tick_subset(&dataset.ns(), tick_step);
    debug!(bars = ratios.len(), ticks = ticks.len(), "rendering ratio chart");

    let positive = ratios
        .iter()
        .copied()
        .filter(|r| r.is_finite() && *r > 0.0);
    let y_min = positive.clone().fold(f64::INFINITY, f64::min);
    let y_max = positive.fold(0.0f64, f64::max);
    let (y_floor, y_ceil) = if y_min.is_finite() {
        (y_min * 0.5, y_max * 2.0)
    } else {
        (0.5, 2.0)
    };
    let last_index = ratios.len().saturating_sub(1).max(1);

    let root = BitMapBackend::new(out_path, size).into_drawing_area();
    root.fill(&CARD_BACKGROUND)?;
    let (title_area, body) = root.split_vertically(50);
    title_area.draw(&Text::new(
        "Performance difference",
        (20, 12),
        (FONT, 28).into_font().style(FontStyle::Bold),
    ))?;

    let mut chart = ChartBuilder::on(&body)
        .caption(
            "Run time growth relative to the smallest N",
            (FONT, 18),
        )
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d((0..last_index).into_segmented(), (y_floor..y_ceil).log_scale())?;

    chart.plotting_area().fill(&WHITE)?;

    let labels: Vec<Option<String>> = (0..ratios.len())
        .map(|i| {
            ticks
                .iter()
                .find(|t| t.index == i)
                .map(|t| t.n.to_string())
        })
        .collect();
    let label_for = |v: &SegmentValue<usize>| match v {
        SegmentValue::CenterOf(i) => labels.get(*i).cloned().flatten().unwrap_or_default(),
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(ratios.len() + 1)
        .x_label_formatter(&label_for)
        .y_label_formatter(&|v: &f64| {
            if *v < 1.0 {
                format!("{v:.2}")
            } else {
                format!("{v:.0}")
            }
        })
        .x_desc("N (disks)")
        .y_desc("time increase factor")
        .light_line_style(BLACK.mix(0.05))
        .bold_line_style(BLACK.mix(0.15))
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .margin(2)
            .baseline(y_floor)
            .style_func(|v, _| {
                let i = match v {
                    SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => *i,
                    SegmentValue::Last => ratios.len() - 1,
                };
                RatioBucket::classify(ratios[i]).color().filled()
            })
            .data(ratios.iter().enumerate().map(|(i, r)| (i, r.max(y_floor)))),
    )?;

    root.present()?;
    Ok(())
}
