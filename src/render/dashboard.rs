use std::path::Path;

use plotters::prelude::*;

use super::{FONT, TIME_COLOR, n_label, padded_range, zero_based_range};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::metrics::threshold_spans;

const BAR_COLOR: RGBColor = RGBColor(0x1f, 0x77, 0xb4);
const BAR_HALF_WIDTH: f64 = 0.4;

/// Two panels of run time over `n`: bars on the left, a line on the right
/// with the region at or above `threshold_ms` shaded.
pub fn render_dashboard(
    dataset: &Dataset,
    out_path: &Path,
    size: (u32, u32),
    threshold_ms: f64,
) -> Result<()> {
    let points = dataset.time_points();
    let x_range = padded_range(points.iter().map(|p| p.0), 1.0);
    let y_range = zero_based_range(
        points
            .iter()
            .map(|p| p.1)
            .chain(std::iter::once(threshold_ms)),
    );

    let root = BitMapBackend::new(out_path, size).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(
        "Tower of Hanoi run time",
        (FONT, 28).into_font().style(FontStyle::Bold),
    )?;
    let panels = root.split_evenly((1, 2));

    let mut bars = ChartBuilder::on(&panels[0])
        .caption("Exhaustive run time", (FONT, 20).into_font().style(FontStyle::Bold))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.clone(), y_range.clone())?;

    bars.configure_mesh()
        .disable_x_mesh()
        .x_desc("N (disks)")
        .y_desc("time, ms")
        .x_label_formatter(&n_label)
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    bars.draw_series(points.iter().map(|&(n, t)| {
        Rectangle::new(
            [(n - BAR_HALF_WIDTH, 0.0), (n + BAR_HALF_WIDTH, t)],
            BAR_COLOR.filled(),
        )
    }))?;

    let mut line = ChartBuilder::on(&panels[1])
        .caption("Run time growth", (FONT, 20).into_font().style(FontStyle::Bold))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)?;

    line.configure_mesh()
        .x_desc("N (disks)")
        .y_desc("time, ms")
        .x_label_formatter(&n_label)
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    line.draw_series(
        threshold_spans(&points, threshold_ms)
            .into_iter()
            .map(|span| Polygon::new(span, TIME_COLOR.mix(0.2))),
    )?;
    line.draw_series(LineSeries::new(points.iter().copied(), TIME_COLOR.stroke_width(2)))?;
    line.draw_series(
        points
            .iter()
            .map(|&p| Circle::new(p, 4, TIME_COLOR.filled())),
    )?;

    root.present()?;
    Ok(())
}
