use std::path::Path;

use plotters::prelude::*;

use super::{FONT, MOVES_COLOR, TIME_COLOR, n_label, padded_range, zero_based_range};
use crate::dataset::Dataset;
use crate::error::Result;

/// Moves on the left axis, run time on the right one, sharing the `n` axis.
/// Both series end up in a single legend.
pub fn render_combined(dataset: &Dataset, out_path: &Path, size: (u32, u32)) -> Result<()> {
    let moves = dataset.moves_points();
    let times = dataset.time_points();

    let x_range = padded_range(dataset.records().iter().map(|r| r.n as f64), 0.5);
    let moves_range = zero_based_range(moves.iter().map(|p| p.1));
    let time_range = zero_based_range(times.iter().map(|p| p.1));

    let root = BitMapBackend::new(out_path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Growth of move count and run time", (FONT, 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .right_y_label_area_size(80)
        .build_cartesian_2d(x_range.clone(), moves_range)?
        .set_secondary_coord(x_range, time_range);

    chart
        .configure_mesh()
        .x_desc("N (disks)")
        .y_desc("moves")
        .x_label_formatter(&n_label)
        .y_label_style((FONT, 14).into_font().color(&MOVES_COLOR))
        .axis_desc_style((FONT, 16).into_font().color(&MOVES_COLOR))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    chart
        .configure_secondary_axes()
        .y_desc("time, ms")
        .label_style((FONT, 14).into_font().color(&TIME_COLOR))
        .axis_desc_style((FONT, 16).into_font().color(&TIME_COLOR))
        .draw()?;

    chart
        .draw_series(LineSeries::new(moves.iter().copied(), MOVES_COLOR.stroke_width(2)))?
        .label("moves")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], MOVES_COLOR));
    chart.draw_series(
        moves
            .iter()
            .map(|&p| Circle::new(p, 4, MOVES_COLOR.filled())),
    )?;

    chart
        .draw_secondary_series(LineSeries::new(times.iter().copied(), TIME_COLOR.stroke_width(2)))?
        .label("time, ms")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], TIME_COLOR));
    chart.draw_secondary_series(
        times
            .iter()
            .map(|&p| Circle::new(p, 4, TIME_COLOR.filled())),
    )?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
