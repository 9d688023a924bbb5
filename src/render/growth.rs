//! Single-axis growth curves over `n`.

use std::path::Path;

use plotters::prelude::*;
use tracing::debug;

use super::{FONT, MOVES_COLOR, TIME_COLOR, n_label, padded_range, zero_based_range};
use crate::dataset::Dataset;
use crate::error::Result;

const THEORY_COLOR: RGBColor = RGBColor(0x2c, 0xa0, 0x2c);

#[derive(Clone, Copy)]
enum Marker {
    Circle,
    Square,
}

struct Line<'a> {
    label: &'a str,
    points: Vec<(f64, f64)>,
    color: RGBColor,
    marker: Marker,
}

/// Run time against `n`.
pub fn render_time_growth(dataset: &Dataset, out_path: &Path, size: (u32, u32)) -> Result<()> {
    render_lines(
        out_path,
        size,
        "Tower of Hanoi run time",
        "time, ms",
        &[Line {
            label: "time, ms",
            points: dataset.time_points(),
            color: TIME_COLOR,
            marker: Marker::Circle,
        }],
    )
}

/// Solver move count against `n`.
pub fn render_moves_growth(dataset: &Dataset, out_path: &Path, size: (u32, u32)) -> Result<()> {
    render_lines(
        out_path,
        size,
        "Move count by N",
        "moves",
        &[Line {
            label: "moves",
            points: dataset.moves_points(),
            color: MOVES_COLOR,
            marker: Marker::Circle,
        }],
    )
}

/// Counted moves next to the runner's theoretical `2^N - 1` column.
pub fn render_moves_vs_theory(
    dataset: &Dataset,
    out_path: &Path,
    size: (u32, u32),
) -> Result<()> {
    render_lines(
        out_path,
        size,
        "Exhaustive solver vs theory",
        "moves",
        &[
            Line {
                label: "moves (program)",
                points: dataset.moves_points(),
                color: MOVES_COLOR,
                marker: Marker::Circle,
            },
            Line {
                label: "theory 2^N-1",
                points: dataset.theory_points(),
                color: THEORY_COLOR,
                marker: Marker::Square,
            },
        ],
    )
}

fn render_lines(
    out_path: &Path,
    size: (u32, u32),
    caption: &str,
    y_desc: &str,
    lines: &[Line<'_>],
) -> Result<()> {
    let x_range = padded_range(
        lines.iter().flat_map(|l| l.points.iter().map(|p| p.0)),
        0.5,
    );
    let y_range = zero_based_range(lines.iter().flat_map(|l| l.points.iter().map(|p| p.1)));
    debug!(path = %out_path.display(), ?x_range, ?y_range, "rendering growth chart");

    let root = BitMapBackend::new(out_path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (FONT, 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("N (disks)")
        .y_desc(y_desc)
        .x_label_formatter(&n_label)
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    for line in lines {
        let color = line.color;
        chart
            .draw_series(LineSeries::new(line.points.iter().copied(), color.stroke_width(2)))?
            .label(line.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));

        match line.marker {
            Marker::Circle => {
                chart.draw_series(
                    line.points
                        .iter()
                        .map(|&p| Circle::new(p, 4, color.filled())),
                )?;
            }
            Marker::Square => {
                chart.draw_series(line.points.iter().map(|&p| {
                    EmptyElement::at(p) + Rectangle::new([(-4, -4), (4, 4)], color.filled())
                }))?;
            }
        }
    }

    if lines.len() > 1 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}
