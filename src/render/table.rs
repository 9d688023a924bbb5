//! Grid image of the raw results file.

use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::FONT;
use crate::dataset::RawTable;
use crate::error::Result;

/// Data rows shown below the header. Later rows are dropped silently.
pub const MAX_TABLE_ROWS: usize = 25;

const HEADER_FILL: RGBColor = RGBColor(0xe0, 0xf0, 0xff);
const ODD_ROW_FILL: RGBColor = RGBColor(0xff, 0xff, 0xff);
const EVEN_ROW_FILL: RGBColor = RGBColor(0xf7, 0xfb, 0xff);
const CELL_BORDER: RGBColor = RGBColor(0xcc, 0xcc, 0xcc);

const FONT_SIZE: i32 = 16;
const ROW_HEIGHT: u32 = 30;
const TITLE_HEIGHT: u32 = 60;
const MARGIN: u32 = 20;
const CHAR_WIDTH: u32 = 9;
const CELL_PADDING: u32 = 24;
const MIN_COLUMN_WIDTH: u32 = 60;

/// Rectangular text grid: every row, header included, has `columns` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableGrid {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub columns: usize,
}

impl TableGrid {
    /// Pad or cut every row to the widest row in the whole table, then keep
    /// at most `max_rows` data rows.
    pub fn normalize(raw: &RawTable, max_rows: usize) -> Self {
        let columns = raw
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(raw.header.len()))
            .max()
            .unwrap_or(0);
        let fit = |row: &Vec<String>| {
            let mut row: Vec<String> = row.iter().take(columns).cloned().collect();
            row.resize(columns, String::new());
            row
        };
        Self {
            header: fit(&raw.header),
            rows: raw.rows.iter().take(max_rows).map(fit).collect(),
            columns,
        }
    }

    /// Pixel width per column, sized for the longest cell in it.
    pub fn column_widths(&self) -> Vec<u32> {
        (0..self.columns)
            .map(|c| {
                let longest = std::iter::once(&self.header)
                    .chain(self.rows.iter())
                    .map(|row| row[c].chars().count() as u32)
                    .max()
                    .unwrap_or(0);
                (longest * CHAR_WIDTH + CELL_PADDING).max(MIN_COLUMN_WIDTH)
            })
            .collect()
    }

    /// Canvas size that fits the whole grid plus title and margins.
    pub fn canvas_size(&self) -> (u32, u32) {
        let width: u32 = self.column_widths().iter().sum::<u32>() + 2 * MARGIN;
        let height = TITLE_HEIGHT + (self.rows.len() as u32 + 1) * ROW_HEIGHT + 2 * MARGIN;
        (width.max(400), height)
    }
}

/// Header in bold on a tinted band, data rows with alternating shading.
pub fn render_table(raw: &RawTable, out_path: &Path) -> Result<()> {
    let grid = TableGrid::normalize(raw, MAX_TABLE_ROWS);
    let widths = grid.column_widths();
    let size = grid.canvas_size();

    let root = BitMapBackend::new(out_path, size).into_drawing_area();
    root.fill(&WHITE)?;

    root.draw(&Text::new(
        "Tower of Hanoi experiment results",
        (size.0 as i32 / 2, (MARGIN + TITLE_HEIGHT / 2) as i32),
        TextStyle::from((FONT, 22).into_font().style(FontStyle::Bold))
            .pos(Pos::new(HPos::Center, VPos::Center)),
    ))?;

    let table_width: u32 = widths.iter().sum();
    let left = ((size.0 - table_width) / 2) as i32;
    let top = (MARGIN + TITLE_HEIGHT) as i32;

    let header_style = TextStyle::from((FONT, FONT_SIZE).into_font().style(FontStyle::Bold))
        .pos(Pos::new(HPos::Center, VPos::Center));
    let body_style =
        TextStyle::from((FONT, FONT_SIZE).into_font()).pos(Pos::new(HPos::Center, VPos::Center));

    let all_rows = std::iter::once(&grid.header).chain(grid.rows.iter());
    for (r, row) in all_rows.enumerate() {
        let (fill, style) = if r == 0 {
            (HEADER_FILL, &header_style)
        } else if r % 2 == 1 {
            (ODD_ROW_FILL, &body_style)
        } else {
            (EVEN_ROW_FILL, &body_style)
        };
        let y0 = top + (r as u32 * ROW_HEIGHT) as i32;
        let y1 = y0 + ROW_HEIGHT as i32;

        let mut x0 = left;
        for (cell, &w) in row.iter().zip(&widths) {
            let x1 = x0 + w as i32;
            root.draw(&Rectangle::new([(x0, y0), (x1, y1)], fill.filled()))?;
            root.draw(&Rectangle::new([(x0, y0), (x1, y1)], CELL_BORDER.stroke_width(1)))?;
            if !cell.is_empty() {
                root.draw(&Text::new(
                    cell.as_str(),
                    ((x0 + x1) / 2, (y0 + y1) / 2),
                    style.clone(),
                ))?;
            }
            x0 = x1;
        }
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn short_header_is_padded_to_widest_row() {
        let raw = RawTable {
            header: row(&["N", "Moves", "Time"]),
            rows: vec![row(&["1", "1", "1", "0.001", "extra"])],
        };
        let grid = TableGrid::normalize(&raw, MAX_TABLE_ROWS);
        assert_eq!(grid.columns, 5);
        assert_eq!(grid.header, row(&["N", "Moves", "Time", "", ""]));
        assert!(grid.rows.iter().all(|r| r.len() == 5));
    }

    #[test]
    fn width_is_taken_before_truncation() {
        let mut rows: Vec<Vec<String>> = (0..30).map(|i| row(&[i.to_string().as_str(), "a"])).collect();
        rows.push(row(&["late", "b", "c"]));
        let raw = RawTable {
            header: row(&["N"]),
            rows,
        };
        let grid = TableGrid::normalize(&raw, MAX_TABLE_ROWS);
        assert_eq!(grid.rows.len(), MAX_TABLE_ROWS);
        assert_eq!(grid.columns, 3);
        assert_eq!(grid.rows[0], row(&["0", "a", ""]));
    }

    #[test]
    fn empty_table_has_no_columns() {
        let grid = TableGrid::normalize(&RawTable::default(), MAX_TABLE_ROWS);
        assert_eq!(grid.columns, 0);
        assert!(grid.column_widths().is_empty());
        assert_eq!(grid.canvas_size().0, 400);
    }

    #[test]
    fn columns_grow_with_longest_cell() {
        let raw = RawTable {
            header: row(&["N", "a much longer heading"]),
            rows: vec![row(&["12345678901234", "x"])],
        };
        let widths = TableGrid::normalize(&raw, MAX_TABLE_ROWS).column_widths();
        assert_eq!(widths[0], 14 * CHAR_WIDTH + CELL_PADDING);
        assert_eq!(widths[1], 21 * CHAR_WIDTH + CELL_PADDING);
    }
}
