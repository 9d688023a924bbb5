//! Typed benchmark records and the reader that builds them from CSV.
//!
//! The results file carries a header row followed by
//! `N, MovesProgram, MovesTheory, TimeMs` rows. Extra trailing fields are
//! allowed. Rows that fail validation are dropped whole; the raw text of
//! every row is also kept so the table chart can show the file verbatim.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Minimum number of fields a data row needs.
pub const REQUIRED_FIELDS: usize = 4;

/// One validated benchmark row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultRecord {
    /// Problem size (number of disks), always positive.
    pub n: u32,
    /// Moves counted by the solver.
    pub moves_program: u64,
    /// Moves reported by the runner as the theoretical count.
    pub moves_theory: u64,
    /// Wall-clock time in milliseconds, finite and non-negative.
    pub time_ms: f64,
}

impl ResultRecord {
    pub fn new(
        n: u32,
        moves_program: u64,
        moves_theory: u64,
        time_ms: f64,
    ) -> std::result::Result<Self, MalformedRow> {
        if n == 0 {
            return Err(MalformedRow::InvalidField {
                column: "n",
                value: n.to_string(),
            });
        }
        if !time_ms.is_finite() || time_ms < 0.0 {
            return Err(MalformedRow::InvalidField {
                column: "time_ms",
                value: time_ms.to_string(),
            });
        }
        Ok(Self {
            n,
            moves_program,
            moves_theory,
            time_ms,
        })
    }
}

/// Why a row was left out of the dataset. Never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedRow {
    #[error("expected at least {REQUIRED_FIELDS} fields, found {0}")]
    TooFewFields(usize),
    #[error("field `{column}` has invalid value {value:?}")]
    InvalidField { column: &'static str, value: String },
    #[error("row is not valid UTF-8")]
    InvalidUtf8,
}

/// Ordered, immutable set of records in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<ResultRecord>,
}

impl Dataset {
    pub fn new(records: Vec<ResultRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `time_ms` of the first record.
    pub fn baseline(&self) -> Option<f64> {
        self.records.first().map(|r| r.time_ms)
    }

    pub fn ns(&self) -> Vec<u32> {
        self.records.iter().map(|r| r.n).collect()
    }

    pub fn times(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.time_ms).collect()
    }

    /// `(n, time_ms)` pairs for plotting.
    pub fn time_points(&self) -> Vec<(f64, f64)> {
        self.records
            .iter()
            .map(|r| (r.n as f64, r.time_ms))
            .collect()
    }

    /// `(n, moves_program)` pairs for plotting.
    pub fn moves_points(&self) -> Vec<(f64, f64)> {
        self.records
            .iter()
            .map(|r| (r.n as f64, r.moves_program as f64))
            .collect()
    }

    /// `(n, moves_theory)` pairs for plotting.
    pub fn theory_points(&self) -> Vec<(f64, f64)> {
        self.records
            .iter()
            .map(|r| (r.n as f64, r.moves_theory as f64))
            .collect()
    }

}

/// Header and data rows exactly as they appear in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Everything read from one results file.
#[derive(Debug, Clone, Default)]
pub struct ResultsFile {
    pub dataset: Dataset,
    pub raw: RawTable,
    pub skipped_rows: usize,
    /// 1-based file line of each skipped row, when the reader knows it.
    pub skipped_lines: Vec<u64>,
}

/// Open `path` and parse it. A missing file is reported as
/// [`Error::SourceNotFound`] rather than an I/O error.
pub fn read_results(path: &Path) -> Result<ResultsFile> {
    if !path.exists() {
        return Err(Error::SourceNotFound(path.to_path_buf()));
    }
    let file = File::open(path)?;
    let parsed = parse_results(file)?;
    info!(
        path = %path.display(),
        records = parsed.dataset.len(),
        skipped = parsed.skipped_rows,
        "loaded results"
    );
    Ok(parsed)
}

/// Parse results from any reader. Only I/O failures are errors; bad rows
/// are counted in `skipped_rows`.
pub fn parse_results<R: Read>(source: R) -> Result<ResultsFile> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);

    let mut out = ResultsFile::default();
    let mut records = Vec::new();
    let mut seen_header = false;

    for result in reader.records() {
        let row = match result {
            Ok(row) => row,
            Err(err) if matches!(err.kind(), csv::ErrorKind::Utf8 { .. }) => {
                // A broken header is still "the header".
                if seen_header {
                    let line = err.position().map(|p| p.line());
                    skip_row(&mut out, line, &MalformedRow::InvalidUtf8);
                }
                seen_header = true;
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        let fields: Vec<String> = row.iter().map(str::to_owned).collect();
        if !seen_header {
            seen_header = true;
            out.raw.header = fields;
            continue;
        }
        out.raw.rows.push(fields);

        match parse_record(&row) {
            Ok(record) => records.push(record),
            Err(reason) => skip_row(&mut out, row.position().map(|p| p.line()), &reason),
        }
    }

    out.dataset = Dataset::new(records);
    Ok(out)
}

fn skip_row(out: &mut ResultsFile, line: Option<u64>, reason: &MalformedRow) {
    out.skipped_rows += 1;
    out.skipped_lines.extend(line);
    debug!(line = ?line, %reason, "skipping malformed row");
}

/// Positional conversion of one data row.
pub fn parse_record(row: &StringRecord) -> std::result::Result<ResultRecord, MalformedRow> {
    if row.len() < REQUIRED_FIELDS {
        return Err(MalformedRow::TooFewFields(row.len()));
    }
    let n = parse_field::<u32>(row, 0, "n")?;
    let moves_program = parse_field::<u64>(row, 1, "moves_program")?;
    let moves_theory = parse_field::<u64>(row, 2, "moves_theory")?;
    let time_ms = parse_field::<f64>(row, 3, "time_ms")?;
    ResultRecord::new(n, moves_program, moves_theory, time_ms)
}

fn parse_field<T: std::str::FromStr>(
    row: &StringRecord,
    idx: usize,
    column: &'static str,
) -> std::result::Result<T, MalformedRow> {
    let raw = row.get(idx).unwrap_or_default();
    raw.trim().parse::<T>().map_err(|_| MalformedRow::InvalidField {
        column,
        value: raw.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ResultsFile {
        parse_results(text.as_bytes()).expect("parse in-memory csv")
    }

    #[test]
    fn header_only_gives_empty_dataset() {
        let file = parse("N,Moves,Theory,Time\n");
        assert!(file.dataset.is_empty());
        assert_eq!(file.raw.header.len(), 4);
        assert_eq!(file.skipped_rows, 0);
    }

    #[test]
    fn header_is_not_validated() {
        let file = parse("1,1,1,0.5\n2,3,3,1.0\n");
        assert_eq!(file.dataset.len(), 1);
        assert_eq!(file.dataset.records()[0].n, 2);
    }

    #[test]
    fn runner_header_with_embedded_comma_is_kept_raw() {
        let file = parse("N,Ходов (программа),Теория (2^N-1),Время, мс\n1,1,1,0.0012\n");
        assert_eq!(file.raw.header.len(), 5);
        assert_eq!(file.raw.header[4], " мс");
        assert_eq!(file.dataset.len(), 1);
    }

    #[test]
    fn zero_n_and_negative_time_are_rejected() {
        let file = parse("h\n0,0,0,0.1\n3,7,7,-1\n4,15,15,nan\n5,31,31,0.2\n");
        assert_eq!(file.dataset.ns(), vec![5]);
        assert_eq!(file.skipped_rows, 3);
        // Raw rows keep everything, including the rejected ones.
        assert_eq!(file.raw.rows.len(), 4);
    }

    #[test]
    fn whitespace_around_numbers_is_tolerated() {
        let file = parse("h\n 2 , 3 ,3, 0.25 \n");
        let rec = file.dataset.records()[0];
        assert_eq!(rec.n, 2);
        assert_eq!(rec.moves_program, 3);
        assert_eq!(rec.time_ms, 0.25);
    }

    #[test]
    fn parse_record_reports_first_bad_column() {
        let row = StringRecord::from(vec!["7", "x", "y", "1.0"]);
        assert_eq!(
            parse_record(&row),
            Err(MalformedRow::InvalidField {
                column: "moves_program",
                value: "x".into()
            })
        );
        let short = StringRecord::from(vec!["7", "127"]);
        assert_eq!(parse_record(&short), Err(MalformedRow::TooFewFields(2)));
    }

    #[test]
    fn records_keep_file_order() {
        let file = parse("h\n5,31,31,1\n2,3,3,0.5\n9,511,511,3\n");
        assert_eq!(file.dataset.ns(), vec![5, 2, 9]);
    }

    #[test]
    fn skipped_rows_report_file_lines_past_blank_lines() {
        let file = parse("h\n1,1,1,0.1\n\n\nbad,3,3,0.2\n3,7,7,0.3\n4,15\n");
        assert_eq!(file.skipped_rows, 2);
        assert_eq!(file.skipped_lines, vec![5, 7]);
    }
}
