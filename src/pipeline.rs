//! Read, check, render. One [`Pipeline`] per invocation.
//!
//! Fatal conditions (missing input, no valid rows) stop the run before the
//! output directory is touched. Chart-level failures, such as a
//! non-positive baseline for the ratio chart, only drop that chart.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::dataset::{ResultsFile, read_results};
use crate::error::{Error, Result};
use crate::metrics::theory_mismatches;
use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    NotStarted,
    Loaded,
    Rendered,
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ChartKind {
    #[value(name = "time")]
    TimeGrowth,
    #[value(name = "moves")]
    MovesGrowth,
    MovesVsTheory,
    Combined,
    Dashboard,
    PerformanceDiff,
    Table,
}

impl ChartKind {
    pub const ALL: [ChartKind; 7] = [
        ChartKind::TimeGrowth,
        ChartKind::MovesGrowth,
        ChartKind::MovesVsTheory,
        ChartKind::Combined,
        ChartKind::Dashboard,
        ChartKind::PerformanceDiff,
        ChartKind::Table,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ChartKind::TimeGrowth => "hanoi_time.png",
            ChartKind::MovesGrowth => "hanoi_moves.png",
            ChartKind::MovesVsTheory => "hanoi_moves_vs_theory.png",
            ChartKind::Combined => "hanoi_combined.png",
            ChartKind::Dashboard => "hanoi_dashboard.png",
            ChartKind::PerformanceDiff => "hanoi_performance_diff.png",
            ChartKind::Table => "hanoi_table.png",
        }
    }

    /// Whether the chart divides by the first run time.
    pub fn requires_baseline(self) -> bool {
        matches!(self, ChartKind::PerformanceDiff)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartKind::TimeGrowth => "time growth",
            ChartKind::MovesGrowth => "moves growth",
            ChartKind::MovesVsTheory => "moves vs theory",
            ChartKind::Combined => "combined",
            ChartKind::Dashboard => "dashboard",
            ChartKind::PerformanceDiff => "performance diff",
            ChartKind::Table => "table",
        };
        f.write_str(name)
    }
}

/// Outcome of the render stage.
#[derive(Debug, Default)]
pub struct RenderSummary {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(ChartKind, Error)>,
}

/// Outcome of a whole run. `abort` is set when nothing was rendered.
#[derive(Debug)]
pub struct RunReport {
    pub stage: Stage,
    pub skipped_rows: usize,
    pub written: Vec<PathBuf>,
    pub failed: Vec<(ChartKind, Error)>,
    pub abort: Option<Error>,
}

pub struct Pipeline {
    config: AppConfig,
    stage: Stage,
}

impl Pipeline {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            stage: Stage::NotStarted,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn output_path(&self, kind: ChartKind) -> PathBuf {
        self.config.paths.output_dir.join(kind.file_name())
    }

    /// Read the configured input. Leaves the pipeline `Loaded` with at
    /// least one record, or `Aborted`.
    pub fn load(&mut self) -> Result<ResultsFile> {
        let input = self.config.paths.input.clone();
        let loaded = read_results(&input).and_then(|file| {
            if file.dataset.is_empty() {
                Err(Error::EmptyDataset(input.clone()))
            } else {
                Ok(file)
            }
        });
        match loaded {
            Ok(file) => {
                for m in theory_mismatches(&file.dataset) {
                    match m.expected {
                        Some(expected) => warn!(
                            n = m.n,
                            recorded = m.recorded,
                            expected,
                            "theoretical move count differs from 2^n - 1"
                        ),
                        None => warn!(n = m.n, "2^n - 1 does not fit in 64 bits"),
                    }
                }
                self.stage = Stage::Loaded;
                Ok(file)
            }
            Err(err) => {
                self.stage = Stage::Aborted;
                Err(err)
            }
        }
    }

    /// Render `charts` in order. Each failure is recorded and the rest keep
    /// going.
    pub fn render(&mut self, file: &ResultsFile, charts: &[ChartKind]) -> Result<RenderSummary> {
        debug_assert!(!file.dataset.is_empty(), "render called on empty dataset");

        if let Err(err) = fs::create_dir_all(&self.config.paths.output_dir) {
            self.stage = Stage::Aborted;
            return Err(err.into());
        }

        let mut summary = RenderSummary::default();
        for &kind in charts {
            let path = self.output_path(kind);
            match self.render_one(kind, file, &path) {
                Ok(()) => {
                    info!(chart = %kind, path = %path.display(), "chart written");
                    summary.written.push(path);
                }
                Err(err) => {
                    warn!(chart = %kind, %err, "chart skipped");
                    remove_partial(&path);
                    summary.failed.push((kind, err));
                }
            }
        }
        self.stage = Stage::Rendered;
        Ok(summary)
    }

    fn render_one(&self, kind: ChartKind, file: &ResultsFile, path: &Path) -> Result<()> {
        let cfg = &self.config.render;
        let dataset = &file.dataset;
        match kind {
            ChartKind::TimeGrowth => render::render_time_growth(dataset, path, cfg.size()),
            ChartKind::MovesGrowth => render::render_moves_growth(dataset, path, cfg.size()),
            ChartKind::MovesVsTheory => render::render_moves_vs_theory(dataset, path, cfg.size()),
            ChartKind::Combined => render::render_combined(dataset, path, cfg.size()),
            ChartKind::Dashboard => render::render_dashboard(
                dataset,
                path,
                cfg.wide_size(),
                cfg.dashboard_threshold_ms,
            ),
            ChartKind::PerformanceDiff => {
                render::render_performance_diff(dataset, path, cfg.wide_size(), cfg.tick_step)
            }
            ChartKind::Table => render::render_table(&file.raw, path),
        }
    }

    /// Load then render. Never returns an error; everything ends up in the
    /// report.
    pub fn run(&mut self, charts: &[ChartKind]) -> RunReport {
        let file = match self.load() {
            Ok(file) => file,
            Err(err) => return self.aborted(0, err),
        };
        match self.render(&file, charts) {
            Ok(summary) => RunReport {
                stage: self.stage,
                skipped_rows: file.skipped_rows,
                written: summary.written,
                failed: summary.failed,
                abort: None,
            },
            Err(err) => self.aborted(file.skipped_rows, err),
        }
    }

    fn aborted(&self, skipped_rows: usize, err: Error) -> RunReport {
        warn!(%err, "pipeline aborted");
        RunReport {
            stage: self.stage,
            skipped_rows,
            written: Vec::new(),
            failed: Vec::new(),
            abort: Some(err),
        }
    }
}

fn remove_partial(path: &Path) {
    if path.exists() {
        if let Err(err) = fs::remove_file(path) {
            warn!(path = %path.display(), %err, "failed to remove partial chart");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_unique() {
        let mut names: Vec<&str> = ChartKind::ALL.iter().map(|k| k.file_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ChartKind::ALL.len());
    }

    #[test]
    fn only_ratio_chart_needs_baseline() {
        let needing: Vec<ChartKind> = ChartKind::ALL
            .into_iter()
            .filter(|k| k.requires_baseline())
            .collect();
        assert_eq!(needing, vec![ChartKind::PerformanceDiff]);
    }

    #[test]
    fn cli_names_match_value_enum() {
        assert_eq!(
            ChartKind::from_str("time", false).unwrap(),
            ChartKind::TimeGrowth
        );
        assert_eq!(
            ChartKind::from_str("performance-diff", false).unwrap(),
            ChartKind::PerformanceDiff
        );
        assert_eq!(
            ChartKind::from_str("moves-vs-theory", false).unwrap(),
            ChartKind::MovesVsTheory
        );
    }

    #[test]
    fn missing_input_aborts_before_loading() {
        let mut cfg = AppConfig::default();
        cfg.paths.input = std::env::temp_dir().join("hanoi_plots_definitely_missing.csv");
        let mut pipeline = Pipeline::new(cfg);
        let report = pipeline.run(&ChartKind::ALL);
        assert_eq!(report.stage, Stage::Aborted);
        assert!(matches!(report.abort, Some(Error::SourceNotFound(_))));
        assert!(report.written.is_empty());
    }
}
