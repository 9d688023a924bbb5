//! Error types shared by the reader, the renderers and the pipeline.

use std::path::PathBuf;

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Input file is absent. Fatal before any parsing happens.
    #[error(
        "results file {} not found; run the benchmark first to generate it",
        .0.display()
    )]
    SourceNotFound(PathBuf),

    /// Every row was malformed (or there were no rows at all).
    #[error("no valid result rows in {}", .0.display())]
    EmptyDataset(PathBuf),

    /// First `time_ms` is not positive, so ratios against it are meaningless.
    #[error("baseline time must be positive, got {0} ms")]
    InvalidBaseline(f64),

    #[error("failed to read results: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Drawing backend failure.
    #[error("render failed: {0}")]
    Render(String),
}

impl<E> From<DrawingAreaErrorKind<E>> for Error
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        Error::Render(err.to_string())
    }
}
