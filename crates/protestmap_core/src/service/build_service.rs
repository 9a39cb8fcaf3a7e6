//! Dataset build use-case: fetch rows, normalize, write the asset.
//!
//! # Invariants
//! - The asset is written only after the full snapshot was fetched.
//! - A fetch failure leaves any existing asset untouched.

use crate::dataset::{write_dataset, DatasetError};
use crate::normalize::Normalizer;
use crate::source::{RowSource, SourceError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Failure of a dataset build.
#[derive(Debug)]
pub enum BuildError {
    Source(SourceError),
    Dataset(DatasetError),
}

impl Display for BuildError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source(err) => write!(f, "{err}"),
            Self::Dataset(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BuildError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Source(err) => Some(err),
            Self::Dataset(err) => Some(err),
        }
    }
}

impl From<SourceError> for BuildError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

impl From<DatasetError> for BuildError {
    fn from(value: DatasetError) -> Self {
        Self::Dataset(value)
    }
}

/// Summary of one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub rows_fetched: usize,
    pub points_written: usize,
    pub dropped_missing_id: usize,
    pub dropped_bad_coordinates: usize,
    pub defaulted_dates: usize,
    pub output: PathBuf,
}

/// Pulls a snapshot from `source` and writes the normalized asset to `out`.
pub fn build_dataset(
    source: &dyn RowSource,
    normalizer: &Normalizer,
    out: &Path,
) -> Result<BuildReport, BuildError> {
    let rows = source.fetch_rows().map_err(|err| {
        error!(
            "event=build_dataset module=service status=error stage=fetch source={} error={}",
            source.name(),
            err
        );
        err
    })?;
    info!(
        "event=rows_fetched module=service source={} rows={}",
        source.name(),
        rows.len()
    );

    let outcome = normalizer.run(&rows);
    write_dataset(out, &outcome.points)?;

    info!(
        "event=build_dataset module=service status=ok rows={} points={} out={}",
        outcome.rows_seen,
        outcome.points.len(),
        out.display()
    );

    Ok(BuildReport {
        rows_fetched: outcome.rows_seen,
        points_written: outcome.points.len(),
        dropped_missing_id: outcome.dropped_missing_id,
        dropped_bad_coordinates: outcome.dropped_bad_coordinates,
        defaulted_dates: outcome.defaulted_dates,
        output: out.to_path_buf(),
    })
}
