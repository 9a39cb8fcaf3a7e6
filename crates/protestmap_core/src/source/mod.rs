//! Upstream row sources.
//!
//! # Responsibility
//! - Define the contract for anything that can hand over a snapshot of sheet
//!   rows.
//! - Provide a file-backed snapshot reader and an in-memory source.
//!
//! # Invariants
//! - A source returns a full snapshot or an error, never a partial list.

mod json;

use crate::model::raw_row::RawRow;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub use json::JsonRowSource;

pub type SourceResult<T> = Result<T, SourceError>;

/// Failure to obtain a row snapshot.
#[derive(Debug)]
pub enum SourceError {
    Io { path: PathBuf, source: std::io::Error },
    Json { path: PathBuf, source: serde_json::Error },
    /// Snapshot parsed but does not have the row-list shape.
    InvalidData(String),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read rows from `{}`: {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "rows snapshot `{}` is not valid json: {source}", path.display())
            }
            Self::InvalidData(message) => write!(f, "invalid rows snapshot: {message}"),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidData(_) => None,
        }
    }
}

/// Provider of raw sheet rows.
pub trait RowSource {
    /// Short label for logs.
    fn name(&self) -> &str;
    fn fetch_rows(&self) -> SourceResult<Vec<RawRow>>;
}

/// Source backed by rows already in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticRowSource {
    rows: Vec<RawRow>,
}

impl StaticRowSource {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }
}

impl RowSource for StaticRowSource {
    fn name(&self) -> &str {
        "static"
    }

    fn fetch_rows(&self) -> SourceResult<Vec<RawRow>> {
        Ok(self.rows.clone())
    }
}
