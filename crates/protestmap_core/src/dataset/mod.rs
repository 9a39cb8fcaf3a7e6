//! Dataset asset persistence and the process-wide dataset slot.
//!
//! # Responsibility
//! - Write normalized points as the static JSON asset shipped to the map.
//! - Read the asset back, re-establishing point invariants.
//! - Hold one immutable dataset for the lifetime of the process.
//!
//! # Invariants
//! - A loaded `Dataset` is sorted by date and contains only valid points.
//! - `load_once` never reloads; a different path after the first load is
//!   rejected.

use crate::model::point::Point;
use crate::query::{date_bounds, DateRange, ViewEngine};
use log::{info, warn};
use once_cell::sync::OnceCell;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const ASSET_INDENT: &[u8] = b"    ";

static LOADED_DATASET: OnceCell<LoadedDataset> = OnceCell::new();

struct LoadedDataset {
    path: PathBuf,
    dataset: Dataset,
}

pub type DatasetResult<T> = Result<T, DatasetError>;

/// Error for dataset asset I/O and the load-once slot.
#[derive(Debug)]
pub enum DatasetError {
    Io { path: PathBuf, source: std::io::Error },
    Json { path: PathBuf, source: serde_json::Error },
    /// `load_once` was already called with another path.
    AlreadyLoaded { loaded: PathBuf, requested: PathBuf },
}

impl Display for DatasetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "dataset io failed for `{}`: {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "dataset json invalid in `{}`: {source}", path.display())
            }
            Self::AlreadyLoaded { loaded, requested } => write!(
                f,
                "dataset already loaded from `{}`; refusing to load `{}`",
                loaded.display(),
                requested.display()
            ),
        }
    }
}

impl Error for DatasetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::AlreadyLoaded { .. } => None,
        }
    }
}

/// Immutable, date-sorted point sequence.
///
/// Cloning is cheap; clones share the same points.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    points: Arc<[Point]>,
}

impl Dataset {
    /// Builds a dataset, dropping invalid points, trimming ids and
    /// stable-sorting by date.
    pub fn from_points(points: Vec<Point>) -> Self {
        let total = points.len();
        let mut points: Vec<Point> = points
            .into_iter()
            .filter(Point::is_valid)
            .map(|mut point| {
                if point.id.trim().len() != point.id.len() {
                    point.id = point.id.trim().to_string();
                }
                point
            })
            .collect();
        if points.len() != total {
            warn!(
                "event=dataset_invalid_points module=dataset dropped={}",
                total - points.len()
            );
        }
        points.sort_by_key(|point| point.date);
        Self {
            points: points.into(),
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Earliest and latest point dates.
    pub fn date_bounds(&self) -> Option<DateRange> {
        date_bounds(&self.points)
    }

    /// Query engine over this dataset.
    pub fn engine(&self) -> ViewEngine<'_> {
        ViewEngine::new(&self.points)
    }
}

/// Writes `points` as a pretty-printed JSON array, creating parent dirs.
pub fn write_dataset(path: &Path, points: &[Point]) -> DatasetResult<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| DatasetError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let mut buffer = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(ASSET_INDENT));
    points
        .serialize(&mut serializer)
        .map_err(|source| DatasetError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    std::fs::write(path, buffer).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        "event=dataset_written module=dataset status=ok points={} path={}",
        points.len(),
        path.display()
    );
    Ok(())
}

/// Reads a dataset asset written by [`write_dataset`].
pub fn read_dataset(path: &Path) -> DatasetResult<Dataset> {
    let bytes = std::fs::read(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let points: Vec<Point> =
        serde_json::from_slice(&bytes).map_err(|source| DatasetError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Dataset::from_points(points))
}

/// Loads the process-wide dataset on first call and returns it afterwards.
///
/// # Errors
/// - Returns `Io`/`Json` when the first load fails; a later call may retry.
/// - Returns `AlreadyLoaded` when called with a different path than the one
///   that succeeded.
pub fn load_once(path: &Path) -> DatasetResult<&'static Dataset> {
    let loaded = LOADED_DATASET.get_or_try_init(|| -> DatasetResult<LoadedDataset> {
        let dataset = read_dataset(path)?;
        info!(
            "event=dataset_loaded module=dataset status=ok points={} path={}",
            dataset.len(),
            path.display()
        );
        Ok(LoadedDataset {
            path: path.to_path_buf(),
            dataset,
        })
    })?;

    if loaded.path != path {
        return Err(DatasetError::AlreadyLoaded {
            loaded: loaded.path.clone(),
            requested: path.to_path_buf(),
        });
    }
    Ok(&loaded.dataset)
}

/// Returns the process-wide dataset if [`load_once`] succeeded.
pub fn loaded_dataset() -> Option<&'static Dataset> {
    LOADED_DATASET.get().map(|loaded| &loaded.dataset)
}
