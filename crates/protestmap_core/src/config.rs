//! File-backed configuration.
//!
//! Every field is optional in the file; missing fields take defaults.

use crate::normalize::ColumnMap;
use crate::present::RenderOptions;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Default location of the dataset asset.
pub const DEFAULT_DATASET_PATH: &str = "app/assets/data.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Sheet column labels read by the normalizer.
    pub columns: ColumnMap,
    pub dataset_path: PathBuf,
    pub render: RenderOptions,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            columns: ColumnMap::default(),
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            render: RenderOptions::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Json { path: PathBuf, source: serde_json::Error },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

/// Loads a JSON config file.
pub fn load_config(path: &Path) -> Result<TrackerConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}
