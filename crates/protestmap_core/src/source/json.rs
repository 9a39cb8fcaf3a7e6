//! JSON snapshot source.
//!
//! Expects an array of objects mapping column label to cell value, the shape
//! a sheet export produces.

use super::{RowSource, SourceError, SourceResult};
use crate::model::raw_row::RawRow;
use log::debug;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Reads rows from a JSON snapshot file on every fetch.
#[derive(Debug, Clone)]
pub struct JsonRowSource {
    path: PathBuf,
    label: String,
}

impl JsonRowSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = format!("json:{}", path.display());
        Self { path, label }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RowSource for JsonRowSource {
    fn name(&self) -> &str {
        &self.label
    }

    fn fetch_rows(&self) -> SourceResult<Vec<RawRow>> {
        let bytes = std::fs::read(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let value: Value = serde_json::from_slice(&bytes).map_err(|source| SourceError::Json {
            path: self.path.clone(),
            source,
        })?;
        let rows = rows_from_value(value)?;
        debug!(
            "event=rows_read module=source source={} rows={}",
            self.label,
            rows.len()
        );
        Ok(rows)
    }
}

/// Converts a parsed snapshot into rows.
///
/// Strings are kept as-is, numbers and booleans are stringified, nulls are
/// skipped. Nested arrays/objects are rejected.
pub(crate) fn rows_from_value(value: Value) -> SourceResult<Vec<RawRow>> {
    let Value::Array(entries) = value else {
        return Err(SourceError::InvalidData(
            "expected a top-level array of rows".to_string(),
        ));
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            let Value::Object(cells) = entry else {
                return Err(SourceError::InvalidData(format!(
                    "row {index} is not an object"
                )));
            };
            let mut row = RawRow::new();
            for (column, cell) in cells {
                match cell {
                    Value::Null => {}
                    Value::String(text) => row.insert(column, text),
                    Value::Number(number) => row.insert(column, number.to_string()),
                    Value::Bool(flag) => row.insert(column, flag.to_string()),
                    Value::Array(_) | Value::Object(_) => {
                        return Err(SourceError::InvalidData(format!(
                            "row {index} column `{column}` holds a nested value"
                        )));
                    }
                }
            }
            Ok(row)
        })
        .collect()
}
