//! Untyped spreadsheet row.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One record as received from the upstream tabular source.
///
/// Column labels are kept verbatim. A blank cell and a missing column are
/// indistinguishable to readers of this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow(BTreeMap<String, String>);

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `column` to `value`, replacing any previous cell.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.0.insert(column.into(), value.into());
    }

    /// Builder form of [`RawRow::insert`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    /// Returns the cell for `column`, or `None` when missing or blank.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0
            .get(column)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
        )
    }
}
