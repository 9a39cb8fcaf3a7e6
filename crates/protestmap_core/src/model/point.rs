//! Point domain model.
//!
//! # Responsibility
//! - Define the canonical map-point record written to the dataset asset.
//! - Define the coarse crowd-size assessment used for marker scaling.
//!
//! # Invariants
//! - `id` is non-empty and trimmed.
//! - `latitude` and `longitude` are finite.
//! - `links` keeps source order and duplicates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Crowd-size assessment of a protest.
///
/// `Option<PointSize>::None` means the size was not assessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointSize {
    Small,
    Medium,
    Large,
}

impl PointSize {
    /// Lowercase label, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl Display for PointSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single normalized protest event.
///
/// Serialized with `date` as an ISO-8601 calendar date (`YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Stable identifier taken from the sheet.
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Human-readable place label. May be empty.
    pub location: String,
    /// Day the protest took place.
    pub date: NaiveDate,
    pub notes: Option<String>,
    /// Footage URLs in the order they appeared in the sheet cell.
    pub links: Vec<String>,
    pub size: Option<PointSize>,
}

impl Point {
    /// Creates a point with empty descriptive metadata.
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
            location: String::new(),
            date,
            notes: None,
            links: Vec::new(),
            size: None,
        }
    }

    /// Returns whether this record satisfies the point invariants.
    ///
    /// Used when re-reading a dataset asset that may have been edited by hand.
    pub fn is_valid(&self) -> bool {
        !self.id.trim().is_empty() && self.latitude.is_finite() && self.longitude.is_finite()
    }
}
