//! Raw sheet rows to validated, date-sorted points.
//!
//! # Responsibility
//! - Parse id, coordinates, date, links and size out of untyped rows.
//! - Drop rows that cannot be placed on the map.
//! - Sort the survivors by date.
//!
//! # Invariants
//! - Rows without an id or without finite coordinates are excluded, never
//!   reported as errors.
//! - Unparseable dates fall back to the normalization day.
//! - Output is stable-sorted ascending by `date`.

pub mod fields;

use crate::model::point::Point;
use crate::model::raw_row::RawRow;
use chrono::{Local, NaiveDate};
use log::{debug, info};
use serde::{Deserialize, Serialize};

pub use fields::{extract_links, map_size, parse_coordinates, parse_sheet_date};

/// Column labels used to read a [`RawRow`].
///
/// Defaults match the labels of the upstream "Protests" sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub id: String,
    pub coordinates: String,
    pub location: String,
    pub date: String,
    pub notes: String,
    pub links: String,
    pub size: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            id: "Protest_ID".to_string(),
            coordinates: "LatLng (approx)".to_string(),
            location: "Location".to_string(),
            date: "Date".to_string(),
            notes: "Notes on protest - @yudhanjaya".to_string(),
            links: "Footage (links, add multiple if possible)".to_string(),
            size: "Size (Small/Medium/Large/XL)".to_string(),
        }
    }
}

/// Result of one normalizer run, with exclusion counters for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeOutcome {
    pub points: Vec<Point>,
    pub rows_seen: usize,
    pub dropped_missing_id: usize,
    pub dropped_bad_coordinates: usize,
    /// Rows kept with the fallback date because their date cell was unusable.
    pub defaulted_dates: usize,
}

impl NormalizeOutcome {
    pub fn dropped(&self) -> usize {
        self.dropped_missing_id + self.dropped_bad_coordinates
    }
}

/// Configurable normalizer.
///
/// [`normalize`] covers the common case; use this type to override column
/// labels or pin the fallback date.
#[derive(Debug, Clone)]
pub struct Normalizer {
    columns: ColumnMap,
    today: Option<NaiveDate>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(ColumnMap::default())
    }
}

impl Normalizer {
    pub fn new(columns: ColumnMap) -> Self {
        Self {
            columns,
            today: None,
        }
    }

    /// Pins the date substituted for missing or unparseable date cells.
    ///
    /// Without this the local calendar day at run time is used.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    /// Normalizes a full snapshot of rows.
    pub fn run(&self, rows: &[RawRow]) -> NormalizeOutcome {
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        let mut outcome = NormalizeOutcome {
            points: Vec::with_capacity(rows.len()),
            rows_seen: rows.len(),
            dropped_missing_id: 0,
            dropped_bad_coordinates: 0,
            defaulted_dates: 0,
        };

        for (index, row) in rows.iter().enumerate() {
            let Some(id) = row.get(&self.columns.id).map(str::trim) else {
                debug!("event=row_dropped module=normalize reason=missing_id row={index}");
                outcome.dropped_missing_id += 1;
                continue;
            };

            let Some((latitude, longitude)) =
                row.get(&self.columns.coordinates).and_then(parse_coordinates)
            else {
                debug!(
                    "event=row_dropped module=normalize reason=bad_coordinates row={index} id={id}"
                );
                outcome.dropped_bad_coordinates += 1;
                continue;
            };

            let date = match row.get(&self.columns.date).and_then(parse_sheet_date) {
                Some(date) => date,
                None => {
                    outcome.defaulted_dates += 1;
                    today
                }
            };

            outcome.points.push(Point {
                id: id.to_string(),
                latitude,
                longitude,
                location: row
                    .get(&self.columns.location)
                    .map(|value| value.trim().to_string())
                    .unwrap_or_default(),
                date,
                notes: row
                    .get(&self.columns.notes)
                    .map(|value| value.trim().to_string()),
                links: row
                    .get(&self.columns.links)
                    .map(extract_links)
                    .unwrap_or_default(),
                size: row.get(&self.columns.size).and_then(map_size),
            });
        }

        // `sort_by_key` is stable, so same-day rows keep sheet order.
        outcome.points.sort_by_key(|point| point.date);

        info!(
            "event=normalize module=normalize status=ok rows={} points={} dropped_missing_id={} dropped_bad_coordinates={} defaulted_dates={}",
            outcome.rows_seen,
            outcome.points.len(),
            outcome.dropped_missing_id,
            outcome.dropped_bad_coordinates,
            outcome.defaulted_dates
        );

        outcome
    }
}

/// Normalizes rows with the default column labels.
pub fn normalize(rows: &[RawRow]) -> Vec<Point> {
    Normalizer::default().run(rows).points
}
