//! View query engine over the normalized point sequence.
//!
//! # Responsibility
//! - Resolve the effective date range, defaulting to the dataset bounds.
//! - Filter points by inclusive day range and resolve the selection.
//! - Produce the canonical query state written back to the URL.
//!
//! # Invariants
//! - Every operation is total: empty input and absent parameters yield
//!   empty or absent results.
//! - Inputs are never mutated; filtered output preserves input order.
//! - Selection is resolved against the full sequence, so a selected point
//!   may sit outside the visible range.

pub mod state;

use crate::model::point::Point;
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

pub use state::QueryState;

/// Inclusive day interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Both ends inclusive. An inverted range contains nothing.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Returns the earliest and latest point dates, or `None` for no points.
pub fn date_bounds(points: &[Point]) -> Option<DateRange> {
    let start = points.iter().map(|point| point.date).min()?;
    let end = points.iter().map(|point| point.date).max()?;
    Some(DateRange::new(start, end))
}

/// Fills absent bounds with the minimum/maximum date found in `points`.
///
/// Returns `None` when a bound is absent and `points` is empty, since an
/// interval needs both ends. [`ViewEngine::evaluate`] still carries the
/// caller's explicit bound into the canonical state in that case.
pub fn resolve_range(
    points: &[Point],
    range_start: Option<NaiveDate>,
    range_end: Option<NaiveDate>,
) -> Option<DateRange> {
    let bounds = date_bounds(points);
    let start = range_start.or_else(|| bounds.map(|bounds| bounds.start))?;
    let end = range_end.or_else(|| bounds.map(|bounds| bounds.end))?;
    Some(DateRange::new(start, end))
}

/// Returns the points dated within `[start, end]`, both days included.
pub fn filter_by_range(points: &[Point], start: NaiveDate, end: NaiveDate) -> Vec<&Point> {
    let range = DateRange::new(start, end);
    points
        .iter()
        .filter(|point| range.contains(point.date))
        .collect()
}

/// Finds the point with `selected_id` in the full sequence.
///
/// The id is trimmed first, matching [`canonicalize`].
pub fn resolve_selection<'a>(points: &'a [Point], selected_id: Option<&str>) -> Option<&'a Point> {
    let selected_id = selected_id.map(str::trim).filter(|id| !id.is_empty())?;
    points.iter().find(|point| point.id == selected_id)
}

/// Builds the state to persist after a user action.
///
/// Bounds are always explicit once resolved; a blank or absent selection
/// drops the `current` key.
pub fn canonicalize(range: Option<DateRange>, selected_id: Option<&str>) -> QueryState {
    QueryState {
        selected_id: selected_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string),
        range_start: range.map(|range| range.start),
        range_end: range.map(|range| range.end),
    }
}

/// Everything the renderer needs for one view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View<'a> {
    pub range: Option<DateRange>,
    /// Points inside `range`, in date order.
    pub points: Vec<&'a Point>,
    pub selected: Option<&'a Point>,
    /// Canonical parameters to write back to the URL.
    pub state: QueryState,
}

impl View<'_> {
    /// Whether the selected point is inside the visible range.
    ///
    /// `false` when nothing is selected.
    pub fn selection_in_range(&self) -> bool {
        match (self.selected, self.range) {
            (Some(point), Some(range)) => range.contains(point.date),
            _ => false,
        }
    }
}

/// Stateless engine bound to one point sequence.
#[derive(Debug, Clone, Copy)]
pub struct ViewEngine<'a> {
    points: &'a [Point],
}

impl<'a> ViewEngine<'a> {
    pub fn new(points: &'a [Point]) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &'a [Point] {
        self.points
    }

    /// Resolves range, visible points, selection and canonical state.
    pub fn evaluate(&self, query: &QueryState) -> View<'a> {
        let range = resolve_range(self.points, query.range_start, query.range_end);
        let points = match range {
            Some(range) => filter_by_range(self.points, range.start, range.end),
            None => Vec::new(),
        };
        let selected = resolve_selection(self.points, query.selected_id.as_deref());
        let mut state = canonicalize(range, selected.map(|point| point.id.as_str()));
        if range.is_none() {
            // Nothing to default from; keep whichever bound the caller typed.
            state.range_start = query.range_start;
            state.range_end = query.range_end;
        }

        let view = View {
            range,
            points,
            selected,
            state,
        };
        if view.selected.is_some() && !view.selection_in_range() {
            debug!(
                "event=selection_outside_range module=query id={}",
                query.selected_id.as_deref().unwrap_or_default()
            );
        }
        view
    }
}
