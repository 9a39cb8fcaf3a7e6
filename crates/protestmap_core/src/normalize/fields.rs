//! Pure cell parsers used by the normalizer.
//!
//! # Invariants
//! - No parser panics or returns an error; bad input maps to `None` or an
//!   empty collection.

use crate::model::point::PointSize;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://[^\s!,]+").expect("valid link regex"));

/// Parses a `"<lat>,<lng>"` cell into finite coordinates.
///
/// Each side may be padded with whitespace. Parts after the second comma are
/// ignored.
pub fn parse_coordinates(raw: &str) -> Option<(f64, f64)> {
    let mut parts = raw.split(',');
    let latitude = parse_finite(parts.next()?)?;
    let longitude = parse_finite(parts.next()?)?;
    Some((latitude, longitude))
}

fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parses a day/month/year cell such as `"5/4/2022"` (5 April 2022).
pub fn parse_sheet_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.trim().split('/');
    let day = parts.next()?.trim().parse::<u32>().ok()?;
    let month = parts.next()?.trim().parse::<u32>().ok()?;
    let year = parts.next()?.trim().parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Extracts every `http(s)://` URL embedded in free text, in order.
///
/// URLs end at whitespace, `,` or `!`. Duplicates are kept.
pub fn extract_links(text: &str) -> Vec<String> {
    LINK_RE
        .find_iter(text)
        .map(|found| found.as_str().to_string())
        .collect()
}

/// Maps a free-text size assessment onto [`PointSize`].
///
/// Only `small`, `medium` and `large` are recognized (case-insensitive,
/// trimmed). Everything else, `xl` included, is "not assessed".
pub fn map_size(raw: &str) -> Option<PointSize> {
    match raw.trim().to_lowercase().as_str() {
        "small" => Some(PointSize::Small),
        "medium" => Some(PointSize::Medium),
        "large" => Some(PointSize::Large),
        _ => None,
    }
}
