//! Query state and its URL parameter encoding.
//!
//! # Invariants
//! - Keys are `current`, `from`, `to`, emitted in that order.
//! - Absent values are omitted, never written as empty strings.
//! - Decoding never fails; unusable values decode as absent.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

pub const PARAM_CURRENT: &str = "current";
pub const PARAM_FROM: &str = "from";
pub const PARAM_TO: &str = "to";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// User-chosen view parameters: selection plus date range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    /// `id` of the selected point.
    pub selected_id: Option<String>,
    /// First visible day. Absent means "earliest point".
    pub range_start: Option<NaiveDate>,
    /// Last visible day, inclusive. Absent means "latest point".
    pub range_end: Option<NaiveDate>,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selected(mut self, id: impl Into<String>) -> Self {
        self.selected_id = Some(id.into());
        self
    }

    pub fn with_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.range_start = start;
        self.range_end = end;
        self
    }

    /// Returns the present parameters as `(key, value)` pairs.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(id) = &self.selected_id {
            pairs.push((PARAM_CURRENT, id.clone()));
        }
        if let Some(start) = self.range_start {
            pairs.push((PARAM_FROM, start.format(DATE_FORMAT).to_string()));
        }
        if let Some(end) = self.range_end {
            pairs.push((PARAM_TO, end.format(DATE_FORMAT).to_string()));
        }
        pairs
    }

    /// Encodes the state as an `application/x-www-form-urlencoded` string.
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.to_query_pairs())
            .finish()
    }

    /// Builds a state from `(key, value)` pairs.
    ///
    /// Unknown keys are ignored and the last occurrence of a key wins.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut state = Self::default();
        for (key, value) in pairs {
            let value = value.as_ref().trim();
            match key.as_ref() {
                PARAM_CURRENT => {
                    state.selected_id = (!value.is_empty()).then(|| value.to_string());
                }
                PARAM_FROM => state.range_start = parse_param_date(value),
                PARAM_TO => state.range_end = parse_param_date(value),
                _ => {}
            }
        }
        state
    }

    /// Decodes a query string, with or without a leading `?`.
    pub fn from_query_string(query: &str) -> Self {
        let query = query.trim().trim_start_matches('?');
        Self::from_query_pairs(form_urlencoded::parse(query.as_bytes()))
    }
}

/// Parses a `YYYY-MM-DD` parameter value.
pub fn parse_param_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::{parse_param_date, QueryState};
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn query_string_uses_fixed_key_order_and_omits_absent_values() {
        let state = QueryState::new()
            .with_selected("P 12&b")
            .with_range(Some(day(2022, 4, 1)), Some(day(2022, 4, 9)));
        assert_eq!(
            state.to_query_string(),
            "current=P+12%26b&from=2022-04-01&to=2022-04-09"
        );

        let unselected = QueryState::new().with_range(Some(day(2022, 4, 1)), None);
        assert_eq!(unselected.to_query_string(), "from=2022-04-01");
        assert_eq!(QueryState::new().to_query_string(), "");
    }

    #[test]
    fn decoding_ignores_unknown_keys_and_bad_values() {
        let state = QueryState::from_query_string("?current=&from=04/01/2022&to=2022-04-09&zoom=8");
        assert_eq!(state.selected_id, None);
        assert_eq!(state.range_start, None);
        assert_eq!(state.range_end, Some(day(2022, 4, 9)));
    }

    #[test]
    fn decoding_restores_encoded_state() {
        let state = QueryState::new()
            .with_selected("P 12&b")
            .with_range(Some(day(2022, 4, 1)), Some(day(2022, 4, 9)));
        assert_eq!(QueryState::from_query_string(&state.to_query_string()), state);
    }

    #[test]
    fn param_date_is_iso() {
        assert_eq!(parse_param_date("2022-04-05"), Some(day(2022, 4, 5)));
        assert_eq!(parse_param_date("5/4/2022"), None);
    }
}
