//! Core domain logic for the protest map.
//! This crate is the single source of truth for dataset invariants.

pub mod config;
pub mod dataset;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod present;
pub mod query;
pub mod service;
pub mod source;

pub use config::{load_config, ConfigError, TrackerConfig};
pub use dataset::{load_once, read_dataset, write_dataset, Dataset, DatasetError};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::point::{Point, PointSize};
pub use model::raw_row::RawRow;
pub use normalize::{normalize, ColumnMap, NormalizeOutcome, Normalizer};
pub use present::{MapScene, MarkerStyle, MarkerView, PopupView, RenderOptions, ThemeVariant};
pub use query::{
    canonicalize, filter_by_range, resolve_range, resolve_selection, DateRange, QueryState, View,
    ViewEngine,
};
pub use service::build_service::{build_dataset, BuildError, BuildReport};
pub use source::{JsonRowSource, RowSource, SourceError, StaticRowSource};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
