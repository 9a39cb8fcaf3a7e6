use protestmap_core::{load_config, ConfigError, TrackerConfig};
use std::fs;
use std::path::Path;

#[test]
fn load_config_reads_custom_columns_and_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{
            "columns": {"id": "ID", "coordinates": "Coords"},
            "dataset_path": "public/points.json",
            "render": {"show_embeds": true}
        }"#,
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    let defaults = TrackerConfig::default();
    assert_eq!(config.columns.id, "ID");
    assert_eq!(config.columns.coordinates, "Coords");
    assert_eq!(config.columns.date, defaults.columns.date);
    assert_eq!(config.dataset_path, Path::new("public/points.json"));
    assert!(config.render.show_embeds);
    assert_eq!(config.render.theme, defaults.render.theme);
}

#[test]
fn load_config_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();

    let err = load_config(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("missing.json"));
}

#[test]
fn load_config_reports_invalid_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"columns": "#).unwrap();

    let err = load_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Json { .. }));

    fs::write(&path, r#"{"render": {"marker_style": "triangle"}}"#).unwrap();
    let err = load_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Json { .. }));
}
