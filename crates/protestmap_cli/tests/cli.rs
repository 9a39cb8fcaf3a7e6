use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const ROWS: &str = r#"[
    {"Protest_ID": "1", "LatLng (approx)": "6.9,79.8", "Date": "5/4/2022", "Location": "Colombo",
     "Footage (links, add multiple if possible)": "https://twitter.com/someone/status/1", "Size (Small/Medium/Large/XL)": "Large"},
    {"Protest_ID": "2", "LatLng (approx)": "bad", "Date": "1/1/2022"},
    {"Protest_ID": "3", "LatLng (approx)": "7.0,80.0", "Date": "1/4/2022", "Location": "Kandy"}
]"#;

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("protestmap").unwrap();
    cmd.args(["--log-level", "off"]);
    cmd
}

fn built_dataset(tmp: &TempDir) -> std::path::PathBuf {
    let rows = tmp.path().join("rows.json");
    fs::write(&rows, ROWS).unwrap();
    let out = tmp.path().join("data.json");
    cmd()
        .args(["build", "--rows"])
        .arg(&rows)
        .arg("--out")
        .arg(&out)
        .assert()
        .success();
    out
}

fn query_json(data: &Path, args: &[&str]) -> Value {
    let out = cmd()
        .arg("--json")
        .arg("query")
        .arg("--data")
        .arg(data)
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&out).expect("valid json output")
}

#[test]
fn build_reports_fetched_rows() {
    let tmp = TempDir::new().unwrap();
    let rows = tmp.path().join("rows.json");
    fs::write(&rows, ROWS).unwrap();
    let out = tmp.path().join("assets").join("data.json");

    cmd()
        .args(["build", "--rows"])
        .arg(&rows)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(contains("Fetched 3 rows!"))
        .stdout(contains("wrote 2 points"));

    let written: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(written[0]["id"], "3");
    assert_eq!(written[1]["id"], "1");
}

#[test]
fn build_fails_for_missing_snapshot() {
    let tmp = TempDir::new().unwrap();
    cmd()
        .args(["build", "--rows"])
        .arg(tmp.path().join("missing.json"))
        .arg("--out")
        .arg(tmp.path().join("data.json"))
        .assert()
        .failure()
        .stderr(contains("missing.json"));
}

#[test]
fn query_json_emits_canonical_state() {
    let tmp = TempDir::new().unwrap();
    let data = built_dataset(&tmp);

    let body = query_json(&data, &[]);
    assert_eq!(body["visible_points"], 2);
    assert_eq!(body["scene"]["query"], "from=2022-04-01&to=2022-04-05");
    assert_eq!(body["state"]["selected_id"], Value::Null);
    assert_eq!(body["scene"]["popup"], Value::Null);
}

#[test]
fn query_selection_outside_range_still_resolves() {
    let tmp = TempDir::new().unwrap();
    let data = built_dataset(&tmp);

    let body = query_json(&data, &["--url", "current=1&to=2022-04-02"]);
    assert_eq!(body["visible_points"], 1);
    assert_eq!(body["selection_in_range"], false);
    assert_eq!(body["scene"]["popup"]["title"], "Colombo");
    assert_eq!(
        body["scene"]["popup"]["links"][0]["label"],
        "https://twitter.com/someo..."
    );
    assert_eq!(body["scene"]["query"], "current=1&from=2022-04-01&to=2022-04-02");
}

#[test]
fn query_text_output_lists_markers() {
    let tmp = TempDir::new().unwrap();
    let data = built_dataset(&tmp);

    cmd()
        .arg("query")
        .arg("--data")
        .arg(&data)
        .args(["--current", "3", "--from", "2022-04-01"])
        .assert()
        .success()
        .stdout(contains("range 2022-04-01..2022-04-05 (2 of 2 points)"))
        .stdout(contains("marker 3"))
        .stdout(contains("popup Kandy 2022-04-01"))
        .stdout(contains("query current=3&from=2022-04-01&to=2022-04-05"));
}

#[test]
fn query_rejects_malformed_date_flag() {
    let tmp = TempDir::new().unwrap();
    let data = built_dataset(&tmp);

    cmd()
        .arg("query")
        .arg("--data")
        .arg(&data)
        .args(["--from", "5/4/2022"])
        .assert()
        .failure()
        .stderr(contains("YYYY-MM-DD"));
}

#[test]
fn version_prints_core_version() {
    cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(contains("protestmap_core version="));
}

#[test]
fn query_embeds_flag_fills_popup_embeds() {
    let tmp = TempDir::new().unwrap();
    let data = built_dataset(&tmp);

    let plain = query_json(&data, &["--current", "1"]);
    assert_eq!(plain["scene"]["popup"]["embeds"], serde_json::json!([]));

    let embedded = query_json(&data, &["--embeds", "--current", "1"]);
    assert_eq!(
        embedded["scene"]["popup"]["embeds"],
        serde_json::json!(["https://twitter.com/someone/status/1"])
    );
    assert_eq!(embedded["scene"]["options"]["show_embeds"], true);
}

const CUSTOM_ROWS: &str = r#"[
    {"ID": "k1", "Coords": "6.9,79.8", "Date": "5/4/2022"},
    {"ID": "k2", "Coords": "7.0,80.0", "Date": "1/4/2022"},
    {"Protest_ID": "ignored", "LatLng (approx)": "7.1,80.1", "Date": "2/4/2022"}
]"#;

fn write_config(tmp: &TempDir, dataset_path: &Path) -> std::path::PathBuf {
    let config = serde_json::json!({
        "columns": {"id": "ID", "coordinates": "Coords"},
        "dataset_path": dataset_path,
    });
    let path = tmp.path().join("config.json");
    fs::write(&path, config.to_string()).unwrap();
    path
}

#[test]
fn config_file_sets_columns_and_dataset_path() {
    let tmp = TempDir::new().unwrap();
    let rows = tmp.path().join("rows.json");
    fs::write(&rows, CUSTOM_ROWS).unwrap();
    let configured = tmp.path().join("configured").join("data.json");
    let config = write_config(&tmp, &configured);

    cmd()
        .arg("--config")
        .arg(&config)
        .args(["build", "--rows"])
        .arg(&rows)
        .assert()
        .success()
        .stdout(contains("Fetched 3 rows!"))
        .stdout(contains("wrote 2 points"));
    assert!(configured.exists());

    let out = cmd()
        .arg("--config")
        .arg(&config)
        .args(["--json", "query"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let body: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(body["total_points"], 2);
    assert_eq!(body["scene"]["markers"][0]["id"], "k2");
    assert_eq!(body["scene"]["markers"][1]["id"], "k1");
}

#[test]
fn out_and_data_flags_override_configured_dataset_path() {
    let tmp = TempDir::new().unwrap();
    let rows = tmp.path().join("rows.json");
    fs::write(&rows, CUSTOM_ROWS).unwrap();
    let configured = tmp.path().join("configured").join("data.json");
    let config = write_config(&tmp, &configured);
    let explicit = tmp.path().join("explicit.json");

    cmd()
        .arg("--config")
        .arg(&config)
        .args(["build", "--rows"])
        .arg(&rows)
        .arg("--out")
        .arg(&explicit)
        .assert()
        .success();
    assert!(explicit.exists());
    assert!(!configured.exists());

    let out = cmd()
        .arg("--config")
        .arg(&config)
        .args(["--json", "query", "--data"])
        .arg(&explicit)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let body: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(body["total_points"], 2);
}

#[test]
fn config_flag_reports_invalid_file() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("config.json");
    fs::write(&config, "{not json").unwrap();

    cmd()
        .arg("--config")
        .arg(&config)
        .arg("version")
        .assert()
        .failure()
        .stderr(contains("config.json"));
}
