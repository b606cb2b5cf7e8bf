//! End-to-end tests driving the built binary.

use indoc::indoc;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const SYSTEMS: &str = indoc! {r#"
    {
      "systems": [
        { "id": "hvac-1", "system_type": "hvac", "install_date": "2012-06-01" },
        { "id": "roof-1", "system_type": "roof", "install_date": "2019-04-15",
          "installation_verified": true, "maintenance_score": 0.8,
          "feature_completeness": 0.9 },
        { "id": "wh-1", "system_type": "water_heater" }
      ]
    }
"#};

const REQUEST: &str = indoc! {r#"
    {
      "system_id": "hvac-1",
      "system_type": "hvac",
      "risk": { "probability": 0.5 },
      "costs": { "emergency_replacement": 10000.0, "proactive_replacement": 7000.0 },
      "context": {
        "state": "TX",
        "flags": [
          { "kind": "freeze_warning", "valid_from": "2026-01-10", "valid_until": "2026-01-20" },
          { "kind": "heat_wave", "valid_from": "2026-07-01", "valid_until": "2026-07-10" }
        ]
      },
      "as_of": "2026-01-15"
    }
"#};

/// Run homerisk in `dir` with an isolated config.
fn homerisk(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_homerisk"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("HOMERISK_CONFIG")
        .args(args)
        .output()
        .expect("Failed to execute homerisk")
}

fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("systems.json"), SYSTEMS).unwrap();
    fs::write(dir.path().join("request.json"), REQUEST).unwrap();
    fs::write(
        dir.path().join(".homerisk.toml"),
        "[home]\nintervention_threshold = 500.0\n",
    )
    .unwrap();
    dir
}

fn stdout_json(output: &Output) -> Value {
    if !output.status.success() {
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("homerisk failed");
    }
    serde_json::from_slice(&output.stdout).expect("stdout is not valid JSON")
}

#[test]
fn window_reports_each_system_in_input_order() {
    let dir = workspace();
    let json = stdout_json(&homerisk(
        dir.path(),
        &["window", "-i", "systems.json", "--now", "2026-01-15", "-f", "json"],
    ));

    let rows = json.as_array().unwrap();
    let ids: Vec<_> = rows.iter().map(|r| r["system_id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["hvac-1", "roof-1", "wh-1"]);

    let hvac = &rows[0]["window"];
    assert_eq!(hvac["p50"], "2026-01-15");
    assert_eq!(hvac["model_version"], "2024.1");
    assert_eq!(hvac["provenance"]["calibration_fallback"], false);
    assert!(rows[0]["failure_probability_12mo"].as_f64().unwrap() > 0.4);

    assert!(rows[2].get("window").is_none());
    assert!(rows[2]["error"].as_str().unwrap().contains("install date"));
}

#[test]
fn score_applies_active_flags_and_captures_snapshot() {
    let dir = workspace();
    let json = stdout_json(&homerisk(
        dir.path(),
        &["score", "-i", "request.json", "--capture", "-f", "json"],
    ));

    let scored = &json[0];
    let result = &scored["result"];
    // 0.5 * 10000 + freeze warning 1500; heat wave is out of its window
    assert_eq!(result["score"], 6500.0);
    assert_eq!(result["eligible"], true);
    assert_eq!(result["urgency_factors"]["freeze_warning"], true);
    assert_eq!(result["urgency_factors"]["heat_wave"], false);
    assert_eq!(result["projected_savings"], 3000.0);
    assert_eq!(scored["snapshot"]["revision"], 1);
    assert_eq!(scored["snapshot"]["captured_at"], "2026-01-15");
}

#[test]
fn threshold_flag_overrides_config() {
    let dir = workspace();
    let json = stdout_json(&homerisk(
        dir.path(),
        &["score", "-i", "request.json", "--threshold", "7000", "-f", "json"],
    ));
    assert_eq!(json[0]["result"]["eligible"], false);
    assert_eq!(json[0]["result"]["threshold"], 7000.0);
    assert!(json[0].get("snapshot").is_none());
}

#[test]
fn timeline_skips_systems_without_install_date() {
    let dir = workspace();
    let json = stdout_json(&homerisk(
        dir.path(),
        &[
            "timeline", "-i", "systems.json", "--now", "2026-01-15", "--horizon", "10", "-f",
            "json",
        ],
    ));

    assert_eq!(json["start_year"], 2026);
    assert_eq!(json["end_year"], 2036);
    let ids: Vec<_> = json["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["system_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["hvac-1", "roof-1"]);
    assert_eq!(json["rows"][0]["tier"], "urgent");
}

#[test]
fn terminal_timeline_renders_a_table() {
    let dir = workspace();
    let output = homerisk(
        dir.path(),
        &["timeline", "-i", "systems.json", "--now", "2026-01-15"],
    );
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("hvac-1"));
    assert!(text.contains("roof-1"));
}

#[test]
fn impact_falls_back_for_unknown_types() {
    let dir = workspace();
    let json = stdout_json(&homerisk(
        dir.path(),
        &["impact", "--system-type", "garage door", "-f", "json"],
    ));
    assert_eq!(json["system_type"], "garage_door");
    assert_eq!(json["estimate"]["source"], "generic_fallback");
    assert_eq!(json["estimator"], "static-table");
}

#[test]
fn init_writes_config_once() {
    let dir = TempDir::new().unwrap();
    assert!(homerisk(dir.path(), &["init"]).status.success());
    assert!(dir.path().join(".homerisk.toml").exists());
    assert!(!homerisk(dir.path(), &["init"]).status.success());
    assert!(homerisk(dir.path(), &["init", "--force"]).status.success());
}

#[test]
fn invalid_config_fails_loudly() {
    let dir = workspace();
    fs::write(
        dir.path().join(".homerisk.toml"),
        "[timeline]\nhorizon_years = 0\n",
    )
    .unwrap();
    let output = homerisk(dir.path(), &["impact", "--system-type", "hvac"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("horizon_years"));
}

#[cfg(target_os = "linux")]
#[test]
fn failed_output_write_is_an_error() {
    let dir = workspace();
    if !Path::new("/dev/full").exists() {
        return;
    }
    let output = homerisk(
        dir.path(),
        &[
            "window", "-i", "systems.json", "--now", "2026-01-01", "-f", "json", "-o",
            "/dev/full",
        ],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No space left"));
}
