use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

fn write_fixture(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).expect("write fixture");
    path
}

/// Run the binary with HOME pointed at an empty temp dir so no real
/// config file or stored token leaks into the test.
fn run_z01stats(home: &Path, args: &[&str]) -> (bool, Vec<u8>, Vec<u8>) {
    let bin = env!("CARGO_BIN_EXE_z01stats");
    let output = Command::new(bin)
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .output()
        .expect("run z01stats");
    (output.status.success(), output.stdout, output.stderr)
}

fn aliased_fixture() -> Value {
    json!({
        "user": [{"id": 7, "login": "jdoe"}],
        "moduleXP": [
            {"amount": 100.0, "createdAt": "2024-01-01", "path": "/kisumu/module/quad"},
            {"amount": 50.0, "createdAt": "2024-01-03", "path": "/kisumu/module/ascii"},
            {"amount": 25.0, "createdAt": "2024-01-02", "path": "/kisumu/module/sudoku"}
        ],
        "skills": [
            {"type": "skill_go", "amount": 40.0, "createdAt": "2024-01-01"},
            {"type": "skill_go", "amount": 65.0, "createdAt": "2024-02-01"},
            {"type": "skill_js", "amount": 50.0, "createdAt": "2024-01-15"}
        ],
        "auditsDone": [
            {"amount": 20.0, "createdAt": "2024-01-05", "path": "/kisumu/module/quad"},
            {"amount": 10.0, "createdAt": "2024-01-06", "path": "/kisumu/module/quad"}
        ],
        "auditsReceived": [
            {"amount": 10.0, "createdAt": "2024-01-07", "path": "/kisumu/module/quad"}
        ],
        "progresses": [
            {"grade": 1.2, "createdAt": "2024-02-01"},
            {"grade": null, "createdAt": "2024-02-02"},
            {"grade": "0.8", "createdAt": "2024-01-20"}
        ],
        "audits": [
            {"createdAt": "2024-01-05", "closedAt": "2024-01-06T10:00:00Z"},
            {"createdAt": "2024-01-08", "closedAt": null}
        ]
    })
}

#[test]
fn summary_json_from_aliased_fixture() {
    let home = TempDir::new().unwrap();
    let input = write_fixture(home.path(), "profile.json", &aliased_fixture());

    let (ok, stdout, stderr) = run_z01stats(
        home.path(),
        &["summary", "--json", "--input", input.to_str().unwrap()],
    );
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let doc: Value = serde_json::from_slice(&stdout).expect("json output");
    assert_eq!(doc["user"]["login"], "jdoe");
    assert_eq!(doc["total_xp"], 175.0);
    assert_eq!(doc["audits"]["done"]["count"], 2);
    assert_eq!(doc["audits"]["ratio"], 3.0);
    assert_eq!(doc["open_audits"], 1);
    // Max per skill tag, not sum.
    assert_eq!(doc["top_skills"][0]["name"], "Go");
    assert_eq!(doc["top_skills"][0]["amount"], 65.0);
    // The null grade is excluded from the timeline and the average.
    assert_eq!(doc["grade_timeline"].as_array().unwrap().len(), 2);
    assert_eq!(doc["average_grade"], 1.0);
}

#[test]
fn empty_object_input_yields_zero_statistics() {
    let home = TempDir::new().unwrap();
    let input = write_fixture(home.path(), "empty.json", &json!({}));

    let (ok, stdout, stderr) = run_z01stats(
        home.path(),
        &["summary", "--json", "--input", input.to_str().unwrap()],
    );
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let doc: Value = serde_json::from_slice(&stdout).unwrap();
    assert_eq!(doc["total_xp"], 0.0);
    assert!(doc["top_skills"].as_array().unwrap().is_empty());
    assert!(doc["xp_timeline"].as_array().unwrap().is_empty());
    assert_eq!(doc["audits"]["ratio"], "N/A");
}

#[test]
fn non_object_input_fails_with_shape_error() {
    let home = TempDir::new().unwrap();
    let input = write_fixture(home.path(), "bad.json", &json!([1, 2, 3]));

    let (ok, _stdout, stderr) = run_z01stats(
        home.path(),
        &["summary", "--json", "--input", input.to_str().unwrap()],
    );
    assert!(!ok);
    assert!(String::from_utf8_lossy(&stderr).contains("not a JSON object"));
}

#[test]
fn wrong_typed_collection_fails_naming_the_field() {
    let home = TempDir::new().unwrap();
    let input = write_fixture(home.path(), "bad-field.json", &json!({"skills": "oops"}));

    let (ok, _stdout, stderr) = run_z01stats(
        home.path(),
        &["summary", "--json", "--input", input.to_str().unwrap()],
    );
    assert!(!ok);
    let stderr = String::from_utf8_lossy(&stderr);
    assert!(stderr.contains("skills"), "stderr: {stderr}");
}

#[test]
fn xp_timeline_is_cumulative_and_date_sorted() {
    let home = TempDir::new().unwrap();
    let input = write_fixture(home.path(), "profile.json", &aliased_fixture());

    let (ok, stdout, _) = run_z01stats(
        home.path(),
        &["xp", "--json", "--input", input.to_str().unwrap()],
    );
    assert!(ok);

    let doc: Value = serde_json::from_slice(&stdout).unwrap();
    let cumulative: Vec<f64> = doc["xp_timeline"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["cumulative_xp"].as_f64().unwrap())
        .collect();
    assert_eq!(cumulative, vec![100.0, 125.0, 175.0]);
    assert_eq!(doc["xp_by_category"]["module"], 175.0);
}

#[test]
fn date_filter_restricts_xp_records() {
    let home = TempDir::new().unwrap();
    let input = write_fixture(home.path(), "profile.json", &aliased_fixture());

    let (ok, stdout, _) = run_z01stats(
        home.path(),
        &[
            "xp",
            "--json",
            "--timezone",
            "UTC",
            "--since",
            "2024-01-02",
            "--input",
            input.to_str().unwrap(),
        ],
    );
    assert!(ok);

    let doc: Value = serde_json::from_slice(&stdout).unwrap();
    // Jan 1 is filtered out; Jan 2 + Jan 3 remain.
    assert_eq!(doc["total_xp"], 75.0);
    assert_eq!(doc["xp_timeline"].as_array().unwrap().len(), 2);
}

#[test]
fn skills_json_keeps_max_per_tag_and_caps_to_top() {
    let home = TempDir::new().unwrap();
    let input = write_fixture(home.path(), "profile.json", &aliased_fixture());

    let (ok, stdout, _) = run_z01stats(
        home.path(),
        &[
            "skills",
            "--json",
            "--top",
            "1",
            "--input",
            input.to_str().unwrap(),
        ],
    );
    assert!(ok);

    let doc: Value = serde_json::from_slice(&stdout).unwrap();
    let skills = doc.as_array().unwrap();
    assert_eq!(skills.len(), 1);
    assert_eq!(skills[0]["name"], "Go");
    assert_eq!(skills[0]["amount"], 65.0);
}

#[test]
fn audits_from_user_totals_have_na_counts() {
    let home = TempDir::new().unwrap();
    let fixture = json!({
        "user": [{"login": "jdoe", "totalUp": 25.0, "totalUpBonus": 5.0, "totalDown": 15.0}]
    });
    let input = write_fixture(home.path(), "totals.json", &fixture);

    let (ok, stdout, _) = run_z01stats(
        home.path(),
        &["audits", "--json", "--input", input.to_str().unwrap()],
    );
    assert!(ok);

    let doc: Value = serde_json::from_slice(&stdout).unwrap();
    assert_eq!(doc["audits"]["done"]["count"], "N/A");
    assert_eq!(doc["audits"]["done"]["amount"], 30.0);
    assert_eq!(doc["audits"]["ratio"], 2.0);
}

#[test]
fn data_envelope_is_unwrapped() {
    let home = TempDir::new().unwrap();
    let input = write_fixture(home.path(), "envelope.json", &json!({"data": aliased_fixture()}));

    let (ok, stdout, _) = run_z01stats(
        home.path(),
        &["summary", "--json", "--input", input.to_str().unwrap()],
    );
    assert!(ok);

    let doc: Value = serde_json::from_slice(&stdout).unwrap();
    assert_eq!(doc["total_xp"], 175.0);
}

#[test]
fn user_scoped_shape_via_flat_ledger() {
    let home = TempDir::new().unwrap();
    let fixture = json!({"user": [{
        "id": 9,
        "login": "asmith",
        "transactions": [
            {"type": "xp", "amount": 100.0, "createdAt": "2024-01-01", "path": "/kisumu/module/a"},
            {"type": "up", "amount": 30.0, "createdAt": "2024-01-02", "path": "/kisumu/module/a"},
            {"type": "down", "amount": 10.0, "createdAt": "2024-01-03", "path": "/kisumu/module/a"},
            {"type": "skill_rust", "amount": 55.0, "createdAt": "2024-01-04", "path": ""}
        ]
    }]});
    let input = write_fixture(home.path(), "scoped.json", &fixture);

    let (ok, stdout, _) = run_z01stats(
        home.path(),
        &["summary", "--json", "--input", input.to_str().unwrap()],
    );
    assert!(ok);

    let doc: Value = serde_json::from_slice(&stdout).unwrap();
    assert_eq!(doc["user"]["login"], "asmith");
    assert_eq!(doc["total_xp"], 100.0);
    assert_eq!(doc["audits"]["ratio"], 3.0);
    assert_eq!(doc["top_skills"][0]["name"], "Rust");
}

#[test]
fn progress_limit_caps_query_order_entries() {
    let home = TempDir::new().unwrap();
    // Query order: newest first.
    let fixture = json!({"progresses": [
        {"grade": 3.0, "createdAt": "2024-03-01"},
        {"grade": 2.0, "createdAt": "2024-02-01"},
        {"grade": 1.0, "createdAt": "2024-01-01"}
    ]});
    let input = write_fixture(home.path(), "progress.json", &fixture);

    let (ok, stdout, _) = run_z01stats(
        home.path(),
        &[
            "progress",
            "--json",
            "--limit",
            "2",
            "--input",
            input.to_str().unwrap(),
        ],
    );
    assert!(ok);

    let doc: Value = serde_json::from_slice(&stdout).unwrap();
    let timeline = doc["grade_timeline"].as_array().unwrap();
    assert_eq!(timeline.len(), 2);
    // The two newest entries, re-sorted oldest first.
    assert_eq!(timeline[0]["grade"], 2.0);
    assert_eq!(timeline[1]["grade"], 3.0);
    assert_eq!(doc["average_grade"], 2.5);
}

#[test]
fn malformed_records_are_skipped_not_fatal() {
    let home = TempDir::new().unwrap();
    let fixture = json!({"moduleXP": [
        {"amount": 100.0, "createdAt": "2024-01-01", "path": "/kisumu/module/a"},
        {"amount": "broken", "createdAt": "2024-01-01"},
        {"amount": -5.0, "createdAt": "2024-01-01", "path": "/kisumu/module/a"}
    ]});
    let input = write_fixture(home.path(), "dirty.json", &fixture);

    let (ok, stdout, _) = run_z01stats(
        home.path(),
        &["summary", "--json", "--input", input.to_str().unwrap()],
    );
    assert!(ok);

    let doc: Value = serde_json::from_slice(&stdout).unwrap();
    assert_eq!(doc["total_xp"], 100.0);
    assert_eq!(doc["valid_records"], 1);
    assert_eq!(doc["skipped_records"], 2);
}

#[test]
fn table_output_renders_no_data_states() {
    let home = TempDir::new().unwrap();
    let input = write_fixture(home.path(), "empty.json", &json!({}));

    let (ok, stdout, _) = run_z01stats(
        home.path(),
        &["skills", "--no-color", "--input", input.to_str().unwrap()],
    );
    assert!(ok);
    assert!(String::from_utf8_lossy(&stdout).contains("No skills data available"));

    let (ok, stdout, _) = run_z01stats(
        home.path(),
        &["xp", "--no-color", "--input", input.to_str().unwrap()],
    );
    assert!(ok);
    assert!(String::from_utf8_lossy(&stdout).contains("No XP data available"));
}

#[test]
fn missing_token_without_input_is_actionable_error() {
    let home = TempDir::new().unwrap();

    let (ok, _stdout, stderr) = run_z01stats(home.path(), &["summary", "--json"]);
    assert!(!ok);
    assert!(String::from_utf8_lossy(&stderr).contains("login"));
}

#[test]
fn config_file_sets_defaults() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".config").join("z01stats");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "top_skills = 1\n").unwrap();

    let input = write_fixture(home.path(), "profile.json", &aliased_fixture());
    let (ok, stdout, stderr) = run_z01stats(
        home.path(),
        &["skills", "--json", "--input", input.to_str().unwrap()],
    );
    assert!(ok, "stderr: {}", String::from_utf8_lossy(&stderr));

    let doc: Value = serde_json::from_slice(&stdout).unwrap();
    assert_eq!(doc.as_array().unwrap().len(), 1);
}
