#![allow(missing_docs)]

use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;

#[test]
fn analyze_emits_json_report() {
    let output = cargo_bin_cmd!("dboptima")
        .args(["--format", "json", "analyze", "SELECT * FROM users"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: Value = serde_json::from_slice(&output).expect("valid json");
    assert_eq!(json["original_query"], "SELECT * FROM users");
    assert_eq!(json["optimized_query"], "SELECT * FROM users");
    assert_eq!(json["complexity_score"], 10);
    assert!(json["improvements"]
        .as_array()
        .expect("improvements")
        .contains(&Value::from("Select specific columns instead of *")));
}

#[test]
fn analyze_text_output_lists_findings() {
    let output = cargo_bin_cmd!("dboptima")
        .args(["analyze", "SELECT id FROM t WHERE a = 1"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).expect("utf8 output");
    assert!(text.contains("Complexity: 0/100"));
    assert!(text.contains("Consider index on column: a"));
}

#[test]
fn database_type_flag_is_accepted() {
    cargo_bin_cmd!("dboptima")
        .args(["analyze", "--database-type", "mysql", "SELECT 1"])
        .assert()
        .success();
}
