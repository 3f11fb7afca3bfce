use assert_cmd::prelude::*;
use predicates::prelude::*;

fn albctl() -> std::process::Command {
    std::process::Command::new(assert_cmd::cargo::cargo_bin!("albctl"))
}

const FASTEST: &str = r#"{"name": "web", "lb_algorithm": "LB_ALGORITHM_FASTEST_RESPONSE"}"#;

#[test]
fn validate_reports_edition_violations() {
    let assert = albctl()
        .args(["validate", "pool", FASTEST, "--edition", "basic", "--json"])
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).expect("json");
    assert_eq!(json["data"]["valid"], false);
    assert_eq!(json["data"]["violations"][0]["violation"], "edition_restricted");
    assert_eq!(json["data"]["violations"][0]["field"], "lb_algorithm");
    assert_eq!(json["meta"]["edition"], "basic");
}

#[test]
fn edition_comes_from_environment() {
    albctl()
        .env("ALB_EDITION", "enterprise")
        .args(["validate", "pool", FASTEST])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok"));
}

#[test]
fn strict_mode_fails_on_violations() {
    albctl()
        .args(["validate", "pool", FASTEST, "--edition", "essentials", "--strict"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("lb_algorithm"))
        .stderr(predicate::str::contains("1 violation(s)"));
}

#[test]
fn api_version_flags_newer_fields() {
    albctl()
        .args([
            "validate",
            "pool",
            r#"{"name": "web", "append_port": "ALWAYS"}"#,
            "--api-version",
            "18.2.3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("introduced in 20.1.1"));
}

#[test]
fn collection_violations_point_into_results() {
    let assert = albctl()
        .args([
            "validate",
            "healthmonitor",
            "--collection",
            "--json",
            r#"{"count": 2, "results": [
                {"name": "a", "type": "HEALTH_MONITOR_TCP"},
                {"name": "b", "type": "HEALTH_MONITOR_TCP", "send_interval": 0}
            ]}"#,
        ])
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).expect("json");
    assert_eq!(json["data"]["violations"][0]["field"], "results[1].send_interval");
    assert_eq!(json["data"]["violations"][0]["violation"], "out_of_range");
}

#[test]
fn schema_command_prints_draft_07() {
    let assert = albctl()
        .args(["schema", "virtualservice", "--json"])
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).expect("json");
    assert_eq!(json["data"]["$schema"], "http://json-schema.org/draft-07/schema#");
    assert_eq!(json["data"]["required"], serde_json::json!(["name"]));
}
