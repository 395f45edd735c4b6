//! Binary-level tests: argument handling and `--json` output
//!
//! JSON goes to stdout and logs to stderr, so stdout must parse as-is.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{page_json, restaurant_json, temp_config_file};

fn gourmet() -> Command {
    Command::cargo_bin("gourmet").expect("binary should build")
}

#[test]
fn test_help_lists_commands() {
    gourmet()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("browse"))
        .stdout(predicate::str::contains("availability"));
}

#[test]
fn test_missing_command_fails() {
    gourmet().assert().failure();
}

#[test]
fn test_invalid_config_is_rejected() {
    let (_dir, config_path) = temp_config_file("browse:\n  page_size: 0\n");
    gourmet()
        .args(["--config", config_path.to_str().unwrap(), "health"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("page_size"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_json_applies_filters_locally() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/restaurants"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![
                restaurant_json(1, "Raoul's", "SoHo", "French"),
                restaurant_json(2, "Frenchette", "Tribeca", "French"),
                restaurant_json(3, "Lure Fishbar", "SoHo", "Seafood"),
            ],
            3,
            1,
            100,
            1,
        )))
        .mount(&server)
        .await;

    let (_dir, config_path) = temp_config_file("browse:\n  page_size: 1\n");
    let uri = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        gourmet()
            .args([
                "--config",
                config_path.to_str().unwrap(),
                "list",
                "--neighborhood",
                "SoHo",
                "--page",
                "2",
                "--json",
                "--api-base",
                uri.as_str(),
            ])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success());
    let page: Value = serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(page["total"], json!(2));
    assert_eq!(page["total_pages"], json!(2));
    assert_eq!(page["page"], json!(2));
    assert_eq!(page["items"][0]["name"], json!("Lure Fishbar"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stats_failure_exits_nonzero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let uri = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        gourmet()
            .args(["--config", "does-not-exist.yaml", "stats", "--api-base", uri.as_str()])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("503"));
}
