use super::loom;
use loom_cli::test_utils::{MockResponse, RELEASES_PATH, TestEnvironment};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_no_releases_exit_code() {
    let env = TestEnvironment::new();
    env.server.mock(RELEASES_PATH, MockResponse::json("[]"));

    loom(&env, "/bin/bash")
        .arg("install")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("No releases found for KlangLang/Klang"));
}

#[test]
fn test_missing_asset_names_release() {
    let env = TestEnvironment::new();
    env.server.mock(
        RELEASES_PATH,
        MockResponse::json(r#"[{"tag_name": "v9", "assets": []}]"#),
    );

    loom(&env, "/bin/bash")
        .arg("install")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("klang.jar not found in release v9"));
}

#[test]
fn test_api_error_is_network_error() {
    let env = TestEnvironment::new();
    env.server.mock(RELEASES_PATH, MockResponse::status(500));

    loom(&env, "/bin/bash")
        .arg("install")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Network error"));
}

#[test]
fn test_unknown_tag() {
    let env = TestEnvironment::new();
    env.publish(&["v1"]);

    loom(&env, "/bin/bash")
        .args(["install", "--tag", "v7"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Release 'v7' not found"));
}

#[test]
fn test_truncated_download_exit_code() {
    let env = TestEnvironment::new();
    env.publish(&["v1"]);
    env.server.mock("/download/v1/klang.jar", MockResponse::truncated(vec![0; 10], 100));

    loom(&env, "/bin/bash")
        .arg("install")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Incomplete download"));
    assert!(!env.paths().artifact().exists());
}

#[test]
fn test_malformed_config() {
    let env = TestEnvironment::new();
    fs::write(&env.config_path, "[release\n").unwrap();

    loom(&env, "/bin/bash")
        .arg("install")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid configuration file"));
}
