use super::{loom, loom_without_shell};
use loom_cli::test_utils::TestEnvironment;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_update_without_installation() {
    let env = TestEnvironment::new();
    env.publish(&["v1"]);

    loom_without_shell(&env)
        .arg("update")
        .assert()
        .code(6)
        .stderr(predicate::str::contains("not installed"))
        .stderr(predicate::str::contains("loom install"));
}

#[test]
fn test_update_to_new_release() {
    let env = TestEnvironment::new();
    env.publish(&["v1"]);
    loom(&env, "/bin/bash").arg("install").assert().success();
    let bashrc = fs::read_to_string(env.home().join(".bashrc")).unwrap();

    loom_without_shell(&env)
        .arg("update")
        .assert()
        .success()
        .stdout(predicate::str::contains("already up to date"));

    env.publish(&["v2", "v1"]);
    loom_without_shell(&env)
        .arg("update")
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated Klang from v1 to v2"));

    let paths = env.paths();
    assert_eq!(fs::read_to_string(paths.artifact()).unwrap(), TestEnvironment::jar_content("v2"));
    assert_eq!(fs::read_to_string(paths.version_marker()).unwrap().trim(), "v2");
    assert_eq!(fs::read_to_string(env.home().join(".bashrc")).unwrap(), bashrc);
}

#[test]
fn test_update_force_downloads_again() {
    let env = TestEnvironment::new();
    env.publish(&["v1"]);
    loom(&env, "/bin/bash").arg("install").assert().success();
    let downloads = env.server.hits("/download/v1/klang.jar");

    loom_without_shell(&env).args(["update", "--force"]).assert().success();
    assert_eq!(env.server.hits("/download/v1/klang.jar"), downloads + 1);
}

#[test]
fn test_update_repairs_missing_artifact() {
    let env = TestEnvironment::new();
    env.publish(&["v1"]);
    loom(&env, "/bin/bash").arg("install").assert().success();
    let paths = env.paths();
    fs::remove_file(paths.artifact()).unwrap();

    loom_without_shell(&env)
        .arg("update")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reinstalled Klang v1"));
    assert_eq!(fs::read_to_string(paths.artifact()).unwrap(), TestEnvironment::jar_content("v1"));
}
