use super::loom;
use loom_cli::test_utils::TestEnvironment;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn system_binary_present() -> bool {
    Path::new("/usr/local/bin/loom").exists()
}

#[test]
fn test_remove_user_binary() {
    // never delete a real system-wide installation
    if system_binary_present() {
        return;
    }
    let env = TestEnvironment::new();
    let binary = env.home().join(".local/bin/loom");
    fs::create_dir_all(binary.parent().unwrap()).unwrap();
    fs::write(&binary, "binary").unwrap();

    loom(&env, "/bin/bash")
        .arg("remove")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed loom from"));
    assert!(!binary.exists());
}

#[test]
fn test_remove_when_not_installed() {
    if system_binary_present() {
        return;
    }
    let env = TestEnvironment::new();

    loom(&env, "/bin/bash")
        .arg("remove")
        .assert()
        .success()
        .stdout(predicate::str::contains("probably not installed"));
}
