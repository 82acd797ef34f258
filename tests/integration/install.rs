use super::{loom, loom_without_shell};
use loom_cli::test_utils::TestEnvironment;
use predicates::prelude::*;
use std::fs;

const PATH_LINE: &str = r#"export PATH="$HOME/.klang/bin:$PATH""#;

#[test]
fn test_install_creates_layout_and_prints_banner() {
    let env = TestEnvironment::new();
    env.publish(&["v0.2.0", "v0.1.0"]);

    loom(&env, "/bin/zsh")
        .arg("install")
        .assert()
        .success()
        .stdout(predicate::str::contains("Klang installed successfully!"))
        .stdout(predicate::str::contains("source ~/.zshrc"))
        .stdout(predicate::str::contains("kc --version"))
        .stdout(predicate::str::contains("Found latest version: v0.2.0"));

    let paths = env.paths();
    for dir in paths.all() {
        assert!(dir.is_dir(), "{} missing", dir.display());
    }
    let launcher = fs::read_to_string(paths.launcher()).unwrap();
    assert_eq!(
        launcher,
        format!("#!/bin/sh\nexec java -jar '{}' \"$@\"\n", paths.artifact().display())
    );
    assert_eq!(fs::read_to_string(paths.artifact()).unwrap(), TestEnvironment::jar_content("v0.2.0"));
    assert_eq!(fs::read_to_string(paths.version_marker()).unwrap().trim(), "v0.2.0");
    assert_eq!(fs::read_to_string(env.home().join(".zshrc")).unwrap(), format!("{PATH_LINE}\n"));
}

#[test]
fn test_install_twice_adds_one_path_line() {
    let env = TestEnvironment::new();
    env.publish(&["v1"]);
    let bashrc = env.home().join(".bashrc");
    fs::write(&bashrc, "alias ll='ls -l'\n").unwrap();

    loom(&env, "/bin/bash").arg("install").assert().success();
    let launcher = fs::read_to_string(env.paths().launcher()).unwrap();
    loom(&env, "/bin/bash").arg("install").assert().success();

    let content = fs::read_to_string(&bashrc).unwrap();
    assert_eq!(content, format!("alias ll='ls -l'\n{PATH_LINE}\n"));
    assert_eq!(fs::read_to_string(env.paths().launcher()).unwrap(), launcher);
}

#[cfg(unix)]
#[test]
fn test_installed_files_have_expected_modes() {
    use std::os::unix::fs::PermissionsExt;

    let env = TestEnvironment::new();
    env.publish(&["v1"]);
    loom(&env, "/bin/bash").arg("install").assert().success();

    let paths = env.paths();
    let launcher = fs::metadata(paths.launcher()).unwrap().permissions().mode();
    let artifact = fs::metadata(paths.artifact()).unwrap().permissions().mode();
    assert_eq!(launcher & 0o777, 0o755);
    assert_eq!(artifact & 0o777, 0o644);
}

#[test]
fn test_fish_config_is_created() {
    let env = TestEnvironment::new();
    env.publish(&["v1"]);

    loom(&env, "/usr/local/bin/fish")
        .arg("install")
        .assert()
        .success()
        .stdout(predicate::str::contains("source ~/.config/fish/config.fish"));

    let fish = env.home().join(".config/fish/config.fish");
    assert!(fs::read_to_string(fish).unwrap().contains(".klang/bin"));
}

#[test]
fn test_unknown_shell_uses_profile() {
    let env = TestEnvironment::new();
    env.publish(&["v1"]);

    loom(&env, "/bin/tcsh").arg("install").assert().success();
    assert!(fs::read_to_string(env.home().join(".profile")).unwrap().contains(PATH_LINE));
}

#[test]
fn test_missing_shell_fails_before_touching_disk() {
    let env = TestEnvironment::new();
    env.publish(&["v1"]);

    loom_without_shell(&env)
        .arg("install")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("SHELL variable not defined"))
        .stderr(predicate::str::contains("--no-modify-path"));

    assert!(!env.paths().base.exists());
}

#[test]
fn test_no_modify_path() {
    let env = TestEnvironment::new();
    env.publish(&["v1"]);

    loom_without_shell(&env)
        .args(["install", "--no-modify-path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(PATH_LINE));

    assert!(env.paths().artifact().is_file());
    assert!(!env.home().join(".profile").exists());
}

#[test]
fn test_unsupported_component_warns() {
    let env = TestEnvironment::new();
    env.publish(&["v1"]);

    loom(&env, "/bin/bash")
        .args(["install", "klang", "loom-lsp"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Warning: loom does not support loom-lsp yet. Installing klang only.",
        ));
    assert!(env.paths().artifact().is_file());
}

#[test]
fn test_install_specific_tag() {
    let env = TestEnvironment::new();
    env.publish(&["v3", "v2", "v1"]);

    loom(&env, "/bin/bash").args(["install", "--tag", "v2"]).assert().success();
    assert_eq!(fs::read_to_string(env.paths().artifact()).unwrap(), TestEnvironment::jar_content("v2"));
}

#[test]
fn test_quiet_install_prints_nothing() {
    let env = TestEnvironment::new();
    env.publish(&["v1"]);

    loom(&env, "/bin/bash")
        .args(["--quiet", "install"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
