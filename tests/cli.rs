//! End-to-end checks of the CLI surface against the built binary
//!
//! Everything here is side-effect free: early exits, previews, and
//! validation failures that abort before any filesystem or network call.

use assert_cmd::Command;
use predicates::prelude::*;

fn starter() -> Command {
    Command::cargo_bin("starter").expect("binary builds")
}

fn stdout_of(assert: assert_cmd::assert::Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout).into_owned()
}

#[test]
fn help_lists_the_main_flags() {
    starter()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--json"))
        .stdout(predicate::str::contains("--pm"))
        .stdout(predicate::str::contains("--no-clear"))
        .stdout(predicate::str::contains("--no-update-name"));
}

#[test]
fn version_prints_semver() {
    starter()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\d+\.\d+\.\d+").unwrap());
}

#[test]
fn version_json_shape() {
    let assert = starter().args(["--version", "--json"]).assert().success();
    let payload: serde_json::Value = serde_json::from_str(stdout_of(assert).trim()).unwrap();
    let version = payload["version"].as_str().unwrap();
    assert!(
        predicate::str::is_match(r"^\d+\.\d+\.\d+$").unwrap().eval(version),
        "not a semver: {version}"
    );
}

#[test]
fn list_templates_prints_ids() {
    starter()
        .arg("--list-templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("starter-ts"));
}

#[test]
fn list_templates_json_is_an_array_of_entries() {
    let assert = starter()
        .args(["--list-templates", "--json"])
        .assert()
        .success();
    let payload: serde_json::Value = serde_json::from_str(stdout_of(assert).trim()).unwrap();
    assert!(payload
        .as_array()
        .unwrap()
        .iter()
        .any(|t| t["value"] == "starter-ts"));
}

#[test]
fn dry_run_json_emits_the_full_plan_without_side_effects() {
    let scratch = tempfile::tempdir().unwrap();
    let assert = starter()
        .current_dir(scratch.path())
        .args([
            "my-app",
            "--template",
            "starter-ts",
            "--dry-run",
            "--json",
            "--no-gum",
            "--no-clear",
        ])
        .assert()
        .success();

    let plan: serde_json::Value = serde_json::from_str(stdout_of(assert).trim()).unwrap();
    assert_eq!(plan["template"], "starter-ts");
    assert_eq!(plan["projectName"], "my-app");
    assert_eq!(plan["packageName"], "my-app");
    assert!(plan["cloneCommand"].as_str().unwrap().contains("degit"));
    assert!(plan["projectDir"].as_str().unwrap().ends_with("my-app"));

    assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
}

#[test]
fn dry_run_json_honors_positional_order() {
    let scratch = tempfile::tempdir().unwrap();
    for argv in [
        ["my-app", "./projects"],
        ["./projects", "my-app"],
    ] {
        let assert = starter()
            .current_dir(scratch.path())
            .args(argv)
            .args(["--template", "starter-ts", "--dry-run", "--json"])
            .assert()
            .success();
        let plan: serde_json::Value = serde_json::from_str(stdout_of(assert).trim()).unwrap();
        assert_eq!(plan["projectName"], "my-app");
        assert!(plan["baseDir"].as_str().unwrap().ends_with("projects"));
    }
    assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
}

#[test]
fn dry_run_json_nulls_out_skipped_steps() {
    let assert = starter()
        .args([
            "my-app",
            "--template",
            "starter-ts",
            "--dry-run",
            "--json",
            "--no-install",
            "--no-open",
            "--no-update-name",
        ])
        .assert()
        .success();
    let plan: serde_json::Value = serde_json::from_str(stdout_of(assert).trim()).unwrap();
    assert!(plan["install"].is_null());
    assert!(plan["vscode"].is_null());
    assert!(plan["packageName"].is_null());
}

#[test]
fn dry_run_json_without_a_name_is_a_structured_error() {
    let assert = starter()
        .args(["--template", "starter-ts", "--dry-run", "--json"])
        .assert()
        .code(1);
    let payload: serde_json::Value = serde_json::from_str(stdout_of(assert).trim()).unwrap();
    assert_eq!(payload["error"], "Missing project name.");
}

#[test]
fn dry_run_json_without_a_template_is_a_structured_error() {
    let assert = starter()
        .args(["my-app", "--dry-run", "--json"])
        .assert()
        .code(1);
    let payload: serde_json::Value = serde_json::from_str(stdout_of(assert).trim()).unwrap();
    assert_eq!(payload["error"], "Missing --template.");
}

#[test]
fn plain_dry_run_touches_nothing_and_exits_zero() {
    let scratch = tempfile::tempdir().unwrap();
    starter()
        .current_dir(scratch.path())
        .args([
            "my-app",
            "--template",
            "starter-ts",
            "--dry-run",
            "--no-open",
            "--no-gum",
            "--no-clear",
        ])
        .assert()
        .success();
    assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
}

#[test]
fn absolute_path_is_rejected() {
    starter()
        .args(["--path", "/tmp", "--no-clear"])
        .assert()
        .code(1);
}

#[test]
fn unknown_template_fails_before_any_side_effect() {
    let scratch = tempfile::tempdir().unwrap();
    let assert = starter()
        .current_dir(scratch.path())
        .args(["my-app", "--template", "no-such-template", "--dry-run", "--json"])
        .assert()
        .code(1);
    let payload: serde_json::Value = serde_json::from_str(stdout_of(assert).trim()).unwrap();
    assert_eq!(payload["error"], "Unknown template: no-such-template");
    assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
}

#[test]
fn unknown_template_also_fails_the_interactive_route() {
    let scratch = tempfile::tempdir().unwrap();
    starter()
        .current_dir(scratch.path())
        .args(["my-app", "--template", "no-such-template", "--no-clear"])
        .assert()
        .code(1);
    assert_eq!(std::fs::read_dir(scratch.path()).unwrap().count(), 0);
}

#[test]
fn invalid_project_name_is_rejected_before_prompting() {
    starter()
        .args(["a/b", "--template", "starter-ts", "--dry-run", "--no-clear"])
        .assert()
        .code(1);
}

#[test]
fn existing_target_directory_fails_without_force() {
    let scratch = tempfile::tempdir().unwrap();
    std::fs::create_dir(scratch.path().join("my-app")).unwrap();
    starter()
        .current_dir(scratch.path())
        .args([
            "my-app",
            "--template",
            "starter-ts",
            "--dry-run",
            "--no-clear",
        ])
        .assert()
        .code(1);
}

#[test]
fn force_lets_the_dry_run_pass_an_existing_directory() {
    let scratch = tempfile::tempdir().unwrap();
    std::fs::create_dir(scratch.path().join("my-app")).unwrap();
    starter()
        .current_dir(scratch.path())
        .args([
            "my-app",
            "--template",
            "starter-ts",
            "--dry-run",
            "--force",
            "--no-clear",
        ])
        .assert()
        .success();
}

#[test]
fn force_is_forwarded_into_the_clone_command() {
    let assert = starter()
        .args([
            "my-app",
            "--template",
            "starter-ts",
            "--dry-run",
            "--json",
            "--force",
        ])
        .assert()
        .success();
    let plan: serde_json::Value = serde_json::from_str(stdout_of(assert).trim()).unwrap();
    assert!(plan["cloneCommand"].as_str().unwrap().contains("--force"));
}
