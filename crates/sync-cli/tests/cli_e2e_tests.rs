//! CLI end-to-end tests that invoke the compiled `sync-files` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use sync_test_utils::git::SourceRepo;
use sync_test_utils::repo::ConsumerRepo;

fn sync_files(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sync-files").expect("Failed to find sync-files binary");
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("SYNC_FILES_DEBUG");
    cmd
}

fn source_with_hello() -> SourceRepo {
    let source = SourceRepo::new();
    source.write("a.txt", "hello\n");
    source.commit("add a.txt");
    source
}

fn consumer_for(source: &SourceRepo, mode: Option<&str>) -> ConsumerRepo {
    let repo = ConsumerRepo::new();
    repo.write_sync_config(&source.url(), "main", &[("a.txt", "a.txt")], mode);
    repo
}

#[test]
fn test_help_exits_zero() {
    let repo = ConsumerRepo::new();
    sync_files(repo.root())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--write"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn test_no_config_is_a_successful_no_op() {
    let repo = ConsumerRepo::new();
    repo.write_file("a.txt", "untouched\n");

    sync_files(repo.root())
        .arg("--write")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("nothing to sync"));

    repo.assert_file_eq("a.txt", "untouched\n");
}

#[test]
fn test_identical_files_pass() {
    let source = source_with_hello();
    let repo = consumer_for(&source, None);
    repo.write_file("a.txt", "hello\n");

    sync_files(repo.root())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("All 1 file(s) match"));
}

#[test]
fn test_check_drift_exits_one_with_hint() {
    let source = source_with_hello();
    let repo = consumer_for(&source, None);
    repo.write_file("a.txt", "hello world\n");

    sync_files(repo.root())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("a.txt differs from source a.txt"))
        .stderr(predicate::str::contains(
            "Run with --write to automatically sync files.",
        ));

    repo.assert_file_eq("a.txt", "hello world\n");
}

#[test]
fn test_write_flag_repairs_drift() {
    let source = source_with_hello();
    let repo = consumer_for(&source, None);
    repo.write_file("a.txt", "hello world\n");

    sync_files(repo.root())
        .arg("--write")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Updated a.txt from a.txt"));

    repo.assert_file_eq("a.txt", "hello\n");
    sync_files(repo.root()).assert().code(0);
}

#[test]
fn test_configured_write_mode_is_used_without_flag() {
    let source = source_with_hello();
    let repo = consumer_for(&source, Some("write"));

    sync_files(repo.root())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Created a.txt from a.txt"));

    repo.assert_file_eq("a.txt", "hello\n");
}

#[test]
fn test_source_missing_in_write_mode_exits_one_without_hint() {
    let source = source_with_hello();
    let repo = ConsumerRepo::new();
    repo.write_sync_config(&source.url(), "main", &[("gone.txt", "gone.txt")], None);

    sync_files(repo.root())
        .arg("--write")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist in the source repository"))
        .stderr(predicate::str::contains("--write").not());
}

#[test]
fn test_invalid_config_exits_two_naming_field() {
    let repo = ConsumerRepo::new();
    repo.write_config("[source]\nrepo = \"https://example.com/x.git\"\n\n[[files]]\nsrc = \"a\"\ndst = \"a\"\n");

    sync_files(repo.root())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("config error"))
        .stderr(predicate::str::contains("source.ref"));
}

#[test]
fn test_unparseable_config_exits_two() {
    let repo = ConsumerRepo::new();
    repo.write_config("[source\nrepo = 1\n");

    sync_files(repo.root())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to parse"));
}

#[test]
fn test_missing_explicit_config_exits_two() {
    let repo = ConsumerRepo::new();

    sync_files(repo.root())
        .args(["--config", "nope.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration not found"));
}

#[test]
fn test_unknown_ref_exits_three() {
    let source = source_with_hello();
    let repo = ConsumerRepo::new();
    repo.write_sync_config(&source.url(), "no-such-ref", &[("a.txt", "a.txt")], None);

    sync_files(repo.root())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("fetch error"))
        .stderr(predicate::str::contains("no-such-ref"));
}

#[test]
fn test_dir_flag_selects_consumer() {
    let source = source_with_hello();
    let repo = consumer_for(&source, None);
    let elsewhere = ConsumerRepo::new();

    sync_files(elsewhere.root())
        .args(["--write", "-C"])
        .arg(repo.root())
        .assert()
        .code(0);

    repo.assert_file_eq("a.txt", "hello\n");
    elsewhere.assert_file_not_exists("a.txt");
}

#[test]
fn test_json_report_lists_diagnostics() {
    let source = source_with_hello();
    let repo = consumer_for(&source, None);
    repo.write_file("a.txt", "hello world\n");

    let output = sync_files(repo.root())
        .arg("--json")
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["outcome"], "fail");
    assert_eq!(value["report"]["mode"], "check");
    assert_eq!(value["report"]["diagnostics"][0]["kind"], "differ");
    assert_eq!(value["report"]["diagnostics"][0]["dst"], "a.txt");
    assert_eq!(value["report"]["commit"], source.head());
}

#[test]
fn test_json_error_names_kind() {
    let repo = ConsumerRepo::new();
    repo.write_config("not toml at all = = =\n");

    let output = sync_files(repo.root())
        .arg("--json")
        .assert()
        .code(2)
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["outcome"], "error");
    assert_eq!(value["error"]["kind"], "config_parse");
}
