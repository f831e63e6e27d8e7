//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SAMPLE: &str = "\
清晨的雾还没有散。小镇的石板路湿漉漉的，早点铺子已经冒出了热气。\n\n\
卖豆浆的老人笑着招呼每一个路过的人。孩子们背着书包跑过桥头，笑声传得很远。\n";

const OTHER: &str = "The quarterly report is attached. Please review the figures before Friday.";

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env_remove("WENFENG_TOKENIZER").env_remove("RUST_LOG");
    cmd
}

/// A command that runs inside `dir` and logs there too.
fn cmd_in(dir: &Path) -> Command {
    let mut cmd = cmd();
    cmd.env("WENFENG_LOG_DIR", dir.join("logs"))
        .args(["-C", dir.to_str().unwrap()]);
    cmd
}

fn workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("sample.txt"), SAMPLE).unwrap();
    fs::write(tmp.path().join("other.txt"), OTHER).unwrap();
    tmp
}

fn stdout_json(output: &std::process::Output) -> Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("learn"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn long_help_lists_environment() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("WENFENG_TOKENIZER"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn no_subcommand_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn invalid_subcommand_shows_error() {
    cmd()
        .arg("not-a-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// =============================================================================
// Info Command
// =============================================================================

#[test]
fn info_shows_package_name_and_version() {
    let tmp = TempDir::new().unwrap();
    cmd_in(tmp.path())
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")))
        .stdout(predicate::str::contains("Tokenizer"));
}

#[test]
fn info_json_outputs_valid_json() {
    let tmp = TempDir::new().unwrap();
    let output = cmd_in(tmp.path()).args(["info", "--json"]).output().unwrap();
    let json = stdout_json(&output);

    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// Global Flags
// =============================================================================

#[test]
fn verbosity_and_color_flags_accepted() {
    let tmp = TempDir::new().unwrap();
    for flags in [
        ["-q", "--color=never"],
        ["-v", "--color=always"],
        ["-vv", "--color=auto"],
    ] {
        cmd_in(tmp.path()).args(flags).arg("info").assert().success();
    }
}

#[test]
fn chdir_nonexistent_fails() {
    cmd()
        .args(["-C", "/nonexistent/path/that/does/not/exist", "info"])
        .assert()
        .failure();
}

// =============================================================================
// Analyze
// =============================================================================

#[test]
fn analyze_prints_report() {
    let tmp = workspace();
    cmd_in(tmp.path())
        .args(["--color", "never", "analyze", "sample.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Style Analysis Report"))
        .stdout(predicate::str::contains("### Syntax"));
}

#[test]
fn analyze_json_outputs_analysis() {
    let tmp = workspace();
    let output = cmd_in(tmp.path())
        .args(["--json", "analyze", "sample.txt", "--tokenizer", "char"])
        .output()
        .unwrap();
    let json = stdout_json(&output);

    assert_eq!(json["syntax"]["sentence_count"], 4);
    assert!(json["vocabulary"]["vocabulary_richness"].as_f64().unwrap() <= 1.0);
    assert!(json["metadata"]["analyzed_at"].is_string());
}

#[test]
fn analyze_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    cmd_in(tmp.path())
        .args(["analyze", "missing.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn analyze_respects_input_limit() {
    let tmp = workspace();
    fs::write(tmp.path().join(".wenfeng.toml"), "max_input_bytes = 16\n").unwrap();
    cmd_in(tmp.path())
        .args(["analyze", "sample.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input too large"));
}

#[test]
fn analyze_empty_file_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("empty.txt"), "\n\n").unwrap();
    cmd_in(tmp.path())
        .args(["analyze", "empty.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("non-empty"));
}

// =============================================================================
// Learn / Check / Confidence
// =============================================================================

#[test]
fn learn_to_stdout_emits_profile() {
    let tmp = workspace();
    let output = cmd_in(tmp.path())
        .args(["learn", "sample.txt", "--name", "town"])
        .output()
        .unwrap();
    let json = stdout_json(&output);

    assert_eq!(json["style_name"], "town");
    assert!(json["vocabulary"]["top_words"].is_array());
    assert!(json["confidence"]["breakdown"]["S"].as_f64().is_some());
}

#[test]
fn learn_then_check_same_text_scores_full() {
    let tmp = workspace();
    cmd_in(tmp.path())
        .args(["--color", "never", "learn", "sample.txt", "-o", "town.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Confidence:"));
    assert!(tmp.path().join("town.json").is_file());

    let output = cmd_in(tmp.path())
        .args(["--json", "check", "sample.txt", "--profile", "town.json", "--min-score", "99"])
        .output()
        .unwrap();
    let json = stdout_json(&output);
    assert!((json["overall"].as_f64().unwrap() - 100.0).abs() < 1e-6);
    assert_eq!(json["overall_level"], "high");
}

#[test]
fn check_below_minimum_fails() {
    let tmp = workspace();
    cmd_in(tmp.path())
        .args(["learn", "sample.txt", "-o", "town.json"])
        .assert()
        .success();

    cmd_in(tmp.path())
        .args(["check", "other.txt", "--profile", "town.json", "--min-score", "99.9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("below minimum"));
}

#[test]
fn check_accepts_partial_profile() {
    let tmp = workspace();
    fs::write(
        tmp.path().join("partial.json"),
        r#"{"syntax": {"avgSentenceLength": 20}, "sentiment": {"emotional_tone": "positive"}}"#,
    )
    .unwrap();

    cmd_in(tmp.path())
        .args(["--color", "never", "check", "sample.txt", "--profile", "partial.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vocabulary"))
        .stdout(predicate::str::contains("Rhythm"));
}

#[test]
fn confidence_regrades_saved_profile() {
    let tmp = workspace();
    cmd_in(tmp.path())
        .args(["learn", "sample.txt", "-o", "town.json"])
        .assert()
        .success();

    let output = cmd_in(tmp.path())
        .args([
            "--json",
            "confidence",
            "town.json",
            "--reference",
            "town.json",
        ])
        .output()
        .unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["breakdown"]["U"].as_f64().unwrap(), 0.0);
}

// =============================================================================
// Clean
// =============================================================================

#[test]
fn clean_strips_page_numbers() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("raw.txt"), "第一段。\n- 12 -\n第二段。\n").unwrap();

    let output = cmd_in(tmp.path())
        .args(["--json", "clean", "raw.txt"])
        .output()
        .unwrap();
    let json = stdout_json(&output);
    assert_eq!(json["preprocess"]["text"], "第一段。\n\n第二段。");
    assert!(json["quality"]["suggestions"].is_array());
}

#[test]
fn clean_writes_output_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("raw.txt"), "他说:\"好\"\n\n\n\n结束 了。").unwrap();

    cmd_in(tmp.path())
        .args(["clean", "raw.txt", "-o", "clean.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quality:"));

    let cleaned = fs::read_to_string(tmp.path().join("clean.txt")).unwrap();
    assert_eq!(cleaned, "他说：\"好\"\n\n结束了。");
}
