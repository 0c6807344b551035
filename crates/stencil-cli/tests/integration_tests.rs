//! End-to-end tests for the `stencil` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

const TEMPLATE: &str = "type T = u8;\n\npub fn sum(values: &[T]) -> T {\n    values.iter().fold(T::default(), |acc, v| acc + *v)\n}\n";

/// A binary invocation isolated from the user's config and environment.
fn stencil(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("stencil");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("gen")).unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("gen/sliceutil.rs"), TEMPLATE).unwrap();
    dir
}

#[test]
fn help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    stencil(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("transforms"));
}

#[test]
fn version_flag() {
    let dir = TempDir::new().unwrap();
    stencil(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn specialize_writes_lowercased_files() {
    let dir = project();

    stencil(dir.path())
        .args(["generate", "gen/sliceutil.rs", "-o", "src", "-t", "specialize"])
        .args(["--types", "i32,Vec<u8>"])
        .assert()
        .success();

    let i32_text = fs::read_to_string(dir.path().join("src/i32_sliceutil.rs")).unwrap();
    assert!(i32_text.contains("pub fn sum(values: &[i32]) -> i32"));
    assert!(dir.path().join("src/vecu8_sliceutil.rs").is_file());
}

#[test]
fn split_fans_out() {
    let dir = project();
    fs::write(
        dir.path().join("gen/shape.rs"),
        "pub trait Area { fn area(&self) -> f64; }\npub struct Unit;\n",
    )
    .unwrap();

    stencil(dir.path())
        .args(["generate", "gen/shape.rs", "-o", "src", "-t", "split"])
        .assert()
        .success();

    assert!(dir.path().join("src/iface_shape.rs").is_file());
    assert!(dir.path().join("src/impl_shape.rs").is_file());
}

#[test]
fn missing_input_prints_error_line_and_exits_5() {
    let dir = project();

    stencil(dir.path())
        .args(["generate", "gen/missing.rs", "-o", "src"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Error: cannot read gen/missing.rs"));

    assert_eq!(fs::read_dir(dir.path().join("src")).unwrap().count(), 0);
}

#[test]
fn transform_diagnostics_are_printed_one_per_line() {
    let dir = project();

    stencil(dir.path())
        .args(["generate", "gen/sliceutil.rs", "-o", "src", "-t", "specialize"])
        .args(["--types", "Vec<,[u8"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Error: cannot parse type `Vec<`"))
        .stderr(predicate::str::contains("Error: cannot parse type `[u8`"));

    assert_eq!(fs::read_dir(dir.path().join("src")).unwrap().count(), 0);
}

/// Lines on stderr that start with `Error:`.
fn error_lines(stderr: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stderr)
        .lines()
        .filter(|l| l.starts_with("Error:"))
        .map(str::to_owned)
        .collect()
}

#[test]
fn each_error_is_printed_exactly_once() {
    let dir = project();

    let out = stencil(dir.path())
        .args(["generate", "gen/sliceutil.rs", "-o", "src", "-t", "specialize"])
        .args(["--types", "Vec<,[u8"])
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(5));
    assert_eq!(error_lines(&out.stderr).len(), 2);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(!stderr.contains("WARN"), "{stderr}");
    assert!(stderr.contains("Generation failed with 2 error(s)"));
}

#[test]
fn load_failure_prints_a_single_error_line() {
    let dir = project();

    let out = stencil(dir.path())
        .args(["generate", "gen/missing.rs", "-o", "src"])
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(5));
    assert_eq!(error_lines(&out.stderr).len(), 1);
}

#[test]
fn dry_run_writes_nothing() {
    let dir = project();

    stencil(dir.path())
        .args(["generate", "gen/sliceutil.rs", "-o", "src", "-t", "specialize"])
        .args(["--types", "i32", "--dry-run", "--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would write"));

    assert!(!dir.path().join("src/i32_sliceutil.rs").exists());
}

#[test]
fn json_output_is_the_report() {
    let dir = project();

    let assert = stencil(dir.path())
        .args(["--output-format", "json", "generate", "gen/sliceutil.rs"])
        .args(["-o", "src", "-t", "copy"])
        .assert()
        .success();

    let report: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(report["state"], "persisted");
    assert_eq!(report["outputs"][0]["filename"], "copy_sliceutil.rs");
    assert_eq!(report["outputs"][0]["status"], "written");
}

#[test]
fn local_config_sets_default_transform() {
    let dir = project();
    fs::write(
        dir.path().join(".stencil.toml"),
        "[generation]\ndefault_transform = \"copy\"\non_collision = \"reject\"\n",
    )
    .unwrap();

    stencil(dir.path())
        .args(["generate", "gen/sliceutil.rs", "-o", "src", "--name", "Tidy"])
        .assert()
        .success();

    assert!(dir.path().join("src/tidy_sliceutil.rs").is_file());
}

#[test]
fn env_overrides_config() {
    let dir = project();

    stencil(dir.path())
        .env("STENCIL_GENERATION__DEFAULT_TRANSFORM", "weave")
        .args(["generate", "gen/sliceutil.rs", "-o", "src"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("default_transform"));
}

#[test]
fn misplaced_flag_is_user_error() {
    let dir = project();

    stencil(dir.path())
        .args(["generate", "gen/sliceutil.rs", "-o", "src", "-t", "split", "--name", "x"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--name does not apply"));
}

#[test]
fn unknown_config_key_exits_3() {
    let dir = TempDir::new().unwrap();

    stencil(dir.path())
        .args(["config", "get", "generation.colour"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn transforms_lists_every_transform() {
    let dir = TempDir::new().unwrap();

    stencil(dir.path())
        .args(["transforms", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("copy"))
        .stdout(predicate::str::contains("specialize"))
        .stdout(predicate::str::contains("split"));
}

#[test]
fn unknown_subcommand_exits_2() {
    let dir = TempDir::new().unwrap();

    stencil(dir.path()).arg("weave").assert().code(2);
}
