//! CLI integration tests for the eadlangchain command-line interface.
//!
//! Every command runs in a temporary directory with the EADLANGCHAIN_
//! variables cleared, so neither the developer's `.env` nor their shell
//! leaks into the results.

use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, SystemTime};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CLEARED_VARS: &[&str] = &[
    "EADLANGCHAIN_AI_OPENAI_API_KEY",
    "EADLANGCHAIN_AI_OPENAI_MODEL",
    "EADLANGCHAIN_AI_ANTHROPIC_API_KEY",
    "EADLANGCHAIN_AI_ANTHROPIC_MODEL",
    "EADLANGCHAIN_AI_GEMINI_API_KEY",
    "EADLANGCHAIN_AI_GEMINI_MODEL",
    "EADLANGCHAIN_LOG_LEVEL",
    "EADLANGCHAIN_LOG_FILE",
    "EADLANGCHAIN_NOTEBOOK_CONVERTER",
];

/// Get a command for the eadlangchain binary, isolated in `dir`.
fn eadlangchain(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("eadlangchain").unwrap();
    cmd.current_dir(dir);
    for var in CLEARED_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn write_with_mtime(path: &Path, contents: &str, mtime: SystemTime) {
    fs::write(path, contents).unwrap();
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(mtime)
        .unwrap();
}

// ─────────────────────────────────────────────────────────────────────────────
// Help and Version Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    eadlangchain(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync-notebooks"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_displays() {
    let dir = TempDir::new().unwrap();
    eadlangchain(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("eadlangchain"));
}

#[test]
fn test_sync_help_lists_flags() {
    let dir = TempDir::new().unwrap();
    eadlangchain(dir.path())
        .args(["sync-notebooks", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--check"))
        .stdout(predicate::str::contains("--force"))
        .stdout(predicate::str::contains("--simple"))
        .stdout(predicate::str::contains("--no-exercises"));
}

#[test]
fn test_check_and_force_conflict() {
    let dir = TempDir::new().unwrap();
    eadlangchain(dir.path())
        .args(["sync-notebooks", "--check", "--force"])
        .assert()
        .failure();
}

// ─────────────────────────────────────────────────────────────────────────────
// sync-notebooks --check
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_check_fails_when_notebook_missing() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("01_basic.rs"), "fn main() {}\n").unwrap();

    eadlangchain(dir.path())
        .args(["sync-notebooks", "--check", "--examples-dir", "."])
        .assert()
        .failure()
        .stdout(predicate::str::contains("[SKIP]"))
        .stdout(predicate::str::contains("01_basic.rs (missing)"))
        .stderr(predicate::str::contains("1 notebook(s) out of sync"));
}

#[test]
fn test_check_fails_when_notebook_stale() {
    let dir = TempDir::new().unwrap();
    let now = SystemTime::now();
    write_with_mtime(&dir.path().join("01_basic.ipynb"), "{}", now);
    write_with_mtime(
        &dir.path().join("01_basic.rs"),
        "fn main() {}\n",
        now + Duration::from_secs(30),
    );

    eadlangchain(dir.path())
        .args(["sync-notebooks", "--check", "--examples-dir", "."])
        .assert()
        .failure()
        .stdout(predicate::str::contains("01_basic.rs (out of sync)"));
}

#[test]
fn test_check_succeeds_when_up_to_date() {
    let dir = TempDir::new().unwrap();
    let now = SystemTime::now();
    write_with_mtime(&dir.path().join("01_basic.rs"), "fn main() {}\n", now);
    write_with_mtime(
        &dir.path().join("01_basic.ipynb"),
        "{}",
        now + Duration::from_secs(30),
    );
    fs::write(dir.path().join("helpers.rs"), "").unwrap();

    eadlangchain(dir.path())
        .args(["sync-notebooks", "--check", "--examples-dir", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("Example File Sync"))
        .stdout(predicate::str::contains("[OK]"))
        .stdout(predicate::str::contains("helpers.rs").not());
}

#[test]
fn test_missing_examples_dir_fails() {
    let dir = TempDir::new().unwrap();
    eadlangchain(dir.path())
        .args(["sync-notebooks", "--check", "--examples-dir", "absent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("examples directory not found"));
}

#[test]
fn test_empty_examples_dir_succeeds() {
    let dir = TempDir::new().unwrap();
    eadlangchain(dir.path())
        .args(["sync-notebooks", "--examples-dir", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("No example files found"));
}

// ─────────────────────────────────────────────────────────────────────────────
// sync-notebooks conversion
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_missing_converter_fails_before_work() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("01_basic.rs"), "fn main() {}\n").unwrap();

    eadlangchain(dir.path())
        .args(["sync-notebooks", "--examples-dir", "."])
        .args(["--converter", "eadlangchain-no-such-converter"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("eadlangchain-no-such-converter"));

    assert!(!dir.path().join("01_basic.ipynb").exists());
}

#[cfg(unix)]
fn fake_converter(dir: &Path) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    // Invoked as: --to notebook --output <ipynb> <source>
    let script = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo "fake-converter 1.0"
  exit 0
fi
cat > "$4" <<'NOTEBOOK'
{"cells": [
  {"cell_type": "markdown", "metadata": {}, "source": ["Shows:\n", "- logging"]},
  {"cell_type": "code", "metadata": {}, "execution_count": null, "outputs": [],
   "source": ["fn show_logging() {\n", "    setup_logging(None, None).unwrap();\n", "}\n"]}
 ],
 "metadata": {}, "nbformat": 4, "nbformat_minor": 5}
NOTEBOOK
"#;
    let path = dir.join("fake-converter.sh");
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
#[test]
fn test_sync_converts_and_enhances() {
    let dir = TempDir::new().unwrap();
    let tools = TempDir::new().unwrap();
    let converter = fake_converter(tools.path());
    fs::write(dir.path().join("01_basic.rs"), "fn main() {}\n").unwrap();

    eadlangchain(dir.path())
        .args(["sync-notebooks", "--examples-dir", "."])
        .arg("--converter")
        .arg(&converter)
        .assert()
        .success()
        .stdout(predicate::str::contains("01_basic.rs → 01_basic.ipynb"))
        .stdout(predicate::str::contains("Converted: 1"));

    let notebook = fs::read_to_string(dir.path().join("01_basic.ipynb")).unwrap();
    assert!(notebook.contains("**Shows:**"));
    assert!(notebook.contains("### Try This"));
    assert!(notebook.contains("// Your experiments here"));

    // Second run finds nothing to do and --check agrees.
    eadlangchain(dir.path())
        .args(["sync-notebooks", "--examples-dir", "."])
        .arg("--converter")
        .arg(&converter)
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted: 0"));

    eadlangchain(dir.path())
        .args(["sync-notebooks", "--check", "--examples-dir", "."])
        .assert()
        .success();
}

#[cfg(unix)]
#[test]
fn test_sync_simple_skips_enhancement() {
    let dir = TempDir::new().unwrap();
    let tools = TempDir::new().unwrap();
    let converter = fake_converter(tools.path());
    fs::write(dir.path().join("01_basic.rs"), "fn main() {}\n").unwrap();

    eadlangchain(dir.path())
        .args(["sync-notebooks", "--simple", "--examples-dir", "."])
        .env("EADLANGCHAIN_NOTEBOOK_CONVERTER", &converter)
        .assert()
        .success();

    let notebook = fs::read_to_string(dir.path().join("01_basic.ipynb")).unwrap();
    assert!(!notebook.contains("Try This"));
    assert!(!notebook.contains("**Shows:**"));
}

// ─────────────────────────────────────────────────────────────────────────────
// config
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_check_succeeds_with_key() {
    let dir = TempDir::new().unwrap();
    eadlangchain(dir.path())
        .args(["config", "check", "openai"])
        .env("EADLANGCHAIN_AI_OPENAI_API_KEY", "sk-test123")
        .assert()
        .success()
        .stdout(predicate::str::contains("OpenAI"));
}

#[test]
fn test_config_check_names_missing_variable() {
    let dir = TempDir::new().unwrap();
    eadlangchain(dir.path())
        .args(["config", "check", "openai", "anthropic"])
        .env("EADLANGCHAIN_AI_OPENAI_API_KEY", "sk-test123")
        .assert()
        .failure()
        .stderr(predicate::str::contains("EADLANGCHAIN_AI_ANTHROPIC_API_KEY"));
}

#[test]
fn test_config_check_reads_env_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".env"),
        "EADLANGCHAIN_AI_GEMINI_API_KEY=gm-from-file\n",
    )
    .unwrap();

    eadlangchain(dir.path())
        .args(["config", "check", "gemini"])
        .assert()
        .success();
}

#[test]
fn test_config_check_rejects_unknown_provider() {
    let dir = TempDir::new().unwrap();
    eadlangchain(dir.path())
        .args(["config", "check", "cohere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cohere"));
}

#[test]
fn test_config_show_masks_keys() {
    let dir = TempDir::new().unwrap();
    eadlangchain(dir.path())
        .args(["config", "show"])
        .env("EADLANGCHAIN_AI_OPENAI_API_KEY", "sk-test1234567890")
        .assert()
        .success()
        .stdout(predicate::str::contains("sk-test1234567890").not())
        .stdout(predicate::str::contains("(no key)"))
        .stdout(predicate::str::contains("claude-3-haiku-20240307"));
}

#[test]
fn test_config_show_json() {
    let dir = TempDir::new().unwrap();
    let output = eadlangchain(dir.path())
        .args(["config", "show", "--json"])
        .env("EADLANGCHAIN_AI_GEMINI_MODEL", "gemini-2.0-flash")
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let providers = value["providers"].as_array().unwrap();
    assert_eq!(providers.len(), 3);
    let gemini = providers
        .iter()
        .find(|p| p["provider"] == "gemini")
        .unwrap();
    assert_eq!(gemini["model"], "gemini-2.0-flash");
    assert_eq!(gemini["model_is_default"], false);
    assert!(gemini["api_key"].is_null());
}

#[test]
fn test_invalid_log_level_fails() {
    let dir = TempDir::new().unwrap();
    eadlangchain(dir.path())
        .args(["config", "show"])
        .env("EADLANGCHAIN_LOG_LEVEL", "LOUD")
        .assert()
        .failure()
        .stderr(predicate::str::contains("LOUD"));
}
