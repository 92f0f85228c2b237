//! Integration tests for the shelf CLI.
//!
//! Run with: `cargo test --package storyshelf-cli --test cli_integration`

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Helper to run shelf in a specific directory.
fn run_shelf_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_shelf"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("Failed to execute shelf command")
}

/// Helper to run shelf with `input` on stdin.
fn run_shelf_with_stdin(dir: &Path, args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_shelf"))
        .current_dir(dir)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn shelf command");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

/// Create a minimal component library for testing.
fn create_test_library(dir: &Path) {
    fs::create_dir_all(dir.join("src/components")).unwrap();

    fs::write(
        dir.join("src/components/Button.stories.js"),
        r#"
import React from 'react';
import { storiesOf } from '@storybook/react';

storiesOf('Example/Button', module)
  .add('Primary', () => <Button primary label="Button" />)
  .add('Large', () => <Button size="large" />, { info: { text: "{ .add('x') }" } });
"#,
    )
    .unwrap();

    fs::write(
        dir.join("src/components/Card.stories.tsx"),
        "storiesOf(\"Card\", module).add('Empty', () => <Card />);\n",
    )
    .unwrap();

    fs::write(
        dir.join("src/components/Button.js"),
        "export const Button = () => null;\n",
    )
    .unwrap();
}

// =============================================================================
// Scan Command Tests
// =============================================================================

#[test]
fn test_scan_text_lists_groups_and_variants() {
    let temp = TempDir::new().unwrap();
    create_test_library(temp.path());

    let output = run_shelf_in_dir(temp.path(), &["scan", "."]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "shelf scan should succeed");
    assert!(stdout.contains("Example/Button"));
    assert!(stdout.contains("- Primary"));
    assert!(stdout.contains("- Large"));
    assert!(stdout.contains("- Empty"));
    assert!(stdout.contains("2 files, 2 groups, 3 variants, 0 skipped"));
}

#[test]
fn test_scan_json_is_machine_readable() {
    let temp = TempDir::new().unwrap();
    create_test_library(temp.path());

    let output = run_shelf_in_dir(temp.path(), &["scan", "src", "--format", "json"]);
    assert!(output.status.success(), "shelf scan --format json should succeed");

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let files = json["report"]["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);

    let groups: Vec<_> = files
        .iter()
        .flat_map(|f| f["groups"].as_array().unwrap().iter())
        .map(|g| g["name"].as_str().unwrap().to_string())
        .collect();
    assert!(groups.contains(&"Example/Button".to_string()));
    assert!(groups.contains(&"Card".to_string()));
}

#[test]
fn test_scan_reports_broken_files_without_failing() {
    let temp = TempDir::new().unwrap();
    create_test_library(temp.path());
    fs::write(temp.path().join("src/Broken.stories.js"), "storiesOf('Oops").unwrap();

    let output = run_shelf_in_dir(temp.path(), &["scan", "."]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("Broken.stories.js (skipped:"));
    assert!(stdout.contains("1 skipped"));
}

#[test]
fn test_scan_stdin() {
    let temp = TempDir::new().unwrap();

    let output = run_shelf_with_stdin(
        temp.path(),
        &["scan", "-", "--format", "json"],
        "storiesOf('Buttons').add('Primary', fn).add('Secondary', fn)",
    );
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{ "name": "Buttons", "variants": ["Primary", "Secondary"] }])
    );
}

#[test]
fn test_scan_stdin_error_is_fatal() {
    let temp = TempDir::new().unwrap();

    let output = run_shelf_with_stdin(temp.path(), &["scan", "-"], "storiesOf('Oops");
    assert!(!output.status.success(), "unterminated literal should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unterminated literal"), "{}", stderr);
}

#[test]
fn test_scan_missing_path_fails() {
    let temp = TempDir::new().unwrap();
    let output = run_shelf_in_dir(temp.path(), &["scan", "does-not-exist"]);
    assert!(!output.status.success());
}

// =============================================================================
// Build Command Tests
// =============================================================================

#[test]
fn test_build_skip_external_writes_manifest() {
    let temp = TempDir::new().unwrap();
    create_test_library(temp.path());

    let output = run_shelf_in_dir(
        temp.path(),
        &["build", ".", "--skip-external", "--output", "out"],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "shelf build should succeed");
    assert!(stdout.contains("scanned story sources"));

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("out/entries.json")).unwrap())
            .unwrap();
    let component = manifest["Component"].as_object().unwrap();
    assert_eq!(component.len(), 3);
    assert_eq!(
        component["Button/Primary"],
        "storybook/index.html?path=/story/example-button--primary"
    );
    assert_eq!(
        component["Card/Empty"],
        "storybook/index.html?path=/story/card--empty"
    );
}

#[test]
fn test_build_without_stories_is_degraded() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("index.js"), "export default 1;").unwrap();

    let output = run_shelf_in_dir(
        temp.path(),
        &["build", "--skip-external", "--output", "out"],
    );
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("generic entry"));
    let manifest = fs::read_to_string(temp.path().join("out/entries.json")).unwrap();
    assert!(manifest.contains("\"Storybook\""));
}

// =============================================================================
// Compose Command Tests
// =============================================================================

#[test]
fn test_compose_html_index() {
    let temp = TempDir::new().unwrap();
    create_test_library(temp.path());

    let output = run_shelf_in_dir(
        temp.path(),
        &["compose", ".", "--format", "html", "--output", "index.html"],
    );
    assert!(output.status.success(), "shelf compose should succeed");

    let html = fs::read_to_string(temp.path().join("index.html")).unwrap();
    assert!(html.starts_with("<!DOCTYPE HTML>"));
    assert_eq!(html.matches("<li>").count(), 3);
    assert!(html.contains("example-button--large"));
}

#[test]
fn test_compose_json() {
    let temp = TempDir::new().unwrap();
    create_test_library(temp.path());

    let output = run_shelf_in_dir(temp.path(), &["compose", "--output", "entries.json"]);
    assert!(output.status.success());

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("entries.json")).unwrap())
            .unwrap();
    assert_eq!(manifest["Component"].as_object().unwrap().len(), 3);
}

#[test]
fn test_compose_rejects_unknown_format() {
    let temp = TempDir::new().unwrap();
    let output = run_shelf_in_dir(temp.path(), &["compose", "--format", "pdf"]);
    assert!(!output.status.success());
}

// =============================================================================
// Misc
// =============================================================================

#[test]
fn test_help_lists_commands() {
    let temp = TempDir::new().unwrap();
    let output = run_shelf_in_dir(temp.path(), &["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    for command in ["build", "scan", "compose", "config"] {
        assert!(stdout.contains(command), "help should mention {}", command);
    }
}

#[test]
fn test_config_get_default_value() {
    let temp = TempDir::new().unwrap();
    let output = run_shelf_in_dir(temp.path(), &["config", "get", "storybook-dir"]);
    assert!(output.status.success());
}
