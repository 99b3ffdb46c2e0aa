//! Integration tests for the `pakt` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

const GRAPH: &str = r#"{
    "nodes": {
        "app": { "name": "app", "type": "app", "metadata": { "packageName": "app", "version": "1.0.0" } },
        "lib": { "name": "lib", "type": "lib" }
    },
    "externalNodes": {
        "npm:left-pad": { "name": "npm:left-pad", "packageName": "left-pad", "version": "1.3.0" },
        "npm:tslib": { "name": "npm:tslib", "packageName": "tslib", "version": "2.6.2" }
    },
    "dependencies": {
        "app": [ { "source": "app", "target": "lib", "type": "static" } ],
        "lib": [ { "source": "lib", "target": "npm:left-pad", "type": "static" } ]
    }
}"#;

fn workspace(import_helpers: bool) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("graph.json"), GRAPH).unwrap();
    fs::write(
        dir.path().join("tsconfig.json"),
        format!(r#"{{ "compilerOptions": {{ "importHelpers": {import_helpers} }} }}"#),
    )
    .unwrap();
    dir
}

fn pakt(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pakt"));
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("PAKT_PROJECT")
        .env_remove("PAKT_GRAPH")
        .env_remove("PAKT_OUTPUT_PATH")
        .arg("--no-color");
    cmd
}

#[test]
fn test_generate_writes_manifest() {
    let dir = workspace(false);
    pakt(&dir)
        .args(["generate", "--project", "app", "--graph", "graph.json"])
        .assert()
        .success();

    let written = fs::read_to_string(dir.path().join("dist/package.json")).unwrap();
    let manifest: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(
        manifest,
        json!({
            "name": "app",
            "version": "1.0.0",
            "main": "main.js",
            "dependencies": { "left-pad": "1.3.0" }
        })
    );
}

#[test]
fn test_generate_dry_run_prints_with_helper() {
    let dir = workspace(true);
    pakt(&dir)
        .args(["generate", "-p", "app", "-g", "graph.json", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""tslib": "2.6.2""#))
        .stdout(predicate::str::contains("devDependencies").not());

    assert!(!dir.path().join("dist").exists());
}

#[test]
fn test_generate_reads_config_file() {
    let dir = workspace(false);
    fs::write(
        dir.path().join("pakt.toml"),
        "project = \"app\"\ngraph = \"graph.json\"\noutput_path = \"out\"\noutput_file_name = \"server.js\"\n",
    )
    .unwrap();

    pakt(&dir).arg("generate").assert().success();

    let written = fs::read_to_string(dir.path().join("out/package.json")).unwrap();
    let manifest: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(manifest["main"], "server.js");
}

#[test]
fn test_generate_unknown_project_fails() {
    let dir = workspace(false);
    pakt(&dir)
        .args(["generate", "-p", "ghost", "-g", "graph.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ghost"));

    assert!(!dir.path().join("dist/package.json").exists());
}

#[test]
fn test_generate_missing_graph_argument() {
    let dir = workspace(false);
    pakt(&dir)
        .args(["generate", "-p", "app"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--graph"));
}

#[test]
fn test_helpers_command() {
    let dir = workspace(true);
    pakt(&dir)
        .args(["helpers", "-p", "app", "-g", "graph.json", "--ts-config", "tsconfig.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("app has no helper dependencies"))
        .stdout(predicate::str::contains("inject: app -> npm:tslib (static)"));
}
