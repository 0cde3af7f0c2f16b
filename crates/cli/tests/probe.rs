use assert_cmd::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn probe() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("grammar-probe"))
}

fn run_json(workdir: &Path, args: &[&str]) -> Value {
    let output = probe()
        .current_dir(workdir)
        .arg("--quiet")
        .args(args)
        .output()
        .expect("command run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json")
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn resolve_uses_content_markers() {
    let temp = tempdir().unwrap();
    write(temp.path(), "docker-compose.yml", "services:\n  web:\n    image: nginx\n");
    write(temp.path(), "compose.yaml", "volumes:\n  data:\n");

    let body = run_json(temp.path(), &["resolve", "docker-compose.yml"]);
    assert_eq!(body["grammar"], "docker-compose");
    assert_eq!(body["base_language"], "yaml");
    assert_eq!(body["split"]["chunk_size"], 1000);
    assert_eq!(body["split"]["chunk_overlap"], 300);

    let body = run_json(temp.path(), &["resolve", "compose.yaml"]);
    assert_eq!(body["grammar"], "yaml");
}

#[test]
fn resolve_path_only_needs_no_file() {
    let temp = tempdir().unwrap();
    let body = run_json(
        temp.path(),
        &["resolve", "--path-only", "app/.github/workflows/release.yaml"],
    );
    assert_eq!(body["grammar"], "github-actions");

    let body = run_json(temp.path(), &["resolve", "--path-only", "README.md"]);
    assert!(body["grammar"].is_null());
    assert!(body["split"].is_null());
}

#[test]
fn classify_previews_compose_services() {
    let temp = tempdir().unwrap();
    write(
        temp.path(),
        "docker-compose.yml",
        "services:\n  web:\n    image: nginx\n  db:\n    image: postgres\n",
    );

    let body = run_json(temp.path(), &["classify", "docker-compose.yml", "-C", "1"]);
    assert_eq!(body["grammar"], "docker-compose");
    let chunks = body["chunks"].as_array().expect("chunks");
    let hierarchies: Vec<_> = chunks
        .iter()
        .map(|c| c["metadata"]["hierarchy"].as_str().unwrap_or_default())
        .collect();
    assert_eq!(hierarchies, vec!["services", "service:web", "service:db"]);
    assert_eq!(chunks[1]["start_line"], 2);
    assert_eq!(chunks[1]["context"]["before"][0], "services:");
}

#[test]
fn classify_with_grammar_override() {
    let temp = tempdir().unwrap();
    write(temp.path(), "deploy.txt", "#!/bin/sh\ndeploy() {\n  echo hi\n}\n");

    let body = run_json(temp.path(), &["classify", "deploy.txt", "--grammar", "sh"]);
    assert_eq!(body["grammar"], "bash");
    // the shebang line is cut off as its own, unclassified chunk
    assert_eq!(body["chunks"][0]["metadata"]["hierarchy"], "");
    assert_eq!(body["chunks"][1]["metadata"]["hierarchy"], "function:deploy");
}

#[test]
fn classify_unknown_file_fails_with_hint() {
    let temp = tempdir().unwrap();
    write(temp.path(), "notes.md", "# notes\n");

    probe()
        .current_dir(temp.path())
        .args(["classify", "notes.md"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("pass --grammar"));

    probe()
        .current_dir(temp.path())
        .args(["classify", "notes.md", "--grammar", "cobol"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Unknown grammar 'cobol'"));
}

#[test]
fn scan_reports_plans_and_counts() {
    let temp = tempdir().unwrap();
    write(
        temp.path(),
        ".github/workflows/ci.yml",
        "on: push\njobs:\n  test:\n    runs-on: ubuntu-latest\n",
    );
    write(temp.path(), "infra/main.tf", "variable \"region\" {}\n");
    write(temp.path(), "Dockerfile", "FROM alpine\n");

    let body = run_json(temp.path(), &["scan", "."]);
    assert_eq!(body["summary"]["files"], 3);
    assert_eq!(body["summary"]["grammars"]["github-actions"], 1);
    assert_eq!(body["summary"]["grammars"]["hcl"], 1);
    assert_eq!(body["summary"]["grammars"]["dockerfile"], 1);
    assert_eq!(body["plans"][0]["relative_path"], ".github/workflows/ci.yml");
}

#[test]
fn scan_with_explicit_config() {
    let temp = tempdir().unwrap();
    write(temp.path(), "infra/main.tf", "variable \"region\" {}\n");
    write(temp.path(), "Dockerfile", "FROM alpine\n");
    write(
        temp.path(),
        "probe.toml",
        "[indexing]\ninclude_patterns = [\"infra/**\"]\nchunk_size = 1200\n",
    );

    let body = run_json(temp.path(), &["scan", ".", "--config", "probe.toml"]);
    assert_eq!(body["summary"]["files"], 1);
    assert_eq!(body["plans"][0]["split"]["chunk_size"], 1200);

    write(temp.path(), "broken.toml", "[indexing]\nchunk_size = 0\n");
    probe()
        .current_dir(temp.path())
        .args(["scan", ".", "--config", "broken.toml"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("Failed to load config"));
}

#[test]
fn languages_and_check_list_every_grammar() {
    let temp = tempdir().unwrap();

    let body = run_json(temp.path(), &["languages"]);
    let names: Vec<_> = body
        .as_array()
        .expect("array")
        .iter()
        .map(|l| l["language_name"].as_str().unwrap_or_default())
        .collect();
    assert_eq!(
        names,
        vec![
            "github-actions",
            "docker-compose",
            "yaml",
            "hcl",
            "dockerfile",
            "bash",
            "groovy"
        ]
    );

    let body = run_json(temp.path(), &["check"]);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["grammars"][0]["levels"], 8);
    assert_eq!(body["grammars"][0]["structural_levels"], 5);
}
