//! CLI integration tests against the real bundle-analyzer binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const NEXTJS_STATS: &str = r#"[{"label":"main","parsedSize":1000,"groups":[{"label":"x.js","id":1,"parsedSize":400,"gzipSize":100}]}]"#;

#[allow(deprecated)]
fn analyzer_cmd() -> Command {
    let mut cmd = Command::cargo_bin("bundle-analyzer").unwrap();
    for var in [
        "BUNDLE_ANALYZER_OUTPUT_PATH",
        "BUNDLE_ANALYZER_CONCURRENCY",
        "BUNDLE_ANALYZER_SCHEDULE",
        "BUNDLE_ANALYZER_BUILD_TIMEOUT_SECS",
        "BUNDLE_ANALYZER_SCRATCH_DIR",
    ] {
        cmd.env_remove(var);
    }
    cmd.env_remove("RUST_LOG");
    cmd.env("NO_COLOR", "1");
    cmd
}

fn project(root: &Path, name: &str, project_type: &str, command: &str) -> serde_json::Value {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    json!({
        "name": name,
        "path": dir,
        "type": project_type,
        "buildCommand": command,
    })
}

fn write_config(root: &Path, projects: Vec<serde_json::Value>) -> PathBuf {
    let path = root.join("config.json");
    let config = json!({
        "projects": projects,
        "outputPath": root.join("out/sizes.csv"),
        "scratchDir": root.join("scratch"),
    });
    fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
    path
}

#[test]
fn test_help_output() {
    analyzer_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("bundle sizes"))
        .stdout(predicate::str::contains("--only"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_unknown_flag_prints_usage() {
    analyzer_cmd()
        .arg("--bogus")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_missing_config_is_fatal() {
    let temp = TempDir::new().unwrap();

    analyzer_cmd()
        .arg("--config")
        .arg(temp.path().join("absent.toml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Config file not found"))
        .stderr(predicate::str::contains("bundle-analyzer init"));
}

#[test]
fn test_init_then_refuse_overwrite() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("conf/config.toml");

    analyzer_cmd()
        .arg("init")
        .arg("--config")
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("Created default config"));

    assert!(fs::read_to_string(&path).unwrap().contains("[[projects]]"));

    analyzer_cmd()
        .args(["init", "-c"])
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    analyzer_cmd()
        .args(["init", "--force", "-c"])
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn test_invalid_project_type_is_fatal() {
    let temp = TempDir::new().unwrap();
    let config = write_config(
        temp.path(),
        vec![project(temp.path(), "web", "parcel", "true")],
    );

    analyzer_cmd()
        .arg("-c")
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("projects[web].type"))
        .stderr(predicate::str::contains("parcel"));
}

#[test]
fn test_only_filter_without_match() {
    let temp = TempDir::new().unwrap();
    let config = write_config(
        temp.path(),
        vec![project(temp.path(), "web", "vite", "true")],
    );

    analyzer_cmd()
        .arg("-c")
        .arg(&config)
        .args(["--only", "docs,admin"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "No projects matched the --only filter: docs, admin",
        ));
}

#[test]
fn test_dry_run_builds_nothing() {
    let temp = TempDir::new().unwrap();
    let marker = temp.path().join("ran");
    let command = format!("touch {}", marker.display());
    let config = write_config(
        temp.path(),
        vec![
            project(temp.path(), "web", "nextjs", &command),
            project(temp.path(), "docs", "vite", &command),
        ],
    );

    analyzer_cmd()
        .arg("-c")
        .arg(&config)
        .arg("--dry-run")
        .assert()
        .success()
        .stderr(predicate::str::contains("would run:"))
        .stderr(predicate::str::contains("web (nextjs)"))
        .stderr(predicate::str::contains("docs (vite)"))
        .stderr(predicate::str::contains("Dry run completed"));

    assert!(!marker.exists());
    assert!(!temp.path().join("out/sizes.csv").exists());
    assert!(!temp.path().join("scratch").exists());
}

#[test]
fn test_missing_project_dir_is_warned_once() {
    let temp = TempDir::new().unwrap();
    let mut gone = project(temp.path(), "gone", "vite", "true");
    gone["path"] = json!(temp.path().join("nowhere"));
    let config = write_config(temp.path(), vec![gone]);

    let output = analyzer_cmd()
        .arg("-c")
        .arg(&config)
        .arg("--dry-run")
        .output()
        .unwrap();

    assert!(output.status.success());
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(text.matches("does not exist").count(), 1, "{text}");
}

#[cfg(unix)]
#[test]
fn test_end_to_end_with_one_failure() {
    let temp = TempDir::new().unwrap();
    let write_stats = format!("printf '%s' '{}' > \"$ANALYZE_OUTPUT\"", NEXTJS_STATS);
    let config = write_config(
        temp.path(),
        vec![
            project(temp.path(), "web", "nextjs", &write_stats),
            project(temp.path(), "broken", "vite", "echo 'compile error' >&2; exit 3"),
        ],
    );

    analyzer_cmd()
        .arg("-c")
        .arg(&config)
        .args(["-j", "2"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("1/2 builds succeeded"))
        .stderr(predicate::str::contains("broken"))
        .stderr(predicate::str::contains("compile error"));

    let flat = fs::read_to_string(temp.path().join("out/sizes.csv")).unwrap();
    let mut lines = flat.lines();
    assert!(lines.next().unwrap().starts_with("project,projectType,chunk,module"));
    assert_eq!(
        lines.next().unwrap(),
        "web,nextjs,main,x.js,x.js,false,400,100,0,40.00,40.00"
    );
    assert_eq!(lines.next(), None);

    let tree = fs::read_to_string(temp.path().join("out/sizes-tree.csv")).unwrap();
    assert!(tree.starts_with("name,parent,value\n"));
    assert!(tree.contains("web,,1000"));
}

#[cfg(unix)]
#[test]
fn test_all_builds_failing_writes_no_reports() {
    let temp = TempDir::new().unwrap();
    let config = write_config(
        temp.path(),
        vec![project(temp.path(), "broken", "vite", "exit 1")],
    );

    analyzer_cmd()
        .arg("-c")
        .arg(&config)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No successful builds to report"));

    assert!(!temp.path().join("out/sizes.csv").exists());
    assert!(!temp.path().join("out/sizes-tree.csv").exists());
}
