//! Child process execution for a single project build.

use crate::model::ProjectConfig;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, SystemTime};
use tokio::process::Command;

/// Environment flag telling analyzer plugins to emit stats.
pub const ANALYZE_ENV: &str = "ANALYZE";
/// Environment variable carrying the stats output path override.
pub const ANALYZE_OUTPUT_ENV: &str = "ANALYZE_OUTPUT";

#[cfg(unix)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

/// Run the project's build command to completion.
///
/// Stdout is discarded and stderr captured in full. Dropping the returned
/// future (timeout, interrupt) kills the child.
pub(crate) async fn run_build(
    project: &ProjectConfig,
    stats_path: &Path,
    timeout: Option<Duration>,
) -> Result<()> {
    let mut cmd = shell_command(&project.build_command);
    cmd.current_dir(&project.path)
        .env(ANALYZE_ENV, "true")
        .env(ANALYZE_OUTPUT_ENV, stats_path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    tracing::debug!(
        command = %project.build_command,
        cwd = %project.path.display(),
        stats = %stats_path.display(),
        "spawning build"
    );

    let child = cmd.spawn().map_err(|source| Error::Spawn {
        command: project.build_command.clone(),
        source,
    })?;

    let output = match timeout {
        Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
            .await
            .map_err(|_| Error::Timeout(limit))?,
        None => child.wait_with_output().await,
    }
    .map_err(|e| Error::io(&project.path, e))?;

    if !output.status.success() {
        return Err(Error::BuildFailed {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
        });
    }

    Ok(())
}

/// State of the conventional stats file before a build runs.
///
/// `None` when no file exists there yet. A file whose modification time is
/// unavailable is recorded as the epoch.
pub(crate) async fn conventional_snapshot(project: &ProjectConfig) -> Option<SystemTime> {
    let path = project.family.conventional_stats_path(&project.path);
    let meta = tokio::fs::metadata(&path).await.ok()?;
    meta.is_file()
        .then(|| meta.modified().unwrap_or(SystemTime::UNIX_EPOCH))
}

/// Pick the stats file a finished build produced.
///
/// Prefers the override path, then the family's conventional location when
/// the build created or rewrote it relative to `before`. Otherwise the
/// override path is returned so the parser reports it as missing.
pub(crate) fn locate_stats(
    project: &ProjectConfig,
    override_path: &Path,
    before: Option<SystemTime>,
) -> PathBuf {
    if override_path.is_file() {
        return override_path.to_path_buf();
    }
    let conventional = project.family.conventional_stats_path(&project.path);
    let Ok(meta) = std::fs::metadata(&conventional) else {
        return override_path.to_path_buf();
    };
    if !meta.is_file() {
        return override_path.to_path_buf();
    }
    let fresh = match before {
        None => true,
        Some(previous) => meta.modified().is_ok_and(|now| now != previous),
    };
    if !fresh {
        tracing::warn!(
            path = %conventional.display(),
            "ignoring stats left over from an earlier build"
        );
        return override_path.to_path_buf();
    }
    tracing::debug!(
        path = %conventional.display(),
        "stats override not written; using conventional location"
    );
    conventional
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::model::BundlerFamily;

    fn project(dir: &Path, command: &str) -> ProjectConfig {
        ProjectConfig::new("app", dir, BundlerFamily::Vite, command)
    }

    #[tokio::test]
    async fn passes_analysis_environment() {
        let dir = tempfile::tempdir().unwrap();
        let stats = dir.path().join("out.json");
        let p = project(dir.path(), "printf '%s' \"$ANALYZE\" > \"$ANALYZE_OUTPUT\"");

        run_build(&p, &stats, None).await.unwrap();
        assert_eq!(std::fs::read_to_string(&stats).unwrap(), "true");
    }

    #[tokio::test]
    async fn runs_in_project_directory() {
        let dir = tempfile::tempdir().unwrap();
        let stats = dir.path().join("out.json");
        let p = project(dir.path(), "touch here.txt");

        run_build(&p, &stats, None).await.unwrap();
        assert!(dir.path().join("here.txt").exists());
    }

    #[tokio::test]
    async fn non_zero_exit_captures_code_and_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let p = project(dir.path(), "echo 'compile error' >&2; exit 3");

        let err = run_build(&p, &dir.path().join("s.json"), None)
            .await
            .unwrap_err();
        match err {
            Error::BuildFailed { code, stderr } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "compile error");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn missing_directory_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let p = project(&dir.path().join("absent"), "true");

        let err = run_build(&p, &dir.path().join("s.json"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }

    #[tokio::test]
    async fn timeout_kills_hung_build() {
        let dir = tempfile::tempdir().unwrap();
        let p = project(dir.path(), "sleep 30");

        let started = std::time::Instant::now();
        let err = run_build(&p, &dir.path().join("s.json"), Some(Duration::from_millis(200)))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Timeout(_)));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn locate_prefers_override_then_conventional() {
        let dir = tempfile::tempdir().unwrap();
        let p = project(dir.path(), "true");
        let override_path = dir.path().join("scratch.json");

        assert_eq!(locate_stats(&p, &override_path, None), override_path);

        std::fs::write(dir.path().join("stats.json"), "{}").unwrap();
        assert_eq!(
            locate_stats(&p, &override_path, None),
            dir.path().join("stats.json")
        );

        std::fs::write(&override_path, "{}").unwrap();
        assert_eq!(locate_stats(&p, &override_path, None), override_path);
    }

    #[tokio::test]
    async fn untouched_conventional_file_is_stale() {
        let dir = tempfile::tempdir().unwrap();
        let p = project(dir.path(), "true");
        let override_path = dir.path().join("scratch.json");
        let conventional = dir.path().join("stats.json");

        assert_eq!(conventional_snapshot(&p).await, None);
        std::fs::write(&conventional, "{}").unwrap();
        let before = conventional_snapshot(&p).await;
        assert!(before.is_some());
        assert_eq!(locate_stats(&p, &override_path, before), override_path);

        let rewritten = std::fs::File::options().write(true).open(&conventional).unwrap();
        rewritten
            .set_modified(SystemTime::now() + Duration::from_secs(60))
            .unwrap();
        assert_eq!(locate_stats(&p, &override_path, before), conventional);
    }
}
