//! Shared scratch directory for per-project stats files.

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Directory receiving `<project>-stats.json` files during a run.
///
/// The directory is shared by every build in a run and wiped when the run
/// starts, so two concurrent runs must not point at the same location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<system temp>/bundle-analyzer`.
    pub fn default_location() -> PathBuf {
        std::env::temp_dir().join("bundle-analyzer")
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stats path handed to a project's build through `ANALYZE_OUTPUT`.
    ///
    /// Path separators and `%` in the project name are percent-encoded, so
    /// the file lands directly inside the scratch directory and distinct
    /// names never share a file.
    pub fn stats_path(&self, project: &str) -> PathBuf {
        let mut file = String::with_capacity(project.len());
        for c in project.chars() {
            match c {
                '%' => file.push_str("%25"),
                '/' => file.push_str("%2F"),
                '\\' => file.push_str("%5C"),
                c => file.push(c),
            }
        }
        self.root.join(format!("{file}-stats.json"))
    }

    /// Wipe and recreate the directory.
    pub async fn prepare(&self) -> Result<()> {
        match tokio::fs::remove_dir_all(&self.root).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::io(&self.root, e)),
        }
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| Error::io(&self.root, e))?;
        tracing::debug!(path = %self.root.display(), "prepared scratch directory");
        Ok(())
    }
}

impl Default for ScratchDir {
    fn default() -> Self {
        Self::new(Self::default_location())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_path_is_flat_inside_root() {
        let scratch = ScratchDir::new("/tmp/ba");
        assert_eq!(
            scratch.stats_path("web"),
            PathBuf::from("/tmp/ba/web-stats.json")
        );
        assert_eq!(
            scratch.stats_path("apps/web"),
            PathBuf::from("/tmp/ba/apps%2Fweb-stats.json")
        );
    }

    #[test]
    fn similar_names_map_to_distinct_files() {
        let scratch = ScratchDir::new("/tmp/ba");
        let names = ["apps/web", "apps_web", "apps%2Fweb", "apps\\web", "apps%web"];
        let paths: std::collections::HashSet<_> =
            names.iter().map(|n| scratch.stats_path(n)).collect();
        assert_eq!(paths.len(), names.len());
        assert!(paths.iter().all(|p| p.parent() == Some(scratch.root())));
    }

    #[tokio::test]
    async fn prepare_wipes_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = ScratchDir::new(dir.path().join("scratch"));

        scratch.prepare().await.unwrap();
        let stale = scratch.stats_path("old");
        std::fs::write(&stale, "{}").unwrap();

        scratch.prepare().await.unwrap();
        assert!(scratch.root().is_dir());
        assert!(!stale.exists());
    }
}
