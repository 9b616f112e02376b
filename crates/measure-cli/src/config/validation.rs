use crate::config::{AnalyzerConfig, RawProject};
use crate::error::ConfigError;
use measure_core::{BundlerFamily, ProjectConfig, Schedule};
use path_clean::PathClean;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Validated configuration with every path absolute.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub projects: Vec<ProjectConfig>,
    pub output_path: PathBuf,
    /// `None` lets the orchestrator pick the CPU count.
    pub concurrency: Option<usize>,
    pub schedule: Schedule,
    pub build_timeout: Option<Duration>,
    pub scratch_dir: Option<PathBuf>,
    /// Project directories that do not exist. Not fatal.
    pub missing_dirs: Vec<(String, PathBuf)>,
}

impl AnalyzerConfig {
    /// Validate every project and resolve relative paths against `base`.
    pub fn validate(self, base: &Path) -> Result<ResolvedConfig, ConfigError> {
        if self.projects.is_empty() {
            return Err(ConfigError::EmptyProjects);
        }

        if self.concurrency == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "concurrency".to_string(),
                value: "0".to_string(),
                hint: "Concurrency must be at least 1".to_string(),
            });
        }

        if self.build_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "buildTimeoutSecs".to_string(),
                value: "0".to_string(),
                hint: "Remove buildTimeoutSecs to wait indefinitely".to_string(),
            });
        }

        let mut seen = HashSet::new();
        let mut projects = Vec::with_capacity(self.projects.len());
        let mut missing_dirs = Vec::new();

        for (index, raw) in self.projects.into_iter().enumerate() {
            let project = validate_project(index, raw, base)?;

            if !seen.insert(project.name.clone()) {
                return Err(ConfigError::DuplicateProject(project.name));
            }

            if !project.path.is_dir() {
                tracing::debug!(
                    project = %project.name,
                    path = %project.path.display(),
                    "project path does not exist"
                );
                missing_dirs.push((project.name.clone(), project.path.clone()));
            }

            projects.push(project);
        }

        Ok(ResolvedConfig {
            projects,
            output_path: resolve_path(base, &self.output_path),
            concurrency: self.concurrency,
            schedule: self.schedule.unwrap_or_default(),
            build_timeout: self.build_timeout_secs.map(Duration::from_secs),
            scratch_dir: self.scratch_dir.as_deref().map(|dir| resolve_path(base, dir)),
            missing_dirs,
        })
    }
}

fn validate_project(index: usize, raw: RawProject, base: &Path) -> Result<ProjectConfig, ConfigError> {
    let name = match non_blank(raw.name) {
        Some(name) => name,
        None => {
            return Err(ConfigError::MissingField {
                field: format!("projects[{}].name", index),
                hint: "Each project must have a 'name' field".to_string(),
            });
        }
    };

    let missing = |key: &str| ConfigError::MissingField {
        field: format!("projects[{}].{}", name, key),
        hint: format!("Project '{}' must have a '{}' field", name, key),
    };

    let path = raw
        .path
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| missing("path"))?;

    let tag = non_blank(raw.project_type).ok_or_else(|| missing("type"))?;
    let family: BundlerFamily = tag.parse().map_err(|_| ConfigError::InvalidValue {
        field: format!("projects[{}].type", name),
        value: tag.clone(),
        hint: "Must be 'vite' or 'nextjs'".to_string(),
    })?;

    let build_command = non_blank(raw.build_command).ok_or_else(|| missing("buildCommand"))?;

    Ok(ProjectConfig::new(
        name.clone(),
        resolve_path(base, &path),
        family,
        build_command,
    ))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Absolute, lexically normalized form of `path`. A leading `~` is the
/// home directory.
pub(crate) fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    let expanded = match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    };
    base.join(expanded).clean()
}

/// Keep projects named in `only`, preserving config order.
///
/// `None` or an empty list keeps everything.
pub fn filter_projects(
    projects: Vec<ProjectConfig>,
    only: Option<&[String]>,
) -> Result<Vec<ProjectConfig>, ConfigError> {
    let Some(names) = only.filter(|names| !names.is_empty()) else {
        return Ok(projects);
    };

    let kept: Vec<ProjectConfig> = projects
        .into_iter()
        .filter(|p| names.contains(&p.name))
        .collect();

    if kept.is_empty() {
        return Err(ConfigError::NoMatch(names.to_vec()));
    }

    for name in names {
        if !kept.iter().any(|p| &p.name == name) {
            tracing::warn!(project = %name, "--only names a project that is not configured");
        }
    }

    Ok(kept)
}
