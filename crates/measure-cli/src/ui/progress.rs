//! Live per-project build progress.

use super::{error, is_quiet, paint, success};
use crate::ui::format::format_size;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use measure_core::{BuildReporter, BuildResult, ProjectConfig};
use owo_colors::Style;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

/// One spinner per running build above an overall counter.
///
/// When stderr is not attended, or in CI, the bars stay hidden and each
/// finished build is reported as a plain status line instead.
pub struct BuildProgress {
    multi: MultiProgress,
    main_bar: ProgressBar,
    bars: Mutex<HashMap<String, ProgressBar>>,
    visible: bool,
}

impl BuildProgress {
    pub fn new(total_builds: u64) -> Self {
        Self::with_visibility(total_builds, Self::should_show())
    }

    fn with_visibility(total_builds: u64, visible: bool) -> Self {
        let multi = if visible {
            MultiProgress::new()
        } else {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        };

        let main_bar = multi.add(ProgressBar::new(total_builds));
        main_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} builds {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓▒░"),
        );
        if visible {
            main_bar.enable_steady_tick(Duration::from_millis(100));
        }

        Self {
            multi,
            main_bar,
            bars: Mutex::new(HashMap::new()),
            visible,
        }
    }

    /// Returns `false` in CI environments, when output is not a TTY, or
    /// with `--quiet`.
    pub fn should_show() -> bool {
        console::user_attended_stderr() && !super::is_ci() && !is_quiet()
    }

    pub fn finish(&self) {
        self.main_bar.finish_and_clear();
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("  {spinner:.blue} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"])
    }
}

fn outcome_line(project: &ProjectConfig, result: &BuildResult) -> String {
    match (result.error(), result.bundle_data()) {
        (Some(reason), _) => format!("{}: {}", project.name, reason),
        (None, Some(bundle)) => format!(
            "{} built: {} modules, {}",
            project.name,
            bundle.modules.len(),
            format_size(bundle.total_size)
        ),
        (None, None) => format!("{} built", project.name),
    }
}

impl BuildReporter for BuildProgress {
    fn build_started(&self, project: &ProjectConfig) {
        if !self.visible {
            return;
        }

        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_message(format!(
            "{} {}",
            project.name,
            paint(format!("({})", project.family), Style::new().dimmed())
        ));
        pb.enable_steady_tick(Duration::from_millis(80));
        self.bars.lock().insert(project.name.clone(), pb);
    }

    fn build_finished(&self, project: &ProjectConfig, result: &BuildResult) {
        let line = outcome_line(project, result);
        self.main_bar.inc(1);

        if !self.visible {
            if result.is_success() {
                success(&line);
            } else {
                error(&line);
            }
            return;
        }

        if let Some(pb) = self.bars.lock().remove(&project.name) {
            let glyph = if result.is_success() {
                paint("✓", Style::new().green())
            } else {
                paint("✗", Style::new().red())
            };
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("  {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.finish_with_message(format!("{} {}", glyph, line));
        }
    }
}

impl Drop for BuildProgress {
    /// Clears bars left running by an interrupted run.
    fn drop(&mut self) {
        for bar in self.bars.lock().values() {
            if !bar.is_finished() {
                bar.finish_and_clear();
            }
        }
        if !self.main_bar.is_finished() {
            self.main_bar.finish_and_clear();
        }
    }
}
