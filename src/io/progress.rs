//! Terminal progress bars for solving and the territory contest

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template =
        format!("{{prefix:>8}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}");
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates the solve and contest progress bars
///
/// Every method is a no-op when the manager was created hidden.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    solve_bar: Option<ProgressBar>,
    contest_bar: Option<ProgressBar>,
    hidden: bool,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager drawing to the terminal
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            solve_bar: None,
            contest_bar: None,
            hidden: false,
        }
    }

    /// Create a manager that draws nothing
    pub fn hidden() -> Self {
        Self {
            hidden: true,
            ..Self::new()
        }
    }

    fn add_bar(&self, prefix: &'static str, length: usize) -> Option<ProgressBar> {
        if self.hidden {
            return None;
        }
        let bar = ProgressBar::new(length as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_prefix(prefix);
        Some(self.multi_progress.add(bar))
    }

    /// Show a bar counting units of solving work (cells or batches)
    pub fn start_solve(&mut self, total: usize) {
        self.solve_bar = self.add_bar("solve", total);
    }

    /// Move the solve bar to `position`
    pub fn update_solve(&self, position: usize) {
        if let Some(ref bar) = self.solve_bar {
            bar.set_position(position as u64);
        }
    }

    /// Mark solving done, with a short summary
    pub fn finish_solve(&self, message: String) {
        if let Some(ref bar) = self.solve_bar {
            bar.finish_with_message(message);
        }
    }

    /// Show a bar counting contest passes
    pub fn start_contest(&mut self, max_steps: usize) {
        self.contest_bar = self.add_bar("contest", max_steps);
    }

    /// Move the contest bar to `step`
    pub fn update_contest(&self, step: usize) {
        if let Some(ref bar) = self.contest_bar {
            bar.set_position(step as u64);
        }
    }

    /// Mark the contest done, with a short summary
    pub fn finish_contest(&self, message: String) {
        if let Some(ref bar) = self.contest_bar {
            bar.finish_with_message(message);
        }
    }
}
