//! Progress reporting for CSV imports.

use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};
use vidcat_import::{ImportProgress, LogProgress, SilentProgress};

/// Reports import progress on a single bar.
pub(crate) struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub(crate) fn new() -> Self {
        let bar = ProgressBar::new(0);
        let style = ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len} rows {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        Self { bar }
    }
}

impl ImportProgress for BarProgress {
    fn on_row(&self, current: usize, total: usize) {
        if self.bar.length() != Some(total as u64) {
            self.bar.set_length(total as u64);
        }
        self.bar.set_position(current as u64);
    }

    fn on_phase(&self, message: &str) {
        log::debug!("{}", message);
    }

    fn on_complete(&self, message: &str) {
        self.bar.finish_and_clear();
        log::debug!("{}", message);
    }
}

/// Progress reporting for the current run: nothing when `quiet`, a bar on an
/// interactive terminal, periodic log lines otherwise.
pub(crate) enum Reporter {
    Silent(SilentProgress),
    Bar(BarProgress),
    Log(LogProgress),
}

impl Reporter {
    pub(crate) fn new(quiet: bool) -> Self {
        if quiet {
            Self::Silent(SilentProgress)
        } else if std::io::stderr().is_terminal() {
            Self::Bar(BarProgress::new())
        } else {
            Self::Log(LogProgress)
        }
    }

    pub(crate) fn as_progress(&self) -> &dyn ImportProgress {
        match self {
            Self::Silent(p) => p,
            Self::Bar(p) => p,
            Self::Log(p) => p,
        }
    }
}
