//! Spinner shown while an export is fetching pages
//!
//! Exports are a handful of sequential requests with no known total, so a
//! single indicatif spinner is enough feedback. Quiet mode uses a hidden bar
//! so callers never branch on visibility.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::app::ExportKind;

const SPINNER_TEMPLATE: &str = "{spinner:.blue} {msg} [{elapsed}]";
const TICK_INTERVAL: Duration = Duration::from_millis(120);

/// Progress feedback for one export
pub struct ExportSpinner {
    bar: ProgressBar,
}

impl ExportSpinner {
    /// Start a spinner for `kind`, hidden when `quiet` is set
    pub fn start(kind: ExportKind, quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::default_spinner()
                    .template(SPINNER_TEMPLATE)
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar.enable_steady_tick(TICK_INTERVAL);
            bar
        };
        bar.set_message(format!("Fetching {}...", kind));
        Self { bar }
    }

    /// Replace the spinner with a final line
    pub fn finish(&self, message: impl Into<String>) {
        self.bar.finish_with_message(message.into());
    }

    /// Remove the spinner without leaving output behind
    pub fn abandon(&self) {
        self.bar.finish_and_clear();
    }
}
