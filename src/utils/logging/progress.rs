//! CLI progress display (indicatif)

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner layout: elapsed time followed by the current phase
pub const SPINNER_TEMPLATE: &str = "{spinner:.cyan} [{elapsed}] {msg}";

const TICK: Duration = Duration::from_millis(120);

/// Spinner showing the current phase of a run
#[must_use]
pub fn create_spinner(phase: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template(SPINNER_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(phase.to_string());
    spinner.enable_steady_tick(TICK);
    spinner
}

/// Stop `spinner`, leaving `summary` on screen
pub fn finish_progress_bar(spinner: &ProgressBar, summary: &str) {
    spinner.finish_with_message(summary.to_string());
}
