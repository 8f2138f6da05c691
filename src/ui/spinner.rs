use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while a service request is in flight.
pub fn start(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

pub fn finish(spinner: ProgressBar) {
    spinner.finish_and_clear();
}
