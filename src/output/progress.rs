//! Progress indicators for feed fetching and downloads.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const SPINNER_TICK: Duration = Duration::from_millis(100);

/// Spinner shown while the hot feed is fetched.
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner().with_message(message.to_string());
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg} ({elapsed})") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(SPINNER_TICK);
    spinner
}

/// Byte progress for one file. Resumed downloads start at `position`.
pub fn create_download_bar(total: u64, position: u64, name: &str) -> ProgressBar {
    let bar = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr())
        .with_message(name.to_string())
        .with_position(position);
    if let Ok(style) = ProgressStyle::with_template(
        "{msg:.dim} [{bar:40.green/white}] {bytes}/{total_bytes} {bytes_per_sec} ({eta})",
    ) {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}
