//! Download result reporting.

use console::style;

use crate::download::DownloadReport;

/// Print where each file went and what failed.
pub fn print_download_report(report: &DownloadReport) {
    println!();
    for path in &report.saved {
        println!(
            "{} {}",
            style("Downloaded to:").yellow(),
            style(path.display()).green()
        );
    }
    for url in &report.failed {
        println!(
            "{} {}",
            style("Failed to download:").red(),
            style(url).dim()
        );
    }
    if report.saved.len() + report.failed.len() > 1 {
        print_summary(report);
    }
}

/// Print a summary line for quick viewing.
pub fn print_summary(report: &DownloadReport) {
    println!(
        "Downloaded: {} pics, {} vids, {} audio, {} other ({} failed)",
        style(report.pic_count).green(),
        style(report.vid_count).green(),
        style(report.audio_count).green(),
        style(report.other_count).green(),
        style(report.failed.len()).red()
    );
}
