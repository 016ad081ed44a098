//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output
//! - Progress bars
//! - Download reporting

pub mod console;
pub mod progress;
pub mod stats;

pub use self::console::{
    print_banner, print_error, print_info, print_media_links, print_post_details,
    print_post_list, print_success, print_warning,
};
pub use progress::{create_download_bar, create_spinner};
pub use stats::{print_download_report, print_summary};
