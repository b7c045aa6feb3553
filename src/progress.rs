//! Progress reporting for batch runs.

use indicatif::{ProgressBar, ProgressStyle};

/// Count-style progress bar (documents parsed out of total), with an optional label.
pub fn make_count_progress(total: u64, label: Option<&str>) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} {msg} {pos}/{len} [{bar:.cyan/blue}] {percent:>3}%  \
         docs/s: {per_sec}  elapsed: {elapsed_precise}  eta: {eta_precise}",
    ) {
        pb.set_style(style.progress_chars("█▉▊▋▌▍▎▏  "));
    }
    if let Some(msg) = label.filter(|l| !l.is_empty()) {
        pb.set_message(msg.to_string());
    }
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
