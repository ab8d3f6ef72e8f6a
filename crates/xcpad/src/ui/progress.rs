use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Simple spinner for quick operations
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Spinner that completes with a checkmark
pub fn spinner_success(pb: &ProgressBar, message: &str) {
    pb.set_style(ProgressStyle::default_spinner().template("  {msg}").unwrap());
    pb.finish_with_message(format!("✓ {}", message));
}

/// Spinner that completes with an error
pub fn spinner_error(pb: &ProgressBar, message: &str) {
    pb.set_style(ProgressStyle::default_spinner().template("  {msg}").unwrap());
    pb.finish_with_message(format!("✗ {}", message));
}
