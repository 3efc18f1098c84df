//! Output formatting and progress indicators
//!
//! Global quiet/json state is applied once from `main` and consulted by the
//! command implementations before printing.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};

static QUIET: AtomicBool = AtomicBool::new(false);
static JSON: AtomicBool = AtomicBool::new(false);

/// Output configuration derived from the global CLI flags
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    /// Suppress all output except errors
    pub quiet: bool,
    /// Emit machine-readable JSON
    pub json: bool,
    /// Verbosity level (-v, -vv)
    pub verbose: u8,
}

impl OutputConfig {
    /// Create a new output configuration
    pub fn new(quiet: bool, json: bool, verbose: u8) -> Self {
        Self { quiet, json, verbose }
    }

    /// Apply this configuration process-wide
    pub fn apply_global(&self) {
        QUIET.store(self.quiet, Ordering::Relaxed);
        JSON.store(self.json, Ordering::Relaxed);
    }
}

/// Whether --quiet was passed
pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Whether --json was passed
pub fn is_json() -> bool {
    JSON.load(Ordering::Relaxed)
}

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";

    /// Info prefix (blue circle)
    pub const INFO: &str = "ℹ";
}

/// Print an informational message
pub fn print_info(message: &str) {
    if !is_quiet() {
        println!("{} {message}", status::INFO);
    }
}

/// Print a success message
pub fn print_success(message: &str) {
    if !is_quiet() {
        println!("{} {message}", status::SUCCESS);
    }
}

/// Print a warning message
pub fn print_warning(message: &str) {
    if !is_quiet() {
        println!("{} {message}", status::WARNING);
    }
}

/// Print an indented detail line
pub fn print_detail(message: &str) {
    if !is_quiet() {
        println!("    {message}");
    }
}

/// Print an error to stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} {error:#}", status::ERROR);
}

/// Create a spinner for operations with unknown duration
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.blue} {msg}")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_global_sets_flags() {
        OutputConfig::new(true, true, 0).apply_global();
        assert!(is_quiet());
        assert!(is_json());
        OutputConfig::new(false, false, 0).apply_global();
        assert!(!is_quiet());
        assert!(!is_json());
    }
}
