//! Utility functions
//!
//! This module provides helpers for the run's scratch directory and for
//! shortening server responses before they are logged.

use tempfile::{Builder, TempDir};

/// Prefix of the per-run scratch directory.
pub const RUN_DIR_PREFIX: &str = "wxbrief.";

/// Create the scratch directory for one run
///
/// The directory and everything in it is removed when the returned guard is
/// dropped.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn create_run_dir() -> Result<TempDir, std::io::Error> {
    Builder::new().prefix(RUN_DIR_PREFIX).tempdir()
}

/// Shorten `text` to at most `max` characters, marking the cut with `...`
pub fn truncate_detail(text: &str, max: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}
