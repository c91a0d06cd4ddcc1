//! Utility functions for text cleanup, log-friendly truncation, and file
//! system validation.
//!
//! This module provides helper functions used throughout the application:
//! - Whitespace normalization for scraped text nodes
//! - String truncation for logging
//! - File system validation for the output path

use itertools::Itertools;
use std::fs as stdfs;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Collapse runs of whitespace to single spaces and trim the ends.
///
/// Text collected from HTML nodes arrives fragmented across child nodes,
/// with the markup's own indentation embedded in it. All extracted text
/// passes through here before it is stored.
pub fn squish_whitespace(s: &str) -> String {
    s.split_whitespace().join(" ")
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to at most `max` bytes with an ellipsis and
/// byte count indicator appended. The cut is moved back to the nearest
/// character boundary, so multi-byte text (Japanese post titles, summaries)
/// never splits mid-character.
///
/// # Arguments
///
/// * `s` - The string to potentially truncate
/// * `max` - Maximum number of bytes to keep
///
/// # Returns
///
/// The original string if within `max` bytes, otherwise a truncated version
/// with `"…(+N bytes)"` appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
    }
}

/// Ensure the parent directory of an output file exists and is writable.
///
/// This function creates the parent directory if it doesn't exist, then
/// performs a write test by creating and immediately deleting a probe file.
/// Called before the crawl starts so a bad `--output` path fails fast
/// instead of after minutes of fetching.
///
/// # Arguments
///
/// * `path` - The output file path whose parent to validate
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The parent directory is not writable (permission denied, read-only
///   filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_parent(path: &str) -> crate::Result<()> {
    let dir = match Path::new(path).parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).await?;
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = dir.join("..__probe_write__");
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output location is writable");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
