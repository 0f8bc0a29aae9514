/*!
 * Utility functions and defaults for projcat
 */

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;

/// Width of the dash delimiter used before every file block and the tree header
pub const DELIMITER_WIDTH: usize = 60;

/// Default output file name, created in the current working directory
pub const DEFAULT_OUTPUT_FILE: &str = "concatenated_project.txt";

/// Default type patterns, in priority order
pub const DEFAULT_TYPES: &[&str] = &[
    "py",
    "txt",
    "yml",
    "Dockerfile",
    "init.sql",
    "README.md",
    "tf",
];

/// Directory names that are never scanned nor drawn
pub static DEFAULT_EXCLUDED_DIRS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Version Control
        ".git",
        ".svn",
        ".hg",
        // IDEs & Editors
        ".idea",
        ".vscode",
    ]
});

/// The dash line separating blocks in the output
pub fn delimiter() -> String {
    "-".repeat(DELIMITER_WIDTH)
}

/// Resolve a path to an absolute, canonical form.
///
/// Paths that do not exist yet (such as an output file about to be created)
/// are resolved through their parent directory.
pub fn resolve_path(path: &Path) -> io::Result<PathBuf> {
    if let Ok(canonical) = fs::canonicalize(path) {
        return Ok(canonical);
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => match fs::canonicalize(parent) {
            Ok(parent) => Ok(parent.join(name)),
            Err(_) => Ok(absolute),
        },
        _ => Ok(absolute),
    }
}

/// File name of a path as a string, empty for paths without one
pub fn file_name_string(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Format a count with human-readable units
pub fn format_number(num: usize) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        num.to_string()
    }
}
