/*!
 * Content writer: dumps every selected file into the output
 */

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use indicatif::ProgressBar;
use log::{debug, warn};

use crate::error::{ProjCatError, Result};
use crate::report::FileReportInfo;
use crate::types::Selection;
use crate::utils::{delimiter, file_name_string};

/// Totals gathered while writing file contents
#[derive(Debug, Clone, Default)]
pub struct WriteStatistics {
    /// Number of files whose content was written
    pub files_written: usize,
    /// Number of files replaced by an inline read error
    pub files_failed: usize,
    /// Total number of lines
    pub total_lines: usize,
    /// Total number of characters
    pub total_chars: usize,
    /// Per-file details, in output order
    pub file_details: Vec<(String, FileReportInfo)>,
}

/// Writes the framed content blocks of a selection
pub struct ContentWriter {
    /// Progress bar
    progress: Arc<ProgressBar>,
}

impl ContentWriter {
    /// Create a new content writer
    pub fn new(progress: Arc<ProgressBar>) -> Self {
        Self { progress }
    }

    /// Write one block per selected file, group by group.
    ///
    /// A file that cannot be read gets its header followed by a single
    /// `Error reading` line; only failures of `out` itself are returned.
    pub fn write<W: Write>(
        &self,
        selection: &Selection,
        out: &mut W,
    ) -> io::Result<WriteStatistics> {
        let mut stats = WriteStatistics::default();

        for path in selection.files() {
            self.progress
                .set_message(format!("Writing: {}", file_name_string(path)));
            self.write_file(path, out, &mut stats)?;
            self.progress.inc(1);
        }

        Ok(stats)
    }

    fn write_file<W: Write>(
        &self,
        path: &Path,
        out: &mut W,
        stats: &mut WriteStatistics,
    ) -> io::Result<()> {
        writeln!(out, "{}", delimiter())?;
        writeln!(out, "File Path = {}", path.display())?;
        writeln!(out, "File Name = {}", file_name_string(path))?;
        writeln!(out)?;

        match read_file_content(path) {
            Ok(content) => {
                out.write_all(content.as_bytes())?;
                writeln!(out)?;

                let info = FileReportInfo {
                    lines: content.lines().count(),
                    chars: content.chars().count(),
                };
                debug!("Wrote {} ({} lines)", path.display(), info.lines);
                stats.files_written += 1;
                stats.total_lines += info.lines;
                stats.total_chars += info.chars;
                stats
                    .file_details
                    .push((path.display().to_string(), info));
            }
            Err(e) => {
                warn!("{}", e);
                writeln!(out, "{}", e)?;
                stats.files_failed += 1;
            }
        }

        Ok(())
    }
}

/// Read a file as UTF-8 text
pub fn read_file_content(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ProjCatError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}
