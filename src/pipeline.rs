/*!
 * End-to-end snapshot run: select, dump contents, append the tree
 */

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

use indicatif::ProgressBar;
use log::info;

use crate::config::Config;
use crate::error::{Result, ResultExt};
use crate::report::ScanReport;
use crate::scanner::Scanner;
use crate::tree::TreeWriter;
use crate::types::Selection;
use crate::writer::{ContentWriter, WriteStatistics};

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Files that were selected, grouped by type
    pub selection: Selection,
    /// Totals gathered while dumping contents
    pub statistics: WriteStatistics,
    /// Size of the finished output file
    pub output_bytes: u64,
    /// Wall time of the whole run
    pub duration: Duration,
}

impl RunSummary {
    /// Build the console report for this run
    pub fn to_report(&self, config: &Config) -> ScanReport {
        ScanReport {
            output_file: config.output_file.display().to_string(),
            duration: self.duration,
            files_selected: self.selection.len(),
            files_failed: self.statistics.files_failed,
            total_lines: self.statistics.total_lines,
            total_chars: self.statistics.total_chars,
            output_bytes: self.output_bytes,
            file_details: self.statistics.file_details.clone(),
        }
    }
}

/// Run the three stages against one output handle.
///
/// The configuration is validated and the selection completed before the
/// output file is created, so a bad base directory never truncates an
/// existing output.
pub fn run(config: &Config, progress: Arc<ProgressBar>) -> Result<RunSummary> {
    let start_time = Instant::now();
    config.validate()?;

    progress.set_prefix("Scanning");
    progress.set_message(config.target_dir.display().to_string());
    let scanner = Scanner::new(config.clone(), Arc::clone(&progress));
    let selection = scanner.scan()?;

    progress.set_prefix("Writing");
    progress.set_length(selection.len() as u64);
    progress.set_position(0);

    let file = File::create(&config.output_file).with_context(|| {
        format!(
            "Failed to create output file {}",
            config.output_file.display()
        )
    })?;
    let mut out = BufWriter::new(file);

    let statistics = ContentWriter::new(Arc::clone(&progress)).write(&selection, &mut out)?;
    info!(
        "Wrote {} files ({} unreadable)",
        statistics.files_written, statistics.files_failed
    );

    let tree = TreeWriter::new(config.excluded_dirs.clone(), config.follow_links);
    tree.write(&selection.file_set(), &config.target_dir, &mut out)?;
    out.flush()?;
    drop(out);

    let output_bytes = fs::metadata(&config.output_file)
        .map(|m| m.len())
        .unwrap_or(0);
    info!(
        "Output {} is {} bytes",
        config.output_file.display(),
        output_bytes
    );

    Ok(RunSummary {
        selection,
        statistics,
        output_bytes,
        duration: start_time.elapsed(),
    })
}
