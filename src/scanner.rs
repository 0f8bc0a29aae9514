/*!
 * Directory scanning and file selection
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use log::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::ensure;
use crate::error::Result;
use crate::types::{FileGroup, Selection};
use crate::utils::resolve_path;

/// Scanner that selects the files to aggregate
pub struct Scanner {
    /// Scanner configuration
    config: Config,
    /// Progress bar
    progress: Arc<ProgressBar>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        Self { config, progress }
    }

    /// Walk the target directory and group matching files by type pattern.
    ///
    /// Each file lands in the group of the first pattern it satisfies. Groups
    /// follow the configured pattern order and are sorted by path.
    pub fn scan(&self) -> Result<Selection> {
        let base = self.config.target_dir.as_path();
        ensure!(base.exists(), PathNotFound, "{}", base.display());
        ensure!(base.is_dir(), NotADirectory, "{}", base.display());

        let excluded_files = self.config.excluded_files()?;
        let mut groups: Vec<FileGroup> = self
            .config
            .types
            .iter()
            .cloned()
            .map(FileGroup::new)
            .collect();

        let base_abs = fs::canonicalize(base)?;
        if self.config.excluded_dirs.excludes(&base_abs) {
            info!("Base directory {} is excluded", base_abs.display());
            return Ok(Selection { groups });
        }

        let walker = WalkDir::new(base)
            .follow_links(self.config.follow_links)
            .into_iter()
            .filter_entry(|e| !self.should_ignore(base, &base_abs, e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !is_file(&entry) {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            let Some(index) = self.matching_pattern(&file_name) else {
                continue;
            };

            if self.is_excluded_file(entry.path(), &excluded_files) {
                debug!("Skipping excluded file {}", entry.path().display());
                continue;
            }

            debug!(
                "Selected {} for type '{}'",
                entry.path().display(),
                groups[index].pattern
            );
            self.progress
                .set_message(format!("Selected: {}", file_name));
            self.progress.inc(1);
            groups[index].files.push(entry.into_path());
        }

        for group in &mut groups {
            group.sort();
        }

        let selection = Selection { groups };
        info!(
            "Selected {} files under {}",
            selection.len(),
            base.display()
        );
        Ok(selection)
    }

    /// Index of the first type pattern the file name satisfies
    pub fn matching_pattern(&self, file_name: &str) -> Option<usize> {
        self.config
            .types
            .iter()
            .position(|pattern| pattern.matches(file_name))
    }

    /// Check the entry's absolute path against the exclusion set
    fn should_ignore(&self, base: &Path, base_abs: &Path, entry: &DirEntry) -> bool {
        let relative = entry.path().strip_prefix(base).unwrap_or(entry.path());
        let ignored = self.config.excluded_dirs.excludes(&base_abs.join(relative));
        if ignored {
            debug!("Pruning excluded path {}", entry.path().display());
        }
        ignored
    }

    fn is_excluded_file(&self, path: &Path, excluded_files: &[PathBuf]) -> bool {
        match resolve_path(path) {
            Ok(resolved) => excluded_files.contains(&resolved),
            Err(_) => false,
        }
    }
}

/// Regular files, plus symbolic links that point at one
fn is_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}
