/*!
 * Directory structure rendering
 *
 * Draws an ASCII tree of the base directory containing every non-excluded
 * directory and only the selected files. Siblings keep the order in which
 * the file system lists them.
 */

use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::types::ExclusionSet;
use crate::utils::delimiter;

const BRANCH: &str = "├── ";
const CORNER: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";

/// A directory entry kept for drawing
struct TreeEntry {
    name: String,
    path: PathBuf,
    /// Directories reached through a symbolic link are only entered when
    /// links are followed
    descend: bool,
}

/// Writes the "Directory Structure" section
pub struct TreeWriter {
    /// Directory names never drawn nor descended
    excluded_dirs: ExclusionSet,
    /// Whether symbolic links to directories are entered
    follow_links: bool,
}

impl TreeWriter {
    /// Create a new tree writer
    pub fn new(excluded_dirs: ExclusionSet, follow_links: bool) -> Self {
        Self {
            excluded_dirs,
            follow_links,
        }
    }

    /// Write the section header followed by the tree rooted at `base`
    pub fn write<W: Write>(
        &self,
        files: &HashSet<PathBuf>,
        base: &Path,
        out: &mut W,
    ) -> io::Result<()> {
        writeln!(out, "{}", delimiter())?;
        writeln!(out, "Directory Structure")?;

        let mut ancestors = Vec::new();
        if let Ok(canonical) = fs::canonicalize(base) {
            if self.excluded_dirs.excludes(&canonical) {
                debug!("Base directory {} is excluded", canonical.display());
                return Ok(());
            }
            ancestors.push(canonical);
        }
        self.write_dir(files, base, "", &mut ancestors, out)
    }

    fn write_dir<W: Write>(
        &self,
        files: &HashSet<PathBuf>,
        dir: &Path,
        prefix: &str,
        ancestors: &mut Vec<PathBuf>,
        out: &mut W,
    ) -> io::Result<()> {
        let entries = match self.list_entries(files, dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Cannot list directory {}: {}", dir.display(), e);
                return Ok(());
            }
        };

        let count = entries.len();
        for (index, entry) in entries.into_iter().enumerate() {
            let is_last = index + 1 == count;
            let connector = if is_last { CORNER } else { BRANCH };
            writeln!(out, "{}{}{}", prefix, connector, entry.name)?;

            if !entry.descend {
                continue;
            }

            let canonical = fs::canonicalize(&entry.path).ok();
            if let Some(canonical) = &canonical {
                if ancestors.contains(canonical) {
                    warn!("Not descending into {}: link cycle", entry.path.display());
                    continue;
                }
            }

            let child_prefix = format!("{}{}", prefix, if is_last { BLANK } else { PIPE });
            let pushed = canonical.is_some();
            if let Some(canonical) = canonical {
                ancestors.push(canonical);
            }
            self.write_dir(files, &entry.path, &child_prefix, ancestors, out)?;
            if pushed {
                ancestors.pop();
            }
        }

        Ok(())
    }

    /// Directory entries to draw, in native listing order
    fn list_entries(
        &self,
        files: &HashSet<PathBuf>,
        dir: &Path,
    ) -> io::Result<Vec<TreeEntry>> {
        let mut kept = Vec::new();

        for entry in fs::read_dir(dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy().to_string();
            let path = entry.path();

            let is_real_dir = entry.file_type().is_ok_and(|t| t.is_dir());
            let is_dir = is_real_dir || fs::metadata(&path).is_ok_and(|m| m.is_dir());

            if is_dir {
                if self.excluded_dirs.contains_name(&name) {
                    debug!("Leaving out excluded directory {}", path.display());
                    continue;
                }
                kept.push(TreeEntry {
                    name,
                    path,
                    descend: is_real_dir || self.follow_links,
                });
            } else if files.contains(&path) {
                kept.push(TreeEntry {
                    name,
                    path,
                    descend: false,
                });
            }
        }

        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn default_writer() -> TreeWriter {
        TreeWriter::new(ExclusionSet::default(), false)
    }

    fn render(writer: &TreeWriter, files: &HashSet<PathBuf>, base: &Path) -> String {
        let mut out = Vec::new();
        writer.write(files, base, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_single_file_uses_corner() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("main.py");
        fs::write(&file, "print(1)").unwrap();

        let files: HashSet<PathBuf> = [file].into_iter().collect();
        let output = render(&default_writer(), &files, dir.path());

        let expected = format!("{}\nDirectory Structure\n└── main.py\n", delimiter());
        assert_eq!(output, expected);
    }

    #[test]
    fn test_nested_prefixes() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("pkg")).unwrap();
        let inner = dir.path().join("pkg").join("mod.py");
        fs::write(&inner, "").unwrap();

        let files: HashSet<PathBuf> = [inner].into_iter().collect();
        let output = render(&default_writer(), &files, dir.path());

        // A single top-level directory is the last child, so its children
        // are indented with blanks.
        assert!(output.ends_with("└── pkg\n    └── mod.py\n"), "{}", output);
    }

    #[test]
    fn test_unselected_files_and_excluded_dirs_are_omitted() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".git").join("HEAD"), "ref").unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();
        fs::write(dir.path().join("notes.md"), "# notes").unwrap();

        let files = HashSet::new();
        let output = render(&default_writer(), &files, dir.path());

        assert!(output.contains("└── empty\n"));
        assert!(!output.contains(".git"));
        assert!(!output.contains("HEAD"));
        assert!(!output.contains("notes.md"));
    }

    #[test]
    fn test_pipe_continues_under_non_last_sibling() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::create_dir(dir.path().join("b")).unwrap();
        let nested = dir.path().join("a").join("x.txt");
        fs::write(&nested, "x").unwrap();

        let files: HashSet<PathBuf> = [nested].into_iter().collect();
        let output = render(&default_writer(), &files, dir.path());

        // Listing order is not fixed, so check whichever layout was produced.
        let a_first = output.contains("├── a\n│   └── x.txt\n└── b\n");
        let b_first = output.contains("├── b\n└── a\n    └── x.txt\n");
        assert!(a_first || b_first, "{}", output);
    }

    #[test]
    fn test_excluded_base_draws_nothing() {
        let dir = tempdir().unwrap();
        let base = dir.path().join(".idea").join("proj");
        fs::create_dir_all(base.join("pkg")).unwrap();
        let file = base.join("a.py");
        fs::write(&file, "x").unwrap();

        let files: HashSet<PathBuf> = [file].into_iter().collect();
        let output = render(&default_writer(), &files, &base);

        assert_eq!(output, format!("{}\nDirectory Structure\n", delimiter()));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_drawn_without_entering() {
        let dir = tempdir().unwrap();
        let other = tempdir().unwrap();
        fs::create_dir(other.path().join("inner")).unwrap();
        std::os::unix::fs::symlink(other.path(), dir.path().join("linked")).unwrap();

        let output = render(&default_writer(), &HashSet::new(), dir.path());
        assert!(output.ends_with("└── linked\n"), "{}", output);
        assert!(!output.contains("inner"));

        let following = TreeWriter::new(ExclusionSet::default(), true);
        let output = render(&following, &HashSet::new(), dir.path());
        assert!(output.ends_with("└── linked\n    └── inner\n"), "{}", output);
    }
}
