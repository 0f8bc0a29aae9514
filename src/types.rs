/*!
 * Core types and data structures for projcat
 */

use std::collections::HashSet;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::utils::DEFAULT_EXCLUDED_DIRS;

/// A file type selector.
///
/// Matches either a file name suffix (`name` ends with `.pattern`) or an exact
/// file name (`name == pattern`). Matching is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypePattern(String);

impl TypePattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether a file name satisfies this pattern
    pub fn matches(&self, file_name: &str) -> bool {
        file_name == self.0
            || (file_name.len() > self.0.len()
                && file_name.ends_with(self.0.as_str())
                && file_name.as_bytes()[file_name.len() - self.0.len() - 1] == b'.')
    }
}

impl fmt::Display for TypePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypePattern {
    fn from(pattern: &str) -> Self {
        Self::new(pattern)
    }
}

impl From<String> for TypePattern {
    fn from(pattern: String) -> Self {
        Self(pattern)
    }
}

/// Directory names pruned from both the selection walk and the tree.
///
/// A path is excluded when any of its segments equals one of the names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    names: HashSet<String>,
}

impl ExclusionSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Add more names to the set
    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names.extend(names.into_iter().map(Into::into));
    }

    /// Check a single entry name
    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Check every normal segment of a path
    pub fn excludes(&self, path: &Path) -> bool {
        path.components().any(|component| match component {
            Component::Normal(segment) => segment
                .to_str()
                .is_some_and(|segment| self.names.contains(segment)),
            _ => false,
        })
    }
}

impl Default for ExclusionSet {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_DIRS.iter().copied())
    }
}

/// Files selected for one type pattern, sorted by path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup {
    /// Pattern the files matched first
    pub pattern: TypePattern,
    /// Selected file paths, as reached from the base directory
    pub files: Vec<PathBuf>,
}

impl FileGroup {
    pub fn new(pattern: TypePattern) -> Self {
        Self {
            pattern,
            files: Vec::new(),
        }
    }

    /// Sort the group by the raw bytes of each path
    pub fn sort(&mut self) {
        self.files.sort_by(|a, b| {
            a.as_os_str()
                .as_encoded_bytes()
                .cmp(b.as_os_str().as_encoded_bytes())
        });
    }
}

/// Result of the selection pass: one group per configured pattern, in
/// configuration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub groups: Vec<FileGroup>,
}

impl Selection {
    /// All selected files, group by group
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.groups
            .iter()
            .flat_map(|group| group.files.iter().map(PathBuf::as_path))
    }

    /// Selected files as a set, for membership tests
    pub fn file_set(&self) -> HashSet<PathBuf> {
        self.files().map(Path::to_path_buf).collect()
    }

    /// Total number of selected files
    pub fn len(&self) -> usize {
        self.groups.iter().map(|group| group.files.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
