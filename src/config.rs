/*!
 * Configuration handling for projcat
 */

use std::env;
use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::Shell;

use crate::error::Result;
use crate::types::{ExclusionSet, TypePattern};
use crate::utils::{resolve_path, DEFAULT_OUTPUT_FILE, DEFAULT_TYPES};
use crate::{bail, ensure};

/// Command-line arguments for projcat
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "projcat",
    version = env!("CARGO_PKG_VERSION"),
    about = "Aggregate file contents based on types",
    long_about = "Concatenates every file matching the given types into a single text file, \
                  each framed by a path header, and appends a tree of the included files."
)]
pub struct Args {
    /// Directory to search. Defaults to the current directory
    #[clap(short, long)]
    pub directory: Option<String>,

    /// File types to include: extensions (py, yml) or exact file names (Dockerfile)
    #[clap(short, long, num_args = 1..)]
    pub types: Vec<String>,

    /// Path to the output file. Defaults to 'concatenated_project.txt' in the current directory
    #[clap(short, long)]
    pub output: Option<String>,

    /// Comma-separated list of extra directory names to skip
    #[clap(long, value_delimiter = ',')]
    pub exclude_dir: Vec<String>,

    /// Follow symbolic links to directories
    #[clap(long)]
    pub follow_links: bool,

    /// Print a summary table after writing the output
    #[clap(long)]
    pub report: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Silence logs and progress output
    #[clap(short, long)]
    pub quiet: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Base directory to scan
    pub target_dir: PathBuf,

    /// Output file path
    pub output_file: PathBuf,

    /// Type patterns, in priority order
    pub types: Vec<TypePattern>,

    /// Directory names skipped by both walks
    pub excluded_dirs: ExclusionSet,

    /// Path of the running program, never selected
    pub self_path: Option<PathBuf>,

    /// Whether to follow symbolic links to directories
    pub follow_links: bool,

    /// Print a summary table after the run
    pub report: bool,
}

impl Config {
    /// Create a configuration with default types and exclusions
    pub fn new(target_dir: impl Into<PathBuf>, output_file: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
            output_file: output_file.into(),
            types: DEFAULT_TYPES.iter().copied().map(TypePattern::from).collect(),
            excluded_dirs: ExclusionSet::default(),
            self_path: env::current_exe().ok(),
            follow_links: false,
            report: false,
        }
    }

    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Result<Self> {
        let cwd = env::current_dir()?;

        let target_dir = args
            .directory
            .map(PathBuf::from)
            .unwrap_or_else(|| cwd.clone());
        let output_file = args
            .output
            .map(PathBuf::from)
            .unwrap_or_else(|| cwd.join(DEFAULT_OUTPUT_FILE));

        let mut config = Self::new(target_dir, output_file);
        if !args.types.is_empty() {
            config.types = args.types.into_iter().map(TypePattern::from).collect();
        }
        config.excluded_dirs.extend(args.exclude_dir);
        config.follow_links = args.follow_links;
        config.report = args.report;

        Ok(config)
    }

    /// Replace the type patterns
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TypePattern>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Validate the configuration before anything is written
    pub fn validate(&self) -> Result<()> {
        let target = self.target_dir.display();
        ensure!(self.target_dir.exists(), PathNotFound, "{}", target);
        ensure!(self.target_dir.is_dir(), NotADirectory, "{}", target);

        // Check if output file directory exists
        if let Some(parent) = self.output_file.parent() {
            if parent != Path::new("") && !parent.is_dir() {
                bail!(
                    Config,
                    "Output directory not found: {}",
                    parent.display()
                );
            }
        }
        ensure!(
            !self.output_file.is_dir(),
            Config,
            "Output path is a directory: {}",
            self.output_file.display()
        );

        ensure!(
            !self.types.is_empty(),
            InvalidArgument,
            "at least one file type is required"
        );
        ensure!(
            self.types.iter().all(|t| !t.as_str().is_empty()),
            InvalidArgument,
            "file types must not be empty"
        );

        Ok(())
    }

    /// Resolved paths that are never selected: the output file and the
    /// running program
    pub fn excluded_files(&self) -> Result<Vec<PathBuf>> {
        let mut excluded = vec![resolve_path(&self.output_file)?];
        if let Some(path) = &self.self_path {
            excluded.push(resolve_path(path)?);
        }
        Ok(excluded)
    }
}
