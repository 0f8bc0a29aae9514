/*!
 * projcat - Concatenate a project into a single text snapshot
 *
 * This library selects files by type, dumps their contents into one output
 * file with a header per file, and appends a tree of the included files for
 * use as context for Large Language Models.
 */

pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod scanner;
pub mod tree;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use config::{Args, Config};
pub use error::{ProjCatError, Result};
pub use pipeline::{run, RunSummary};
pub use report::{FileReportInfo, ReportFormat, Reporter, ScanReport};
pub use scanner::Scanner;
pub use tree::TreeWriter;
pub use types::{ExclusionSet, FileGroup, Selection, TypePattern};
pub use writer::{ContentWriter, WriteStatistics};
