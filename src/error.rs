//! Global error handling for projcat
//!
//! This module provides a centralized error type that can represent errors
//! from all stages of a snapshot run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Global error type for projcat operations
#[derive(Error, Debug)]
pub enum ProjCatError {
    /// The base directory does not exist
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// The base path exists but is not a directory
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Reading a selected file failed
    #[error("Error reading {}: {}", .path.display(), .source)]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Unexpected error
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Specialized Result type for projcat operations
pub type Result<T> = std::result::Result<T, ProjCatError>;

/// Creates a ProjCatError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::ProjCatError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

/// Extension trait for adding context to errors
pub trait ResultExt<T, E> {
    /// Add additional context to an error
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T, E: std::error::Error + 'static> ResultExt<T, E> for std::result::Result<T, E> {
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|e| {
            let context = f();
            ProjCatError::Unexpected(format!("{}: {}", context, e))
        })
    }
}

impl From<ProjCatError> for io::Error {
    fn from(err: ProjCatError) -> Self {
        let kind = match &err {
            ProjCatError::PathNotFound(_) => io::ErrorKind::NotFound,
            ProjCatError::InvalidArgument(_) | ProjCatError::Config(_) => {
                io::ErrorKind::InvalidInput
            }
            ProjCatError::Io(e) => e.kind(),
            ProjCatError::FileRead { source, .. } => source.kind(),
            _ => io::ErrorKind::Other,
        };
        io::Error::new(kind, err.to_string())
    }
}
