//! Global error handling for codemd
//!
//! Every failure the collector or writer can hit falls into one of two
//! kinds: a filesystem failure (missing root, unreadable entry, unwritable
//! output) or an encoding failure (an included file that is not UTF-8 text).
//! Both abort the run.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Global error type for codemd operations
#[derive(Error, Debug)]
pub enum CodeMdError {
    /// A filesystem operation on `path` failed
    #[error("{op} '{}': {source}", .path.display())]
    Filesystem {
        /// Operation that failed, e.g. "failed to read file"
        op: &'static str,
        /// Path the operation was applied to
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Directory traversal failed below the root
    #[error("failed to walk directory '{}': {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// A file selected for inclusion is not valid UTF-8 text
    #[error("failed to decode '{}' as UTF-8 text", .path.display())]
    Encoding { path: PathBuf },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Specialized Result type for codemd operations
pub type Result<T> = std::result::Result<T, CodeMdError>;

impl CodeMdError {
    /// Build a filesystem error for `op` on `path`
    pub fn fs(op: &'static str, path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Filesystem {
            op,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// True for missing/unreadable/unwritable path failures
    pub fn is_filesystem(&self) -> bool {
        matches!(self, Self::Filesystem { .. } | Self::Walk { .. })
    }

    /// True when an included file could not be decoded as text
    pub fn is_encoding(&self) -> bool {
        matches!(self, Self::Encoding { .. })
    }
}

/// Creates a CodeMdError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::CodeMdError::$error_type(format!($($arg)*))
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

/// Extension trait for attaching a path and operation to I/O results
pub trait IoResultExt<T> {
    /// Map an `io::Error` into `CodeMdError::Filesystem`
    fn fs_context(self, op: &'static str, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn fs_context(self, op: &'static str, path: &Path) -> Result<T> {
        self.map_err(|e| CodeMdError::fs(op, path, e))
    }
}

// Allow converting CodeMdError to io::Error for io::Result based tests
impl From<CodeMdError> for io::Error {
    fn from(err: CodeMdError) -> Self {
        let kind = match &err {
            CodeMdError::Filesystem { source, .. } => source.kind(),
            CodeMdError::Encoding { .. } => io::ErrorKind::InvalidData,
            _ => io::ErrorKind::Other,
        };
        io::Error::new(kind, err.to_string())
    }
}
