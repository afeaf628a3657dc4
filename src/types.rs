/*!
 * Core types and data structures for codemd
 */

use std::path::PathBuf;

/// Result of walking the root directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    /// Files whose content is embedded, in discovery order
    pub included: Vec<PathBuf>,
    /// Files listed by name only, in discovery order
    pub excluded: Vec<PathBuf>,
}

/// How a single file was classified by the collector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Content goes into the output
    Included,
    /// Named in the excluded-files manifest
    Excluded,
    /// Not recorded anywhere
    Dropped,
}

/// What the writer produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    /// Output file path
    pub output_file: PathBuf,
    /// Number of code sections written
    pub included: usize,
    /// Number of excluded-file bullets written
    pub excluded: usize,
    /// Total lines of embedded file content
    pub lines: usize,
    /// Size of the document in bytes
    pub bytes_written: u64,
}
