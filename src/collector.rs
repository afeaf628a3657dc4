/*!
 * Directory traversal and file classification
 */

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::{debug, info, trace, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::{CodeMdError, IoResultExt, Result};
use crate::types::{Classification, Collection};
use crate::utils::{extension_of, relative_path};

/// Filters and path settings for a collection run
#[derive(Debug, Clone, Default)]
pub struct CollectOptions {
    /// Allowed extensions, each including the leading dot
    pub extensions: BTreeSet<String>,
    /// Exact base names that are always excluded
    pub exclude_files: BTreeSet<String>,
    /// Substrings that exclude a directory when found in its relative path
    pub exclude_folders: BTreeSet<String>,
    /// Directory that relative paths are computed against; a relative root
    /// is resolved against it too
    pub base_dir: PathBuf,
    /// A file never embedded, typically the output document; it is still
    /// listed when excluded by name or folder
    pub skip_path: Option<PathBuf>,
    /// Follow symlinks while walking
    pub follow_links: bool,
}

/// Walks a root directory and sorts its files into included and excluded
pub struct Collector {
    options: CollectOptions,
    /// Progress bar, ticked once per file seen
    pub progress: Arc<ProgressBar>,
}

impl Collector {
    pub fn new(options: CollectOptions, progress: Arc<ProgressBar>) -> Self {
        Self { options, progress }
    }

    /// Walk `root` and classify every file below it
    ///
    /// Each directory's own files are classified before its subdirectories
    /// are visited, and siblings are visited in file-name order.
    pub fn collect(&self, root: &Path) -> Result<Collection> {
        let root = &self.options.base_dir.join(root);
        let metadata = fs::metadata(root).fs_context("failed to read directory", root)?;
        if !metadata.is_dir() {
            return Err(CodeMdError::fs(
                "failed to read directory",
                root,
                io::Error::new(io::ErrorKind::Other, "not a directory"),
            ));
        }

        // The skip target may not exist yet; then there is nothing to skip
        let skip = self
            .options
            .skip_path
            .as_deref()
            .and_then(|p| fs::canonicalize(self.options.base_dir.join(p)).ok());

        info!(root = %root.display(), "collecting files");
        let mut collection = Collection::default();
        self.collect_directory(root, skip.as_deref(), &mut collection)?;
        info!(
            included = collection.included.len(),
            excluded = collection.excluded.len(),
            "collection finished"
        );

        Ok(collection)
    }

    /// Classify a file by base name, ignoring folder exclusion
    pub fn classify(&self, file_name: &str) -> Classification {
        if self.options.exclude_files.contains(file_name) {
            Classification::Excluded
        } else if self.options.extensions.contains(extension_of(file_name)) {
            Classification::Included
        } else {
            Classification::Dropped
        }
    }

    /// Whether a directory, given relative to the base dir, is excluded
    ///
    /// Matching is a plain substring test on the path string, so `libs`
    /// also matches `my-libs-extra` and `src/libs/x`.
    pub fn is_excluded_folder(&self, relative: &Path) -> bool {
        let relative = relative.to_string_lossy();
        self.options
            .exclude_folders
            .iter()
            .any(|folder| relative.contains(folder.as_str()))
    }

    fn collect_directory(
        &self,
        dir: &Path,
        skip: Option<&Path>,
        collection: &mut Collection,
    ) -> Result<()> {
        let relative = relative_path(dir, &self.options.base_dir);
        let folder_excluded = self.is_excluded_folder(&relative);
        debug!(dir = %relative.display(), folder_excluded, "visiting directory");
        self.progress
            .set_message(format!("Collecting {}", relative.display()));

        let (dirs, files): (Vec<_>, Vec<_>) = self
            .read_entries(dir)?
            .into_iter()
            .partition(|e| e.file_type().is_dir());

        for entry in files {
            // A symlinked directory that is not followed is neither walked nor listed
            if entry.path_is_symlink() && !self.options.follow_links && entry.path().is_dir() {
                trace!(path = %entry.path().display(), "skipping directory symlink");
                continue;
            }

            let path = entry.path();
            let mut class = if folder_excluded {
                Classification::Excluded
            } else {
                self.classify(&entry.file_name().to_string_lossy())
            };
            if class == Classification::Included && self.is_skip_target(path, skip) {
                warn!(path = %path.display(), "not embedding the output file in itself");
                class = Classification::Dropped;
            }
            debug!(path = %path.display(), ?class, "classified");

            match class {
                Classification::Included => collection.included.push(path.to_path_buf()),
                Classification::Excluded => collection.excluded.push(path.to_path_buf()),
                Classification::Dropped => {}
            }
            self.progress.inc(1);
        }

        for entry in dirs {
            self.collect_directory(entry.path(), skip, collection)?;
        }

        Ok(())
    }

    /// Direct children of `dir`, sorted by file name
    fn read_entries(&self, dir: &Path) -> Result<Vec<DirEntry>> {
        WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.options.follow_links)
            .sort_by_file_name()
            .into_iter()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| CodeMdError::Walk {
                path: e.path().unwrap_or(dir).to_path_buf(),
                source: e,
            })
    }

    fn is_skip_target(&self, path: &Path, skip: Option<&Path>) -> bool {
        let Some(skip) = skip else {
            return false;
        };
        // Cheap name check before resolving the path
        if path.file_name() != skip.file_name() {
            return false;
        }
        fs::canonicalize(path).map_or(false, |p| p == skip)
    }
}

/// Collect `root` with `options` and no progress reporting
pub fn collect(root: &Path, options: &CollectOptions) -> Result<Collection> {
    Collector::new(options.clone(), Arc::new(ProgressBar::hidden())).collect(root)
}
