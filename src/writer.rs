/*!
 * Markdown writer implementation for codemd
 */

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::ProgressBar;
use tempfile::{Builder, NamedTempFile};
use tracing::{debug, info};

use crate::error::{CodeMdError, IoResultExt, Result};
use crate::types::{Collection, WriteSummary};
use crate::utils::{fence_token, relative_path};

/// Heading of the excluded-files manifest
pub const EXCLUDED_HEADING: &str = "## Excluded Files";

/// Note attached to every excluded file bullet
pub const EXCLUDED_NOTE: &str =
    "This file is present, but its content was not captured in this list for brevity.";

/// Totals gathered while rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub lines: usize,
    pub bytes: u64,
}

/// Markdown writer for collected files
pub struct MarkdownWriter {
    /// Directory that headings are made relative to
    base_dir: PathBuf,
    /// Progress bar, ticked once per section
    progress: Arc<ProgressBar>,
}

impl MarkdownWriter {
    /// Create a new Markdown writer
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            progress: Arc::new(ProgressBar::hidden()),
        }
    }

    /// Report progress on `progress` while writing
    pub fn with_progress(mut self, progress: Arc<ProgressBar>) -> Self {
        self.progress = progress;
        self
    }

    /// Write the collection to `output`, replacing any existing file
    ///
    /// The document is built in a temporary file next to `output` and renamed
    /// over it once complete, so a failed run leaves the old file untouched.
    pub fn write(&self, collection: &Collection, output: &Path) -> Result<WriteSummary> {
        let dir = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let temp = self.create_temp(dir, output)?;

        let mut out = BufWriter::new(temp);
        let stats = self.render_to(collection, &mut out, output)?;
        let temp = out
            .into_inner()
            .map_err(|e| CodeMdError::fs("failed to write output file", output, e.into_error()))?;
        temp.persist(output)
            .map_err(|e| CodeMdError::fs("failed to replace output file", output, e.error))?;

        info!(
            output = %output.display(),
            included = collection.included.len(),
            excluded = collection.excluded.len(),
            bytes = stats.bytes,
            "markdown written"
        );

        Ok(WriteSummary {
            output_file: output.to_path_buf(),
            included: collection.included.len(),
            excluded: collection.excluded.len(),
            lines: stats.lines,
            bytes_written: stats.bytes,
        })
    }

    /// Render the document into `out`
    ///
    /// `target` only names the destination in error messages.
    pub fn render_to<W: Write>(
        &self,
        collection: &Collection,
        out: &mut W,
        target: &Path,
    ) -> Result<RenderStats> {
        let mut stats = RenderStats::default();
        let mut emit = |text: &str, stats: &mut RenderStats| -> Result<()> {
            out.write_all(text.as_bytes())
                .fs_context("failed to write output file", target)?;
            stats.bytes += text.len() as u64;
            Ok(())
        };

        for path in &collection.included {
            let relative = self.display_path(path);
            self.progress.set_message(format!("Writing {}", relative));

            let content = read_text(path)?;
            stats.lines += content.lines().count();

            emit(&format!("## {}\n\n", relative), &mut stats)?;
            emit(&format!("```{}\n", fence_token(&relative)), &mut stats)?;
            emit(&content, &mut stats)?;
            emit("\n```\n\n", &mut stats)?;

            debug!(path = %relative, bytes = content.len(), "wrote section");
            self.progress.inc(1);
        }

        if !collection.excluded.is_empty() {
            emit(&format!("{}\n\n", EXCLUDED_HEADING), &mut stats)?;
            for path in &collection.excluded {
                let relative = self.display_path(path);
                emit(&format!("- **{}**: {}\n", relative, EXCLUDED_NOTE), &mut stats)?;
            }
        }

        out.flush().fs_context("failed to write output file", target)?;
        Ok(stats)
    }

    /// Render the document into a string
    #[cfg(test)]
    pub(crate) fn render_to_string(&self, collection: &Collection) -> Result<String> {
        let mut buf = Vec::new();
        self.render_to(collection, &mut buf, Path::new("<memory>"))?;
        // Every piece written was a &str
        String::from_utf8(buf).map_err(|_| CodeMdError::Encoding {
            path: PathBuf::from("<memory>"),
        })
    }

    fn display_path(&self, path: &Path) -> String {
        relative_path(path, &self.base_dir)
            .to_string_lossy()
            .into_owned()
    }

    /// Temporary file in `dir` with the mode `output` should end up with
    ///
    /// A replaced file keeps its permissions. A new one gets the default
    /// 0o666 filtered through the umask, like a plain `File::create`.
    fn create_temp(&self, dir: &Path, output: &Path) -> Result<NamedTempFile> {
        let mut builder = Builder::new();
        builder.prefix(".codemd");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o666));
        }
        let temp = builder
            .tempfile_in(dir)
            .fs_context("failed to create output file", output)?;

        if let Ok(meta) = fs::metadata(output) {
            temp.as_file()
                .set_permissions(meta.permissions())
                .fs_context("failed to set permissions on", temp.path())?;
        }
        Ok(temp)
    }
}

/// Read a file that must be UTF-8 text
fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).fs_context("failed to read file", path)?;
    String::from_utf8(bytes).map_err(|_| CodeMdError::Encoding {
        path: path.to_path_buf(),
    })
}
