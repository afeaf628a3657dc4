/*!
 * Configuration handling for codemd
 */

use std::collections::BTreeSet;
use std::env;
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::Shell;

use crate::collector::CollectOptions;
use crate::ensure;
use crate::error::{CodeMdError, IoResultExt, Result};
use crate::report::ReportFormat;
use crate::utils::{normalize_extension, DEFAULT_EXTENSIONS, DEFAULT_OUTPUT_NAME};

/// Command-line arguments for codemd
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "codemd",
    version = env!("CARGO_PKG_VERSION"),
    about = "Collect a directory's source files into a single Markdown file",
    long_about = "Walks a directory tree, embeds every file with an allowed extension as a fenced code block, and lists deliberately excluded files at the end."
)]
pub struct Args {
    /// Root directory to scan
    #[clap(default_value = ".")]
    pub root: PathBuf,

    /// Output Markdown file (defaults to <ROOT>/code_files.md)
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Comma-separated list of extensions to include
    #[clap(short, long, value_delimiter = ',', default_values_t = DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect::<Vec<_>>())]
    pub extensions: Vec<String>,

    /// Comma-separated list of exact file names to exclude
    #[clap(short = 'x', long, value_delimiter = ',')]
    pub exclude_files: Vec<String>,

    /// Comma-separated list of folder names; any directory whose relative path contains one is excluded
    #[clap(short = 'f', long, value_delimiter = ',')]
    pub exclude_folders: Vec<String>,

    /// Directory that paths are made relative to (defaults to the current directory)
    #[clap(long)]
    pub base_dir: Option<PathBuf>,

    /// Follow symbolic links while walking
    #[clap(long)]
    pub follow_links: bool,

    /// How to print the run summary
    #[clap(long, value_enum, default_value_t = ReportFormat::default())]
    pub report: ReportFormat,

    /// Disable the progress spinner
    #[clap(long)]
    pub no_progress: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory to scan
    pub root: PathBuf,

    /// Output Markdown file path
    pub output_file: PathBuf,

    /// Allowed extensions, each starting with `.`
    pub extensions: BTreeSet<String>,

    /// Exact file names to exclude
    pub exclude_files: BTreeSet<String>,

    /// Folder-name substrings to exclude
    pub exclude_folders: BTreeSet<String>,

    /// Base directory for relative paths
    pub base_dir: PathBuf,

    /// Whether to follow symlinks
    pub follow_links: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Result<Self> {
        // Paths on the command line are relative to where codemd was run,
        // whatever base dir headings are computed against
        let cwd = env::current_dir()
            .fs_context("failed to read current directory", Path::new("."))?;
        let root = cwd.join(args.root);
        let output = args.output.map(|o| cwd.join(o));
        let base_dir = match args.base_dir {
            Some(dir) => cwd.join(dir),
            None => cwd,
        };

        Ok(Self::new(root, base_dir)
            .with_output(output)
            .with_extensions(&args.extensions)
            .with_exclude_files(&args.exclude_files)
            .with_exclude_folders(&args.exclude_folders)
            .with_follow_links(args.follow_links))
    }

    /// Configuration for `root` with default extensions and output path
    ///
    /// A relative `root` is taken relative to `base_dir`.
    pub fn new(root: impl AsRef<Path>, base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        let root = base_dir.join(root);
        Self {
            output_file: root.join(DEFAULT_OUTPUT_NAME),
            root,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            exclude_files: BTreeSet::new(),
            exclude_folders: BTreeSet::new(),
            base_dir,
            follow_links: false,
        }
    }

    /// Override the output path; `None` keeps `<root>/code_files.md`
    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        if let Some(output) = output {
            self.output_file = output;
        }
        self
    }

    /// Replace the allowed extensions; `js` and `.js` are equivalent
    pub fn with_extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.extensions = extensions
            .iter()
            .filter_map(|e| normalize_extension(e.as_ref()))
            .collect();
        self
    }

    /// Replace the excluded file names
    pub fn with_exclude_files<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.exclude_files = non_empty(names);
        self
    }

    /// Replace the excluded folder substrings
    pub fn with_exclude_folders<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.exclude_folders = non_empty(names);
        self
    }

    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// Validate the configuration
    ///
    /// Runs before any output is created, so a bad root never touches an
    /// existing output file.
    pub fn validate(&self) -> Result<()> {
        if !self.root.exists() {
            return Err(CodeMdError::fs(
                "failed to access root directory",
                &self.root,
                io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
            ));
        }
        ensure!(
            self.root.is_dir(),
            Config,
            "root '{}' is not a directory",
            self.root.display()
        );

        // Check if output file directory exists
        if let Some(parent) = self.output_file.parent() {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                return Err(CodeMdError::fs(
                    "output directory not found",
                    parent,
                    io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
                ));
            }
        }

        ensure!(
            !self.output_file.is_dir(),
            Config,
            "output '{}' is a directory",
            self.output_file.display()
        );

        Ok(())
    }

    /// Collector options derived from this configuration
    pub fn collect_options(&self) -> CollectOptions {
        CollectOptions {
            extensions: self.extensions.clone(),
            exclude_files: self.exclude_files.clone(),
            exclude_folders: self.exclude_folders.clone(),
            base_dir: self.base_dir.clone(),
            skip_path: Some(self.output_file.clone()),
            follow_links: self.follow_links,
        }
    }
}

fn non_empty<S: AsRef<str>>(values: &[S]) -> BTreeSet<String> {
    values
        .iter()
        .map(|v| v.as_ref().trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
