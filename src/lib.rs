/*!
 * codemd - Collect a directory's source files into one Markdown document
 *
 * Files with an allowed extension are embedded as fenced code blocks;
 * files excluded by name or by folder are listed at the end without
 * their content.
 */

pub mod collector;
pub mod config;
pub mod error;
pub mod report;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use collector::{collect, CollectOptions, Collector};
pub use config::{Args, Config};
pub use error::{CodeMdError, Result};
pub use report::{ReportFormat, Reporter, RunReport};
pub use types::{Classification, Collection, WriteSummary};
pub use writer::MarkdownWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Validate `config`, collect its root and write the Markdown document
pub fn create_markdown(config: &Config) -> Result<WriteSummary> {
    config.validate()?;

    let collection = collect(&config.root, &config.collect_options())?;
    MarkdownWriter::new(&config.base_dir).write(&collection, &config.output_file)
}
