/*!
 * Reporting functionality for codemd
 *
 * Renders the outcome of a run either as the one-line summary or as that
 * line followed by a metrics table built with tabled.
 */

use std::time::Duration;

use clap::ValueEnum;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::types::WriteSummary;
use crate::utils::format_file_size;

/// Statistics for a finished run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Output file path
    pub output_file: String,
    /// Time taken to collect and write
    pub duration: Duration,
    /// Files embedded in the document
    pub included: usize,
    /// Files listed in the excluded manifest
    pub excluded: usize,
    /// Lines of embedded content
    pub total_lines: usize,
    /// Size of the document
    pub bytes_written: u64,
}

impl RunReport {
    pub fn from_summary(summary: &WriteSummary, duration: Duration) -> Self {
        Self {
            output_file: summary.output_file.display().to_string(),
            duration,
            included: summary.included,
            excluded: summary.excluded,
            total_lines: summary.lines,
            bytes_written: summary.bytes_written,
        }
    }
}

/// Format of the report output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Single summary line
    #[default]
    Summary,
    /// Summary line plus a console table
    #[value(name = "table")]
    ConsoleTable,
}

/// Report generator for run results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &RunReport) -> String {
        match self.format {
            ReportFormat::Summary => self.summary_line(report),
            ReportFormat::ConsoleTable => format!(
                "{}\n\n{}",
                self.summary_line(report),
                self.create_summary_table(report)
            ),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &RunReport) {
        println!("{}", self.generate_report(report));
    }

    fn summary_line(&self, report: &RunReport) -> String {
        format!(
            "Markdown file '{}' created with {} code files and {} excluded files.",
            report.output_file, report.included, report.excluded
        )
    }

    // Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    fn create_summary_table(&self, report: &RunReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        let rows = vec![
            SummaryRow {
                key: "Output File",
                value: report.output_file.clone(),
            },
            SummaryRow {
                key: "Process Time",
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "Included Files",
                value: self.format_number(report.included),
            },
            SummaryRow {
                key: "Excluded Files",
                value: self.format_number(report.excluded),
            },
            SummaryRow {
                key: "Total Lines",
                value: self.format_number(report.total_lines),
            },
            SummaryRow {
                key: "Output Size",
                value: format_file_size(report.bytes_written),
            },
        ];

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }
}
