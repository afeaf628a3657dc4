/*!
 * Command-line interface for codemd
 */

use std::io;
use std::process;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::Level;

use codemd::config::{Args, Config};
use codemd::report::{Reporter, RunReport};
use codemd::utils::count_files;
use codemd::{Collector, MarkdownWriter, Result};

fn main() {
    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "codemd", &mut io::stdout());
        return;
    }

    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<()> {
    // Log lines and the spinner would fight over stderr
    let show_progress = !args.no_progress && args.verbose == 0;
    let report_format = args.report;

    let config = Config::from_args(args)?;
    config.validate()?;

    let progress = if show_progress {
        spinner()
    } else {
        ProgressBar::hidden()
    };
    let progress = Arc::new(progress);
    progress.set_length(count_files(&config.root, config.follow_links));

    let start_time = Instant::now();

    let collector = Collector::new(config.collect_options(), Arc::clone(&progress));
    let collection = collector.collect(&config.root)?;

    // Writing ticks once more per included file
    progress.inc_length(collection.included.len() as u64);
    let writer = MarkdownWriter::new(&config.base_dir).with_progress(Arc::clone(&progress));
    let summary = writer.write(&collection, &config.output_file)?;

    let duration = start_time.elapsed();
    progress.finish_and_clear();

    Reporter::new(report_format).print_report(&RunReport::from_summary(&summary, duration));

    Ok(())
}

fn spinner() -> ProgressBar {
    let progress = ProgressBar::new(0);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} {wide_msg:.dim} {pos}/{len} [{elapsed_precise}]")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress.set_style(style);
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}
