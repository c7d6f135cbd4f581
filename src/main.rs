//! Moa CLI: consolidated index generator for stock analysis reports

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use moa::config::{build_ignore_set, load_config};
use moa::reporter::{ConsoleReporter, HtmlReporter, JsonReporter};
use moa::{extractor, group_records, scanner, AggregateError, Aggregation, FileRecord, StockRow};
use std::path::PathBuf;
use std::process::ExitCode;

/// Moa: consolidated index generator for per-folder stock analysis reports
#[derive(Parser, Debug)]
#[command(name = "moa")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory tree to scan for report files
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Destination of the generated index (default: index.html in the root)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Exact report file name to collect
    #[arg(long)]
    report_name: Option<String>,

    /// Print the aggregate as JSON to stdout instead of writing the page
    #[arg(long, short)]
    json: bool,

    /// Quiet mode (errors only)
    #[arg(long, short)]
    quiet: bool,

    /// Per-folder breakdown in the summary
    #[arg(long, short)]
    verbose: bool,

    /// Path to config file (default: search .moarc.json in root and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Extract report files in parallel
    #[arg(long)]
    parallel: bool,

    /// Number of parallel threads (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();

    // Load config (CLI flags override config file)
    let config = load_config(&args.root, args.config.as_deref())?
        .merge_with_cli(args.report_name.clone(), args.output.clone());

    let ignore_set = if config.ignore.is_empty() {
        None
    } else {
        Some(build_ignore_set(&config.ignore)?)
    };

    let mut console = ConsoleReporter::new();
    if args.quiet {
        console = console.quiet();
    }
    if args.verbose {
        console = console.verbose();
    }

    let files =
        scanner::find_report_files(&args.root, config.report_filename(), ignore_set.as_ref())?;
    if files.is_empty() {
        // Terminal condition: report and leave any previous output untouched
        eprintln!(
            "{}: no {} files found under {}",
            "Warning".yellow(),
            config.report_filename(),
            args.root.display()
        );
        return Ok(ExitCode::from(2));
    }
    console.report_found(&files);

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    let extracted = if args.parallel || args.jobs.is_some() {
        extract_files_parallel(files, &console)
    } else {
        extract_files_sequential(files, &console)
    };

    let agg = Aggregation::new(group_records(extracted));

    if args.json {
        let reporter = JsonReporter::new(config.report_filename()).pretty();
        println!("{}", reporter.report(&agg));
        return Ok(ExitCode::SUCCESS);
    }

    let html = HtmlReporter::new(config.report_filename()).report(&agg);
    let output_path = config.output_path(&args.root);
    std::fs::write(&output_path, &html).map_err(|source| AggregateError::Write {
        path: output_path.clone(),
        source,
    })?;

    console.report_summary(&agg);
    console.report_written(&output_path);
    Ok(ExitCode::SUCCESS)
}

/// Extract report files one at a time. A failing file logs one line and
/// contributes zero rows; siblings are unaffected.
fn extract_files_sequential(
    files: Vec<FileRecord>,
    console: &ConsoleReporter,
) -> Vec<(FileRecord, Vec<StockRow>)> {
    files
        .into_iter()
        .map(|record| {
            let rows = match extractor::parse_report_file(&record.full_path) {
                Ok(rows) => rows,
                Err(e) => {
                    console.report_parse_error(&record.full_path, &e);
                    Vec::new()
                }
            };
            (record, rows)
        })
        .collect()
}

/// Extract report files on the rayon pool. Each file is independent, so
/// no synchronization is needed; results are re-sorted into the scanner's
/// folder ordering so output matches the sequential path byte for byte.
fn extract_files_parallel(
    files: Vec<FileRecord>,
    console: &ConsoleReporter,
) -> Vec<(FileRecord, Vec<StockRow>)> {
    use rayon::prelude::*;

    let mut extracted: Vec<(FileRecord, Vec<StockRow>)> = files
        .into_par_iter()
        .map(|record| {
            let rows = match extractor::parse_report_file(&record.full_path) {
                Ok(rows) => rows,
                Err(e) => {
                    console.report_parse_error(&record.full_path, &e);
                    Vec::new()
                }
            };
            (record, rows)
        })
        .collect();

    extracted.sort_by(|a, b| {
        a.0.folder_path
            .cmp(&b.0.folder_path)
            .then_with(|| a.0.relative_path.cmp(&b.0.relative_path))
    });
    extracted
}
