//! Console reporter with colored output

use crate::{Aggregation, FileRecord};
use colored::Colorize;
use std::path::Path;

/// Reporter for terminal progress and the end-of-run summary
pub struct ConsoleReporter {
    /// Suppress progress lines (errors still print)
    quiet: bool,
    /// Per-folder breakdown in the summary
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            quiet: false,
            verbose: false,
        }
    }

    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report the scan result before extraction starts
    pub fn report_found(&self, files: &[FileRecord]) {
        if self.quiet {
            return;
        }
        eprintln!(
            "{}: {} report file{}",
            "Found".green().bold(),
            files.len(),
            if files.len() == 1 { "" } else { "s" }
        );
        for file in files {
            eprintln!("   {}", file.relative_path.display().to_string().dimmed());
        }
    }

    /// Per-file extraction failure; non-fatal, the batch continues
    pub fn report_parse_error(&self, path: &Path, err: &anyhow::Error) {
        eprintln!(
            "{}: {}: {:#}",
            "Parse error".yellow(),
            path.display(),
            err
        );
    }

    /// Final summary after rendering
    pub fn report_summary(&self, agg: &Aggregation) {
        if self.quiet {
            return;
        }

        if self.verbose {
            for group in &agg.groups {
                eprintln!(
                    "   {} {} ({} row{})",
                    "·".dimmed(),
                    group.display_label(),
                    group.rows.len(),
                    if group.rows.len() == 1 { "" } else { "s" }
                );
            }
        }

        let stats = &agg.stats;
        eprintln!();
        eprintln!("{}", "═".repeat(60));
        eprintln!("{}", "Summary".bold());
        eprintln!("{}", "═".repeat(60));
        eprintln!("   Folders:  {}", stats.folders.to_string().bold());
        eprintln!("   Stocks:   {}", stats.rows.to_string().bold());
        eprintln!(
            "   Signals:  {} buy · {} neutral · {} sell · {} unrated",
            stats.buy.to_string().green(),
            stats.neutral.to_string().yellow(),
            stats.sell.to_string().red(),
            stats.unrated.to_string().dimmed()
        );
        eprintln!();
    }

    /// Report the written output document
    pub fn report_written(&self, path: &Path) {
        if self.quiet {
            return;
        }
        eprintln!("{}: wrote {}", "Done".green().bold(), path.display());
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
