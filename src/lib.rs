//! Moa: consolidated index generator for stock analysis reports
//!
//! This library scans a directory tree for per-folder HTML report files,
//! extracts the stock rows from each, and renders one self-contained
//! index page grouping the rows by source folder.

pub mod config;
pub mod extractor;
pub mod reporter;
pub mod scanner;

use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Default name of the per-folder report file to look for.
pub const DEFAULT_REPORT_FILENAME: &str = "분석결과_목록.html";

/// Default name of the generated index document (relative to the scan root).
pub const DEFAULT_OUTPUT_FILENAME: &str = "index.html";

/// One discovered report file, tagged with its containing folder
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Full path to the report file
    pub full_path: PathBuf,
    /// Path relative to the scan root
    pub relative_path: PathBuf,
    /// Containing folder relative to the scan root, "/"-separated.
    /// Empty for a report file directly under the root.
    pub folder_path: String,
    /// Base name of the containing folder
    pub folder_name: String,
}

/// One stock row extracted from a report table
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockRow {
    /// Stock code (first cell, trimmed)
    pub code: String,
    /// Stock name (second cell, trimmed)
    pub name: String,
    /// Free-form investment opinion (third cell, trimmed)
    pub opinion: String,
    /// Link target from the name cell's anchor; empty when absent
    pub detail_link: String,
}

impl StockRow {
    /// Classification of this row's opinion text.
    pub fn signal(&self) -> Signal {
        Signal::classify(&self.opinion)
    }
}

const BUY_KEYWORDS: [&str; 5] = ["매수", "Buy", "BUY", "적극", "Strong"];
const NEUTRAL_KEYWORDS: [&str; 4] = ["관망", "Neutral", "Wait", "중립"];
const SELL_KEYWORDS: [&str; 5] = ["매도", "Sell", "부적합", "Avoid", "보류"];

/// Opinion classification, computed once and carried through every
/// downstream consumer (markers, statistics, page filtering).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Buy,
    Neutral,
    Sell,
    Unrated,
}

impl Signal {
    /// Classify free-form opinion text by keyword substring match.
    /// Categories are checked in priority order (buy, neutral, sell);
    /// the first match wins even when several categories match.
    pub fn classify(opinion: &str) -> Self {
        if BUY_KEYWORDS.iter().any(|k| opinion.contains(k)) {
            Signal::Buy
        } else if NEUTRAL_KEYWORDS.iter().any(|k| opinion.contains(k)) {
            Signal::Neutral
        } else if SELL_KEYWORDS.iter().any(|k| opinion.contains(k)) {
            Signal::Sell
        } else {
            Signal::Unrated
        }
    }

    /// Emoji marker rendered before the opinion text.
    pub fn marker(&self) -> &'static str {
        match self {
            Signal::Buy => "✅",
            Signal::Neutral => "🟡",
            Signal::Sell => "🔴",
            Signal::Unrated => "📊",
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::Buy => write!(f, "buy"),
            Signal::Neutral => write!(f, "neutral"),
            Signal::Sell => write!(f, "sell"),
            Signal::Unrated => write!(f, "unrated"),
        }
    }
}

/// All rows extracted from one folder's report file(s)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderGroup {
    /// Folder path relative to the scan root, "/"-separated
    pub folder_path: String,
    /// Base name of the folder
    pub folder_name: String,
    /// Rows in document order
    pub rows: Vec<StockRow>,
}

impl FolderGroup {
    /// Human-readable section label. A `YYYY-MM-DD` pattern anywhere in
    /// the folder name becomes "YYYY년 MM월 DD일" (digits verbatim, no
    /// calendar validation); otherwise the raw folder name is used.
    pub fn display_label(&self) -> String {
        let re = Regex::new(r"(\d{4})-(\d{2})-(\d{2})").unwrap();
        match re.captures(&self.folder_name) {
            Some(c) => format!("{}년 {}월 {}일", &c[1], &c[2], &c[3]),
            None => self.folder_name.clone(),
        }
    }

    /// Path of this folder's own report file, for the navigation anchor.
    pub fn report_path(&self, report_filename: &str) -> String {
        if self.folder_path.is_empty() {
            report_filename.to_string()
        } else {
            format!("{}/{}", self.folder_path, report_filename)
        }
    }
}

/// Per-signal row counts derived once from the classified rows
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub folders: usize,
    pub rows: usize,
    pub buy: usize,
    pub neutral: usize,
    pub sell: usize,
    pub unrated: usize,
}

impl SummaryStats {
    pub fn from_groups(groups: &[FolderGroup]) -> Self {
        let mut stats = SummaryStats {
            folders: groups.len(),
            ..SummaryStats::default()
        };
        for row in groups.iter().flat_map(|g| &g.rows) {
            stats.rows += 1;
            match row.signal() {
                Signal::Buy => stats.buy += 1,
                Signal::Neutral => stats.neutral += 1,
                Signal::Sell => stats.sell += 1,
                Signal::Unrated => stats.unrated += 1,
            }
        }
        stats
    }

    /// Value of the "total analyzed" stat card. Unrated rows are not
    /// counted there; the console summary reports `rows` instead.
    pub fn classified(&self) -> usize {
        self.buy + self.neutral + self.sell
    }
}

/// The full aggregation: ordered folder groups plus derived stats
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregation {
    pub groups: Vec<FolderGroup>,
    pub stats: SummaryStats,
}

impl Aggregation {
    pub fn new(groups: Vec<FolderGroup>) -> Self {
        let stats = SummaryStats::from_groups(&groups);
        Self { groups, stats }
    }
}

/// Errors that abort an aggregation run. Per-file parse problems are not
/// errors; they contribute zero rows and the batch continues.
#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    #[error("no {report} files found under {}", .root.display())]
    ScanEmpty { report: String, root: PathBuf },

    #[error("failed to scan {}: {source}", .root.display())]
    Scan {
        root: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Resolve a row's detail link against its folder. `http`-prefixed links
/// pass through unchanged, empty links become a non-navigating `#`, and
/// everything else is joined onto the folder path.
pub fn resolve_detail_link(folder_path: &str, detail_link: &str) -> String {
    if detail_link.is_empty() {
        "#".to_string()
    } else if detail_link.starts_with("http") {
        detail_link.to_string()
    } else if folder_path.is_empty() {
        detail_link.to_string()
    } else {
        format!("{}/{}", folder_path, detail_link)
    }
}

/// Group per-file extraction results by containing folder. Input order is
/// preserved inside a folder; the groups themselves follow the scanner's
/// folder-path ordering.
pub fn group_records(extracted: Vec<(FileRecord, Vec<StockRow>)>) -> Vec<FolderGroup> {
    let mut groups: Vec<FolderGroup> = Vec::new();
    for (record, rows) in extracted {
        match groups.last_mut() {
            Some(group) if group.folder_path == record.folder_path => {
                group.rows.extend(rows);
            }
            _ => groups.push(FolderGroup {
                folder_path: record.folder_path,
                folder_name: record.folder_name,
                rows,
            }),
        }
    }
    groups
}

/// Public API: run the full scan → extract → group pipeline sequentially.
/// Used by programmatic consumers and tests; the CLI drives the same
/// pieces itself to interleave progress output and optional parallelism.
///
/// * `root` - directory tree to scan
/// * `report_filename` - exact file name to collect
/// * `ignore_set` - optional glob patterns to exclude
pub fn aggregate(
    root: &Path,
    report_filename: &str,
    ignore_set: Option<&globset::GlobSet>,
) -> Result<Aggregation, AggregateError> {
    let files = scanner::find_report_files(root, report_filename, ignore_set).map_err(|e| {
        AggregateError::Scan {
            root: root.to_path_buf(),
            source: e,
        }
    })?;
    if files.is_empty() {
        return Err(AggregateError::ScanEmpty {
            report: report_filename.to_string(),
            root: root.to_path_buf(),
        });
    }

    let mut extracted = Vec::with_capacity(files.len());
    for record in files {
        let rows = match extractor::parse_report_file(&record.full_path) {
            Ok(rows) => rows,
            Err(e) => {
                eprintln!("parse error {}: {:#}", record.full_path.display(), e);
                Vec::new()
            }
        };
        extracted.push((record, rows));
    }

    Ok(Aggregation::new(group_records(extracted)))
}
