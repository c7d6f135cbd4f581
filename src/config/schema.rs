//! Config schema and deserialization

use crate::{DEFAULT_OUTPUT_FILENAME, DEFAULT_REPORT_FILENAME};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root config structure for .moarc.json
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Exact file name of the per-folder reports to collect
    #[serde(default)]
    pub report_filename: Option<String>,

    /// Destination of the generated index (relative paths resolve
    /// against the scan root)
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Glob patterns for folders/files to exclude from the scan
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(
        mut self,
        cli_report_filename: Option<String>,
        cli_output: Option<PathBuf>,
    ) -> Self {
        if cli_report_filename.is_some() {
            self.report_filename = cli_report_filename;
        }
        if cli_output.is_some() {
            self.output = cli_output;
        }
        self
    }

    pub fn report_filename(&self) -> &str {
        self.report_filename
            .as_deref()
            .unwrap_or(DEFAULT_REPORT_FILENAME)
    }

    /// Destination path, resolved against the scan root unless absolute.
    pub fn output_path(&self, root: &Path) -> PathBuf {
        let output = self
            .output
            .as_deref()
            .unwrap_or(Path::new(DEFAULT_OUTPUT_FILENAME));
        if output.is_absolute() {
            output.to_path_buf()
        } else {
            root.join(output)
        }
    }
}
