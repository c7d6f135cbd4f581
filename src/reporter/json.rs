//! JSON reporter for machine-readable output

use crate::{resolve_detail_link, Aggregation, FolderGroup, SummaryStats};
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
    /// Report filename used for per-folder report paths
    report_filename: String,
}

/// Lightweight per-row struct for the JSON payload: carries the computed
/// signal and the resolved link so consumers never re-derive either.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsRow {
    code: String,
    name: String,
    opinion: String,
    signal: String,
    href: String,
}

/// Lightweight per-folder struct for the JSON payload
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsGroup {
    folder_path: String,
    label: String,
    report_path: String,
    rows: Vec<JsRow>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsOutput<'a> {
    groups: Vec<JsGroup>,
    summary: &'a SummaryStats,
}

impl JsonReporter {
    pub fn new(report_filename: &str) -> Self {
        Self {
            pretty: false,
            report_filename: report_filename.to_string(),
        }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Report the full aggregation as JSON
    pub fn report(&self, agg: &Aggregation) -> String {
        let output = JsOutput {
            groups: agg.groups.iter().map(|g| self.to_js_group(g)).collect(),
            summary: &agg.stats,
        };

        if self.pretty {
            serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
        } else {
            serde_json::to_string(&output).unwrap_or_else(|_| "{}".to_string())
        }
    }

    fn to_js_group(&self, group: &FolderGroup) -> JsGroup {
        let rows = group
            .rows
            .iter()
            .map(|row| JsRow {
                code: row.code.clone(),
                name: row.name.clone(),
                opinion: row.opinion.clone(),
                signal: row.signal().to_string(),
                href: resolve_detail_link(&group.folder_path, &row.detail_link),
            })
            .collect();

        JsGroup {
            folder_path: group.folder_path.clone(),
            label: group.display_label(),
            report_path: group.report_path(&self.report_filename),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StockRow;

    fn make_aggregation() -> Aggregation {
        Aggregation::new(vec![FolderGroup {
            folder_path: "2024-03-15".into(),
            folder_name: "2024-03-15".into(),
            rows: vec![
                StockRow {
                    code: "005930".into(),
                    name: "삼성전자".into(),
                    opinion: "매수 고려".into(),
                    detail_link: "005930.html".into(),
                },
                StockRow {
                    code: "000660".into(),
                    name: "SK하이닉스".into(),
                    opinion: "검토 중".into(),
                    detail_link: String::new(),
                },
            ],
        }])
    }

    #[test]
    fn json_output_has_expected_keys() {
        let reporter = JsonReporter::new("목록.html");
        let json = reporter.report(&make_aggregation());
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        let groups = parsed["groups"].as_array().unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0]["label"], "2024년 03월 15일");
        assert_eq!(groups[0]["reportPath"], "2024-03-15/목록.html");

        let rows = groups[0]["rows"].as_array().unwrap();
        assert_eq!(rows[0]["signal"], "buy");
        assert_eq!(rows[0]["href"], "2024-03-15/005930.html");
        assert_eq!(rows[1]["signal"], "unrated");
        assert_eq!(rows[1]["href"], "#");

        assert_eq!(parsed["summary"]["rows"], 2);
        assert_eq!(parsed["summary"]["buy"], 1);
        assert_eq!(parsed["summary"]["unrated"], 1);
    }

    #[test]
    fn pretty_output_is_indented() {
        let reporter = JsonReporter::new("목록.html").pretty();
        let json = reporter.report(&make_aggregation());
        assert!(json.contains('\n'));
        assert!(json.contains("  "));
    }

    #[test]
    fn empty_aggregation_serializes() {
        let reporter = JsonReporter::new("목록.html");
        let json = reporter.report(&Aggregation::new(vec![]));
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed["groups"].as_array().unwrap().is_empty());
        assert_eq!(parsed["summary"]["folders"], 0);
    }
}
