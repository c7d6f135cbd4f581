//! Stock row extraction from report HTML

use crate::StockRow;
use anyhow::{Context, Result};
use scraper::{ElementRef, Html, Selector};
use std::path::Path;

/// Read and extract one report file. The caller treats any error here as
/// zero rows for the file and keeps going; the batch never aborts on a
/// single bad report.
pub fn parse_report_file(path: &Path) -> Result<Vec<StockRow>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(extract_rows(&content))
}

/// Extract stock rows from report HTML. Only the first table in the
/// document is read; the first row is assumed to be the header; rows with
/// fewer than three cells are skipped silently.
pub fn extract_rows(html: &str) -> Vec<StockRow> {
    let document = Html::parse_document(html);

    let (Ok(table_sel), Ok(tr_sel), Ok(td_sel), Ok(a_sel)) = (
        Selector::parse("table"),
        Selector::parse("tr"),
        Selector::parse("td"),
        Selector::parse("a"),
    ) else {
        return Vec::new();
    };

    let Some(table) = document.select(&table_sel).next() else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    for tr in table.select(&tr_sel).skip(1) {
        let cells: Vec<ElementRef> = tr.select(&td_sel).collect();
        if cells.len() < 3 {
            continue;
        }

        let detail_link = cells[1]
            .select(&a_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .unwrap_or("")
            .to_string();

        rows.push(StockRow {
            code: cell_text(&cells[0]),
            name: cell_text(&cells[1]),
            opinion: cell_text(&cells[2]),
            detail_link,
        });
    }
    rows
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}
