//! HTML reporter: generates the self-contained consolidated index page
//!
//! All derived data (signal markers, statistics, folder links) is
//! rendered server-side; rows carry their signal as a data attribute and
//! the inline script only handles navigation and filtering from it.

use crate::{resolve_detail_link, Aggregation, FolderGroup};

/// Escapes text for embedding in HTML element or attribute content
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Reporter that generates the consolidated index document
pub struct HtmlReporter {
    /// Report filename used for the per-folder navigation anchors
    report_filename: String,
}

impl HtmlReporter {
    pub fn new(report_filename: &str) -> Self {
        Self {
            report_filename: report_filename.to_string(),
        }
    }

    /// Generate the full index document. Output is deterministic for a
    /// given aggregation; the visible page date comes from the client.
    pub fn report(&self, agg: &Aggregation) -> String {
        let mut html = String::with_capacity(32_768);
        html.push_str(Self::template_head());
        html.push_str("<body>\n<div class=\"container\">\n");
        html.push_str("<h1>📊 AI 분석 결과 통합 목록</h1>\n");
        html.push_str("<p class=\"meta\" id=\"meta\"></p>\n");
        self.render_stats(&mut html, agg);
        self.render_folder_links(&mut html, agg);
        Self::render_signal_filter(&mut html);
        for group in &agg.groups {
            self.render_section(&mut html, group);
        }
        html.push_str("</div>\n");
        html.push_str(Self::template_script());
        html.push_str("</body>\n</html>\n");
        html
    }

    fn render_stats(&self, html: &mut String, agg: &Aggregation) {
        let stats = &agg.stats;
        let cards = [
            (stats.classified(), "총 분석 종목"),
            (stats.buy, "매수 고려"),
            (stats.neutral, "관망"),
            (stats.sell, "매수 부적합"),
        ];
        html.push_str("<div class=\"summary-stats\">\n");
        for (value, label) in cards {
            html.push_str(&format!(
                "<div class=\"stat-card\"><div class=\"stat-number\">{}</div><div class=\"stat-label\">{}</div></div>\n",
                value, label
            ));
        }
        html.push_str("</div>\n");
    }

    fn render_folder_links(&self, html: &mut String, agg: &Aggregation) {
        html.push_str("<div class=\"quick-links\">\n<h3>📁 폴더별 분석 결과 바로가기</h3>\n<div class=\"folder-links\">\n");
        for group in &agg.groups {
            html.push_str(&format!(
                "<a href=\"{}\" class=\"folder-link\" target=\"_blank\">{}</a>\n",
                html_escape(&group.report_path(&self.report_filename)),
                html_escape(&group.display_label())
            ));
        }
        html.push_str("</div>\n</div>\n");
    }

    fn render_signal_filter(html: &mut String) {
        html.push_str(concat!(
            "<div class=\"pill-group\" id=\"signal-filter\">\n",
            "<button class=\"pill active\" data-signal=\"all\">전체</button>\n",
            "<button class=\"pill\" data-signal=\"buy\">✅ 매수 고려</button>\n",
            "<button class=\"pill\" data-signal=\"neutral\">🟡 관망</button>\n",
            "<button class=\"pill\" data-signal=\"sell\">🔴 매수 부적합</button>\n",
            "<button class=\"pill\" data-signal=\"unrated\">📊 미분류</button>\n",
            "</div>\n",
        ));
    }

    fn render_section(&self, html: &mut String, group: &FolderGroup) {
        html.push_str(&format!(
            "<div class=\"date-section\" data-date=\"{}\">\n",
            html_escape(&group.folder_path)
        ));
        html.push_str("<div class=\"date-header\">\n");
        html.push_str(&format!(
            "<h2 class=\"date-title\">📅 {} 분석 결과</h2>\n",
            html_escape(&group.display_label())
        ));
        html.push_str(&format!(
            "<a href=\"{}\" class=\"folder-link\" target=\"_blank\">📁 폴더 열기</a>\n",
            html_escape(&group.report_path(&self.report_filename))
        ));
        html.push_str("</div>\n<div class=\"date-content\">\n<table>\n");
        html.push_str(
            "<thead><tr><th>종목코드</th><th>종목명</th><th>최종 투자의견</th></tr></thead>\n<tbody>\n",
        );
        for row in &group.rows {
            let signal = row.signal();
            let href = resolve_detail_link(&group.folder_path, &row.detail_link);
            html.push_str(&format!(
                "<tr class=\"clickable\" data-signal=\"{}\" data-href=\"{}\">\
<td>{}</td>\
<td><a href=\"{}\">{}</a></td>\
<td>{} {}</td>\
</tr>\n",
                signal,
                html_escape(&href),
                html_escape(&row.code),
                html_escape(&href),
                html_escape(&row.name),
                signal.marker(),
                html_escape(&row.opinion)
            ));
        }
        html.push_str("</tbody>\n</table>\n</div>\n</div>\n");
    }

    // ─── HTML template pieces ────────────────────────────────────────────

    fn template_head() -> &'static str {
        r##"<!DOCTYPE html>
<html lang="ko">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>AI 분석 결과 통합 목록</title>
<style>
:root{--bg:#f4f6fb;--surface:#fff;--border:#e3e8f0;--header:#f7f9fc;--text:#2b3a55;--title:#3a405a;--muted:#6b7280;--blue:#3b82f6;--blue-dark:#2563eb;--hover:#e6f7ff;--radius:12px}
*{box-sizing:border-box;margin:0;padding:0}
body{font-family:'Pretendard','Noto Sans KR',Arial,sans-serif;background:var(--bg);color:var(--text);line-height:1.5}
.container{max-width:1200px;margin:40px auto;background:var(--surface);border-radius:18px;box-shadow:0 4px 24px 0 rgba(30,34,90,.08);padding:2.5rem 2rem 2rem}
h1{margin-bottom:.5rem;font-size:2.5rem;font-weight:700;letter-spacing:-1px;text-align:center}
.meta{text-align:center;color:var(--muted);font-size:.875rem;margin-bottom:2rem}
.summary-stats{display:flex;justify-content:space-around;margin-bottom:2rem;flex-wrap:wrap}
.stat-card{background:var(--surface);padding:1.5rem;border-radius:var(--radius);box-shadow:0 2px 8px rgba(0,0,0,.1);text-align:center;min-width:150px;margin:.5rem}
.stat-number{font-size:2rem;font-weight:700}
.stat-label{color:var(--muted);margin-top:.5rem}
.quick-links{text-align:center;margin-bottom:2rem}
.quick-links h3{color:var(--title);margin-bottom:.75rem}
.folder-link{display:inline-block;background:var(--blue);color:#fff;padding:.5rem 1rem;border-radius:8px;text-decoration:none;margin:.25rem;font-weight:500;transition:background-color .2s}
.folder-link:hover{background:var(--blue-dark)}
.pill-group{display:flex;justify-content:center;gap:4px;margin-bottom:2rem;flex-wrap:wrap}
.pill{padding:.4rem .9rem;font-size:.875rem;font-weight:600;border-radius:999px;cursor:pointer;border:1px solid var(--border);background:var(--surface);color:var(--muted);transition:all .15s}
.pill:hover{color:var(--text)}
.pill.active{background:var(--blue);border-color:var(--blue);color:#fff}
.date-section{margin-bottom:3rem;border:1px solid var(--border);border-radius:var(--radius);overflow:hidden}
.date-header{background:var(--header);padding:1rem 1.5rem;border-bottom:1px solid var(--border);display:flex;align-items:center;justify-content:space-between;flex-wrap:wrap;gap:.5rem}
.date-title{color:var(--title);font-size:1.3rem;font-weight:600}
.date-content{padding:1.5rem}
table{width:100%;border-collapse:separate;border-spacing:0;background:var(--surface);border-radius:var(--radius);overflow:hidden;box-shadow:0 1px 4px 0 rgba(30,34,90,.04)}
th,td{padding:14px 16px;text-align:left;font-size:1rem}
th{background:var(--header);color:var(--title);font-weight:600;border-bottom:1px solid var(--border)}
td{border-bottom:1px solid #f0f2f7}
tr:last-child td{border-bottom:none}
tr.clickable:hover{background:var(--hover);cursor:pointer}
td a{color:inherit;text-decoration:none}
@media(max-width:600px){
.container{padding:1rem .5rem;margin:20px auto}
h1{font-size:1.8rem}
.date-title{font-size:1.1rem}
th,td{font-size:.95rem;padding:10px 8px}
.summary-stats{flex-direction:column;align-items:center}
}
</style>
</head>
"##
    }

    fn template_script() -> &'static str {
        r##"<script>
(function(){
"use strict";
var meta=document.getElementById('meta');
if(meta) meta.textContent='통합 목록 · '+new Date().toLocaleDateString('ko-KR');
/* row click navigation */
document.querySelectorAll('tr.clickable').forEach(function(row){
  row.addEventListener('click',function(){
    var href=row.dataset.href;
    if(href&&href!=='#') window.location.href=href;
  });
});
/* signal filter: reads the server-computed data-signal only */
var pills=document.querySelectorAll('#signal-filter .pill');
pills.forEach(function(pill){
  pill.addEventListener('click',function(){
    pills.forEach(function(p){p.classList.remove('active')});
    pill.classList.add('active');
    var active=pill.dataset.signal;
    document.querySelectorAll('tr.clickable').forEach(function(row){
      row.style.display=(active==='all'||row.dataset.signal===active)?'':'none';
    });
  });
});
})();
</script>
"##
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StockRow;

    fn row(code: &str, name: &str, opinion: &str, link: &str) -> StockRow {
        StockRow {
            code: code.into(),
            name: name.into(),
            opinion: opinion.into(),
            detail_link: link.into(),
        }
    }

    fn make_aggregation() -> Aggregation {
        Aggregation::new(vec![
            FolderGroup {
                folder_path: "2024-03-15".into(),
                folder_name: "2024-03-15".into(),
                rows: vec![
                    row("005930", "삼성전자", "매수 고려", "005930.html"),
                    row("000660", "SK하이닉스", "관망", ""),
                    row("035720", "카카오", "매도 권고", "http://example.com/x"),
                ],
            },
            FolderGroup {
                folder_path: "misc".into(),
                folder_name: "misc".into(),
                rows: vec![
                    row("005380", "현대차", "적극 매수", "005380.html"),
                    row("051910", "LG화학", "검토 중", ""),
                ],
            },
        ])
    }

    #[test]
    fn report_contains_sections_in_order() {
        let html = HtmlReporter::new("분석결과_목록.html").report(&make_aggregation());
        assert!(html.contains("AI 분석 결과 통합 목록"));
        assert!(html.contains("📅 2024년 03월 15일 분석 결과"));
        assert!(html.contains("📅 misc 분석 결과"));
        let first = html.find("2024년 03월 15일").unwrap();
        let second = html.find("📅 misc").unwrap();
        assert!(first < second);
    }

    #[test]
    fn stat_cards_are_server_rendered() {
        let html = HtmlReporter::new("분석결과_목록.html").report(&make_aggregation());
        // 4 classified rows (검토 중 stays unrated): 2 buy, 1 neutral, 1 sell
        assert!(html.contains("<div class=\"stat-number\">4</div><div class=\"stat-label\">총 분석 종목</div>"));
        assert!(html.contains("<div class=\"stat-number\">2</div><div class=\"stat-label\">매수 고려</div>"));
        assert!(html.contains("<div class=\"stat-number\">1</div><div class=\"stat-label\">관망</div>"));
        assert!(html.contains("<div class=\"stat-number\">1</div><div class=\"stat-label\">매수 부적합</div>"));
    }

    #[test]
    fn rows_carry_signal_and_marker() {
        let html = HtmlReporter::new("분석결과_목록.html").report(&make_aggregation());
        assert!(html.contains("data-signal=\"buy\""));
        assert!(html.contains("data-signal=\"neutral\""));
        assert!(html.contains("data-signal=\"sell\""));
        assert!(html.contains("data-signal=\"unrated\""));
        assert!(html.contains("✅ 매수 고려"));
        assert!(html.contains("🟡 관망"));
        assert!(html.contains("🔴 매도 권고"));
        assert!(html.contains("📊 검토 중"));
    }

    #[test]
    fn links_resolved_per_folder() {
        let html = HtmlReporter::new("분석결과_목록.html").report(&make_aggregation());
        assert!(html.contains("href=\"2024-03-15/005930.html\""));
        assert!(html.contains("href=\"misc/005380.html\""));
        // absolute link passes through unmodified
        assert!(html.contains("href=\"http://example.com/x\""));
        // empty link renders a placeholder anchor
        assert!(html.contains("data-href=\"#\""));
        // folder navigation anchors
        assert!(html.contains("href=\"2024-03-15/분석결과_목록.html\""));
        assert!(html.contains("href=\"misc/분석결과_목록.html\""));
    }

    #[test]
    fn row_text_is_escaped() {
        let agg = Aggregation::new(vec![FolderGroup {
            folder_path: "x".into(),
            folder_name: "x".into(),
            rows: vec![row("1", "<b>악성</b>", "매수 & \"보유\"", "a<b>.html")],
        }]);
        let html = HtmlReporter::new("목록.html").report(&agg);
        assert!(html.contains("&lt;b&gt;악성&lt;/b&gt;"));
        assert!(html.contains("매수 &amp; &quot;보유&quot;"));
        assert!(html.contains("x/a&lt;b&gt;.html"));
        assert!(!html.contains("<b>악성</b>"));
    }

    #[test]
    fn output_is_deterministic() {
        let reporter = HtmlReporter::new("분석결과_목록.html");
        let agg = make_aggregation();
        assert_eq!(reporter.report(&agg), reporter.report(&agg));
    }

    #[test]
    fn html_escape_covers_metacharacters() {
        assert_eq!(
            html_escape(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
        );
        assert_eq!(html_escape("평범한 텍스트"), "평범한 텍스트");
    }
}
