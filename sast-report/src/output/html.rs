use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use sast_core::{Finding, FindingSummary, Severity};

use super::{write_file, Report};
use crate::ReportError;

const STYLE: &str = r"
  body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 2rem; background: #f5f5f5; }
  h1 { color: #333; }
  .summary { margin: 1rem 0; padding: 1rem; background: #fff; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
  table { border-collapse: collapse; width: 100%; background: #fff; border-radius: 8px; overflow: hidden; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
  th { background: #2c3e50; color: #fff; padding: 12px; text-align: left; }
  td { padding: 10px 12px; border-bottom: 1px solid #eee; vertical-align: top; }
  td.message { white-space: pre-wrap; }
  tr:hover { background: #f8f9fa; }
  .severity-error td:nth-child(2) { color: #e74c3c; font-weight: bold; }
  .severity-warning td:nth-child(2) { color: #f39c12; font-weight: bold; }
  .severity-info td:nth-child(2) { color: #3498db; }
  .severity-style td:nth-child(2) { color: #9b59b6; }
  .severity-note td:nth-child(2) { color: #7f8c8d; }
  .count { display: inline-block; padding: 4px 12px; border-radius: 12px; margin: 0 4px; font-weight: bold; }
  .count-error { background: #fde8e8; color: #e74c3c; }
  .count-warning { background: #fef3e2; color: #f39c12; }
  .count-total { background: #e8f4fd; color: #2980b9; }
  .count-defect { background: #eee; color: #333; font-weight: normal; }
  footer { margin-top: 1rem; color: #7f8c8d; font-size: 0.8rem; }
";

/// Write a self-contained `report.html`.
///
/// # Errors
/// Returns [`ReportError::Write`] if the file cannot be written.
pub async fn write(report: &Report<'_>, output_dir: &Path) -> Result<PathBuf, ReportError> {
    write_file(output_dir.join("report.html"), render(report)).await
}

/// Render the report page.
#[must_use]
pub fn render(report: &Report<'_>) -> String {
    let summary = FindingSummary::from_findings(report.findings);
    let project = html_escape(report.project_name);

    let mut defects = String::new();
    for (defect, count) in summary.defects() {
        let _ = write!(
            defects,
            r#"<span class="count count-defect" title="{cwe}: {desc}">{count} {defect}</span>"#,
            cwe = defect.cwe_tag(),
            desc = html_escape(defect.description()),
        );
    }

    let rows: String = report.findings.iter().map(row).collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>SAST Report - {project}</title>
<style>{STYLE}</style>
</head>
<body>
<h1>SAST Report: {project}</h1>
<div class="summary">
  <span class="count count-total">{total} findings</span>
  <span class="count count-error">{errors} errors</span>
  <span class="count count-warning">{warnings} warnings</span>
  {defects}
</div>
<table>
<thead>
<tr><th>Tool</th><th>Severity</th><th>File</th><th>Line</th><th>Rule</th><th>Defect</th><th>Message</th></tr>
</thead>
<tbody>
{rows}</tbody>
</table>
<footer>Analysis {id}</footer>
</body>
</html>
"#,
        total = summary.total,
        errors = summary.count(Severity::Error),
        warnings = summary.count(Severity::Warning),
        id = report.analysis_id,
    )
}

fn row(finding: &Finding) -> String {
    let line = finding
        .location
        .line
        .map_or_else(|| "-".to_owned(), |l| l.to_string());
    let defect = finding
        .defect
        .map_or_else(|| "-".to_owned(), |d| format!("{d} ({})", d.cwe_tag()));

    format!(
        r#"<tr class="severity-{sev}">
  <td>{tool}</td>
  <td>{sev}</td>
  <td>{file}</td>
  <td>{line}</td>
  <td>{rule}</td>
  <td>{defect}</td>
  <td class="message">{msg}</td>
</tr>
"#,
        sev = finding.severity,
        tool = html_escape(&finding.tool),
        file = html_escape(&finding.location.file.to_string_lossy()),
        rule = html_escape(finding.rule_id.as_deref().unwrap_or("-")),
        msg = html_escape(&finding.message),
    )
}

/// Escape text for use in HTML element content and attribute values.
#[must_use]
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::Fixture;

    #[test]
    fn page_contains_summary_and_rows() {
        let fx = Fixture::new("html_render");
        let page = render(&fx.report());

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>SAST Report - cpp_project</title>"));
        assert!(page.contains("2 findings"));
        assert!(page.contains("1 errors"));
        assert!(page.contains("1 warnings"));
        assert!(page.contains(r#"title="CWE-401: resource leak">1 memory-leak"#));
        assert!(page.contains("memory-leak (CWE-401)"));
        assert!(page.contains(r#"<tr class="severity-error">"#));
        assert!(page.contains("<td>cppcheck</td>"));
        assert!(page.contains("<td>semgrep</td>"));
    }

    #[test]
    fn finding_text_is_escaped() {
        let fx = Fixture::new("html_escape");
        let page = render(&fx.report());
        assert!(page.contains("Avoid &lt;gets&gt; &amp; &quot;friends&quot;"));
        assert!(!page.contains("<gets>"));
    }

    #[test]
    fn escape_handles_all_specials() {
        assert_eq!(html_escape(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
        assert_eq!(html_escape("plain"), "plain");
    }

    #[tokio::test]
    async fn writes_report_file() {
        let fx = Fixture::new("html_write");
        if let Err(e) = write(&fx.report(), &fx.dir).await {
            panic!("write failed: {e}");
        }
        assert!(fx.read("report.html").contains("SAST Report"));
    }

    proptest::proptest! {
        #[test]
        fn proptest_escaped_text_has_no_raw_specials(s in ".{0,256}") {
            let escaped = html_escape(&s);
            proptest::prop_assert!(!escaped.contains('<'));
            proptest::prop_assert!(!escaped.contains('>'));
            proptest::prop_assert!(!escaped.contains('"'));
        }
    }
}
