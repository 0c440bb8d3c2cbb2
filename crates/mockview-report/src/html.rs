//! HTML report generator.
//!
//! Produces self-contained HTML files with all CSS/JS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use mockview_core::feedback::ScoreBand;
use mockview_core::report::GradeReport;
use mockview_core::session::InterviewSession;

/// Escape a string for safe HTML insertion.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn band_class(band: ScoreBand) -> &'static str {
    match band {
        ScoreBand::High => "high",
        ScoreBand::Medium => "medium",
        ScoreBand::Low => "low",
    }
}

/// Multi-line text as HTML paragraphs.
fn paragraphs(text: &str) -> String {
    text.split("\n\n")
        .filter(|p| !p.trim().is_empty())
        .map(|p| format!("<p>{}</p>", html_escape(p.trim()).replace('\n', "<br>")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn page_open(html: &mut String, title: &str) {
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");
}

/// Generate an HTML report from a grade report.
pub fn generate_html(report: &GradeReport) -> String {
    let mut html = String::new();
    page_open(&mut html, &format!("mockview report: {}", report.sheet.name));

    html.push_str("<header>\n");
    html.push_str("<h1>mockview grade report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Sheet: <strong>{}</strong> | {} | {} | {} answers | {} / {} | {}</p>\n",
        html_escape(&report.sheet.name),
        report.sheet.domain,
        report.sheet.difficulty,
        report.sheet.answer_count,
        html_escape(&report.provider),
        html_escape(&report.model),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    let overall = &report.stats.overall;
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Group</th><th>Answers</th><th>Mean</th><th>Median</th><th>Min</th><th>Max</th><th>High / Medium / Low</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    let groups = std::iter::once(("All answers", overall))
        .chain(report.stats.per_tag.iter().map(|(t, s)| (t.as_str(), s)));
    for (label, s) in groups {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{:.1}</td><td>{:.1}</td><td>{:.1}</td><td>{:.1}</td><td>{} / {} / {}</td></tr>\n",
            html_escape(label),
            s.count,
            s.mean,
            s.median,
            s.min,
            s.max,
            s.bands.high,
            s.bands.medium,
            s.bands.low,
        ));
    }
    html.push_str("</tbody></table>\n");
    if overall.lexical_fallbacks > 0 {
        html.push_str(&format!(
            "<p class=\"meta\">{} answers were scored with lexical similarity because the embedder failed.</p>\n",
            overall.lexical_fallbacks
        ));
    }

    if !report.results.is_empty() {
        let scores: Vec<(&str, f64, ScoreBand)> = report
            .results
            .iter()
            .map(|r| (r.answer_id.as_str(), r.score(), r.evaluation.band))
            .collect();
        html.push_str(&generate_bar_chart(&scores));
    }
    html.push_str("</section>\n");

    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Results</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Answer</th><th onclick=\"sortTable(1)\">Score</th><th onclick=\"sortTable(2)\">Similarity</th><th onclick=\"sortTable(3)\">Relevance</th><th onclick=\"sortTable(4)\">Quality</th><th>Concepts</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for r in &report.results {
        let e = &r.evaluation;
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{:.1}</td><td>{:.2}</td><td>{:.2}</td><td>{:.2}</td><td>{}</td></tr>\n",
            band_class(e.band),
            html_escape(&r.answer_id),
            e.score,
            e.semantic_similarity,
            e.relevance,
            e.quality.score,
            html_escape(&e.found_concepts.join(", ")),
        ));
    }
    html.push_str("</tbody></table>\n");

    for r in &report.results {
        html.push_str("<details>\n");
        html.push_str(&format!(
            "<summary>{}: {}</summary>\n",
            html_escape(&r.answer_id),
            html_escape(&r.question)
        ));
        html.push_str(&format!(
            "<blockquote>{}</blockquote>\n",
            paragraphs(&r.response)
        ));
        html.push_str(&format!(
            "<div class=\"feedback {}\">{}</div>\n",
            band_class(r.evaluation.band),
            paragraphs(&r.evaluation.feedback)
        ));
        html.push_str("</details>\n");
    }
    html.push_str("</section>\n");

    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(report).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML grade report to a file.
pub fn write_html_report(report: &GradeReport, path: &Path) -> Result<()> {
    write_file(path, &generate_html(report))
}

/// Render an interview session as HTML.
pub fn transcript_html(session: &InterviewSession) -> String {
    let mut html = String::new();
    page_open(&mut html, &format!("mockview interview: {}", session.domain));

    html.push_str("<header>\n");
    html.push_str("<h1>mockview interview</h1>\n");
    let specialization = session
        .specialization
        .as_deref()
        .map(|s| format!(" ({})", html_escape(s)))
        .unwrap_or_default();
    html.push_str(&format!(
        "<p class=\"meta\">{}{} | {} | started {}</p>\n",
        session.domain,
        specialization,
        session.difficulty,
        session.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    let progress = session.progress();
    if let Some(average) = progress.average_score {
        html.push_str(&format!(
            "<p class=\"meta\">{} answered, {} skipped | average {:.1} | best {:.1}</p>\n",
            progress.answered,
            progress.skipped,
            average,
            progress.best_score.unwrap_or(average)
        ));
    }
    html.push_str("</header>\n");

    if session.turns.is_empty() {
        html.push_str("<p>No questions answered yet.</p>\n");
    }

    for (i, turn) in session.turns.iter().enumerate() {
        let e = &turn.evaluation;
        html.push_str(&format!(
            "<section class=\"turn {}\">\n",
            band_class(e.band)
        ));
        html.push_str(&format!(
            "<h2>Question {}</h2>\n<p class=\"question\">{}</p>\n",
            i + 1,
            html_escape(&turn.question.text)
        ));
        html.push_str(&format!(
            "<blockquote>{}</blockquote>\n",
            paragraphs(&turn.response)
        ));
        html.push_str(&format!(
            "<p class=\"score\">Score: <strong>{:.1}/10</strong></p>\n",
            e.score
        ));
        html.push_str(&format!(
            "<div class=\"feedback {}\">{}</div>\n",
            band_class(e.band),
            paragraphs(&e.feedback)
        ));
        html.push_str("</section>\n");
    }

    html.push_str("</body>\n</html>");
    html
}

/// Write an interview transcript as HTML.
pub fn write_transcript_html(session: &InterviewSession, path: &Path) -> Result<()> {
    write_file(path, &transcript_html(session))
}

pub(crate) fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

fn generate_bar_chart(scores: &[(&str, f64, ScoreBand)]) -> String {
    let bar_height = 24;
    let max_width = 400;
    let padding = 8;
    let label_width = 200;

    let total_height = scores.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (label, score, band)) in scores.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = (score / 10.0 * max_width as f64) as usize;

        let color = match band {
            ScoreBand::High => "#22c55e",
            ScoreBand::Medium => "#eab308",
            ScoreBand::Low => "#ef4444",
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(label)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            score
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --high: #dcfce7; --medium: #fef9c3; --low: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --high: #064e3b; --medium: #713f12; --low: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); max-width: 64rem; }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.high { background: var(--high); }
.medium { background: var(--medium); }
.low { background: var(--low); }
.turn { background: none; border-left: 4px solid var(--border); padding-left: 1rem; }
.question { font-weight: bold; }
.feedback { padding: 0.5rem 1rem; border-radius: 8px; }
blockquote { margin: 1rem 0; padding-left: 1rem; border-left: 3px solid var(--border); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    const na = parseFloat(va), nb = parseFloat(vb);
    const cmp = isNaN(na) || isNaN(nb) ? va.localeCompare(vb) : na - nb;
    return asc ? cmp : -cmp;
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
