//! Dashboard page
//!
//! One self-contained HTML document: title, data-source link, the summary
//! table, the category selector, the trend chart, and the question table.
//! The page is rendered for the "All" selection; a small inline script
//! refreshes the chart and question table from the API when the selector
//! changes.

use crate::polls::{HighlightRule, QuestionTable, SummaryTable};

use super::{escape_html, format_significant};

/// Everything the page needs, borrowed from the shared state
pub struct PageContext<'a> {
    pub title: &'a str,
    pub source_url: &'a str,
    /// Path prefix the app is mounted under ("" or "/segment")
    pub base_path: &'a str,
    pub summary: &'a SummaryTable,
    pub options: &'a [String],
    pub questions: &'a QuestionTable,
    pub chart_svg: &'a str,
}

/// Render the full dashboard page
pub fn render_page(ctx: &PageContext<'_>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        <h1>{title}</h1>
        <h6>Data Source: <a href="{source}" target="_blank">FiveThirtyEight</a></h6>
        {summary}
        <h3>Trend Over Time</h3>
        <label for="category-dropdown">Select Category:</label>
        {selector}
        <div id="trend-graph">{chart}</div>
        <h3>Questions for Selected Category</h3>
        {questions}
    </div>
    <script>const BASE_PATH = "{base}";{js}</script>
</body>
</html>"#,
        title = escape_html(ctx.title),
        source = escape_html(ctx.source_url),
        css = inline_css(),
        summary = render_summary_table(ctx.summary),
        selector = render_selector(ctx.options),
        chart = ctx.chart_svg,
        questions = render_questions_table(ctx.questions),
        base = escape_js(ctx.base_path),
        js = inline_javascript(),
    )
}

fn render_summary_table(table: &SummaryTable) -> String {
    let rows: String = table
        .rows
        .iter()
        .map(|row| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td{}>{}</td></tr>",
                escape_html(&row.category),
                format_significant(row.yes),
                format_significant(row.no),
                net_style(&table.highlights, row.net),
                format_significant(row.net),
            )
        })
        .collect();

    format!(
        r#"<div class="table-wrap"><table id="data-table">
<thead><tr><th>Category</th><th>Yes %</th><th>No %</th><th>Net %</th></tr></thead>
<tbody>{}</tbody>
</table></div>"#,
        rows
    )
}

fn render_selector(options: &[String]) -> String {
    let options: String = options
        .iter()
        .enumerate()
        .map(|(idx, option)| {
            let value = escape_html(option);
            let selected = if idx == 0 { " selected" } else { "" };
            format!(r#"<option value="{v}"{s}>{v}</option>"#, v = value, s = selected)
        })
        .collect();

    format!(r#"<select id="category-dropdown">{}</select>"#, options)
}

fn render_questions_table(table: &QuestionTable) -> String {
    let rows: String = table
        .rows
        .iter()
        .map(|row| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td{}>{}</td></tr>",
                escape_html(&row.question),
                escape_html(&row.dates),
                row.yes,
                row.no,
                net_style(&table.highlights, row.net),
                row.net,
            )
        })
        .collect();

    format!(
        r#"<div class="table-wrap"><table id="questions-table">
<thead><tr><th>Question</th><th>Dates</th><th>Yes %</th><th>No %</th><th>Net %</th></tr></thead>
<tbody>{}</tbody>
</table></div>"#,
        rows
    )
}

/// Style attribute from the first rule keyed by exactly this net
fn net_style(rules: &[HighlightRule], net: f64) -> String {
    rules
        .iter()
        .find(|rule| rule.net == net)
        .map(|rule| {
            format!(
                r#" style="background-color: {}; color: {}""#,
                rule.background, rule.color
            )
        })
        .unwrap_or_default()
}

fn escape_js(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('<', "\\u003c")
}

/// Inline CSS styles
fn inline_css() -> &'static str {
    r#"
body {
    margin: 0;
    background: #ffffff;
}

.container {
    font-family: Arial, sans-serif;
    max-width: 900px;
    margin: auto;
    padding: 20px;
    background-color: #f9f9f9;
    border-radius: 10px;
    box-shadow: 0px 4px 10px rgba(0, 0, 0, 0.1);
}

h1 {
    text-align: center;
    color: #333;
}

h6 {
    text-align: center;
    color: #666;
}

h3 {
    text-align: center;
    margin-top: 30px;
}

label {
    font-size: 16px;
    font-weight: bold;
    display: block;
}

select {
    width: 100%;
    padding: 8px;
    margin-bottom: 20px;
}

.table-wrap {
    overflow-x: auto;
}

table {
    width: 100%;
    border-collapse: collapse;
}

th {
    background-color: #007bff;
    color: white;
    font-weight: bold;
    text-align: center;
    padding: 10px;
}

td {
    background-color: #fff;
    color: #333;
    border: 1px solid #ddd;
    padding: 10px;
    text-align: center;
    white-space: normal;
}

#trend-graph {
    border: 1px solid #ddd;
    border-radius: 5px;
    padding: 10px;
    background: #fff;
}
"#
}

/// Inline JavaScript for the selector
fn inline_javascript() -> &'static str {
    r#"
(function () {
    const dropdown = document.getElementById('category-dropdown');
    const graph = document.getElementById('trend-graph');
    const questions = document.querySelector('#questions-table tbody');

    function cell(text, style) {
        const td = document.createElement('td');
        td.textContent = text;
        if (style) {
            td.style.backgroundColor = style.background;
            td.style.color = style.color;
        }
        return td;
    }

    function query(category) {
        return '?category=' + encodeURIComponent(category);
    }

    async function refresh() {
        const category = dropdown.value;

        const svg = await fetch(BASE_PATH + '/api/trend.svg' + query(category));
        if (svg.ok) {
            graph.innerHTML = await svg.text();
        }

        const res = await fetch(BASE_PATH + '/api/questions' + query(category));
        if (!res.ok) {
            return;
        }
        const table = await res.json();
        questions.replaceChildren();
        for (const row of table.rows) {
            const rule = table.highlights.find(r => r.net === row.net);
            const tr = document.createElement('tr');
            tr.appendChild(cell(row.question));
            tr.appendChild(cell(row.dates));
            tr.appendChild(cell(String(row.yes)));
            tr.appendChild(cell(String(row.no)));
            tr.appendChild(cell(String(row.net), rule));
            questions.appendChild(tr);
        }
    }

    dropdown.addEventListener('change', refresh);
})();
"#
}
