//! Standalone HTML documents for exported notes.

use super::Rendered;
use html_escape::encode_text;

const BASE_CSS: &str = r#"
body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Noto Sans CJK TC", sans-serif;
    line-height: 1.6;
    max-width: 800px;
    margin: 2rem auto;
    padding: 0 1rem;
    color: #1f2328;
}
.prose h1, .prose h2, .prose h3 { line-height: 1.25; }
.prose blockquote {
    margin: 0;
    padding-left: 1rem;
    border-left: 4px solid #d0d7de;
    color: #59636e;
}
.prose table { border-collapse: collapse; }
.prose th, .prose td { border: 1px solid #d0d7de; padding: 4px 12px; }
.prose pre.code-block {
    padding: 1rem;
    border-radius: 6px;
    overflow-x: auto;
}
.prose code { font-family: ui-monospace, SFMono-Regular, Menlo, monospace; }
.prose li input[type="checkbox"] { margin-right: 0.5em; }
"#;

/// Wraps a rendered body in a complete HTML document.
/// `highlight_css` is the theme stylesheet for highlighted code blocks.
pub fn render_page(title: &str, rendered: &Rendered, highlight_css: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="generator" content="jotter">
    <title>{title}</title>
    <style>{base}
{highlight}</style>
</head>
<body>
<article data-format="{format}">
{body}</article>
</body>
</html>
"#,
        title = encode_text(title),
        base = BASE_CSS,
        highlight = highlight_css,
        format = rendered.format,
        body = rendered.html,
    )
}
