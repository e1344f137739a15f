//! Markdown → HTML transform.
//!
//! Dialect: CommonMark plus tables, strikethrough, task lists and footnotes.
//! pulldown-cmark never rejects input; anything it cannot parse as structure
//! comes out as literal text.

use pulldown_cmark::{html, Options, Parser};

pub fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

/// Converts Markdown source to an (unsanitized) HTML fragment. Raw HTML in
/// the source is passed through; the sanitizer deals with it afterwards.
pub fn to_html(source: &str) -> String {
    let parser = Parser::new_ext(source, options());
    let mut out = String::with_capacity(source.len() + source.len() / 2);
    html::push_html(&mut out, parser);
    out
}
