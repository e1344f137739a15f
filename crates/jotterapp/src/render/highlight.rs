//! Syntax highlighting of code blocks.
//!
//! Runs over already-sanitized HTML and rewrites every `<pre><code>` block
//! into class-annotated markup (`<span class="hl-...">`). Colors come from a
//! theme stylesheet, see [`theme_css`].
//!
//! Language resolution, in order:
//! 1. the declared fence language (`class="language-x"`), through [`alias`]
//! 2. syntect's first-line detection (shebangs, `<?php`, ...)
//! 3. marker scoring in [`guess_language`]
//!
//! A block that resolves to nothing is emitted as escaped plain text.

use super::detect::{alias, guess_language};
use html_escape::{decode_html_entities, encode_text};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use tracing::{trace, warn};

pub const DEFAULT_THEME: &str = "base16-ocean.dark";

const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: "hl-" };

static SYNTAXES: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEMES: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);
static CODE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<pre><code(?: class="([^"]*)")?>(.*?)</code></pre>"#)
        .expect("code block pattern is valid")
});

#[derive(Debug, Clone, Copy)]
pub struct Highlighter {
    detect_language: bool,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Highlighter {
    pub fn new(detect_language: bool) -> Self {
        Self { detect_language }
    }

    /// Highlights every `<pre><code>` block in an HTML fragment.
    pub fn highlight_blocks(&self, html: &str) -> String {
        CODE_BLOCK
            .replace_all(html, |caps: &Captures| {
                let declared = caps.get(1).and_then(|m| declared_language(m.as_str()));
                let code = decode_html_entities(caps.get(2).map_or("", |m| m.as_str()));
                self.highlight_block(&code, declared)
            })
            .into_owned()
    }

    /// Highlights one block of raw (unescaped) source code.
    pub fn highlight_block(&self, code: &str, declared: Option<&str>) -> String {
        let Some((label, syntax)) = self.resolve(code, declared) else {
            return plain_block(code, declared);
        };
        trace!(language = %label, syntax = %syntax.name, "Highlighting code block");

        match classed_html(code, syntax) {
            Ok(spans) => format!(
                "<pre class=\"code-block\"><code class=\"highlight language-{}\">{}</code></pre>",
                encode_text(&label),
                spans
            ),
            Err(e) => {
                warn!(language = %label, error = %e, "Highlighting failed, falling back to plain text");
                plain_block(code, declared)
            }
        }
    }

    fn resolve(
        &self,
        code: &str,
        declared: Option<&str>,
    ) -> Option<(String, &'static SyntaxReference)> {
        if let Some(lang) = declared {
            if let Some(syntax) = syntax_for(lang) {
                return Some((lang.to_string(), syntax));
            }
        }
        if !self.detect_language {
            return None;
        }

        let first_line = code.lines().next().unwrap_or_default();
        if let Some(syntax) = SYNTAXES.find_syntax_by_first_line(first_line) {
            let label = syntax
                .file_extensions
                .first()
                .cloned()
                .unwrap_or_else(|| syntax.name.to_lowercase());
            return Some((label, syntax));
        }

        let (label, token) = guess_language(code)?;
        SYNTAXES
            .find_syntax_by_token(token)
            .map(|syntax| (label.to_string(), syntax))
    }
}

/// Stylesheet for the `hl-` classes in the named theme. Unknown names fall
/// back to [`DEFAULT_THEME`].
pub fn theme_css(theme_name: &str) -> String {
    let theme = THEMES
        .themes
        .get(theme_name)
        .or_else(|| THEMES.themes.get(DEFAULT_THEME));
    let Some(theme) = theme else {
        return String::new();
    };
    match css_for_theme_with_class_style(theme, CLASS_STYLE) {
        Ok(css) => css,
        Err(e) => {
            warn!(theme = %theme_name, error = %e, "Could not build theme stylesheet");
            String::new()
        }
    }
}

fn declared_language(class: &str) -> Option<&str> {
    class
        .split_whitespace()
        .find_map(|c| c.strip_prefix("language-"))
        .filter(|lang| !lang.is_empty())
}

fn syntax_for(lang: &str) -> Option<&'static SyntaxReference> {
    let lower = lang.to_ascii_lowercase();
    SYNTAXES.find_syntax_by_token(alias(&lower))
}

fn classed_html(code: &str, syntax: &SyntaxReference) -> Result<String, syntect::Error> {
    let mut generator = ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAXES, CLASS_STYLE);
    for line in LinesWithEndings::from(code) {
        generator.parse_html_for_line_which_includes_newline(line)?;
    }
    Ok(generator.finalize())
}

fn plain_block(code: &str, declared: Option<&str>) -> String {
    match declared {
        Some(lang) => format!(
            "<pre class=\"code-block\"><code class=\"language-{}\">{}</code></pre>",
            encode_text(lang),
            encode_text(code)
        ),
        None => format!(
            "<pre class=\"code-block\"><code>{}</code></pre>",
            encode_text(code)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_language_is_highlighted() {
        let html = r#"<pre><code class="language-rust">fn main() {}
</code></pre>"#;
        let out = Highlighter::default().highlight_blocks(html);
        assert!(out.contains(r#"class="highlight language-rust""#));
        assert!(out.contains(r#"<span class="hl-"#));
        assert!(!out.contains("<pre><code"));
    }

    #[test]
    fn alias_resolves_typescript() {
        let out = Highlighter::default()
            .highlight_block("const x = (a: number) => a;\n", Some("typescript"));
        assert!(out.contains("language-typescript"));
        assert!(out.contains("hl-"));
    }

    #[test]
    fn undeclared_language_is_detected() {
        let html = "<pre><code>fn main() {\n    let mut n = 1;\n    println!(\"{}\", n);\n}\n</code></pre>";
        let out = Highlighter::default().highlight_blocks(html);
        assert!(out.contains("language-rust"));
        assert!(out.contains(r#"<span class="hl-"#));
    }

    #[test]
    fn shebang_uses_first_line_detection() {
        let out = Highlighter::default().highlight_block("#!/bin/bash\nls -la\n", None);
        assert!(out.contains("class=\"highlight language-"));
    }

    #[test]
    fn unknown_language_without_signal_is_plain() {
        let out = Highlighter::default().highlight_block("just words here\n", Some("klingon"));
        assert_eq!(
            out,
            "<pre class=\"code-block\"><code class=\"language-klingon\">just words here\n</code></pre>"
        );
    }

    #[test]
    fn detection_can_be_disabled() {
        let code = "fn main() {\n    let mut n = 1;\n    println!(\"{}\", n);\n}\n";
        let out = Highlighter::new(false).highlight_block(code, None);
        assert!(!out.contains("hl-"));
    }

    #[test]
    fn entities_are_decoded_before_highlighting() {
        let html = r#"<pre><code class="language-rust">let v: Vec&lt;u8&gt; = vec![];
</code></pre>"#;
        let out = Highlighter::default().highlight_blocks(html);
        assert!(out.contains("&lt;"));
        assert!(!out.contains("&amp;lt;"));
    }

    #[test]
    fn leaves_surrounding_html_alone() {
        let html = "<p>before</p><pre><code>x</code></pre><p>after</p>";
        let out = Highlighter::default().highlight_blocks(html);
        assert!(out.starts_with("<p>before</p>"));
        assert!(out.ends_with("<p>after</p>"));
    }

    #[test]
    fn theme_css_has_rules() {
        let css = theme_css(DEFAULT_THEME);
        assert!(css.contains(".hl-"));
        assert_eq!(theme_css("no-such-theme"), css);
    }
}
