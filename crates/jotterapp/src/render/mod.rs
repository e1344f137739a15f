//! # Content Renderer
//!
//! Turns note content into safe, styled HTML.
//!
//! ## Pipeline
//!
//! ```text
//!  Markdown ──▶ pulldown-cmark ──▶ sanitize ──▶ highlight ──▶ <div class="prose">
//!  HTML     ─────────────────────▶ sanitize ──▶ highlight ──▶ <div class="prose">
//! ```
//!
//! Both formats go through the same sanitizer, since both end up in the same
//! rendering surface. With `sanitize_html` switched off the HTML path falls
//! back to direct injection: the content is placed in the container as-is.
//!
//! ## Choosing a Path
//!
//! - [`ContentRenderer::render_note`] uses the note's stored format.
//! - [`ContentRenderer::render_as`] forces a format.
//! - [`ContentRenderer::render`] sniffs untagged strings with
//!   [`ContentFormat::sniff`] (both `<` and `>` present means HTML).
//!
//! Rendering never fails: malformed Markdown comes out as literal text and a
//! block that cannot be highlighted comes out as plain escaped code.

use crate::model::{ContentFormat, Note};
use serde::Serialize;
use tracing::instrument;

pub mod detect;
pub mod highlight;
pub mod markdown;
pub mod page;
pub mod sanitize;

use highlight::Highlighter;
use sanitize::Sanitizer;

/// CSS class of the container wrapped around every rendered body.
pub const CONTAINER_CLASS: &str = "prose";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// syntect theme used for the highlight stylesheet.
    pub theme: String,
    /// Run HTML content through the sanitizer (Markdown always is).
    pub sanitize_html: bool,
    /// Keep inline `style` attributes from the rich-text editor.
    pub allow_inline_styles: bool,
    /// Guess the language of code blocks that do not declare one.
    pub detect_language: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: highlight::DEFAULT_THEME.to_string(),
            sanitize_html: true,
            allow_inline_styles: true,
            detect_language: true,
        }
    }
}

/// Output of a render: the path taken and the wrapped HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rendered {
    pub format: ContentFormat,
    pub html: String,
}

pub struct ContentRenderer {
    options: RenderOptions,
    sanitizer: Sanitizer,
    highlighter: Highlighter,
}

impl Default for ContentRenderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl ContentRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            sanitizer: Sanitizer::new(options.allow_inline_styles),
            highlighter: Highlighter::new(options.detect_language),
            options,
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Renders untagged content, picking the path by sniffing.
    pub fn render(&self, content: &str) -> Rendered {
        self.render_as(content, ContentFormat::sniff(content))
    }

    pub fn render_note(&self, note: &Note) -> Rendered {
        self.render_as(&note.content, note.format)
    }

    #[instrument(level = "debug", skip(self, content), fields(len = content.len()))]
    pub fn render_as(&self, content: &str, format: ContentFormat) -> Rendered {
        let body = match format {
            ContentFormat::Markdown => {
                let raw = markdown::to_html(content);
                let clean = self.sanitizer.clean(&raw);
                self.highlighter.highlight_blocks(&clean)
            }
            ContentFormat::Html if self.options.sanitize_html => {
                let clean = self.sanitizer.clean(content);
                self.highlighter.highlight_blocks(&clean)
            }
            ContentFormat::Html => content.to_string(),
        };

        Rendered {
            format,
            html: wrap(&body),
        }
    }

    /// Stylesheet for highlighted code in the configured theme.
    pub fn theme_css(&self) -> String {
        highlight::theme_css(&self.options.theme)
    }
}

fn wrap(body: &str) -> String {
    let mut out = String::with_capacity(body.len() + 32);
    out.push_str("<div class=\"");
    out.push_str(CONTAINER_CLASS);
    out.push_str("\">\n");
    out.push_str(body);
    if !body.is_empty() && !body.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("</div>\n");
    out
}
