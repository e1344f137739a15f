//! HTML sanitization.
//!
//! An allowlist pass built on `ammonia`'s defaults (no scripts, no event
//! handlers, no `javascript:` URLs). On top of the defaults it keeps:
//!
//! - task-list checkboxes (`<input type="checkbox" checked disabled>`)
//! - `class` on `<code>`, which carries the declared code-block language
//! - footnote anchors: `id` on `<div>` and in-page `href`s, both moved under
//!   [`FOOTNOTE_ID_PREFIX`] so they cannot collide with the host page
//! - optionally, inline `style` attributes from the rich-text editor
//!   (alignment, font family), minus anything that can load resources

use ammonia::Builder;
use std::borrow::Cow;

pub const FOOTNOTE_ID_PREFIX: &str = "fn-";

const FOOTNOTE_CLASSES: &[&str] = &[
    "footnote-reference",
    "footnote-definition",
    "footnote-definition-label",
];

pub struct Sanitizer {
    builder: Builder<'static>,
}

impl Sanitizer {
    pub fn new(allow_inline_styles: bool) -> Self {
        let mut builder = Builder::default();
        builder
            .add_tags(&["input"])
            .add_tag_attributes("input", &["type", "checked", "disabled"])
            .add_tag_attributes("code", &["class"])
            .add_tag_attributes("div", &["id", "class"])
            .add_tag_attributes("sup", &["class"]);
        if allow_inline_styles {
            builder.add_generic_attributes(&["style"]);
        }
        builder.attribute_filter(|element, attribute, value| match (element, attribute) {
            ("input", "type") if value != "checkbox" => None,
            (_, "style") if !is_safe_style(value) => None,
            ("div" | "sup", "class") if !FOOTNOTE_CLASSES.contains(&value) => None,
            ("div", "id") => Some(Cow::Owned(format!("{FOOTNOTE_ID_PREFIX}{value}"))),
            // Headings carry no ids, so in-page links can only target footnotes.
            ("a", "href") if value.starts_with('#') => Some(Cow::Owned(format!(
                "#{FOOTNOTE_ID_PREFIX}{}",
                &value[1..]
            ))),
            _ => Some(Cow::Borrowed(value)),
        });
        Self { builder }
    }

    pub fn clean(&self, html: &str) -> String {
        self.builder.clean(html).to_string()
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(true)
    }
}

fn is_safe_style(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    !(lower.contains("url(") || lower.contains("expression(") || lower.contains("@import"))
}
